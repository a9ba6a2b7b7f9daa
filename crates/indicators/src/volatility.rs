//! Dispersion indicators: population standard deviation and Bollinger Bands.

use crate::moving_average::sma;
use fusion_trade_core::{Error, Result};

/// Population standard deviation of the whole series.
///
/// # Errors
/// Returns `InsufficientData` for an empty series.
pub fn std_dev(series: &[f64]) -> Result<f64> {
    if series.is_empty() {
        return Err(Error::InsufficientData {
            required: 1,
            actual: 0,
        });
    }

    let n = series.len() as f64;
    let mean = series.iter().sum::<f64>() / n;
    let variance = series.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
    Ok(variance.sqrt())
}

/// Output of [`bollinger_bands`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BollingerBands {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

impl BollingerBands {
    /// Band width, `upper - lower`.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

/// Bollinger Bands over the last `period` samples.
///
/// The middle band is the SMA; the deviation uses population variance
/// (divide by `period`), so the bands are symmetric:
/// `upper - middle == middle - lower`.
///
/// # Errors
/// Returns `InsufficientData` if the series is shorter than `period`, and
/// `InvalidArgument` for a zero period or negative `k`.
pub fn bollinger_bands(series: &[f64], period: usize, k: f64) -> Result<BollingerBands> {
    if k < 0.0 {
        return Err(Error::invalid_argument(
            "bollinger band multiplier must be non-negative",
        ));
    }
    let middle = sma(series, period)?;

    let window = &series[series.len() - period..];
    let variance = window.iter().map(|x| (x - middle).powi(2)).sum::<f64>() / period as f64;
    let deviation = k * variance.sqrt();

    Ok(BollingerBands {
        upper: middle + deviation,
        middle,
        lower: middle - deviation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // ============================================
    // StdDev Tests
    // ============================================

    #[test]
    fn std_dev_of_constant_series_is_zero() {
        let series = vec![5.0; 10];
        assert!(std_dev(&series).unwrap().abs() < 1e-12);
    }

    #[test]
    fn std_dev_uses_population_divisor() {
        // {2, 4}: mean 3, population variance ((1 + 1) / 2) = 1
        let series = vec![2.0, 4.0];
        let result = std_dev(&series).unwrap();
        assert!((result - 1.0).abs() < 1e-12);
    }

    #[test]
    fn std_dev_rejects_empty_series() {
        let err = std_dev(&[]).unwrap_err();
        assert!(matches!(
            err,
            fusion_trade_core::Error::InsufficientData { .. }
        ));
    }

    // ============================================
    // Bollinger Band Tests
    // ============================================

    #[test]
    fn bands_are_symmetric_around_middle() {
        let series = vec![
            20.0, 21.5, 22.0, 21.0, 20.5, 22.5, 23.0, 22.0, 21.5, 20.0, 19.5, 21.0, 22.0, 23.5,
            24.0, 23.0, 22.5, 21.0, 20.5, 22.0,
        ];
        let bands = bollinger_bands(&series, 20, 2.0).unwrap();

        let upper_gap = bands.upper - bands.middle;
        let lower_gap = bands.middle - bands.lower;
        assert!((upper_gap - lower_gap).abs() < 1e-12);
    }

    #[test]
    fn bands_middle_equals_sma() {
        let series = vec![10.0, 12.0, 14.0, 16.0, 18.0];
        let bands = bollinger_bands(&series, 5, 2.0).unwrap();
        assert!((bands.middle - 14.0).abs() < 1e-12);
    }

    #[test]
    fn bands_collapse_for_constant_series() {
        let series = vec![50.0; 25];
        let bands = bollinger_bands(&series, 20, 2.0).unwrap();
        assert!((bands.upper - bands.middle).abs() < 1e-12);
        assert!(bands.width().abs() < 1e-12);
    }

    #[test]
    fn bands_use_population_variance() {
        // window {2, 4}: middle 3, population stddev 1, k=2 -> upper 5, lower 1
        let series = vec![2.0, 4.0];
        let bands = bollinger_bands(&series, 2, 2.0).unwrap();
        assert!((bands.upper - 5.0).abs() < 1e-12);
        assert!((bands.lower - 1.0).abs() < 1e-12);
    }

    #[test]
    fn bands_reject_short_series() {
        let err = bollinger_bands(&[1.0, 2.0], 20, 2.0).unwrap_err();
        assert!(matches!(
            err,
            fusion_trade_core::Error::InsufficientData {
                required: 20,
                actual: 2
            }
        ));
    }
}
