//! Simple and exponential moving averages.

use fusion_trade_core::{Error, Result};

/// Arithmetic mean of the last `period` samples.
///
/// # Errors
/// Returns `InsufficientData` if the series is shorter than `period`, and
/// `InvalidArgument` for a zero period.
pub fn sma(series: &[f64], period: usize) -> Result<f64> {
    if period == 0 {
        return Err(Error::invalid_argument("sma period must be at least 1"));
    }
    if series.len() < period {
        return Err(Error::InsufficientData {
            required: period,
            actual: series.len(),
        });
    }

    let window = &series[series.len() - period..];
    Ok(window.iter().sum::<f64>() / period as f64)
}

/// Exponential moving average seeded with the first sample.
///
/// The recurrence `ema = (x - ema) * k + ema` with `k = 2 / (period + 1)`
/// is applied left to right over the remaining samples.
///
/// # Errors
/// Returns `InsufficientData` if the series is shorter than `period`, and
/// `InvalidArgument` for a zero period.
pub fn ema(series: &[f64], period: usize) -> Result<f64> {
    if period == 0 {
        return Err(Error::invalid_argument("ema period must be at least 1"));
    }
    if series.len() < period {
        return Err(Error::InsufficientData {
            required: period,
            actual: series.len(),
        });
    }

    let k = 2.0 / (period as f64 + 1.0);
    let mut value = series[0];
    for &x in &series[1..] {
        value = (x - value) * k + value;
    }
    Ok(value)
}
