//! Entanglement fusion: correlation between two price series.

use crate::types::{FusedRecommendation, Recommendation};
use fusion_trade_core::{Error, Result};

/// Pearson threshold above which two series are considered entangled.
const ENTANGLEMENT_THRESHOLD: f64 = 0.7;

/// Correlation magnitude needed for a directional Follow/Inverse call.
const SIGNAL_THRESHOLD: f64 = 0.5;

/// Measures how tightly two series move together.
///
/// Pearson correlation is computed from single-pass running sums. The call
/// is Follow above `+0.5`, Inverse below `-0.5`, Neutral in between;
/// `entanglement_strength` is the absolute correlation and the pair counts
/// as entangled above `0.7`. A series with zero variance correlates at 0.
///
/// # Errors
/// Returns `InsufficientData` when either series is empty and
/// `InvalidArgument` when the lengths differ.
pub fn entanglement(series_a: &[f64], series_b: &[f64]) -> Result<FusedRecommendation> {
    if series_a.is_empty() || series_b.is_empty() {
        return Err(Error::InsufficientData {
            required: 1,
            actual: 0,
        });
    }
    if series_a.len() != series_b.len() {
        return Err(Error::invalid_argument(format!(
            "series lengths differ: {} vs {}",
            series_a.len(),
            series_b.len()
        )));
    }

    let n = series_a.len() as f64;
    let mut sum_a = 0.0;
    let mut sum_b = 0.0;
    let mut sum_ab = 0.0;
    let mut sum_a2 = 0.0;
    let mut sum_b2 = 0.0;
    for (&a, &b) in series_a.iter().zip(series_b.iter()) {
        sum_a += a;
        sum_b += b;
        sum_ab += a * b;
        sum_a2 += a * a;
        sum_b2 += b * b;
    }

    let covariance = n * sum_ab - sum_a * sum_b;
    let variance_a = n * sum_a2 - sum_a * sum_a;
    let variance_b = n * sum_b2 - sum_b * sum_b;
    let denominator = (variance_a * variance_b).sqrt();

    let correlation = if denominator == 0.0 {
        0.0
    } else {
        (covariance / denominator).clamp(-1.0, 1.0)
    };

    let strength = correlation.abs();
    let is_entangled = strength > ENTANGLEMENT_THRESHOLD;

    let recommendation = if correlation > SIGNAL_THRESHOLD {
        Recommendation::Follow
    } else if correlation < -SIGNAL_THRESHOLD {
        Recommendation::Inverse
    } else {
        Recommendation::Neutral
    };

    Ok(
        FusedRecommendation::new("entanglement", recommendation, strength)?
            .with_metric("correlation", correlation)
            .with_metric("entanglement_strength", strength)
            .with_metric("is_entangled", if is_entangled { 1.0 } else { 0.0 })
            .with_metric("sample_count", n),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn self_correlation_is_one() {
        let series = vec![1.0, 3.0, 2.0, 5.0, 4.0];
        let rec = entanglement(&series, &series).unwrap();

        assert!((rec.metrics["correlation"] - 1.0).abs() < 1e-9);
        assert!((rec.metrics["is_entangled"] - 1.0).abs() < f64::EPSILON);
        assert_eq!(rec.recommendation, Recommendation::Follow);
    }

    #[test]
    fn mirrored_series_is_inverse() {
        let series_a = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let series_b = vec![5.0, 4.0, 3.0, 2.0, 1.0];
        let rec = entanglement(&series_a, &series_b).unwrap();

        assert!((rec.metrics["correlation"] + 1.0).abs() < 1e-9);
        assert_eq!(rec.recommendation, Recommendation::Inverse);
        assert!((rec.confidence - 1.0).abs() < 1e-9);
    }

    #[test]
    fn uncorrelated_series_is_neutral() {
        let series_a = vec![1.0, 2.0, 1.0, 2.0, 1.0, 2.0];
        let series_b = vec![1.0, 1.0, 2.0, 2.0, 1.0, 1.0];
        let rec = entanglement(&series_a, &series_b).unwrap();

        assert!(rec.metrics["correlation"].abs() < SIGNAL_THRESHOLD);
        assert_eq!(rec.recommendation, Recommendation::Neutral);
    }

    #[test]
    fn constant_series_correlates_at_zero() {
        let flat = vec![7.0; 5];
        let moving = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let rec = entanglement(&flat, &moving).unwrap();

        assert!(rec.metrics["correlation"].abs() < f64::EPSILON);
        assert_eq!(rec.recommendation, Recommendation::Neutral);
        assert!((rec.metrics["is_entangled"]).abs() < f64::EPSILON);
    }

    #[test]
    fn entangled_flag_requires_strength_above_threshold() {
        // Mostly aligned but noisy: correlated, below the 0.7 gate is hard to
        // construct exactly, so assert the flag agrees with the strength.
        let series_a = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let series_b = vec![1.2, 1.9, 3.4, 3.6, 5.5, 5.8];
        let rec = entanglement(&series_a, &series_b).unwrap();

        let strength = rec.metrics["entanglement_strength"];
        let flagged = rec.metrics["is_entangled"] > 0.5;
        assert_eq!(flagged, strength > ENTANGLEMENT_THRESHOLD);
    }

    #[test]
    fn mismatched_lengths_rejected() {
        let err = entanglement(&[1.0, 2.0], &[1.0, 2.0, 3.0]).unwrap_err();
        assert!(matches!(err, fusion_trade_core::Error::InvalidArgument(_)));
    }

    #[test]
    fn empty_series_insufficient() {
        let err = entanglement(&[], &[]).unwrap_err();
        assert!(matches!(
            err,
            fusion_trade_core::Error::InsufficientData { .. }
        ));
    }
}
