//! Superposition fusion: a weighted blend of alternative market states.

use crate::types::{FusedRecommendation, MarketState, Recommendation};
use fusion_trade_core::{Error, Result};
use fusion_trade_indicators::std_dev;
use std::collections::HashMap;

/// Collapses a set of market states into one directional call.
///
/// Each state's weight is looked up by index; a missing entry counts as
/// 1.0 and the normalizer is the raw sum of applied weights, NOT the state
/// count. Confidence is `1 - pop_std(prices) / weighted_mean`, clamped to
/// `[0, 1]` (0 when the weighted mean is 0). The call is Buy when the
/// weighted mean sits above the first state's price, Sell otherwise.
///
/// # Errors
/// Returns `InsufficientData` for an empty state set and `InvalidArgument`
/// when the applied weights do not sum to a positive total.
pub fn superposition(
    states: &[MarketState],
    weights: &HashMap<usize, f64>,
) -> Result<FusedRecommendation> {
    if states.is_empty() {
        return Err(Error::InsufficientData {
            required: 1,
            actual: 0,
        });
    }

    let mut total_weight = 0.0;
    let mut weighted_sum = 0.0;
    for (i, state) in states.iter().enumerate() {
        let weight = weights.get(&i).copied().unwrap_or(1.0);
        total_weight += weight;
        weighted_sum += state.price * weight;
    }
    if total_weight <= 0.0 {
        return Err(Error::invalid_argument(format!(
            "superposition weights must sum to a positive total, got {total_weight}"
        )));
    }

    let weighted_mean = weighted_sum / total_weight;
    let prices: Vec<f64> = states.iter().map(|s| s.price).collect();
    let dispersion = std_dev(&prices)?;

    let confidence = if weighted_mean == 0.0 {
        0.0
    } else {
        (1.0 - dispersion / weighted_mean).clamp(0.0, 1.0)
    };

    let recommendation = if weighted_mean > states[0].price {
        Recommendation::Buy
    } else {
        Recommendation::Sell
    };

    Ok(
        FusedRecommendation::new("superposition", recommendation, confidence)?
            .with_metric("weighted_mean_price", weighted_mean)
            .with_metric("baseline_price", states[0].price)
            .with_metric("total_weight", total_weight)
            .with_metric("price_std_dev", dispersion),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn states(prices: &[f64]) -> Vec<MarketState> {
        prices.iter().map(|&p| MarketState::new(p)).collect()
    }

    #[test]
    fn unweighted_mean_above_baseline_is_buy() {
        let states = states(&[100.0, 110.0, 120.0]);
        let rec = superposition(&states, &HashMap::new()).unwrap();

        // Mean 110 > baseline 100.
        assert_eq!(rec.recommendation, Recommendation::Buy);
        assert!((rec.metrics["weighted_mean_price"] - 110.0).abs() < 1e-12);
        assert!((rec.metrics["total_weight"] - 3.0).abs() < 1e-12);
    }

    #[test]
    fn weighted_mean_below_baseline_is_sell() {
        let states = states(&[100.0, 90.0, 80.0]);
        let rec = superposition(&states, &HashMap::new()).unwrap();

        assert_eq!(rec.recommendation, Recommendation::Sell);
    }

    #[test]
    fn weights_shift_the_mean() {
        let states = states(&[100.0, 200.0]);
        let mut weights = HashMap::new();
        weights.insert(0, 3.0);
        weights.insert(1, 1.0);

        let rec = superposition(&states, &weights).unwrap();

        // (100*3 + 200*1) / 4 = 125 > 100 -> Buy.
        assert!((rec.metrics["weighted_mean_price"] - 125.0).abs() < 1e-12);
        assert_eq!(rec.recommendation, Recommendation::Buy);
    }

    #[test]
    fn sparse_weights_default_missing_entries_to_one() {
        // Only index 1 is weighted; indexes 0 and 2 fall back to 1.0 and the
        // normalizer is the raw sum 1 + 4 + 1 = 6, not the state count.
        let states = states(&[100.0, 130.0, 100.0]);
        let mut weights = HashMap::new();
        weights.insert(1, 4.0);

        let rec = superposition(&states, &weights).unwrap();

        let expected = (100.0 + 130.0 * 4.0 + 100.0) / 6.0;
        assert!((rec.metrics["weighted_mean_price"] - expected).abs() < 1e-12);
        assert!((rec.metrics["total_weight"] - 6.0).abs() < 1e-12);
    }

    #[test]
    fn identical_states_give_full_confidence() {
        let states = states(&[100.0, 100.0, 100.0]);
        let rec = superposition(&states, &HashMap::new()).unwrap();

        assert!((rec.confidence - 1.0).abs() < 1e-12);
        // Mean equals baseline, so not strictly above -> Sell.
        assert_eq!(rec.recommendation, Recommendation::Sell);
    }

    #[test]
    fn confidence_shrinks_with_dispersion() {
        let tight = superposition(&states(&[100.0, 101.0, 99.0]), &HashMap::new()).unwrap();
        let wide = superposition(&states(&[100.0, 160.0, 40.0]), &HashMap::new()).unwrap();

        assert!(tight.confidence > wide.confidence);
        assert!((0.0..=1.0).contains(&wide.confidence));
    }

    #[test]
    fn empty_states_are_insufficient() {
        let err = superposition(&[], &HashMap::new()).unwrap_err();
        assert!(matches!(
            err,
            fusion_trade_core::Error::InsufficientData { .. }
        ));
    }

    #[test]
    fn non_positive_total_weight_rejected() {
        let states = states(&[100.0, 110.0]);
        let mut weights = HashMap::new();
        weights.insert(0, 0.0);
        weights.insert(1, 0.0);

        let err = superposition(&states, &weights).unwrap_err();
        assert!(matches!(err, fusion_trade_core::Error::InvalidArgument(_)));
    }

    #[test]
    fn zero_mean_price_gives_zero_confidence() {
        let states = states(&[-50.0, 50.0]);
        let rec = superposition(&states, &HashMap::new()).unwrap();
        assert!(rec.confidence.abs() < f64::EPSILON);
    }
}
