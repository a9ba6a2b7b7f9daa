//! Tunneling fusion: probability of price breaking a resistance level.

use crate::types::{FusedRecommendation, Recommendation};
use std::collections::HashMap;

/// Probability above which a breakout is considered likely.
const TUNNEL_THRESHOLD: f64 = 0.6;

/// Estimates the chance of price punching through a resistance level.
///
/// The barrier penetration probability is
/// `exp(-|gap| / (|momentum| + 1))`, clamped to `[0, 1]`, with two fixed
/// points: a zero gap always tunnels (probability 1) and zero momentum
/// never does (probability 0). The call is Buy when the probability
/// exceeds `0.6`, Hold otherwise.
#[must_use]
pub fn tunneling(resistance_level: f64, current_price: f64, momentum: f64) -> FusedRecommendation {
    let gap = resistance_level - current_price;

    let probability = if gap == 0.0 {
        1.0
    } else if momentum == 0.0 {
        0.0
    } else {
        (-gap.abs() / (momentum.abs() + 1.0)).exp().clamp(0.0, 1.0)
    };

    let can_tunnel = probability > TUNNEL_THRESHOLD;
    let recommendation = if can_tunnel {
        Recommendation::Buy
    } else {
        Recommendation::Hold
    };

    FusedRecommendation {
        strategy: "tunneling".to_string(),
        recommendation,
        confidence: probability,
        metrics: HashMap::new(),
        risk_assessment: None,
        should_execute: true,
    }
    .with_metric("gap", gap)
    .with_metric("probability", probability)
    .with_metric("can_tunnel", if can_tunnel { 1.0 } else { 0.0 })
    .with_metric("momentum", momentum)
    .with_metric("resistance_level", resistance_level)
    .with_metric("current_price", current_price)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_at_resistance_tunnels_with_certainty() {
        let rec = tunneling(100.0, 100.0, 5.0);

        assert!((rec.metrics["probability"] - 1.0).abs() < f64::EPSILON);
        assert_eq!(rec.recommendation, Recommendation::Buy);
        assert!((rec.metrics["can_tunnel"] - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_momentum_never_tunnels() {
        let rec = tunneling(105.0, 100.0, 0.0);

        assert!(rec.metrics["probability"].abs() < f64::EPSILON);
        assert_eq!(rec.recommendation, Recommendation::Hold);
    }

    #[test]
    fn zero_gap_beats_zero_momentum() {
        let rec = tunneling(100.0, 100.0, 0.0);
        assert!((rec.metrics["probability"] - 1.0).abs() < f64::EPSILON);
        assert_eq!(rec.recommendation, Recommendation::Buy);
    }

    #[test]
    fn probability_follows_barrier_formula() {
        let rec = tunneling(110.0, 100.0, 4.0);

        // exp(-10 / 5) = exp(-2)
        let expected = (-2.0_f64).exp();
        assert!((rec.metrics["probability"] - expected).abs() < 1e-12);
        assert_eq!(rec.recommendation, Recommendation::Hold);
    }

    #[test]
    fn strong_momentum_near_resistance_is_buy() {
        // exp(-1 / 11) = 0.913 > 0.6
        let rec = tunneling(101.0, 100.0, 10.0);

        assert!(rec.metrics["probability"] > TUNNEL_THRESHOLD);
        assert_eq!(rec.recommendation, Recommendation::Buy);
    }

    #[test]
    fn gap_below_price_uses_absolute_distance() {
        // Resistance below current price: same |gap|, same probability.
        let above = tunneling(110.0, 100.0, 4.0);
        let below = tunneling(100.0, 110.0, 4.0);

        assert!(
            (above.metrics["probability"] - below.metrics["probability"]).abs() < f64::EPSILON
        );
        assert!((below.metrics["gap"] + 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn confidence_equals_probability() {
        let rec = tunneling(103.0, 100.0, 6.0);
        assert!((rec.confidence - rec.metrics["probability"]).abs() < f64::EPSILON);
    }
}
