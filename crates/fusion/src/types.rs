//! Shared types for the fusion strategies.

use fusion_trade_core::{Error, Result};
use fusion_trade_risk::RiskAssessment;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One market scenario fed into fusion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketState {
    pub price: f64,
    /// Optional descriptive tag ("bullish", "consolidation", ...).
    pub label: Option<String>,
}

impl MarketState {
    #[must_use]
    pub const fn new(price: f64) -> Self {
        Self { price, label: None }
    }

    /// Attaches a descriptive label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Directional call emitted by an upstream strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalAction {
    Buy,
    Sell,
    Hold,
}

/// A directional call with its originating strategy name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeSignal {
    pub action: SignalAction,
    pub source: String,
}

impl TradeSignal {
    #[must_use]
    pub fn new(action: SignalAction, source: impl Into<String>) -> Self {
        Self {
            action,
            source: source.into(),
        }
    }
}

/// Final directional call of a fusion strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    Buy,
    Sell,
    Hold,
    /// Trade in the direction of the correlated series.
    Follow,
    /// Trade against the correlated series.
    Inverse,
    /// No exploitable relationship.
    Neutral,
}

/// Unified output of a fusion strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FusedRecommendation {
    /// Name of the strategy that produced this recommendation.
    pub strategy: String,
    pub recommendation: Recommendation,
    /// Confidence in `[0.0, 1.0]`.
    pub confidence: f64,
    /// Strategy-specific numeric outputs.
    #[serde(default)]
    pub metrics: HashMap<String, f64>,
    /// Present when a risk check was requested alongside the evaluation.
    pub risk_assessment: Option<RiskAssessment>,
    /// False only when an attached risk assessment denied the trade.
    pub should_execute: bool,
}

impl FusedRecommendation {
    /// Creates a recommendation with validation.
    ///
    /// # Errors
    /// Returns `InvalidArgument` if confidence is outside `[0.0, 1.0]`.
    pub fn new(
        strategy: impl Into<String>,
        recommendation: Recommendation,
        confidence: f64,
    ) -> Result<Self> {
        if !(0.0..=1.0).contains(&confidence) {
            return Err(Error::invalid_argument(format!(
                "confidence must be in [0.0, 1.0], got {confidence}"
            )));
        }
        Ok(Self {
            strategy: strategy.into(),
            recommendation,
            confidence,
            metrics: HashMap::new(),
            risk_assessment: None,
            should_execute: true,
        })
    }

    /// Adds a named metric.
    #[must_use]
    pub fn with_metric(mut self, key: impl Into<String>, value: f64) -> Self {
        self.metrics.insert(key.into(), value);
        self
    }
}
