//! Name-keyed dispatch over the fusion strategies, with optional risk
//! gating through an attached governor.

use crate::entanglement::entanglement;
use crate::interference::interference;
use crate::superposition::superposition;
use crate::tunneling::tunneling;
use crate::types::{FusedRecommendation, MarketState, TradeSignal};
use fusion_trade_core::{Error, Result};
use fusion_trade_risk::{RiskCheckRequest, RiskGovernor};
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

/// The available fusion strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    Superposition,
    Entanglement,
    Tunneling,
    Interference,
}

impl StrategyKind {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Superposition => "superposition",
            Self::Entanglement => "entanglement",
            Self::Tunneling => "tunneling",
            Self::Interference => "interference",
        }
    }
}

impl FromStr for StrategyKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "superposition" => Ok(Self::Superposition),
            "entanglement" => Ok(Self::Entanglement),
            "tunneling" => Ok(Self::Tunneling),
            "interference" => Ok(Self::Interference),
            other => Err(Error::invalid_argument(format!(
                "unknown strategy: {other}. Available: superposition, entanglement, tunneling, interference"
            ))),
        }
    }
}

/// Typed input for one strategy evaluation.
#[derive(Debug, Clone)]
pub enum StrategyInput {
    Superposition {
        states: Vec<MarketState>,
        weights: HashMap<usize, f64>,
    },
    Entanglement {
        series_a: Vec<f64>,
        series_b: Vec<f64>,
    },
    Tunneling {
        resistance_level: f64,
        current_price: f64,
        momentum: f64,
    },
    Interference {
        signals: Vec<TradeSignal>,
    },
}

impl StrategyInput {
    /// Strategy this input belongs to.
    #[must_use]
    pub const fn kind(&self) -> StrategyKind {
        match self {
            Self::Superposition { .. } => StrategyKind::Superposition,
            Self::Entanglement { .. } => StrategyKind::Entanglement,
            Self::Tunneling { .. } => StrategyKind::Tunneling,
            Self::Interference { .. } => StrategyKind::Interference,
        }
    }
}

/// Evaluates fusion strategies and optionally gates the result through a
/// risk governor. Construct one per process (or per test) and share it by
/// reference; there is no global instance.
#[derive(Default)]
pub struct FusionEngine {
    governor: Option<Arc<RiskGovernor>>,
}

impl FusionEngine {
    #[must_use]
    pub fn new() -> Self {
        Self { governor: None }
    }

    /// Attaches a risk governor for gated evaluations.
    #[must_use]
    pub fn with_governor(mut self, governor: Arc<RiskGovernor>) -> Self {
        self.governor = Some(governor);
        self
    }

    /// Evaluates one strategy.
    ///
    /// With a risk request present the governor is consulted and
    /// `should_execute` mirrors the approval; without one it stays `true`.
    ///
    /// # Errors
    /// Propagates strategy input errors, and returns `Configuration` when a
    /// risk check is requested but no governor is attached.
    pub fn evaluate(
        &self,
        input: &StrategyInput,
        risk: Option<&RiskCheckRequest>,
    ) -> Result<FusedRecommendation> {
        let mut recommendation = match input {
            StrategyInput::Superposition { states, weights } => superposition(states, weights)?,
            StrategyInput::Entanglement { series_a, series_b } => {
                entanglement(series_a, series_b)?
            }
            StrategyInput::Tunneling {
                resistance_level,
                current_price,
                momentum,
            } => tunneling(*resistance_level, *current_price, *momentum),
            StrategyInput::Interference { signals } => interference(signals)?,
        };

        if let Some(request) = risk {
            let governor = self.governor.as_ref().ok_or_else(|| {
                Error::Configuration(
                    "risk check requested but no governor is attached".to_string(),
                )
            })?;
            let assessment = governor.evaluate_trade_risk(request);
            recommendation.should_execute = assessment.approved;
            recommendation.risk_assessment = Some(assessment);
        }

        tracing::info!(
            strategy = %recommendation.strategy,
            recommendation = ?recommendation.recommendation,
            confidence = recommendation.confidence,
            should_execute = recommendation.should_execute,
            "fusion evaluation complete"
        );

        Ok(recommendation)
    }

    /// Evaluates by strategy name, validating that the name matches the
    /// supplied input.
    ///
    /// # Errors
    /// Returns `InvalidArgument` for an unknown name or a name/input
    /// mismatch, plus everything [`Self::evaluate`] can return.
    pub fn evaluate_named(
        &self,
        name: &str,
        input: &StrategyInput,
        risk: Option<&RiskCheckRequest>,
    ) -> Result<FusedRecommendation> {
        let kind = StrategyKind::from_str(name)?;
        if kind != input.kind() {
            return Err(Error::invalid_argument(format!(
                "strategy {name} does not accept {} input",
                input.kind().name()
            )));
        }
        self.evaluate(input, risk)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Recommendation, SignalAction};
    use fusion_trade_risk::RiskLimits;

    fn tunneling_input() -> StrategyInput {
        StrategyInput::Tunneling {
            resistance_level: 100.0,
            current_price: 100.0,
            momentum: 5.0,
        }
    }

    fn risk_request(size: f64) -> RiskCheckRequest {
        RiskCheckRequest {
            symbol: "BTCUSD".to_string(),
            size,
            price: 100.0,
            volatility: None,
        }
    }

    // ============================================
    // Dispatch Tests
    // ============================================

    #[test]
    fn evaluate_dispatches_each_strategy() {
        let engine = FusionEngine::new();

        let superposition = engine
            .evaluate(
                &StrategyInput::Superposition {
                    states: vec![MarketState::new(100.0), MarketState::new(120.0)],
                    weights: HashMap::new(),
                },
                None,
            )
            .unwrap();
        assert_eq!(superposition.strategy, "superposition");

        let entanglement = engine
            .evaluate(
                &StrategyInput::Entanglement {
                    series_a: vec![1.0, 2.0, 3.0],
                    series_b: vec![2.0, 4.0, 6.0],
                },
                None,
            )
            .unwrap();
        assert_eq!(entanglement.strategy, "entanglement");

        let tunneling = engine.evaluate(&tunneling_input(), None).unwrap();
        assert_eq!(tunneling.strategy, "tunneling");
        assert_eq!(tunneling.recommendation, Recommendation::Buy);

        let interference = engine
            .evaluate(
                &StrategyInput::Interference {
                    signals: vec![TradeSignal::new(SignalAction::Buy, "macd")],
                },
                None,
            )
            .unwrap();
        assert_eq!(interference.strategy, "interference");
    }

    #[test]
    fn evaluate_named_resolves_known_names() {
        let engine = FusionEngine::new();
        let rec = engine
            .evaluate_named("tunneling", &tunneling_input(), None)
            .unwrap();
        assert_eq!(rec.strategy, "tunneling");
    }

    #[test]
    fn evaluate_named_rejects_unknown_name() {
        let engine = FusionEngine::new();
        let err = engine
            .evaluate_named("teleportation", &tunneling_input(), None)
            .unwrap_err();

        assert!(matches!(err, Error::InvalidArgument(_)));
        assert!(err.to_string().contains("Available"));
    }

    #[test]
    fn evaluate_named_rejects_mismatched_input() {
        let engine = FusionEngine::new();
        let err = engine
            .evaluate_named("entanglement", &tunneling_input(), None)
            .unwrap_err();

        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn strategy_errors_propagate() {
        let engine = FusionEngine::new();
        let err = engine
            .evaluate(
                &StrategyInput::Interference {
                    signals: Vec::new(),
                },
                None,
            )
            .unwrap_err();

        assert!(matches!(err, Error::InsufficientData { .. }));
    }

    // ============================================
    // Risk Gating Tests
    // ============================================

    #[test]
    fn without_risk_request_should_execute_defaults_true() {
        let engine = FusionEngine::new();
        let rec = engine.evaluate(&tunneling_input(), None).unwrap();

        assert!(rec.should_execute);
        assert!(rec.risk_assessment.is_none());
    }

    #[test]
    fn approved_risk_check_keeps_should_execute() {
        let governor = Arc::new(RiskGovernor::new(RiskLimits::moderate(), 10_000.0));
        let engine = FusionEngine::new().with_governor(governor);

        let rec = engine
            .evaluate(&tunneling_input(), Some(&risk_request(500.0)))
            .unwrap();

        assert!(rec.should_execute);
        assert!(rec.risk_assessment.unwrap().approved);
    }

    #[test]
    fn denied_risk_check_clears_should_execute() {
        let governor = Arc::new(RiskGovernor::new(RiskLimits::moderate(), 10_000.0));
        let engine = FusionEngine::new().with_governor(governor.clone());

        // 15% of capital against a 10% limit.
        let rec = engine
            .evaluate(&tunneling_input(), Some(&risk_request(1_500.0)))
            .unwrap();

        assert!(!rec.should_execute);
        let assessment = rec.risk_assessment.unwrap();
        assert!(!assessment.approved);
        assert!(assessment.reasons.iter().any(|r| r.contains("position size")));
        assert_eq!(governor.log_len(), 1);
    }

    #[test]
    fn risk_check_without_governor_is_configuration_error() {
        let engine = FusionEngine::new();
        let err = engine
            .evaluate(&tunneling_input(), Some(&risk_request(100.0)))
            .unwrap_err();

        assert!(matches!(err, Error::Configuration(_)));
    }
}
