//! The risk governor: gatekeeper between a fused recommendation and an
//! actual order.
//!
//! All per-symbol counters and the evaluation log live behind a single
//! mutex so concurrent evaluations for the same symbol serialize their
//! read-modify-write and a limit can never be double-approved past its
//! threshold. Denials are results, not errors.

use crate::profile::{RiskLimits, RiskProfile};
use chrono::{DateTime, NaiveDate, Utc};
use fusion_trade_core::config::RiskConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// A proposed trade submitted for approval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskCheckRequest {
    pub symbol: String,
    /// Notional size in capital currency.
    pub size: f64,
    pub price: f64,
    /// Optional volatility estimate, logged with the request.
    pub volatility: Option<f64>,
}

/// Verdict for one evaluated request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub approved: bool,
    /// One human-readable reason per failing check; empty when approved.
    pub reasons: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

/// Log entry pairing a request with its verdict, recorded verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskEvaluation {
    pub request: RiskCheckRequest,
    pub assessment: RiskAssessment,
}

/// Reported counter state for one symbol.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskSnapshot {
    pub daily_loss: f64,
    pub trade_count: u32,
    pub open_positions: u32,
    pub trades_remaining: u32,
    pub loss_remaining: f64,
    pub positions_available: u32,
    pub last_reset: NaiveDate,
}

/// Whether a recorded trade opened or closed a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeSide {
    Open,
    Close,
}

/// An executed trade reported back to the governor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeRecord {
    pub symbol: String,
    pub side: TradeSide,
    /// Notional size in capital currency.
    pub size: f64,
    /// Realized profit or loss for closing trades.
    pub pnl: Option<f64>,
}

struct GovernorState {
    profiles: HashMap<String, RiskProfile>,
    log: Vec<RiskEvaluation>,
}

/// Stateful per-symbol limiter. Construct one per process (or per test)
/// and share it by reference; there is no global instance.
pub struct RiskGovernor {
    capital: f64,
    limits: RiskLimits,
    state: Mutex<GovernorState>,
}

impl RiskGovernor {
    #[must_use]
    pub fn new(limits: RiskLimits, capital: f64) -> Self {
        tracing::info!(
            capital,
            max_position_size = limits.max_position_size,
            max_daily_loss = limits.max_daily_loss,
            "risk governor initialized"
        );
        Self {
            capital,
            limits,
            state: Mutex::new(GovernorState {
                profiles: HashMap::new(),
                log: Vec::new(),
            }),
        }
    }

    /// Builds a governor from configuration, mapping the risk level to its
    /// preset limits.
    #[must_use]
    pub fn from_config(config: &RiskConfig) -> Self {
        Self::new(RiskLimits::for_level(config.level), config.capital)
    }

    #[must_use]
    pub const fn limits(&self) -> &RiskLimits {
        &self.limits
    }

    #[must_use]
    pub const fn capital(&self) -> f64 {
        self.capital
    }

    fn state(&self) -> MutexGuard<'_, GovernorState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Evaluates a proposed trade against every limit independently.
    ///
    /// All four checks always run; each failing check contributes its own
    /// reason. The request and verdict are appended to the log whether or
    /// not the trade is approved.
    pub fn evaluate_trade_risk(&self, request: &RiskCheckRequest) -> RiskAssessment {
        let mut state = self.state();
        let profile = state
            .profiles
            .entry(request.symbol.clone())
            .or_insert_with(|| RiskProfile::new(Utc::now().date_naive()));

        let mut reasons = Vec::new();

        let max_size = self.limits.max_position_size * self.capital;
        if request.size > max_size {
            reasons.push(format!(
                "position size {:.2} exceeds limit {:.2} ({:.0}% of capital)",
                request.size,
                max_size,
                self.limits.max_position_size * 100.0
            ));
        }

        let projected_loss = profile.daily_loss + request.size * self.limits.stop_loss_pct;
        let max_loss = self.limits.max_daily_loss * self.capital;
        if projected_loss > max_loss {
            reasons.push(format!(
                "projected daily loss {:.2} exceeds limit {:.2} ({:.0}% of capital)",
                projected_loss,
                max_loss,
                self.limits.max_daily_loss * 100.0
            ));
        }

        if profile.open_positions >= self.limits.max_open_positions {
            reasons.push(format!(
                "open positions at limit ({})",
                self.limits.max_open_positions
            ));
        }

        if profile.trade_count >= self.limits.max_trades_per_day {
            reasons.push(format!(
                "daily trade limit reached ({})",
                self.limits.max_trades_per_day
            ));
        }

        let approved = reasons.is_empty();
        if approved {
            tracing::info!(symbol = %request.symbol, size = request.size, "trade approved");
        } else {
            tracing::warn!(symbol = %request.symbol, reasons = ?reasons, "trade rejected");
        }

        let assessment = RiskAssessment {
            approved,
            reasons,
            timestamp: Utc::now(),
        };
        state.log.push(RiskEvaluation {
            request: request.clone(),
            assessment: assessment.clone(),
        });

        assessment
    }

    /// Reports an executed trade back so the counters track reality.
    pub fn record_trade(&self, record: &TradeRecord) {
        let mut state = self.state();
        let profile = state
            .profiles
            .entry(record.symbol.clone())
            .or_insert_with(|| RiskProfile::new(Utc::now().date_naive()));

        profile.trade_count += 1;
        match record.side {
            TradeSide::Open => {
                profile.open_positions += 1;
                profile.open_position_size += record.size;
            }
            TradeSide::Close => {
                profile.open_positions = profile.open_positions.saturating_sub(1);
                profile.open_position_size = (profile.open_position_size - record.size).max(0.0);
                if let Some(pnl) = record.pnl {
                    if pnl < 0.0 {
                        profile.daily_loss += pnl.abs();
                    }
                }
            }
        }

        tracing::debug!(
            symbol = %record.symbol,
            trade_count = profile.trade_count,
            open_positions = profile.open_positions,
            "trade recorded"
        );
    }

    /// Rolls every profile whose last reset predates `today`.
    ///
    /// The day boundary is an explicit operation: evaluation never resets
    /// counters as a side effect. Calling with an unchanged date is a no-op.
    pub fn roll_day(&self, today: NaiveDate) {
        let mut state = self.state();
        for (symbol, profile) in &mut state.profiles {
            if profile.last_reset < today {
                tracing::info!(%symbol, %today, "daily risk counters reset");
                profile.reset_daily(today);
            }
        }
    }

    /// Current counter state for one symbol, if it has been seen.
    #[must_use]
    pub fn snapshot(&self, symbol: &str) -> Option<RiskSnapshot> {
        let state = self.state();
        state.profiles.get(symbol).map(|profile| RiskSnapshot {
            daily_loss: profile.daily_loss,
            trade_count: profile.trade_count,
            open_positions: profile.open_positions,
            trades_remaining: self
                .limits
                .max_trades_per_day
                .saturating_sub(profile.trade_count),
            loss_remaining: (self.limits.max_daily_loss * self.capital - profile.daily_loss)
                .max(0.0),
            positions_available: self
                .limits
                .max_open_positions
                .saturating_sub(profile.open_positions),
            last_reset: profile.last_reset,
        })
    }

    /// Copy of the append-only evaluation log.
    #[must_use]
    pub fn evaluation_log(&self) -> Vec<RiskEvaluation> {
        self.state().log.clone()
    }

    /// Number of evaluations performed so far.
    #[must_use]
    pub fn log_len(&self) -> usize {
        self.state().log.len()
    }

    /// Confidence-scaled position size, capped at the position limit.
    #[must_use]
    pub fn position_size_for(&self, base_size: f64, confidence: f64) -> f64 {
        let scaled = base_size * confidence.clamp(0.0, 1.0);
        scaled.min(self.limits.max_position_size * self.capital)
    }

    /// Stop-loss price for an entry at `entry_price`.
    #[must_use]
    pub fn stop_loss_price(&self, entry_price: f64) -> f64 {
        entry_price * (1.0 - self.limits.stop_loss_pct)
    }

    /// Take-profit price for an entry at `entry_price`.
    #[must_use]
    pub fn take_profit_price(&self, entry_price: f64) -> f64 {
        entry_price * (1.0 + self.limits.take_profit_pct)
    }
}
