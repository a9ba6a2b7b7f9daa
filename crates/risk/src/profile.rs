//! Risk limits and per-symbol counter state.

use chrono::NaiveDate;
use fusion_trade_core::RiskLevel;
use serde::{Deserialize, Serialize};

/// Limit set the governor enforces. Fractional fields are expressed as a
/// share of configured capital.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskLimits {
    /// Maximum position size as a fraction of capital.
    pub max_position_size: f64,
    /// Maximum daily loss as a fraction of capital.
    pub max_daily_loss: f64,
    /// Maximum simultaneously open positions per symbol.
    pub max_open_positions: u32,
    /// Maximum trades per UTC day per symbol.
    pub max_trades_per_day: u32,
    /// Stop-loss distance as a fraction of entry price.
    pub stop_loss_pct: f64,
    /// Take-profit distance as a fraction of entry price.
    pub take_profit_pct: f64,
}

impl RiskLimits {
    /// 5% positions, 2% daily loss, 3 positions, 10 trades/day.
    #[must_use]
    pub const fn conservative() -> Self {
        Self {
            max_position_size: 0.05,
            max_daily_loss: 0.02,
            max_open_positions: 3,
            max_trades_per_day: 10,
            stop_loss_pct: 0.01,
            take_profit_pct: 0.03,
        }
    }

    /// 10% positions, 5% daily loss, 5 positions, 20 trades/day.
    #[must_use]
    pub const fn moderate() -> Self {
        Self {
            max_position_size: 0.10,
            max_daily_loss: 0.05,
            max_open_positions: 5,
            max_trades_per_day: 20,
            stop_loss_pct: 0.02,
            take_profit_pct: 0.05,
        }
    }

    /// 20% positions, 10% daily loss, 10 positions, 50 trades/day.
    #[must_use]
    pub const fn aggressive() -> Self {
        Self {
            max_position_size: 0.20,
            max_daily_loss: 0.10,
            max_open_positions: 10,
            max_trades_per_day: 50,
            stop_loss_pct: 0.03,
            take_profit_pct: 0.08,
        }
    }

    /// Maps a configured risk level to its preset.
    #[must_use]
    pub const fn for_level(level: RiskLevel) -> Self {
        match level {
            RiskLevel::Conservative => Self::conservative(),
            RiskLevel::Moderate => Self::moderate(),
            RiskLevel::Aggressive => Self::aggressive(),
        }
    }
}

impl Default for RiskLimits {
    fn default() -> Self {
        Self::moderate()
    }
}

/// Mutable per-symbol counters. `daily_loss` and `trade_count` only grow
/// within a day; [`crate::RiskGovernor::roll_day`] is the single reset path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskProfile {
    /// Notional size of currently open positions.
    pub open_position_size: f64,
    /// Count of currently open positions.
    pub open_positions: u32,
    /// Realized loss accumulated today.
    pub daily_loss: f64,
    /// Trades recorded today.
    pub trade_count: u32,
    /// UTC date the daily counters were last reset.
    pub last_reset: NaiveDate,
}

impl RiskProfile {
    #[must_use]
    pub const fn new(today: NaiveDate) -> Self {
        Self {
            open_position_size: 0.0,
            open_positions: 0,
            daily_loss: 0.0,
            trade_count: 0,
            last_reset: today,
        }
    }

    /// Clears the daily counters. Open-position state survives the boundary.
    pub fn reset_daily(&mut self, today: NaiveDate) {
        self.daily_loss = 0.0;
        self.trade_count = 0;
        self.last_reset = today;
    }
}
