use crate::traits::{ConfigProvider, ConfigValue};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub risk: RiskConfig,
    pub payout: PayoutConfig,
}

/// Preset risk appetite, mapped to concrete limits by the risk crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Conservative,
    Moderate,
    Aggressive,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskConfig {
    /// Total account capital the fractional limits apply to.
    pub capital: f64,
    pub level: RiskLevel,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayoutConfig {
    /// Master switch; confirm fails closed for payouts when false.
    pub enabled: bool,
    /// Delay before a scheduled settlement auto-confirms.
    pub settlement_delay_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            risk: RiskConfig {
                capital: 10_000.0,
                level: RiskLevel::Moderate,
            },
            payout: PayoutConfig {
                enabled: true,
                settlement_delay_ms: 2_000,
            },
        }
    }
}

impl ConfigProvider for AppConfig {
    fn get(&self, key: &str) -> Option<ConfigValue> {
        match key {
            "risk.capital" => Some(ConfigValue::Number(self.risk.capital)),
            "risk.level" => {
                let level = match self.risk.level {
                    RiskLevel::Conservative => "conservative",
                    RiskLevel::Moderate => "moderate",
                    RiskLevel::Aggressive => "aggressive",
                };
                Some(ConfigValue::Text(level.to_string()))
            }
            "payout.enabled" => Some(ConfigValue::Bool(self.payout.enabled)),
            "payout.settlement_delay_ms" => {
                Some(ConfigValue::Number(self.payout.settlement_delay_ms as f64))
            }
            _ => None,
        }
    }
}
