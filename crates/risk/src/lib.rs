pub mod governor;
pub mod profile;

pub use governor::{
    RiskAssessment, RiskCheckRequest, RiskEvaluation, RiskGovernor, RiskSnapshot, TradeRecord,
    TradeSide,
};
pub use profile::{RiskLimits, RiskProfile};
