//! Signal fusion: four independent heuristic strategies that collapse
//! indicator and price inputs into a single gated trade recommendation.
//!
//! The strategy names are metaphorical; the math is ordinary statistics.

pub mod engine;
pub mod entanglement;
pub mod interference;
pub mod superposition;
pub mod tunneling;
pub mod types;

pub use engine::{FusionEngine, StrategyInput, StrategyKind};
pub use entanglement::entanglement;
pub use interference::interference;
pub use superposition::superposition;
pub use tunneling::tunneling;
pub use types::{FusedRecommendation, MarketState, Recommendation, SignalAction, TradeSignal};
