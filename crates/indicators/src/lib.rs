//! Stateless technical indicators over chronological price series.
//!
//! Every function validates its required window and fails with
//! `Error::InsufficientData` on short input; nothing is silently defaulted.
//! All math is plain `f64` so recurrences are reproducible sample-for-sample.

pub mod momentum;
pub mod moving_average;
pub mod performance;
pub mod volatility;

pub use momentum::{macd, momentum, rsi, Macd, DEFAULT_MOMENTUM_PERIOD, DEFAULT_RSI_PERIOD};
pub use moving_average::{ema, sma};
pub use performance::{cagr, percentage_change, sharpe_ratio};
pub use volatility::{bollinger_bands, std_dev, BollingerBands};
