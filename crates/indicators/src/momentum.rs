//! Momentum-family indicators: RSI, MACD, and raw momentum.

use crate::moving_average::ema;
use fusion_trade_core::{Error, Result};

/// Default lookback for [`rsi`].
pub const DEFAULT_RSI_PERIOD: usize = 14;

/// Default lookback for [`momentum`].
pub const DEFAULT_MOMENTUM_PERIOD: usize = 10;

/// Relative Strength Index with Wilder smoothing.
///
/// The initial average gain/loss is taken over the first `period` deltas;
/// every later delta folds in as `avg = (avg * (period - 1) + delta) / period`.
/// An average loss of zero yields 100.
///
/// # Errors
/// Returns `InsufficientData` unless the series has at least `period + 1`
/// samples, and `InvalidArgument` for a zero period.
pub fn rsi(series: &[f64], period: usize) -> Result<f64> {
    if period == 0 {
        return Err(Error::invalid_argument("rsi period must be at least 1"));
    }
    if series.len() < period + 1 {
        return Err(Error::InsufficientData {
            required: period + 1,
            actual: series.len(),
        });
    }

    let mut avg_gain = 0.0;
    let mut avg_loss = 0.0;
    for i in 1..=period {
        let delta = series[i] - series[i - 1];
        if delta > 0.0 {
            avg_gain += delta;
        } else {
            avg_loss += -delta;
        }
    }
    avg_gain /= period as f64;
    avg_loss /= period as f64;

    for i in (period + 1)..series.len() {
        let delta = series[i] - series[i - 1];
        let (gain, loss) = if delta > 0.0 {
            (delta, 0.0)
        } else {
            (0.0, -delta)
        };
        avg_gain = (avg_gain * (period as f64 - 1.0) + gain) / period as f64;
        avg_loss = (avg_loss * (period as f64 - 1.0) + loss) / period as f64;
    }

    if avg_loss == 0.0 {
        return Ok(100.0);
    }

    let rs = avg_gain / avg_loss;
    Ok(100.0 - 100.0 / (1.0 + rs))
}

/// Output of [`macd`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Macd {
    /// Fast EMA minus slow EMA at the final sample.
    pub macd: f64,
    /// EMA of the accumulated MACD history.
    pub signal: f64,
    /// `macd - signal`.
    pub histogram: f64,
}

/// Moving Average Convergence/Divergence.
///
/// Both EMAs advance incrementally in a single left-to-right pass over the
/// series; the MACD history starts accumulating once the slow EMA is warm
/// (index ≥ `slow - 1`) and the signal line is the EMA of that history.
/// Recomputing the EMAs per point over a window gives different numbers and
/// is not equivalent.
///
/// # Errors
/// Returns `InsufficientData` unless the series has at least
/// `slow + signal - 1` samples, and `InvalidArgument` when the periods are
/// zero or `fast >= slow`.
pub fn macd(series: &[f64], fast: usize, slow: usize, signal: usize) -> Result<Macd> {
    if fast == 0 || slow == 0 || signal == 0 {
        return Err(Error::invalid_argument("macd periods must be at least 1"));
    }
    if fast >= slow {
        return Err(Error::invalid_argument(format!(
            "macd fast period ({fast}) must be shorter than slow period ({slow})"
        )));
    }
    let required = slow + signal - 1;
    if series.len() < required {
        return Err(Error::InsufficientData {
            required,
            actual: series.len(),
        });
    }

    let fast_k = 2.0 / (fast as f64 + 1.0);
    let slow_k = 2.0 / (slow as f64 + 1.0);

    let mut fast_ema = series[0];
    let mut slow_ema = series[0];
    let mut history = Vec::with_capacity(series.len() - slow + 1);

    for (i, &x) in series.iter().enumerate() {
        if i > 0 {
            fast_ema = (x - fast_ema) * fast_k + fast_ema;
            slow_ema = (x - slow_ema) * slow_k + slow_ema;
        }
        if i >= slow - 1 {
            history.push(fast_ema - slow_ema);
        }
    }

    let macd_value = history[history.len() - 1];
    let signal_value = ema(&history, signal)?;

    Ok(Macd {
        macd: macd_value,
        signal: signal_value,
        histogram: macd_value - signal_value,
    })
}

/// Fractional price change over the trailing `period` samples.
///
/// # Errors
/// Returns `InsufficientData` for a series shorter than `period`, and
/// `InvalidArgument` when the reference price is zero.
pub fn momentum(series: &[f64], period: usize) -> Result<f64> {
    if period == 0 {
        return Err(Error::invalid_argument(
            "momentum period must be at least 1",
        ));
    }
    if series.len() < period {
        return Err(Error::InsufficientData {
            required: period,
            actual: series.len(),
        });
    }

    let reference = series[series.len() - period];
    if reference == 0.0 {
        return Err(Error::invalid_argument(
            "momentum reference price is zero",
        ));
    }
    Ok((series[series.len() - 1] - reference) / reference)
}
