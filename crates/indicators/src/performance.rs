//! Return and performance measures.

use crate::volatility::std_dev;
use fusion_trade_core::{Error, Result};

/// Percentage change from `old` to `new`.
///
/// # Errors
/// Returns `InvalidArgument` when `old` is zero.
pub fn percentage_change(old: f64, new: f64) -> Result<f64> {
    if old == 0.0 {
        return Err(Error::invalid_argument(
            "percentage change is undefined for a zero base",
        ));
    }
    Ok((new - old) / old * 100.0)
}

/// Compound annual growth rate.
///
/// # Errors
/// Returns `InvalidArgument` unless `begin`, `end`, and `years` are all
/// strictly positive.
pub fn cagr(begin: f64, end: f64, years: f64) -> Result<f64> {
    if begin <= 0.0 || end <= 0.0 || years <= 0.0 {
        return Err(Error::invalid_argument(
            "cagr requires positive begin, end, and years",
        ));
    }
    Ok((end / begin).powf(1.0 / years) - 1.0)
}

/// Sharpe ratio: mean excess return over population standard deviation.
///
/// Returns 0 when the return series has no dispersion.
///
/// # Errors
/// Returns `InsufficientData` for an empty return series.
pub fn sharpe_ratio(returns: &[f64], risk_free_rate: f64) -> Result<f64> {
    if returns.is_empty() {
        return Err(Error::InsufficientData {
            required: 1,
            actual: 0,
        });
    }

    let mean = returns.iter().sum::<f64>() / returns.len() as f64;
    let deviation = std_dev(returns)?;
    if deviation == 0.0 {
        return Ok(0.0);
    }
    Ok((mean - risk_free_rate) / deviation)
}
