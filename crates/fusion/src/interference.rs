//! Interference fusion: constructive and destructive overlap of upstream
//! signals.

use crate::types::{FusedRecommendation, Recommendation, SignalAction, TradeSignal};
use fusion_trade_core::{Error, Result};

/// Tallies upstream signals and keeps the strictly dominant direction.
///
/// Buy/Sell/Hold counts are collected in a single pass; the final call is
/// whichever count strictly exceeds both others, and every tie (two-way
/// or three-way) collapses to Hold. Strength is the winning count over
/// the total.
///
/// # Errors
/// Returns `InsufficientData` when no signals are supplied.
pub fn interference(signals: &[TradeSignal]) -> Result<FusedRecommendation> {
    if signals.is_empty() {
        return Err(Error::InsufficientData {
            required: 1,
            actual: 0,
        });
    }

    let mut buy = 0usize;
    let mut sell = 0usize;
    let mut hold = 0usize;
    for signal in signals {
        match signal.action {
            SignalAction::Buy => buy += 1,
            SignalAction::Sell => sell += 1,
            SignalAction::Hold => hold += 1,
        }
    }

    let recommendation = if buy > sell && buy > hold {
        Recommendation::Buy
    } else if sell > buy && sell > hold {
        Recommendation::Sell
    } else {
        Recommendation::Hold
    };

    let total = signals.len();
    let strength = buy.max(sell).max(hold) as f64 / total as f64;

    Ok(
        FusedRecommendation::new("interference", recommendation, strength)?
            .with_metric("buy_count", buy as f64)
            .with_metric("sell_count", sell as f64)
            .with_metric("hold_count", hold as f64)
            .with_metric("total", total as f64),
    )
}
