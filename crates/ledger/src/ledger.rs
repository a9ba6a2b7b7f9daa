//! The transaction ledger: active index, never-pruned archive, and
//! cancellable deferred settlement.

use crate::transaction::{
    new_settlement_reference, new_transaction_id, ArchivalType, ArchivedTransaction,
    PaymentRequest, PayoutRequest, Transaction, TransactionKind, TransactionStatus,
};
use chrono::Utc;
use fusion_trade_core::{
    AddressValidator, ConfigProvider, Error, NotificationSink, NotifyEvent, Result,
};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::AbortHandle;

/// A record from either partition, active first.
#[derive(Debug, Clone)]
pub enum LedgerRecord {
    Active(Transaction),
    Archived(ArchivedTransaction),
}

impl LedgerRecord {
    /// The underlying transaction regardless of partition.
    #[must_use]
    pub const fn transaction(&self) -> &Transaction {
        match self {
            Self::Active(txn) => txn,
            Self::Archived(archived) => &archived.transaction,
        }
    }

    #[must_use]
    pub const fn is_archived(&self) -> bool {
        matches!(self, Self::Archived(_))
    }
}

/// Transaction kind selector for [`ListFilter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindFilter {
    Payment,
    Payout,
}

/// Filters applied by [`TransactionLedger::list`].
#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    pub status: Option<TransactionStatus>,
    pub kind: Option<KindFilter>,
    pub limit: Option<usize>,
}

struct LedgerState {
    active: HashMap<String, Transaction>,
    archive: HashMap<String, ArchivedTransaction>,
    settlements: HashMap<String, AbortHandle>,
}

/// Payment/payout lifecycle tracker.
///
/// An explicit context object: construct one per process (or per test) and
/// pass it by reference; there is no global instance. Cloning shares the
/// underlying state, which is what the deferred settlement task relies on.
#[derive(Clone)]
pub struct TransactionLedger {
    state: Arc<Mutex<LedgerState>>,
    config: Arc<dyn ConfigProvider>,
    validator: Arc<dyn AddressValidator>,
    sink: Option<Arc<dyn NotificationSink>>,
}

impl TransactionLedger {
    #[must_use]
    pub fn new(config: Arc<dyn ConfigProvider>, validator: Arc<dyn AddressValidator>) -> Self {
        Self {
            state: Arc::new(Mutex::new(LedgerState {
                active: HashMap::new(),
                archive: HashMap::new(),
                settlements: HashMap::new(),
            })),
            config,
            validator,
            sink: None,
        }
    }

    /// Attaches an optional notification sink.
    #[must_use]
    pub fn with_notification_sink(mut self, sink: Arc<dyn NotificationSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    fn state(&self) -> MutexGuard<'_, LedgerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn emit(&self, event_type: &str, txn: &Transaction) {
        if let Some(sink) = &self.sink {
            let payload = serde_json::to_value(txn).unwrap_or(serde_json::Value::Null);
            if let Err(e) = sink.notify(NotifyEvent::new(event_type, payload)).await {
                tracing::warn!(id = %txn.id, "notification delivery failed: {e}");
            }
        }
    }

    fn validate_amount(amount: Decimal) -> Result<()> {
        if amount <= Decimal::ZERO {
            return Err(Error::invalid_argument(format!(
                "amount must be positive, got {amount}"
            )));
        }
        Ok(())
    }

    /// Creates a pending payment.
    ///
    /// # Errors
    /// Returns `InvalidArgument` for a non-positive amount or missing
    /// recipient.
    pub async fn create_payment(&self, request: PaymentRequest) -> Result<Transaction> {
        Self::validate_amount(request.amount)?;
        if request.recipient.trim().is_empty() {
            return Err(Error::invalid_argument("payment recipient is required"));
        }

        let txn = Transaction {
            id: new_transaction_id(),
            amount: request.amount,
            currency: request.currency,
            method: request.method,
            kind: TransactionKind::Payment {
                recipient: request.recipient,
            },
            status: TransactionStatus::Pending,
            created_at: Utc::now(),
            completed_at: None,
        };

        self.state().active.insert(txn.id.clone(), txn.clone());
        tracing::info!(id = %txn.id, amount = %txn.amount, "payment created");
        self.emit("transaction.created", &txn).await;
        Ok(txn)
    }

    /// Creates a pending payout.
    ///
    /// # Errors
    /// Returns `InvalidArgument` for a non-positive amount, missing source,
    /// or missing destination address.
    pub async fn create_payout(&self, request: PayoutRequest) -> Result<Transaction> {
        Self::validate_amount(request.amount)?;
        if request.source.trim().is_empty() {
            return Err(Error::invalid_argument("payout source is required"));
        }
        if request.destination_address.trim().is_empty() {
            return Err(Error::invalid_argument(
                "payout destination address is required",
            ));
        }

        let txn = Transaction {
            id: new_transaction_id(),
            amount: request.amount,
            currency: request.currency,
            method: request.method,
            kind: TransactionKind::Payout {
                source: request.source,
                destination_address: request.destination_address,
                settlement_reference: None,
            },
            status: TransactionStatus::Pending,
            created_at: Utc::now(),
            completed_at: None,
        };

        self.state().active.insert(txn.id.clone(), txn.clone());
        tracing::info!(id = %txn.id, amount = %txn.amount, "payout created");
        self.emit("transaction.created", &txn).await;
        Ok(txn)
    }

    /// Confirms a pending transaction: marks it completed, stamps
    /// `completed_at`, archives it, and removes it from the active index.
    ///
    /// Payouts settle only when payouts are enabled and the destination
    /// address validates; both checks run before any mutation, so a failed
    /// confirm leaves the record exactly where it was.
    ///
    /// # Errors
    /// Returns `NotFound` for an unknown id, `InvalidState` for a record
    /// that is not pending, and `Configuration` when payout settlement
    /// prerequisites fail.
    pub async fn confirm(&self, id: &str) -> Result<Transaction> {
        let confirmed = {
            let mut state = self.state();
            if state.archive.contains_key(id) {
                return Err(Error::invalid_state(format!(
                    "transaction {id} is archived and terminal"
                )));
            }
            let txn = state
                .active
                .get(id)
                .ok_or_else(|| Error::NotFound(format!("transaction {id}")))?;
            if !txn.is_pending() {
                return Err(Error::invalid_state(format!(
                    "transaction {id} is not pending"
                )));
            }

            let settlement_reference = match &txn.kind {
                TransactionKind::Payout {
                    destination_address,
                    ..
                } => {
                    let enabled = self
                        .config
                        .get("payout.enabled")
                        .and_then(|v| v.as_bool())
                        .unwrap_or(false);
                    if !enabled {
                        return Err(Error::Configuration("payouts are disabled".to_string()));
                    }
                    if !self.validator.is_valid(destination_address) {
                        return Err(Error::Configuration(format!(
                            "destination address {destination_address} failed validation"
                        )));
                    }
                    Some(new_settlement_reference())
                }
                TransactionKind::Payment { .. } => None,
            };

            let mut txn = state
                .active
                .remove(id)
                .ok_or_else(|| Error::NotFound(format!("transaction {id}")))?;
            let now = Utc::now();
            txn.status = TransactionStatus::Completed;
            txn.completed_at = Some(now);
            if let TransactionKind::Payout {
                settlement_reference: slot,
                ..
            } = &mut txn.kind
            {
                *slot = settlement_reference;
            }

            if let Some(handle) = state.settlements.remove(id) {
                handle.abort();
            }
            state.archive.insert(
                id.to_string(),
                ArchivedTransaction {
                    transaction: txn.clone(),
                    archived_at: now,
                    final_status: TransactionStatus::Completed,
                    archival_type: ArchivalType::Settled,
                },
            );
            txn
        };

        tracing::info!(id = %confirmed.id, kind = confirmed.kind.name(), "transaction completed");
        self.emit("transaction.completed", &confirmed).await;
        Ok(confirmed)
    }

    /// Cancels a pending transaction and archives it. Any scheduled
    /// settlement for the id is aborted first; a cancelled transaction is
    /// never auto-confirmed afterwards.
    ///
    /// # Errors
    /// Returns `NotFound` for an unknown id and `InvalidState` when the
    /// record is already terminal.
    pub async fn cancel(&self, id: &str) -> Result<Transaction> {
        let cancelled = {
            let mut state = self.state();
            if let Some(archived) = state.archive.get(id) {
                let status = match archived.final_status {
                    TransactionStatus::Completed => "completed",
                    TransactionStatus::Cancelled => "cancelled",
                    TransactionStatus::Pending => "pending",
                };
                return Err(Error::invalid_state(format!(
                    "transaction {id} is already {status}"
                )));
            }
            let txn = state
                .active
                .get(id)
                .ok_or_else(|| Error::NotFound(format!("transaction {id}")))?;
            if !txn.is_pending() {
                return Err(Error::invalid_state(format!(
                    "transaction {id} is not pending"
                )));
            }

            if let Some(handle) = state.settlements.remove(id) {
                handle.abort();
            }

            let mut txn = state
                .active
                .remove(id)
                .ok_or_else(|| Error::NotFound(format!("transaction {id}")))?;
            let now = Utc::now();
            txn.status = TransactionStatus::Cancelled;
            state.archive.insert(
                id.to_string(),
                ArchivedTransaction {
                    transaction: txn.clone(),
                    archived_at: now,
                    final_status: TransactionStatus::Cancelled,
                    archival_type: ArchivalType::Cancelled,
                },
            );
            txn
        };

        tracing::info!(id = %cancelled.id, "transaction cancelled");
        self.emit("transaction.cancelled", &cancelled).await;
        Ok(cancelled)
    }

    /// Moves an archived record back to pending, stripping archival
    /// metadata, `completed_at`, and any settlement reference.
    ///
    /// Returns `None` (no-op) when the id is not currently archived.
    pub fn restore(&self, id: &str) -> Option<Transaction> {
        let mut state = self.state();
        let archived = state.archive.remove(id)?;

        let mut txn = archived.transaction;
        txn.status = TransactionStatus::Pending;
        txn.completed_at = None;
        if let TransactionKind::Payout {
            settlement_reference,
            ..
        } = &mut txn.kind
        {
            *settlement_reference = None;
        }

        state.active.insert(id.to_string(), txn.clone());
        tracing::info!(id = %txn.id, "transaction restored to pending");
        Some(txn)
    }

    /// Looks up a record, active index first, archive as fallback.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<LedgerRecord> {
        let state = self.state();
        if let Some(txn) = state.active.get(id) {
            return Some(LedgerRecord::Active(txn.clone()));
        }
        state
            .archive
            .get(id)
            .map(|archived| LedgerRecord::Archived(archived.clone()))
    }

    /// Lists transactions across both partitions, oldest first.
    #[must_use]
    pub fn list(&self, filter: &ListFilter) -> Vec<Transaction> {
        let state = self.state();
        let mut records: Vec<Transaction> = state
            .active
            .values()
            .cloned()
            .chain(state.archive.values().map(|a| a.transaction.clone()))
            .filter(|txn| {
                filter.status.map_or(true, |status| txn.status == status)
                    && filter.kind.map_or(true, |kind| match kind {
                        KindFilter::Payment => !txn.kind.is_payout(),
                        KindFilter::Payout => txn.kind.is_payout(),
                    })
            })
            .collect();

        records.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        if let Some(limit) = filter.limit {
            records.truncate(limit);
        }
        records
    }

    /// Schedules a deferred settlement: after `delay`, the transaction is
    /// confirmed by a background task. The task is cancellable: `cancel`
    /// on the id before the delay elapses wins deterministically and the
    /// suppressed settlement logs at debug level.
    ///
    /// # Errors
    /// Returns `NotFound` for an unknown id and `InvalidState` when the
    /// record is not pending or already has a scheduled settlement.
    pub fn schedule_confirm(&self, id: &str, delay: Duration) -> Result<()> {
        let mut state = self.state();
        let txn = state
            .active
            .get(id)
            .ok_or_else(|| Error::NotFound(format!("transaction {id}")))?;
        if !txn.is_pending() {
            return Err(Error::invalid_state(format!(
                "transaction {id} is not pending"
            )));
        }
        if state.settlements.contains_key(id) {
            return Err(Error::invalid_state(format!(
                "transaction {id} already has a scheduled settlement"
            )));
        }

        let ledger = self.clone();
        let task_id = id.to_string();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            match ledger.confirm(&task_id).await {
                Ok(_) => tracing::info!(id = %task_id, "deferred settlement confirmed"),
                Err(e) => {
                    // Leave the id reschedulable after a failed settlement.
                    ledger.state().settlements.remove(&task_id);
                    tracing::debug!(id = %task_id, "deferred settlement skipped: {e}");
                }
            }
        });
        state.settlements.insert(id.to_string(), handle.abort_handle());

        tracing::debug!(id, delay_ms = delay.as_millis() as u64, "settlement scheduled");
        Ok(())
    }

    /// Number of records currently in the active index.
    #[must_use]
    pub fn active_len(&self) -> usize {
        self.state().active.len()
    }

    /// Number of records currently archived.
    #[must_use]
    pub fn archive_len(&self) -> usize {
        self.state().archive.len()
    }
}
