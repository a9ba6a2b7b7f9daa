//! Payment and payout records and their archival snapshots.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Completed,
    Cancelled,
}

/// Payment (inbound) versus payout (outbound) specifics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TransactionKind {
    Payment {
        recipient: String,
    },
    Payout {
        source: String,
        destination_address: String,
        /// Synthesized at settlement; absent until the payout confirms.
        settlement_reference: Option<String>,
    },
}

impl TransactionKind {
    #[must_use]
    pub const fn is_payout(&self) -> bool {
        matches!(self, Self::Payout { .. })
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Payment { .. } => "payment",
            Self::Payout { .. } => "payout",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    /// Strictly positive; validated at creation.
    pub amount: Decimal,
    pub currency: String,
    /// Payment rail ("bank_transfer", "crypto", ...).
    pub method: String,
    pub kind: TransactionKind,
    pub status: TransactionStatus,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Transaction {
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status == TransactionStatus::Pending
    }

    /// Settlement reference, present only for confirmed payouts.
    #[must_use]
    pub fn settlement_reference(&self) -> Option<&str> {
        match &self.kind {
            TransactionKind::Payout {
                settlement_reference,
                ..
            } => settlement_reference.as_deref(),
            TransactionKind::Payment { .. } => None,
        }
    }
}

/// Why a record entered the archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArchivalType {
    Settled,
    Cancelled,
}

/// A terminal record moved out of the active index. Still queryable, never
/// deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchivedTransaction {
    pub transaction: Transaction,
    pub archived_at: DateTime<Utc>,
    pub final_status: TransactionStatus,
    pub archival_type: ArchivalType,
}

#[derive(Debug, Clone)]
pub struct PaymentRequest {
    pub amount: Decimal,
    pub currency: String,
    pub recipient: String,
    pub method: String,
}

#[derive(Debug, Clone)]
pub struct PayoutRequest {
    pub amount: Decimal,
    pub currency: String,
    pub source: String,
    pub destination_address: String,
    pub method: String,
}

pub(crate) fn new_transaction_id() -> String {
    format!("txn-{}", Uuid::new_v4())
}

pub(crate) fn new_settlement_reference() -> String {
    format!("stl-{}", Uuid::new_v4())
}
