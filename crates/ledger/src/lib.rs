//! Transaction lifecycle tracking for payments and payouts.
//!
//! Terminal records are never deleted: every transition out of `Pending`
//! moves the record into a still-queryable archive, and `restore` is the
//! only path back.

pub mod ledger;
pub mod transaction;

pub use ledger::{KindFilter, LedgerRecord, ListFilter, TransactionLedger};
pub use transaction::{
    ArchivalType, ArchivedTransaction, PaymentRequest, PayoutRequest, Transaction,
    TransactionKind, TransactionStatus,
};
