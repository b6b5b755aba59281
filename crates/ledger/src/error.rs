//! The module contains the errors the ledger can throw.
//!
//! Every error is local and recoverable: the caller can retry with corrected
//! input. [`ImbalancedLedger`] is the exception in spirit — it means an
//! apply-time invariant broke upstream and should be reported loudly.
//!
//! [`ImbalancedLedger`]: LedgerError::ImbalancedLedger
use thiserror::Error;

/// Ledger custom errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum LedgerError {
    #[error("\"{0}\" account not found!")]
    UnknownAccount(String),
    #[error("\"{0}\" already present!")]
    DuplicateAccount(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid participants: {0}")]
    InvalidParticipants(String),
    #[error("Ledger out of balance: {0}")]
    ImbalancedLedger(String),
    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),
}
