//! Ledger entry primitives.
//!
//! An `Entry` is an immutable record of a balance-affecting event. Entries
//! are validated and applied by [`Group::apply`]; the history keeps them in
//! application order for reporting and export.
//!
//! [`Group::apply`]: crate::Group::apply

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::MoneyCents;

/// A balance-affecting event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Entry {
    /// One account fronted `amount`; every participant owes an equal share.
    SharedExpense {
        amount: MoneyCents,
        payer: String,
        participants: Vec<String>,
    },
    /// `amount` moved from `source` to `destination`.
    DirectTransfer {
        amount: MoneyCents,
        source: String,
        destination: String,
    },
}

impl Entry {
    pub fn shared_expense(amount: MoneyCents, payer: &str, participants: &[String]) -> Self {
        Self::SharedExpense {
            amount,
            payer: payer.to_string(),
            participants: participants.to_vec(),
        }
    }

    pub fn direct_transfer(amount: MoneyCents, source: &str, destination: &str) -> Self {
        Self::DirectTransfer {
            amount,
            source: source.to_string(),
            destination: destination.to_string(),
        }
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::SharedExpense {
                amount,
                payer,
                participants,
            } => write!(
                f,
                "{payer} paid {amount} for {}",
                participants.join(", ")
            ),
            Entry::DirectTransfer {
                amount,
                source,
                destination,
            } => write!(f, "{source} -> {destination}: {amount}"),
        }
    }
}
