//! The module contains the `Account` struct and its implementation.

use serde::{Deserialize, Serialize};

use crate::MoneyCents;

/// A named running balance inside a group.
///
/// The balance is a tab, not a funded account: it can take any sign, and
/// `credit`/`debit` never fail. A negative balance means the account owes the
/// group, a positive one means the group owes the account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub name: String,
    pub balance: MoneyCents,
}

impl Account {
    /// Creates an account with a zero balance.
    pub fn new(name: String) -> Self {
        Self {
            name,
            balance: MoneyCents::ZERO,
        }
    }

    /// Increases the balance by `amount`.
    pub fn credit(&mut self, amount: MoneyCents) {
        self.balance += amount;
    }

    /// Decreases the balance by `amount`.
    pub fn debit(&mut self, amount: MoneyCents) {
        self.balance -= amount;
    }
}
