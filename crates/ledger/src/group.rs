//! The `Group` owns the accounts and the entry history of one chat.
//!
//! All mutations go through [`Group::apply`], which is atomic: it validates
//! the whole entry and computes every balance delta before touching any
//! account. The primary correctness property is the zero-sum invariant: the
//! balances of a group always sum to exactly zero after a successful apply.

use std::fmt;

use crate::{Account, Entry, LedgerError, MoneyCents, ResultLedger};

/// An isolated ledger scope: named accounts plus an append-only history.
///
/// Accounts are kept in insertion order; reports and settlement tie-breaks
/// rely on that order being stable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Group {
    pub id: i64,
    accounts: Vec<Account>,
    history: Vec<Entry>,
}

impl Group {
    /// Creates an empty group.
    pub fn new(id: i64) -> Self {
        Self {
            id,
            accounts: Vec::new(),
            history: Vec::new(),
        }
    }

    /// Rebuilds a group from persisted state. Used by the snapshot decoder.
    pub(crate) fn from_parts(id: i64, accounts: Vec<Account>, history: Vec<Entry>) -> Self {
        Self {
            id,
            accounts,
            history,
        }
    }

    /// Adds a new account with a zero balance.
    pub fn add_account(&mut self, name: &str) -> ResultLedger<()> {
        if self.position(name).is_some() {
            return Err(LedgerError::DuplicateAccount(name.to_string()));
        }
        self.accounts.push(Account::new(name.to_string()));
        Ok(())
    }

    /// Applies an entry to the group.
    ///
    /// Either every balance delta is applied and the entry is appended to the
    /// history, or nothing changes and an error is returned. The deltas of a
    /// valid entry always sum to zero, so the zero-sum invariant survives
    /// every successful call.
    pub fn apply(&mut self, entry: Entry) -> ResultLedger<()> {
        let deltas = self.entry_deltas(&entry)?;
        for (index, delta) in deltas {
            self.accounts[index].credit(delta);
        }
        self.history.push(entry);
        Ok(())
    }

    /// Validates `entry` and computes its balance deltas as `(account index,
    /// signed credit)` pairs. No mutation happens here.
    fn entry_deltas(&self, entry: &Entry) -> ResultLedger<Vec<(usize, MoneyCents)>> {
        match entry {
            Entry::SharedExpense {
                amount,
                payer,
                participants,
            } => {
                if !amount.is_positive() {
                    return Err(LedgerError::InvalidAmount(amount.to_string()));
                }

                // Duplicate names are not meaningful; keep the first occurrence.
                let mut distinct: Vec<&str> = Vec::with_capacity(participants.len());
                for name in participants {
                    if !distinct.contains(&name.as_str()) {
                        distinct.push(name);
                    }
                }
                if distinct.is_empty() {
                    return Err(LedgerError::InvalidParticipants(
                        "at least one participant is required".to_string(),
                    ));
                }

                let payer_index = self.resolve(payer)?;
                let n = distinct.len() as i64;
                let (share, _) = amount.split_even(n);

                // Each participant owes `share`; the payer is credited
                // `share * n`, so the rounding remainder of an uneven split
                // comes out of the payer's credit and the batch sums to zero.
                let mut deltas = Vec::with_capacity(distinct.len() + 1);
                deltas.push((payer_index, MoneyCents::new(share.cents() * n)));
                for name in distinct {
                    deltas.push((self.resolve(name)?, -share));
                }
                Ok(deltas)
            }
            Entry::DirectTransfer {
                amount,
                source,
                destination,
            } => {
                if !amount.is_positive() {
                    return Err(LedgerError::InvalidAmount(amount.to_string()));
                }
                if source == destination {
                    return Err(LedgerError::InvalidParticipants(
                        "source and destination must differ".to_string(),
                    ));
                }
                Ok(vec![
                    (self.resolve(source)?, -*amount),
                    (self.resolve(destination)?, *amount),
                ])
            }
        }
    }

    /// Returns a balance snapshot in account insertion order.
    pub fn balances(&self) -> Vec<(String, MoneyCents)> {
        self.accounts
            .iter()
            .map(|account| (account.name.clone(), account.balance))
            .collect()
    }

    /// The accounts in insertion order.
    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    /// The applied entries in application order.
    pub fn history(&self) -> &[Entry] {
        &self.history
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.accounts.iter().position(|account| account.name == name)
    }

    fn resolve(&self, name: &str) -> ResultLedger<usize> {
        self.position(name)
            .ok_or_else(|| LedgerError::UnknownAccount(name.to_string()))
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for account in &self.accounts {
            writeln!(f, "{}: {}", account.name, account.balance)?;
        }
        Ok(())
    }
}
