//! Settle-up computation.
//!
//! [`settle`] turns a balance snapshot into an ordered list of transfers
//! that, once applied, bring every balance back to zero. The function is
//! pure: it never reads or mutates a [`Group`], only the snapshot it is
//! given.
//!
//! The plan is greedy (largest debtor pays the largest creditor first). A
//! globally minimal transfer count would be an NP-hard matching problem; the
//! greedy plan is deterministic, exactly zero-sum and never longer than
//! `debtors + creditors - 1` transfers, which is all the callers need.
//!
//! [`Group`]: crate::Group

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{LedgerError, MoneyCents, ResultLedger};

/// A proposed transfer. Applying it is the caller's decision; the bot turns
/// each one into a direct-transfer entry when the user settles up.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    pub amount: MoneyCents,
    pub source: String,
    pub destination: String,
}

impl fmt::Display for Settlement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}: {}", self.source, self.destination, self.amount)
    }
}

/// Computes the settlement plan for a balance snapshot.
///
/// The snapshot must be in account insertion order (ties are broken towards
/// the earlier account) and must sum to exactly zero; a non-zero sum means an
/// apply-time invariant broke upstream and yields
/// [`LedgerError::ImbalancedLedger`].
///
/// Accounts with a zero balance never appear in the plan.
pub fn settle(balances: &[(String, MoneyCents)]) -> ResultLedger<Vec<Settlement>> {
    let mut sum = MoneyCents::ZERO;
    for (_, balance) in balances {
        sum = sum
            .checked_add(*balance)
            .ok_or_else(|| LedgerError::ImbalancedLedger("balance overflow".to_string()))?;
    }
    if !sum.is_zero() {
        return Err(LedgerError::ImbalancedLedger(format!(
            "balances sum to {sum}, expected 0.00€"
        )));
    }

    // Debt and credit are both tracked as positive amounts, in insertion
    // order so ties resolve towards the earlier account.
    let mut debtors: Vec<(&str, MoneyCents)> = Vec::new();
    let mut creditors: Vec<(&str, MoneyCents)> = Vec::new();
    for (name, balance) in balances {
        if balance.is_negative() {
            debtors.push((name, -*balance));
        } else if balance.is_positive() {
            creditors.push((name, *balance));
        }
    }

    let mut plan = Vec::new();
    while !debtors.is_empty() && !creditors.is_empty() {
        let debtor = largest(&debtors);
        let creditor = largest(&creditors);
        let settled = debtors[debtor].1.min(creditors[creditor].1);

        plan.push(Settlement {
            amount: settled,
            source: debtors[debtor].0.to_string(),
            destination: creditors[creditor].0.to_string(),
        });

        debtors[debtor].1 -= settled;
        creditors[creditor].1 -= settled;
        if debtors[debtor].1.is_zero() {
            debtors.remove(debtor);
        }
        if creditors[creditor].1.is_zero() {
            creditors.remove(creditor);
        }
    }

    Ok(plan)
}

/// Index of the largest amount; the first occurrence wins on ties.
fn largest(parties: &[(&str, MoneyCents)]) -> usize {
    let mut best = 0;
    for (index, (_, amount)) in parties.iter().enumerate().skip(1) {
        if *amount > parties[best].1 {
            best = index;
        }
    }
    best
}
