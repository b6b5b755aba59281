//! Persistence schema for the whole registry.
//!
//! The on-disk representation is decoupled from the in-memory types: the
//! snapshot structs below are the only things serialized, carry an explicit
//! schema version, and store no derived state. Observable state (balances,
//! account order, history order) round-trips exactly.

use serde::{Deserialize, Serialize};

use crate::{Account, Entry, Group, LedgerError, MoneyCents, Registry, ResultLedger};

/// Current schema version. Bump on any incompatible change to the structs
/// below.
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AccountSnapshot {
    pub name: String,
    pub balance: MoneyCents,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GroupSnapshot {
    pub id: i64,
    pub accounts: Vec<AccountSnapshot>,
    pub history: Vec<Entry>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    pub version: u32,
    pub groups: Vec<GroupSnapshot>,
}

impl RegistrySnapshot {
    /// Captures the full observable state of a registry.
    ///
    /// Groups are sorted by id so two captures of the same registry are
    /// byte-identical.
    pub fn capture(registry: &Registry) -> Self {
        let mut groups: Vec<GroupSnapshot> = registry
            .iter()
            .map(|group| GroupSnapshot {
                id: group.id,
                accounts: group
                    .accounts()
                    .iter()
                    .map(|account| AccountSnapshot {
                        name: account.name.clone(),
                        balance: account.balance,
                    })
                    .collect(),
                history: group.history().to_vec(),
            })
            .collect();
        groups.sort_by_key(|group| group.id);

        Self {
            version: SNAPSHOT_VERSION,
            groups,
        }
    }

    /// Rebuilds a registry from a snapshot.
    ///
    /// Rejects unknown schema versions instead of guessing at the layout.
    pub fn restore(self) -> ResultLedger<Registry> {
        if self.version != SNAPSHOT_VERSION {
            return Err(LedgerError::InvalidSnapshot(format!(
                "unsupported version {}, expected {SNAPSHOT_VERSION}",
                self.version
            )));
        }

        let mut registry = Registry::new();
        for group in self.groups {
            let accounts = group
                .accounts
                .into_iter()
                .map(|account| Account {
                    name: account.name,
                    balance: account.balance,
                })
                .collect();
            registry.insert(Group::from_parts(group.id, accounts, group.history));
        }
        Ok(registry)
    }
}
