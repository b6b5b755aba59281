//! Shared-expense ledger with settle-up computation.
//!
//! The crate is the in-memory core of the bot: it tracks named accounts per
//! chat group, applies shared expenses and direct transfers while keeping
//! the group balances at an exact zero sum, and computes the transfers that
//! settle everyone back to zero. All arithmetic is integer cents; there is
//! no I/O and no async in here.

pub use account::Account;
pub use entry::Entry;
pub use error::LedgerError;
pub use group::Group;
pub use money::MoneyCents;
pub use registry::Registry;
pub use settle::{Settlement, settle};
pub use snapshot::{RegistrySnapshot, SNAPSHOT_VERSION};

mod account;
mod entry;
mod error;
mod group;
mod money;
mod registry;
mod settle;
mod snapshot;

type ResultLedger<T> = Result<T, LedgerError>;
