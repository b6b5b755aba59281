//! The multi-group store.
//!
//! One registry instance is created at startup and passed by reference to
//! every operation; there is deliberately no process-wide global. Groups are
//! fully independent of each other.

use std::collections::HashMap;

use crate::Group;

/// Maps a chat id to its [`Group`]. Lifecycle container only.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Registry {
    groups: HashMap<i64, Group>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the group for `id`, creating an empty one if absent.
    ///
    /// The boolean reports whether the group already existed, so callers can
    /// tell "created" apart from "found".
    pub fn get_or_create(&mut self, id: i64) -> (&mut Group, bool) {
        let existed = self.groups.contains_key(&id);
        (self.groups.entry(id).or_insert_with(|| Group::new(id)), existed)
    }

    /// Replaces the group for `id` with a fresh empty one, discarding any
    /// prior accounts and history. Returns whether a group existed before.
    ///
    /// This is the `/start` reset: caller-visible and intentional, not an
    /// error.
    pub fn recreate(&mut self, id: i64) -> bool {
        self.groups.insert(id, Group::new(id)).is_some()
    }

    pub fn get(&self, id: i64) -> Option<&Group> {
        self.groups.get(&id)
    }

    /// Iterates over all groups, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Group> {
        self.groups.values()
    }

    /// Inserts a restored group. Used by the snapshot decoder.
    pub(crate) fn insert(&mut self, group: Group) {
        self.groups.insert(group.id, group);
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
