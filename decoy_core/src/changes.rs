// Copyright 2026 the Decoy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Attribute change tracking.
//!
//! [`ChangeTracker`] marks attribute writes on the [`dirty`](crate::dirty)
//! channels and drains them into an [`AttributeChanges`] set.

use alloc::vec::Vec;

use understory_dirty::{CycleHandling, DirtyTracker};

use crate::attributes::AttrKey;
use crate::dirty;

/// The set of changes produced by a single drain.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AttributeChanges {
    /// Attributes written since the last drain, in slot-index order.
    pub keys: Vec<AttrKey>,
    /// Whether any layout-affecting attribute was written.
    pub layout_changed: bool,
}

impl AttributeChanges {
    /// A change set naming every attribute, for a presenter's first paint.
    #[must_use]
    pub fn all() -> Self {
        Self {
            keys: AttrKey::ALL.to_vec(),
            layout_changed: true,
        }
    }

    /// Whether nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty() && !self.layout_changed
    }

    /// Whether `key` is part of this change set.
    #[must_use]
    pub fn contains(&self, key: AttrKey) -> bool {
        self.keys.contains(&key)
    }

    /// Clears all change lists.
    pub fn clear(&mut self) {
        self.keys.clear();
        self.layout_changed = false;
    }
}

/// Records which attributes were written.
#[derive(Debug)]
pub struct ChangeTracker {
    dirty: DirtyTracker<u32>,
}

impl Default for ChangeTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeTracker {
    /// Creates a tracker with nothing marked.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dirty: DirtyTracker::with_cycle_handling(CycleHandling::Error),
        }
    }

    /// Marks `key` as written.
    pub fn mark(&mut self, key: AttrKey) {
        self.dirty.mark(key.index(), dirty::ATTRIBUTE);
        if key.affects_layout() {
            self.dirty.mark(key.index(), dirty::LAYOUT);
        }
    }

    /// Drains both channels into a fresh change set.
    pub fn drain(&mut self) -> AttributeChanges {
        let mut changes = AttributeChanges::default();
        self.drain_into(&mut changes);
        changes
    }

    /// Drains both channels into `changes`, reusing its allocation.
    pub fn drain_into(&mut self, changes: &mut AttributeChanges) {
        changes.clear();

        let mut written: Vec<u32> = self
            .dirty
            .drain(dirty::ATTRIBUTE)
            .deterministic()
            .run()
            .collect();
        written.sort_unstable();
        changes
            .keys
            .extend(written.into_iter().filter_map(AttrKey::from_index));

        let layout: Vec<u32> = self
            .dirty
            .drain(dirty::LAYOUT)
            .deterministic()
            .run()
            .collect();
        changes.layout_changed = !layout.is_empty();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_reports_marked_keys_in_slot_order() {
        let mut t = ChangeTracker::new();
        t.mark(AttrKey::Volume);
        t.mark(AttrKey::Companions);
        t.mark(AttrKey::Volume);

        let changes = t.drain();
        assert_eq!(changes.keys, [AttrKey::Companions, AttrKey::Volume]);
        assert!(!changes.layout_changed);
    }

    #[test]
    fn layout_keys_set_layout_flag() {
        let mut t = ChangeTracker::new();
        t.mark(AttrKey::Width);
        let changes = t.drain();
        assert!(changes.contains(AttrKey::Width));
        assert!(changes.layout_changed);
    }

    #[test]
    fn drain_empties_tracker() {
        let mut t = ChangeTracker::new();
        t.mark(AttrKey::Expanded);
        let _ = t.drain();
        assert!(t.drain().is_empty());
    }

    #[test]
    fn all_names_every_key() {
        let all = AttributeChanges::all();
        assert_eq!(all.keys.len(), AttrKey::ALL.len());
        assert!(all.layout_changed);
    }
}
