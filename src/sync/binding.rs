use anyhow::Result;

/// Outcome of offering an authoritative document to a binding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reconcile {
    Applied,
    SkippedDirty,
}

/// One server-owned document with a locally editable copy.
///
/// The binding refuses to let background refreshes overwrite unsaved edits:
/// once `edit` has run, `reconcile` is a no-op until a `save` succeeds (or
/// the edits are explicitly discarded). Dirtiness is per-binding; two bound
/// documents never affect each other.
#[derive(Clone, Debug)]
pub struct EditableBinding<T: Clone> {
    local: T,
    dirty: bool,
    last_synced: Option<T>,
}

impl<T: Clone> EditableBinding<T> {
    pub fn new(initial: T) -> Self {
        Self {
            local: initial,
            dirty: false,
            last_synced: None,
        }
    }

    pub fn local(&self) -> &T {
        &self.local
    }

    pub fn dirty(&self) -> bool {
        self.dirty
    }

    pub fn last_synced(&self) -> Option<&T> {
        self.last_synced.as_ref()
    }

    /// Apply a local mutation. Marks the binding dirty even if the mutator
    /// turns out to be a no-op; callers decide what counts as an edit.
    pub fn edit(&mut self, f: impl FnOnce(&mut T)) {
        f(&mut self.local);
        self.dirty = true;
    }

    /// Offer an incoming authoritative document. Discarded while dirty.
    pub fn reconcile(&mut self, incoming: T) -> Reconcile {
        if self.dirty {
            return Reconcile::SkippedDirty;
        }
        self.local = incoming.clone();
        self.last_synced = Some(incoming);
        Reconcile::Applied
    }

    /// Persist the local copy. The dirty flag clears only when `persist`
    /// returns `Ok`; on failure local state is untouched so the next manual
    /// save retries.
    pub fn save(&mut self, persist: impl FnOnce(&T) -> Result<()>) -> Result<()> {
        persist(&self.local)?;
        self.dirty = false;
        self.last_synced = Some(self.local.clone());
        Ok(())
    }

    /// Drop unsaved edits, reverting to the last synced revision.
    pub fn discard(&mut self) {
        if let Some(synced) = self.last_synced.clone() {
            self.local = synced;
        }
        self.dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry(rows: &[&str]) -> Vec<String> {
        rows.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn reconcile_applies_when_clean() {
        let mut b = EditableBinding::new(registry(&[]));
        assert_eq!(b.reconcile(registry(&["tavern"])), Reconcile::Applied);
        assert_eq!(b.local(), &registry(&["tavern"]));
        assert_eq!(b.last_synced(), Some(&registry(&["tavern"])));
    }

    #[test]
    fn dirty_binding_survives_reconcile() {
        let mut b = EditableBinding::new(registry(&["tavern"]));
        b.edit(|rows| rows.push("dungeon".to_string()));

        // A poll tick delivering a different server document must not erase
        // the unsaved row.
        assert_eq!(
            b.reconcile(registry(&["tavern", "forest"])),
            Reconcile::SkippedDirty
        );
        assert_eq!(b.local(), &registry(&["tavern", "dungeon"]));
    }

    #[test]
    fn removing_a_row_also_marks_dirty() {
        let mut b = EditableBinding::new(registry(&["tavern", "dungeon"]));
        b.edit(|rows| {
            rows.retain(|r| r != "tavern");
        });
        assert!(b.dirty());
        assert_eq!(b.reconcile(registry(&["tavern"])), Reconcile::SkippedDirty);
        assert_eq!(b.local(), &registry(&["dungeon"]));
    }

    #[test]
    fn failed_save_keeps_dirty_and_local() {
        let mut b = EditableBinding::new(registry(&[]));
        b.edit(|rows| rows.push("new".to_string()));

        let err = b.save(|_| anyhow::bail!("backend down"));
        assert!(err.is_err());
        assert!(b.dirty());
        assert_eq!(b.local(), &registry(&["new"]));

        // Still guarded against the next poll.
        assert_eq!(b.reconcile(registry(&[])), Reconcile::SkippedDirty);
    }

    #[test]
    fn successful_save_clears_dirty_and_syncs() {
        let mut b = EditableBinding::new(registry(&[]));
        b.edit(|rows| rows.push("new".to_string()));

        b.save(|_| Ok(())).unwrap();
        assert!(!b.dirty());
        assert_eq!(b.last_synced(), Some(&registry(&["new"])));

        // Clean again: the next poll wins.
        assert_eq!(b.reconcile(registry(&["server"])), Reconcile::Applied);
        assert_eq!(b.local(), &registry(&["server"]));
    }

    #[test]
    fn discard_reverts_to_last_synced() {
        let mut b = EditableBinding::new(registry(&[]));
        b.reconcile(registry(&["tavern"]));
        b.edit(|rows| rows.push("scratch".to_string()));

        b.discard();
        assert!(!b.dirty());
        assert_eq!(b.local(), &registry(&["tavern"]));
    }

    #[test]
    fn bindings_are_independent() {
        let mut audio = EditableBinding::new(registry(&["a"]));
        let mut sheet = EditableBinding::new(registry(&["s"]));
        audio.edit(|rows| rows.push("edited".to_string()));

        assert_eq!(sheet.reconcile(registry(&["s2"])), Reconcile::Applied);
        assert_eq!(audio.reconcile(registry(&["x"])), Reconcile::SkippedDirty);
    }

    #[test]
    fn edits_apply_in_invocation_order() {
        let mut b = EditableBinding::new(registry(&[]));
        b.edit(|rows| rows.push("first".to_string()));
        b.edit(|rows| rows.push("second".to_string()));
        assert_eq!(b.local(), &registry(&["first", "second"]));
    }
}
