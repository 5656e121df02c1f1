use tplmarket_types::SavedSet;

/// Seeding progress of the reconciler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcilerState {
    Uninitialized,
    /// Local cache consulted; working set reflects it.
    LocalLoaded,
    /// Remote copy consulted (or deliberately skipped); seeding is over.
    Reconciled,
}

/// Result of a toggle: the template's new membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Toggle {
    pub saved: bool,
}

/// Owns the in-session saved-set working copy.
///
/// Seeding is replace-wins, never a union merge: a non-empty local cache is
/// the working set outright and the remote copy is ignored; the remote copy
/// is adopted only when the local side came up empty. All mutations to the
/// saved set go through this type.
#[derive(Debug, Clone, Default)]
pub struct SavedSetReconciler {
    state: ReconcilerState,
    working: SavedSet,
}

impl Default for ReconcilerState {
    fn default() -> Self {
        Self::Uninitialized
    }
}

impl SavedSetReconciler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ReconcilerState {
        self.state
    }

    /// The session-authoritative saved set.
    pub fn working_set(&self) -> &SavedSet {
        &self.working
    }

    /// Adopts the local cache copy. First transition; later calls are ignored.
    pub fn seed_local(&mut self, cached: SavedSet) {
        if self.state != ReconcilerState::Uninitialized {
            return;
        }
        self.working = cached;
        self.state = ReconcilerState::LocalLoaded;
    }

    /// Offers the remote copy. Adopted only when the local seed was empty
    /// and the remote copy is not; either way seeding finishes here.
    pub fn seed_remote(&mut self, remote: SavedSet) {
        if self.state != ReconcilerState::LocalLoaded {
            return;
        }
        if self.working.is_empty() && !remote.is_empty() {
            self.working = remote;
        }
        self.state = ReconcilerState::Reconciled;
    }

    /// Flips membership of `id` in the working set.
    pub fn toggle(&mut self, id: &str) -> Toggle {
        if self.working.remove(id) {
            Toggle { saved: false }
        } else {
            self.working.insert(id);
            Toggle { saved: true }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nonempty_local_wins_over_remote() {
        let mut reconciler = SavedSetReconciler::new();
        reconciler.seed_local(SavedSet::from_ids(["t1", "t3"]));
        reconciler.seed_remote(SavedSet::from_ids(["t2"]));

        assert_eq!(reconciler.working_set().ids(), ["t1", "t3"]);
        assert_eq!(reconciler.state(), ReconcilerState::Reconciled);
    }

    #[test]
    fn empty_local_adopts_remote() {
        let mut reconciler = SavedSetReconciler::new();
        reconciler.seed_local(SavedSet::new());
        assert_eq!(reconciler.state(), ReconcilerState::LocalLoaded);

        reconciler.seed_remote(SavedSet::from_ids(["t2"]));
        assert_eq!(reconciler.working_set().ids(), ["t2"]);
    }

    #[test]
    fn empty_remote_leaves_working_empty() {
        let mut reconciler = SavedSetReconciler::new();
        reconciler.seed_local(SavedSet::new());
        reconciler.seed_remote(SavedSet::new());

        assert!(reconciler.working_set().is_empty());
        assert_eq!(reconciler.state(), ReconcilerState::Reconciled);
    }

    #[test]
    fn repeated_seeds_are_ignored() {
        let mut reconciler = SavedSetReconciler::new();
        reconciler.seed_local(SavedSet::from_ids(["t1"]));
        reconciler.seed_local(SavedSet::from_ids(["t9"]));
        reconciler.seed_remote(SavedSet::from_ids(["t2"]));
        reconciler.seed_remote(SavedSet::from_ids(["t8"]));

        assert_eq!(reconciler.working_set().ids(), ["t1"]);
    }

    #[test]
    fn toggle_flips_membership() {
        let mut reconciler = SavedSetReconciler::new();
        reconciler.seed_local(SavedSet::new());

        assert_eq!(reconciler.toggle("t5"), Toggle { saved: true });
        assert!(reconciler.working_set().contains("t5"));

        assert_eq!(reconciler.toggle("t5"), Toggle { saved: false });
        assert!(!reconciler.working_set().contains("t5"));
    }

    #[test]
    fn toggle_appends_at_the_end() {
        let mut reconciler = SavedSetReconciler::new();
        reconciler.seed_local(SavedSet::from_ids(["t1", "t2"]));

        reconciler.toggle("t1");
        reconciler.toggle("t1");

        // Re-saving moves the id to the most-recent position
        assert_eq!(reconciler.working_set().ids(), ["t2", "t1"]);
    }
}
