use shared::ObjectId;

/// Object selection state (supports additive multi-select)
///
/// Additive selection only accumulates: re-clicking a selected object with
/// the additive modifier keeps it selected.
#[derive(Debug, Default, Clone)]
pub struct SelectionState {
    /// Selected object IDs (in order of selection)
    selected: Vec<ObjectId>,
    /// Version counter for selection changes (drives highlight refresh)
    version: u64,
}

impl SelectionState {
    /// Primary (first) selected object
    pub fn primary(&self) -> Option<&ObjectId> {
        self.selected.first()
    }

    /// All selected objects
    pub fn all(&self) -> &[ObjectId] {
        &self.selected
    }

    /// Check if an object is selected
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.iter().any(|s| s == id)
    }

    /// Select a single object (clears previous selection)
    pub fn select(&mut self, id: ObjectId) {
        self.selected.clear();
        self.selected.push(id);
        self.version += 1;
    }

    /// Add to the selection (Shift+click behavior); no-op if already selected
    pub fn select_additive(&mut self, id: ObjectId) {
        if !self.is_selected(&id) {
            self.selected.push(id);
            self.version += 1;
        }
    }

    /// Replace the selection with several objects, keeping order and skipping repeats
    pub fn select_many(&mut self, ids: impl IntoIterator<Item = ObjectId>) {
        self.selected.clear();
        for id in ids {
            if !self.is_selected(&id) {
                self.selected.push(id);
            }
        }
        self.version += 1;
    }

    /// Drop one id from the selection
    pub fn remove(&mut self, id: &str) {
        let before = self.selected.len();
        self.selected.retain(|s| s != id);
        if self.selected.len() != before {
            self.version += 1;
        }
    }

    /// Prune ids that no longer exist
    pub fn retain_existing(&mut self, exists: impl Fn(&str) -> bool) {
        let before = self.selected.len();
        self.selected.retain(|s| exists(s));
        if self.selected.len() != before {
            self.version += 1;
        }
    }

    /// Clear all selection
    pub fn clear(&mut self) {
        if !self.selected.is_empty() {
            self.selected.clear();
            self.version += 1;
        }
    }

    /// Number of selected objects
    pub fn count(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Selection version (increments whenever the set changes)
    pub fn version(&self) -> u64 {
        self.version
    }
}
