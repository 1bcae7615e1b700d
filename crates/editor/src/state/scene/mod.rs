//! Scene model store
//!
//! This module owns the authoritative list of objects and spring links plus
//! the id counters. It is pure data: no simulation handles live here.

mod display;
mod history;
mod link_ops;
mod object_ops;
pub mod persistence;

pub use display::{link_display_name, object_display_name, shape_summary, short_id};
pub use history::{History, DEFAULT_HISTORY_LIMIT};

use shared::{Physics, SceneObject, Snapshot, SpringLink, Visual};

/// Defaults applied to newly created objects
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectDefaults {
    pub physics: Physics,
    pub visual: Visual,
}

/// Scene model: objects, links and id counters
#[derive(Debug, Default)]
pub struct SceneState {
    /// Current scene content
    pub(crate) scene: Snapshot,
    /// Physics/visual given to new objects
    pub(crate) defaults: ObjectDefaults,
    /// Monotonically increasing version counter, bumped on every mutation
    pub(crate) version: u64,
}

impl SceneState {
    /// Empty scene with custom object defaults
    pub fn with_defaults(defaults: ObjectDefaults) -> Self {
        Self {
            defaults,
            ..Self::default()
        }
    }

    /// Current scene version (increments on every mutation)
    pub fn version(&self) -> u64 {
        self.version
    }

    /// All objects in creation order
    pub fn objects(&self) -> &[SceneObject] {
        &self.scene.objects
    }

    /// Mutable object list, for simulation back-sync
    pub(crate) fn objects_mut(&mut self) -> &mut [SceneObject] {
        &mut self.scene.objects
    }

    /// All links in creation order
    pub fn links(&self) -> &[SpringLink] {
        &self.scene.links
    }

    /// Next object counter value
    pub fn next_id(&self) -> u64 {
        self.scene.next_id
    }

    /// Next link counter value
    pub fn next_link_id(&self) -> u64 {
        self.scene.next_link_id
    }

    /// Get an object by ID
    pub fn object(&self, id: &str) -> Option<&SceneObject> {
        self.scene.objects.iter().find(|o| o.id == id)
    }

    /// Get mutable object by ID
    pub fn object_mut(&mut self, id: &str) -> Option<&mut SceneObject> {
        self.scene.objects.iter_mut().find(|o| o.id == id)
    }

    /// Whether an object exists
    pub fn contains(&self, id: &str) -> bool {
        self.object(id).is_some()
    }

    /// Get a link by ID
    pub fn link(&self, id: &str) -> Option<&SpringLink> {
        self.scene.links.iter().find(|l| l.id == id)
    }

    /// Links with `id` as either endpoint
    pub fn links_touching(&self, id: &str) -> Vec<&SpringLink> {
        self.scene.links.iter().filter(|l| l.touches(id)).collect()
    }

    /// Ids of all objects in creation order
    pub fn object_ids(&self) -> Vec<String> {
        self.scene.objects.iter().map(|o| o.id.clone()).collect()
    }

    /// Defaults given to new objects
    pub fn defaults(&self) -> &ObjectDefaults {
        &self.defaults
    }

    /// Bump version without any structural change
    pub fn notify_mutated(&mut self) {
        self.version += 1;
    }

    /// Independent deep copy of the current state
    pub fn snapshot(&self) -> Snapshot {
        self.scene.clone()
    }

    /// Replace the whole model with a snapshot. Id counters never go
    /// backwards: each is the larger of the current and the snapshot value.
    pub fn restore(&mut self, snapshot: &Snapshot) {
        let next_id = self.scene.next_id.max(snapshot.next_id);
        let next_link_id = self.scene.next_link_id.max(snapshot.next_link_id);
        self.scene = snapshot.clone();
        self.scene.next_id = next_id;
        self.scene.next_link_id = next_link_id;
        self.version += 1;
    }

    /// Replace the whole model with a loaded document, counters included
    pub fn replace(&mut self, snapshot: Snapshot) {
        self.scene = snapshot;
        self.version += 1;
    }
}
