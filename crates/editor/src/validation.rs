//! Scene/simulation consistency checks.
//!
//! `SceneValidator` compares the model held by a session with the live
//! handles owned by its synchronizer: one body per object, one spring per
//! link, valid link endpoints and counters ahead of every issued id.

use std::collections::HashSet;

use shared::{infer_next_counter, ObjectId};

use crate::session::EditorSession;
use crate::sim::SimulationAdapter;

/// Validator over one session
pub struct SceneValidator<'a, S: SimulationAdapter> {
    session: &'a EditorSession<S>,
}

impl<'a, S: SimulationAdapter> SceneValidator<'a, S> {
    pub fn new(session: &'a EditorSession<S>) -> Self {
        Self { session }
    }

    fn model_ids(&self) -> Vec<ObjectId> {
        let mut ids = self.session.scene().object_ids();
        ids.sort();
        ids
    }

    /// Object ids are unique
    pub fn are_ids_unique(&self) -> bool {
        let ids = self.session.scene().object_ids();
        let unique: HashSet<&String> = ids.iter().collect();
        unique.len() == ids.len()
    }

    /// Live body ids equal model object ids
    pub fn bodies_match_objects(&self) -> bool {
        self.session.sync().live_ids() == self.model_ids()
    }

    /// Live spring ids equal model link ids
    pub fn springs_match_links(&self) -> bool {
        let mut links: Vec<String> = self
            .session
            .scene()
            .links()
            .iter()
            .map(|l| l.id.clone())
            .collect();
        links.sort();
        self.session.sync().live_link_ids() == links
    }

    /// Every link joins two distinct existing objects
    pub fn are_link_endpoints_valid(&self) -> bool {
        let scene = self.session.scene();
        scene
            .links()
            .iter()
            .all(|l| l.a != l.b && scene.contains(&l.a) && scene.contains(&l.b))
    }

    /// Every handle maps back to the object that owns it
    pub fn are_back_references_valid(&self) -> bool {
        let sync = self.session.sync();
        self.session.scene().objects().iter().all(|o| {
            sync.handle(&o.id)
                .and_then(|h| sync.owner(h))
                .is_some_and(|owner| *owner == o.id)
        })
    }

    /// Lock flags on handle entries follow the model
    pub fn are_lock_flags_synced(&self) -> bool {
        let sync = self.session.sync();
        self.session
            .scene()
            .objects()
            .iter()
            .all(|o| sync.is_locked(&o.id) == o.locked)
    }

    /// Counters are past every numeric id suffix
    pub fn are_counters_ahead(&self) -> bool {
        let scene = self.session.scene();
        let min_next_id = infer_next_counter(scene.objects().iter().map(|o| o.id.as_str()));
        let min_next_link_id = infer_next_counter(scene.links().iter().map(|l| l.id.as_str()));
        matches!(
            (min_next_id, min_next_link_id),
            (Some(id), Some(link)) if scene.next_id() >= id && scene.next_link_id() >= link
        )
    }

    /// Selected ids all exist
    pub fn is_selection_live(&self) -> bool {
        let scene = self.session.scene();
        self.session
            .selection()
            .all()
            .iter()
            .all(|id| scene.contains(id))
    }

    /// Run all validation checks and return a list of error messages.
    /// An empty list means the session is consistent.
    pub fn validate_all(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !self.are_ids_unique() {
            errors.push("Duplicate object ids in model".to_string());
        }

        if !self.bodies_match_objects() {
            errors.push(format!(
                "Live bodies {:?} do not match objects {:?}",
                self.session.sync().live_ids(),
                self.model_ids()
            ));
        }

        if !self.springs_match_links() {
            errors.push(format!(
                "Live springs {:?} do not match {} link(s)",
                self.session.sync().live_link_ids(),
                self.session.scene().links().len()
            ));
        }

        if !self.are_link_endpoints_valid() {
            errors.push("Link with missing or equal endpoints".to_string());
        }

        if !self.are_back_references_valid() {
            errors.push("Handle back-reference points at the wrong object".to_string());
        }

        if !self.are_lock_flags_synced() {
            errors.push("Lock flag on a handle differs from the model".to_string());
        }

        if !self.are_counters_ahead() {
            errors.push(format!(
                "Counters behind issued ids (nextId={}, nextLinkId={})",
                self.session.scene().next_id(),
                self.session.scene().next_link_id()
            ));
        }

        if !self.is_selection_live() {
            errors.push("Selection references a deleted object".to_string());
        }

        errors
    }
}
