//! Pointer interaction: selection, dragging and the two-click link gesture

use shared::{LinkId, ObjectId, Point2D};

use super::{DragState, EditorSession};
use crate::sim::SimulationAdapter;

/// Outcome of one click of the link gesture
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkClick {
    /// First endpoint chosen, waiting for the second
    Started(ObjectId),
    /// Link created between the pending endpoint and this one
    Created(LinkId),
    /// Same object clicked twice, gesture dropped
    Cancelled,
    /// Unknown object, nothing changed
    Invalid,
}

impl<S: SimulationAdapter> EditorSession<S> {
    // ── Selection ─────────────────────────────────────────────

    /// Select one object, replacing the selection
    pub fn select(&mut self, id: &str) -> bool {
        if !self.scene.contains(id) {
            return false;
        }
        self.selection.select(id.to_string());
        true
    }

    /// Add an object to the selection. Already-selected objects stay selected.
    pub fn select_additive(&mut self, id: &str) -> bool {
        if !self.scene.contains(id) {
            return false;
        }
        self.selection.select_additive(id.to_string());
        true
    }

    /// Replace the selection with the existing ids among `ids`
    pub fn select_many(&mut self, ids: &[ObjectId]) {
        let existing: Vec<ObjectId> = ids
            .iter()
            .filter(|id| self.scene.contains(id))
            .cloned()
            .collect();
        self.selection.select_many(existing);
    }

    /// Click-select at a world point. Empty space clears a non-additive
    /// selection.
    pub fn select_at(&mut self, point: Point2D, additive: bool) -> Option<ObjectId> {
        let Some(id) = self.sync.object_at(point).cloned() else {
            if !additive {
                self.selection.clear();
            }
            return None;
        };
        if additive {
            self.selection.select_additive(id.clone());
        } else {
            self.selection.select(id.clone());
        }
        Some(id)
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    // ── Drag ──────────────────────────────────────────────────

    /// Grab the object under the pointer. Locked objects and empty space
    /// start nothing.
    pub fn begin_drag(&mut self, point: Point2D) -> Option<ObjectId> {
        let id = self.sync.object_at(point)?.clone();
        if self.sync.is_locked(&id) {
            tracing::debug!("Drag suppressed on locked {id}");
            return None;
        }
        if !self.selection.is_selected(&id) {
            self.selection.select(id.clone());
        }
        self.drag = Some(DragState {
            id: id.clone(),
            moved: false,
        });
        Some(id)
    }

    /// Move the grabbed object to the pointer
    pub fn drag_to(&mut self, point: Point2D) -> bool {
        let Some(drag) = self.drag.as_mut() else {
            return false;
        };
        if !self.sync.drag_to(&drag.id, point) {
            return false;
        }
        drag.moved = true;
        let id = drag.id.clone();
        self.scene.update_object(&id, |o| o.position = point);
        true
    }

    /// Release the grabbed object, committing if it moved
    pub fn end_drag(&mut self) -> bool {
        match self.drag.take() {
            Some(drag) if drag.moved => {
                self.commit();
                true
            }
            _ => false,
        }
    }

    /// Object currently being dragged
    pub fn dragging(&self) -> Option<&ObjectId> {
        self.drag.as_ref().map(|d| &d.id)
    }

    // ── Link gesture ──────────────────────────────────────────

    /// One click of the link tool: the first click picks an endpoint, the
    /// second creates the spring.
    pub fn link_click(&mut self, id: &str) -> LinkClick {
        if !self.scene.contains(id) {
            return LinkClick::Invalid;
        }
        match self.pending_link.take() {
            None => {
                self.pending_link = Some(id.to_string());
                LinkClick::Started(id.to_string())
            }
            Some(first) if first == id => LinkClick::Cancelled,
            Some(first) => match self.link(&first, id) {
                Ok(link_id) => LinkClick::Created(link_id),
                Err(e) => {
                    tracing::debug!("Link gesture rejected: {e}");
                    LinkClick::Invalid
                }
            },
        }
    }

    /// Abandon a half-finished link gesture
    pub fn cancel_link(&mut self) {
        self.pending_link = None;
    }

    /// First endpoint of the link gesture in progress
    pub fn pending_link(&self) -> Option<&ObjectId> {
        self.pending_link.as_ref()
    }
}
