//! Object and link edits

use shared::{BodyType, LinkId, ObjectId, PhysicsPreset, Point2D, SceneObject, Shape};

use super::{EditorSession, PhysicsPatch, VisualPatch};
use crate::error::EditorResult;
use crate::sim::SimulationAdapter;

/// What the live body needs after a model edit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reconcile {
    /// Shape, body type or material changed
    Rebuild,
    /// Cosmetic change only
    Appearance,
    /// Lock flag changed
    Lock,
}

impl<S: SimulationAdapter> EditorSession<S> {
    // ── Creation / deletion ───────────────────────────────────

    /// Create an object, give it a body and select it.
    /// Fails only when the object id counter is exhausted.
    pub fn add_object(
        &mut self,
        position: Point2D,
        shape: Shape,
        body_type: BodyType,
    ) -> EditorResult<ObjectId> {
        let object = self.scene.create_object(position, shape, body_type)?;
        self.sync.materialize(&object);
        self.selection.select(object.id.clone());
        self.commit();
        tracing::debug!("Added {} at ({}, {})", object.id, position.x, position.y);
        Ok(object.id)
    }

    /// Copy every selected object (links are not copied) and select the copies.
    /// Copies made before an id-counter failure are kept and committed.
    pub fn duplicate_selected(&mut self) -> EditorResult<Vec<ObjectId>> {
        let offset = self.settings.editing.duplicate_offset;
        let mut copies = Vec::new();
        let mut failure = None;
        for id in self.selection.all().to_vec() {
            match self.scene.duplicate_object(&id, offset) {
                Ok(Some(copy)) => {
                    self.sync.materialize(&copy);
                    copies.push(copy.id);
                }
                Ok(None) => {}
                Err(e) => {
                    failure = Some(e);
                    break;
                }
            }
        }
        if !copies.is_empty() {
            self.selection.select_many(copies.iter().cloned());
            self.commit();
        }
        match failure {
            Some(e) => Err(e),
            None => Ok(copies),
        }
    }

    /// Delete every selected object with its links
    pub fn delete_selected(&mut self) -> Vec<ObjectId> {
        let ids = self.selection.all().to_vec();
        let deleted: Vec<ObjectId> = ids
            .into_iter()
            .filter(|id| self.remove_object_and_body(id))
            .collect();
        let scene = &self.scene;
        self.selection.retain_existing(|id| scene.contains(id));
        if deleted.is_empty() {
            return deleted;
        }
        self.commit();
        deleted
    }

    /// Delete one object with its links. Unknown ids are a no-op.
    pub fn delete_object(&mut self, id: &str) -> bool {
        if !self.remove_object_and_body(id) {
            return false;
        }
        self.selection.remove(id);
        self.commit();
        true
    }

    fn remove_object_and_body(&mut self, id: &str) -> bool {
        if !self.scene.contains(id) {
            return false;
        }
        let removed_links = self.scene.remove_object(id);
        self.sync.remove_object(id, &removed_links);
        if self.pending_link.as_deref() == Some(id) {
            self.pending_link = None;
        }
        if self.drag.as_ref().is_some_and(|d| d.id == id) {
            self.drag = None;
        }
        tracing::debug!("Deleted {id} and {} link(s)", removed_links.len());
        true
    }

    // ── Links ─────────────────────────────────────────────────

    /// Spring-link two objects at their current distance
    pub fn link(&mut self, a: &str, b: &str) -> EditorResult<LinkId> {
        let link = self.scene.create_link(a, b)?;
        self.sync.attach_link(&link);
        self.commit();
        tracing::debug!("Linked {a} and {b} as {}", link.id);
        Ok(link.id)
    }

    /// Remove a single link
    pub fn unlink(&mut self, link_id: &str) -> bool {
        if !self.scene.remove_link(link_id) {
            return false;
        }
        self.sync.detach_link(link_id);
        self.commit();
        true
    }

    // ── Property edits on the selection ───────────────────────

    /// Apply `edit` to every selected object and reconcile its body.
    /// Commits once when at least one object changed.
    fn edit_selected(&mut self, reconcile: Reconcile, edit: impl Fn(&mut SceneObject)) -> bool {
        let ids = self.selection.all().to_vec();
        let mut changed = false;
        for id in &ids {
            if !self.scene.update_object(id, &edit) {
                continue;
            }
            changed = true;
            let Some(object) = self.scene.object(id) else {
                continue;
            };
            match reconcile {
                Reconcile::Rebuild => {
                    self.sync.rebuild(object, self.scene.links());
                }
                Reconcile::Appearance => {
                    self.sync.refresh_appearance(object);
                }
                Reconcile::Lock => {
                    self.sync.set_locked(id, object.locked);
                }
            }
        }
        if changed {
            self.commit();
        }
        changed
    }

    /// Change the shape of the selected objects
    pub fn set_shape(&mut self, shape: Shape) -> bool {
        self.edit_selected(Reconcile::Rebuild, |o| o.shape = shape.clone())
    }

    /// Change the body type of the selected objects
    pub fn set_body_type(&mut self, body_type: BodyType) -> bool {
        self.edit_selected(Reconcile::Rebuild, |o| o.body_type = body_type)
    }

    /// Patch physics parameters of the selected objects
    pub fn set_physics(&mut self, patch: PhysicsPatch) -> bool {
        if patch.is_empty() {
            return false;
        }
        self.edit_selected(Reconcile::Rebuild, |o| patch.apply(&mut o.physics))
    }

    /// Replace physics of the selected objects with a preset
    pub fn apply_preset(&mut self, preset: PhysicsPreset) -> bool {
        let physics = preset.physics();
        self.edit_selected(Reconcile::Rebuild, |o| o.physics = physics)
    }

    /// Patch visual parameters of the selected objects
    pub fn set_visual(&mut self, patch: VisualPatch) -> bool {
        if patch.is_empty() {
            return false;
        }
        self.edit_selected(Reconcile::Appearance, |o| patch.apply(&mut o.visual))
    }

    /// Rename the selected objects
    pub fn set_label(&mut self, label: &str) -> bool {
        self.edit_selected(Reconcile::Appearance, |o| o.label = label.to_string())
    }

    /// Lock or unlock the selected objects against dragging
    pub fn set_locked(&mut self, locked: bool) -> bool {
        self.edit_selected(Reconcile::Lock, |o| o.locked = locked)
    }

    /// Move one object, keeping its velocity
    pub fn set_position(&mut self, id: &str, position: Point2D) -> bool {
        if !self.scene.update_object(id, |o| o.position = position) {
            return false;
        }
        self.sync.set_position(id, position);
        self.commit();
        true
    }
}
