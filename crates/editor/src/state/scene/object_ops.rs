//! Object CRUD operations

use shared::{format_object_id, BodyType, LinkId, Point2D, SceneObject, Shape, Snapshot};

use super::SceneState;
use crate::error::{EditorError, EditorResult};

impl SceneState {
    fn issue_object_id(&mut self) -> EditorResult<String> {
        let next = self
            .scene
            .next_id
            .checked_add(1)
            .ok_or(EditorError::IdsExhausted("nextId"))?;
        let id = format_object_id(self.scene.next_id);
        self.scene.next_id = next;
        Ok(id)
    }

    /// Create a new object with default physics and visuals
    pub fn create_object(
        &mut self,
        position: Point2D,
        shape: Shape,
        body_type: BodyType,
    ) -> EditorResult<SceneObject> {
        let id = self.issue_object_id()?;
        let object = SceneObject {
            id,
            label: shape.kind_name().to_string(),
            position,
            angle: 0.0,
            body_type,
            locked: false,
            shape,
            physics: self.defaults.physics,
            visual: self.defaults.visual.clone(),
        };
        self.scene.objects.push(object.clone());
        self.version += 1;
        Ok(object)
    }

    /// Copy an object under a fresh id, shifted by `offset`.
    /// Links are not copied. `Ok(None)` for an unknown id.
    pub fn duplicate_object(
        &mut self,
        id: &str,
        offset: Point2D,
    ) -> EditorResult<Option<SceneObject>> {
        let Some(source) = self.object(id).cloned() else {
            return Ok(None);
        };
        let copy = SceneObject {
            id: self.issue_object_id()?,
            position: source.position.offset(offset),
            ..source
        };
        self.scene.objects.push(copy.clone());
        self.version += 1;
        Ok(Some(copy))
    }

    /// Remove an object and every link referencing it.
    /// Returns the ids of the removed links; unknown ids are a no-op.
    pub fn remove_object(&mut self, id: &str) -> Vec<LinkId> {
        if !self.contains(id) {
            return Vec::new();
        }

        let removed: Vec<LinkId> = self
            .scene
            .links
            .iter()
            .filter(|l| l.touches(id))
            .map(|l| l.id.clone())
            .collect();
        self.scene.links.retain(|l| !l.touches(id));
        self.scene.objects.retain(|o| o.id != id);

        self.version += 1;
        removed
    }

    /// Apply an in-place edit to an object. Returns false if it doesn't exist.
    pub fn update_object(&mut self, id: &str, edit: impl FnOnce(&mut SceneObject)) -> bool {
        match self.object_mut(id) {
            Some(object) => {
                edit(object);
                self.version += 1;
                true
            }
            None => false,
        }
    }

    /// Clear objects and links, counters back to their initial values
    pub fn reset(&mut self) {
        self.scene = Snapshot::default();
        self.version += 1;
    }
}
