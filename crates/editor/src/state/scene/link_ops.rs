//! Spring link operations

use shared::{format_link_id, LinkOptions, SpringLink};

use super::SceneState;
use crate::error::{EditorError, EditorResult};

impl SceneState {
    /// Link two objects with a default spring resting at their current distance
    pub fn create_link(&mut self, a: &str, b: &str) -> EditorResult<SpringLink> {
        let (pa, pb) = self.endpoints(a, b)?;
        self.push_link(a, b, LinkOptions::between(pa, pb))
    }

    /// Link two objects with explicit spring options
    pub fn create_link_with(
        &mut self,
        a: &str,
        b: &str,
        options: LinkOptions,
    ) -> EditorResult<SpringLink> {
        self.endpoints(a, b)?;
        self.push_link(a, b, options)
    }

    /// Remove a link by ID
    pub fn remove_link(&mut self, id: &str) -> bool {
        let before = self.scene.links.len();
        self.scene.links.retain(|l| l.id != id);
        let removed = self.scene.links.len() != before;
        if removed {
            self.version += 1;
        }
        removed
    }

    fn endpoints(&self, a: &str, b: &str) -> EditorResult<(shared::Point2D, shared::Point2D)> {
        let invalid = || EditorError::InvalidEndpoints {
            a: a.to_string(),
            b: b.to_string(),
        };
        if a == b {
            return Err(invalid());
        }
        let pa = self.object(a).ok_or_else(invalid)?.position;
        let pb = self.object(b).ok_or_else(invalid)?.position;
        Ok((pa, pb))
    }

    fn push_link(&mut self, a: &str, b: &str, options: LinkOptions) -> EditorResult<SpringLink> {
        let next = self
            .scene
            .next_link_id
            .checked_add(1)
            .ok_or(EditorError::IdsExhausted("nextLinkId"))?;
        let link = SpringLink {
            id: format_link_id(self.scene.next_link_id),
            a: a.to_string(),
            b: b.to_string(),
            options,
        };
        self.scene.next_link_id = next;
        self.scene.links.push(link.clone());
        self.version += 1;
        Ok(link)
    }
}
