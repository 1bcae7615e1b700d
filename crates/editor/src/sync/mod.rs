//! Body synchronizer
//!
//! Keeps exactly one simulation handle per live scene object and spring link,
//! and keeps the static parameters of each handle in lockstep with the model.
//! The synchronizer owns the simulation adapter: nothing else in the editor
//! touches live handles.
//!
//! Shape, body type and material cannot be changed on a live body, so those
//! edits go through [`BodySynchronizer::rebuild`], which swaps the handle while
//! carrying position, velocity, angle and angular velocity across.

pub mod appearance;

use std::collections::HashMap;

use glam::DVec2;
use shared::{LinkId, ObjectId, Point2D, SceneObject, SpringLink};

use crate::sim::{
    BodyDesc, BodyFlags, BodyHandle, Geometry, Kinematics, Material, SimulationAdapter,
    SpringHandle, SpringParams,
};

pub use appearance::appearance_for;

/// Live body entry for one scene object
#[derive(Debug, Clone, Copy)]
struct BodyEntry {
    handle: BodyHandle,
    /// Consulted by the drag system
    locked: bool,
}

/// Owner of the id → handle tables and of the simulation itself
pub struct BodySynchronizer<S: SimulationAdapter> {
    sim: S,
    bodies: HashMap<ObjectId, BodyEntry>,
    /// Back-reference from handle to model id
    owners: HashMap<BodyHandle, ObjectId>,
    springs: HashMap<LinkId, SpringHandle>,
}

pub(crate) fn to_dvec(p: Point2D) -> DVec2 {
    DVec2::new(p.x, p.y)
}

pub(crate) fn to_point(v: DVec2) -> Point2D {
    Point2D::new(v.x, v.y)
}

/// Creation parameters for an object's body
pub fn body_desc(object: &SceneObject) -> BodyDesc {
    BodyDesc {
        geometry: Geometry::from(&object.shape),
        material: Material::from(&object.physics),
        flags: BodyFlags::from(object.body_type),
        position: to_dvec(object.position),
        angle: object.angle,
        appearance: appearance_for(&object.visual),
    }
}

impl<S: SimulationAdapter> BodySynchronizer<S> {
    pub fn new(sim: S) -> Self {
        Self {
            sim,
            bodies: HashMap::new(),
            owners: HashMap::new(),
            springs: HashMap::new(),
        }
    }

    /// Read access to the simulation (rendering, inspection)
    pub fn sim(&self) -> &S {
        &self.sim
    }

    /// Mutable access for engine-level settings that do not touch handles
    pub fn sim_mut(&mut self) -> &mut S {
        &mut self.sim
    }

    // ── Lookups ───────────────────────────────────────────────

    /// Live body handle of an object
    pub fn handle(&self, id: &str) -> Option<BodyHandle> {
        self.bodies.get(id).map(|e| e.handle)
    }

    /// Live spring handle of a link
    pub fn spring(&self, link_id: &str) -> Option<SpringHandle> {
        self.springs.get(link_id).copied()
    }

    /// Object that owns a handle
    pub fn owner(&self, handle: BodyHandle) -> Option<&ObjectId> {
        self.owners.get(&handle)
    }

    /// Whether dragging is suppressed for this object
    pub fn is_locked(&self, id: &str) -> bool {
        self.bodies.get(id).is_some_and(|e| e.locked)
    }

    /// Ids of all objects with a live body
    pub fn live_ids(&self) -> Vec<ObjectId> {
        let mut ids: Vec<ObjectId> = self.bodies.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Ids of all links with a live spring
    pub fn live_link_ids(&self) -> Vec<LinkId> {
        let mut ids: Vec<LinkId> = self.springs.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Current kinematic state of an object's body
    pub fn kinematics(&self, id: &str) -> Option<Kinematics> {
        self.sim.kinematics(self.handle(id)?)
    }

    /// Object under a world-space point
    pub fn object_at(&self, point: Point2D) -> Option<&ObjectId> {
        let handle = self.sim.query_at(to_dvec(point))?;
        self.owner(handle)
    }

    // ── Bodies ────────────────────────────────────────────────

    /// Create the body for an object. An existing body for the same id is
    /// removed first.
    pub fn materialize(&mut self, object: &SceneObject) -> BodyHandle {
        if let Some(old) = self.bodies.remove(&object.id) {
            self.sim.remove_body(old.handle);
            self.owners.remove(&old.handle);
        }

        let handle = self.sim.create_body(&body_desc(object));
        self.bodies.insert(
            object.id.clone(),
            BodyEntry {
                handle,
                locked: object.locked,
            },
        );
        self.owners.insert(handle, object.id.clone());
        tracing::debug!("Materialized {} as {:?}", object.id, handle);
        handle
    }

    /// Swap an object's body for one built from the updated model, keeping
    /// its kinematic state, then re-attach every link touching it.
    ///
    /// Returns false (and does nothing) when the object has no live body.
    pub fn rebuild(&mut self, object: &SceneObject, links: &[SpringLink]) -> bool {
        let Some(old) = self.bodies.get(&object.id).copied() else {
            tracing::debug!("Rebuild skipped, no live body for {}", object.id);
            return false;
        };
        let captured = self.sim.kinematics(old.handle);

        let touching: Vec<&SpringLink> = links.iter().filter(|l| l.touches(&object.id)).collect();
        for link in &touching {
            self.detach_link(&link.id);
        }

        let handle = self.materialize(object);
        if let Some(k) = captured {
            self.sim.set_kinematics(handle, k);
        }

        for link in touching {
            self.attach_link(link);
        }
        tracing::debug!("Rebuilt {} ({:?} -> {:?})", object.id, old.handle, handle);
        true
    }

    /// Push a cosmetic change onto the live body. Kinematics are untouched.
    pub fn refresh_appearance(&mut self, object: &SceneObject) -> bool {
        match self.handle(&object.id) {
            Some(handle) => self.sim.set_appearance(handle, &appearance_for(&object.visual)),
            None => false,
        }
    }

    /// Update the lock flag carried on the handle entry
    pub fn set_locked(&mut self, id: &str, locked: bool) -> bool {
        match self.bodies.get_mut(id) {
            Some(entry) => {
                entry.locked = locked;
                true
            }
            None => false,
        }
    }

    /// Move a body, keeping its velocity
    pub fn set_position(&mut self, id: &str, position: Point2D) -> bool {
        let Some(handle) = self.handle(id) else {
            return false;
        };
        let Some(mut k) = self.sim.kinematics(handle) else {
            return false;
        };
        k.position = to_dvec(position);
        self.sim.set_kinematics(handle, k)
    }

    /// Move a body under the pointer: position set, linear and angular
    /// velocity cleared so it does not fling on release.
    pub fn drag_to(&mut self, id: &str, position: Point2D) -> bool {
        let Some(handle) = self.handle(id) else {
            return false;
        };
        let Some(mut k) = self.sim.kinematics(handle) else {
            return false;
        };
        k.position = to_dvec(position);
        k.velocity = DVec2::ZERO;
        k.angular_velocity = 0.0;
        self.sim.set_kinematics(handle, k)
    }

    /// Remove an object's body together with the springs of its dependent links
    pub fn remove_object(&mut self, id: &str, removed_links: &[LinkId]) {
        for link_id in removed_links {
            self.detach_link(link_id);
        }
        if let Some(entry) = self.bodies.remove(id) {
            self.sim.remove_body(entry.handle);
            self.owners.remove(&entry.handle);
            tracing::debug!("Removed body of {id}");
        }
    }

    // ── Links ─────────────────────────────────────────────────

    /// Create the spring for a link. Fails silently when an endpoint has no
    /// live body.
    pub fn attach_link(&mut self, link: &SpringLink) -> bool {
        self.detach_link(&link.id);
        let (Some(a), Some(b)) = (self.handle(&link.a), self.handle(&link.b)) else {
            tracing::debug!("Link {} not attached, endpoint missing", link.id);
            return false;
        };
        let params = SpringParams {
            stiffness: link.options.stiffness,
            damping: link.options.damping,
            length: link.options.rest_length,
        };
        match self.sim.create_spring(a, b, params) {
            Some(spring) => {
                self.springs.insert(link.id.clone(), spring);
                true
            }
            None => false,
        }
    }

    /// Remove the spring of a link, if any
    pub fn detach_link(&mut self, link_id: &str) -> bool {
        match self.springs.remove(link_id) {
            Some(spring) => self.sim.remove_spring(spring),
            None => false,
        }
    }

    // ── Whole-scene operations ────────────────────────────────

    /// Copy simulated position and angle back into the model
    pub fn sync_model_from_simulation(&self, objects: &mut [SceneObject]) {
        for object in objects {
            if let Some(k) = self.kinematics(&object.id) {
                object.position = to_point(k.position);
                object.angle = k.angle;
            }
        }
    }

    /// Drop every handle
    pub fn clear(&mut self) {
        for (_, spring) in self.springs.drain() {
            self.sim.remove_spring(spring);
        }
        for (_, entry) in self.bodies.drain() {
            self.sim.remove_body(entry.handle);
        }
        self.owners.clear();
    }

    /// Clear everything, then materialize objects and attach links in order
    pub fn rebuild_all(&mut self, objects: &[SceneObject], links: &[SpringLink]) {
        self.clear();
        for object in objects {
            self.materialize(object);
        }
        for link in links {
            self.attach_link(link);
        }
        tracing::debug!(
            "Rebuilt all handles: {} bodies, {} springs",
            self.bodies.len(),
            self.springs.len()
        );
    }

    /// Advance the simulation
    pub fn step(&mut self, dt: f64) {
        self.sim.step(dt);
    }
}
