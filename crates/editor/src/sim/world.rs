//! Reference simulation world
//!
//! A deliberately small integrator: gravity, air friction, damped springs
//! between body centers and an optional floor plane. It implements the full
//! adapter contract so the editor can run without an external engine.

use std::collections::BTreeMap;

use glam::DVec2;

use super::geometry;
use super::{
    Appearance, BodyDesc, BodyHandle, Kinematics, SimulationAdapter, SpringHandle, SpringParams,
};

/// World-wide simulation parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldConfig {
    /// Acceleration applied to dynamic bodies (units/s², y grows downwards)
    pub gravity: DVec2,
    /// Optional floor plane at this y coordinate
    pub floor_y: Option<f64>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            gravity: DVec2::new(0.0, 980.0),
            floor_y: None,
        }
    }
}

struct Body {
    desc: BodyDesc,
    state: Kinematics,
    inv_mass: f64,
}

impl Body {
    fn new(desc: &BodyDesc) -> Self {
        let mass = geometry::area(&desc.geometry) * desc.material.density;
        let inv_mass = if desc.flags.is_static || mass <= 0.0 {
            0.0
        } else {
            1.0 / mass
        };
        Self {
            desc: *desc,
            state: Kinematics {
                position: desc.position,
                velocity: DVec2::ZERO,
                angle: desc.angle,
                angular_velocity: 0.0,
            },
            inv_mass,
        }
    }

    fn is_movable(&self) -> bool {
        !self.desc.flags.is_static
    }
}

struct Spring {
    a: BodyHandle,
    b: BodyHandle,
    params: SpringParams,
}

/// In-process implementation of [`SimulationAdapter`]
pub struct SimWorld {
    config: WorldConfig,
    // keyed by handle id; creation order doubles as stacking order
    bodies: BTreeMap<BodyHandle, Body>,
    springs: BTreeMap<SpringHandle, Spring>,
    next_handle: u64,
}

impl Default for SimWorld {
    fn default() -> Self {
        Self::new(WorldConfig::default())
    }
}

impl SimWorld {
    pub fn new(config: WorldConfig) -> Self {
        Self {
            config,
            bodies: BTreeMap::new(),
            springs: BTreeMap::new(),
            next_handle: 1,
        }
    }

    /// Current world configuration
    pub fn config(&self) -> WorldConfig {
        self.config
    }

    /// Replace gravity / floor settings
    pub fn set_config(&mut self, config: WorldConfig) {
        self.config = config;
    }

    /// Appearance currently attached to a body
    pub fn appearance(&self, handle: BodyHandle) -> Option<Appearance> {
        self.bodies.get(&handle).map(|b| b.desc.appearance)
    }

    /// Creation parameters of a body
    pub fn body_desc(&self, handle: BodyHandle) -> Option<BodyDesc> {
        self.bodies.get(&handle).map(|b| b.desc)
    }

    /// Endpoints of a spring
    pub fn spring_endpoints(&self, handle: SpringHandle) -> Option<(BodyHandle, BodyHandle)> {
        self.springs.get(&handle).map(|s| (s.a, s.b))
    }

    fn issue(&mut self) -> u64 {
        let id = self.next_handle;
        self.next_handle += 1;
        id
    }

    fn apply_springs(&mut self, dt: f64) {
        for spring in self.springs.values() {
            let (Some(a), Some(b)) = (self.bodies.get(&spring.a), self.bodies.get(&spring.b))
            else {
                continue;
            };
            let delta = b.state.position - a.state.position;
            let dist = delta.length();
            if dist < 1e-9 {
                continue;
            }
            let dir = delta / dist;
            let closing = (b.state.velocity - a.state.velocity).dot(dir);
            let force = spring.params.stiffness * (dist - spring.params.length)
                + spring.params.damping * closing;
            let impulse = dir * force * dt;
            let (inv_a, inv_b) = (a.inv_mass, b.inv_mass);

            if let Some(a) = self.bodies.get_mut(&spring.a) {
                a.state.velocity += impulse * inv_a;
            }
            if let Some(b) = self.bodies.get_mut(&spring.b) {
                b.state.velocity -= impulse * inv_b;
            }
        }
    }

    fn integrate(&mut self, dt: f64) {
        let gravity = self.config.gravity;
        let floor = self.config.floor_y;

        for body in self.bodies.values_mut().filter(|b| b.is_movable()) {
            let damping = (1.0 - body.desc.material.friction_air).clamp(0.0, 1.0);
            let s = &mut body.state;
            s.velocity = (s.velocity + gravity * dt) * damping;
            s.angular_velocity *= damping;
            s.position += s.velocity * dt;
            s.angle += s.angular_velocity * dt;

            if body.desc.flags.is_sensor {
                continue;
            }
            if let Some(floor_y) = floor {
                let extent = geometry::vertical_half_extent(&body.desc.geometry, s.angle);
                if s.position.y + extent > floor_y {
                    s.position.y = floor_y - extent;
                    if s.velocity.y > 0.0 {
                        s.velocity.y = -s.velocity.y * body.desc.material.restitution;
                        s.velocity.x *= (1.0 - body.desc.material.friction).clamp(0.0, 1.0);
                    }
                }
            }
        }
    }
}

impl SimulationAdapter for SimWorld {
    fn create_body(&mut self, desc: &BodyDesc) -> BodyHandle {
        let handle = BodyHandle(self.issue());
        self.bodies.insert(handle, Body::new(desc));
        handle
    }

    fn remove_body(&mut self, handle: BodyHandle) -> bool {
        self.bodies.remove(&handle).is_some()
    }

    fn set_kinematics(&mut self, handle: BodyHandle, kinematics: Kinematics) -> bool {
        match self.bodies.get_mut(&handle) {
            Some(body) => {
                body.state = kinematics;
                true
            }
            None => false,
        }
    }

    fn kinematics(&self, handle: BodyHandle) -> Option<Kinematics> {
        self.bodies.get(&handle).map(|b| b.state)
    }

    fn set_appearance(&mut self, handle: BodyHandle, appearance: &Appearance) -> bool {
        match self.bodies.get_mut(&handle) {
            Some(body) => {
                body.desc.appearance = *appearance;
                true
            }
            None => false,
        }
    }

    fn create_spring(
        &mut self,
        a: BodyHandle,
        b: BodyHandle,
        params: SpringParams,
    ) -> Option<SpringHandle> {
        if a == b || !self.bodies.contains_key(&a) || !self.bodies.contains_key(&b) {
            return None;
        }
        let handle = SpringHandle(self.issue());
        self.springs.insert(handle, Spring { a, b, params });
        Some(handle)
    }

    fn remove_spring(&mut self, handle: SpringHandle) -> bool {
        self.springs.remove(&handle).is_some()
    }

    fn step(&mut self, dt: f64) {
        if dt <= 0.0 {
            return;
        }
        self.apply_springs(dt);
        self.integrate(dt);
    }

    fn query_at(&self, point: DVec2) -> Option<BodyHandle> {
        self.bodies
            .iter()
            .rev()
            .find(|(_, b)| {
                geometry::contains(&b.desc.geometry, b.state.position, b.state.angle, point)
            })
            .map(|(h, _)| *h)
    }

    fn body_count(&self) -> usize {
        self.bodies.len()
    }

    fn spring_count(&self) -> usize {
        self.springs.len()
    }
}
