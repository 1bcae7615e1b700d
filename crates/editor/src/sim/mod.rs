//! Simulation adapter contract
//!
//! The editor never talks to a physics engine directly. Everything it needs
//! (create/remove bodies and springs, read/write kinematic state, step,
//! hit-test) goes through [`SimulationAdapter`]. [`SimWorld`] is the
//! reference implementation used headless and in tests.

pub mod geometry;
mod world;

pub use world::{SimWorld, WorldConfig};

use glam::DVec2;
use shared::{BodyType, Physics, Shape};

/// Opaque reference to a live body owned by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyHandle(pub u64);

/// Opaque reference to a live spring owned by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpringHandle(pub u64);

/// Collision geometry, centered on the body origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Geometry {
    Circle { radius: f64 },
    Rectangle { width: f64, height: f64 },
    Polygon { sides: u32, radius: f64 },
}

impl From<&Shape> for Geometry {
    fn from(shape: &Shape) -> Self {
        match *shape {
            Shape::Circle { radius } => Geometry::Circle { radius },
            Shape::Rectangle { width, height } => Geometry::Rectangle { width, height },
            Shape::Polygon { sides, radius } => Geometry::Polygon {
                sides: sides.max(3),
                radius,
            },
        }
    }
}

/// Material parameters handed to the engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub restitution: f64,
    pub friction: f64,
    pub friction_air: f64,
    pub friction_static: f64,
    pub density: f64,
}

impl From<&Physics> for Material {
    fn from(p: &Physics) -> Self {
        Self {
            restitution: p.restitution,
            friction: p.friction,
            friction_air: p.friction_air,
            friction_static: p.friction_static,
            density: p.density,
        }
    }
}

/// Participation flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BodyFlags {
    pub is_static: bool,
    pub is_sensor: bool,
}

impl From<BodyType> for BodyFlags {
    fn from(body_type: BodyType) -> Self {
        match body_type {
            BodyType::Dynamic => BodyFlags::default(),
            BodyType::Static => BodyFlags {
                is_static: true,
                is_sensor: false,
            },
            BodyType::Sensor => BodyFlags {
                is_static: false,
                is_sensor: true,
            },
        }
    }
}

/// RGB color
pub type Color = [u8; 3];

/// Fill style of a rendered body
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    Transparent,
    Solid(Color),
    /// Linear gradient stops, start to end
    Gradient([Color; 3]),
}

/// Render-side appearance carried on a body handle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Appearance {
    pub fill: Paint,
    pub stroke: Color,
    pub stroke_width: f64,
    pub opacity: f64,
}

/// Everything the engine needs to create a body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyDesc {
    pub geometry: Geometry,
    pub material: Material,
    pub flags: BodyFlags,
    pub position: DVec2,
    pub angle: f64,
    pub appearance: Appearance,
}

/// Kinematic state of a body
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Kinematics {
    pub position: DVec2,
    pub velocity: DVec2,
    pub angle: f64,
    pub angular_velocity: f64,
}

/// Spring constraint parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringParams {
    pub stiffness: f64,
    pub damping: f64,
    pub length: f64,
}

/// Contract over an external 2D physics engine.
///
/// Operations on unknown handles are no-ops that report `false` / `None`.
pub trait SimulationAdapter {
    fn create_body(&mut self, desc: &BodyDesc) -> BodyHandle;
    fn remove_body(&mut self, handle: BodyHandle) -> bool;
    fn set_kinematics(&mut self, handle: BodyHandle, kinematics: Kinematics) -> bool;
    fn kinematics(&self, handle: BodyHandle) -> Option<Kinematics>;
    fn set_appearance(&mut self, handle: BodyHandle, appearance: &Appearance) -> bool;
    fn create_spring(
        &mut self,
        a: BodyHandle,
        b: BodyHandle,
        params: SpringParams,
    ) -> Option<SpringHandle>;
    fn remove_spring(&mut self, handle: SpringHandle) -> bool;
    /// Advance the simulation by `dt` seconds
    fn step(&mut self, dt: f64);
    /// Topmost body whose geometry contains `point`
    fn query_at(&self, point: DVec2) -> Option<BodyHandle>;
    fn body_count(&self) -> usize;
    fn spring_count(&self) -> usize;
}
