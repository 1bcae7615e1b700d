use serde::{Deserialize, Serialize};

pub mod ids;

pub use ids::{format_link_id, format_object_id, infer_next_counter, numeric_suffix};

/// Unique identifier of an object in the scene
pub type ObjectId = String;

/// Unique identifier of a spring link
pub type LinkId = String;

/// 2D point / vector in world coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: &Point2D) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// Component-wise sum
    pub fn offset(&self, by: Point2D) -> Point2D {
        Point2D::new(self.x + by.x, self.y + by.y)
    }
}

/// Geometry of an object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Shape {
    Circle {
        radius: f64,
    },
    Rectangle {
        width: f64,
        height: f64,
    },
    /// Regular polygon inscribed in a circle of `radius`
    Polygon {
        sides: u32,
        radius: f64,
    },
}

impl Shape {
    /// Human-readable kind name, also the default label of new objects
    pub fn kind_name(&self) -> &'static str {
        match self {
            Shape::Circle { .. } => "Circle",
            Shape::Rectangle { .. } => "Rectangle",
            Shape::Polygon { .. } => "Polygon",
        }
    }
}

/// How an object participates in the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyType {
    /// Moves under forces
    #[default]
    Dynamic,
    /// Immovable
    Static,
    /// Present for overlap/hit-testing, excluded from collision response
    Sensor,
}

/// Simulation material parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Physics {
    pub restitution: f64,
    pub friction: f64,
    pub friction_air: f64,
    pub friction_static: f64,
    pub density: f64,
}

impl Default for Physics {
    fn default() -> Self {
        Self {
            restitution: 0.3,
            friction: 0.1,
            friction_air: 0.01,
            friction_static: 0.5,
            density: 0.001,
        }
    }
}

/// Named physics presets offered by the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhysicsPreset {
    Default,
    Bouncy,
    Ice,
    Rubber,
    Heavy,
    Feather,
}

impl PhysicsPreset {
    /// Material parameters for this preset
    pub fn physics(&self) -> Physics {
        match self {
            PhysicsPreset::Default => Physics::default(),
            PhysicsPreset::Bouncy => Physics {
                restitution: 0.9,
                friction: 0.05,
                friction_air: 0.005,
                friction_static: 0.2,
                density: 0.001,
            },
            PhysicsPreset::Ice => Physics {
                restitution: 0.1,
                friction: 0.0,
                friction_air: 0.001,
                friction_static: 0.0,
                density: 0.0009,
            },
            PhysicsPreset::Rubber => Physics {
                restitution: 0.7,
                friction: 0.9,
                friction_air: 0.02,
                friction_static: 1.0,
                density: 0.0012,
            },
            PhysicsPreset::Heavy => Physics {
                restitution: 0.05,
                friction: 0.4,
                friction_air: 0.005,
                friction_static: 0.8,
                density: 0.008,
            },
            PhysicsPreset::Feather => Physics {
                restitution: 0.2,
                friction: 0.2,
                friction_air: 0.08,
                friction_static: 0.3,
                density: 0.0002,
            },
        }
    }

    /// All available presets
    pub fn all() -> &'static [PhysicsPreset] {
        &[
            PhysicsPreset::Default,
            PhysicsPreset::Bouncy,
            PhysicsPreset::Ice,
            PhysicsPreset::Rubber,
            PhysicsPreset::Heavy,
            PhysicsPreset::Feather,
        ]
    }
}

/// How an object's fill is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    #[default]
    Solid,
    /// Stroke only, transparent fill
    Outline,
    /// Fill blended from `fill` to `stroke`
    Gradient,
}

/// Appearance parameters (cosmetic only, never affect the simulation)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Visual {
    /// CSS hex color
    pub fill: String,
    /// CSS hex color
    pub stroke: String,
    pub stroke_width: f64,
    pub opacity: f64,
    #[serde(default)]
    pub render_mode: RenderMode,
}

impl Default for Visual {
    fn default() -> Self {
        Self {
            fill: "#4f8cff".to_string(),
            stroke: "#1d3b73".to_string(),
            stroke_width: 2.0,
            opacity: 1.0,
            render_mode: RenderMode::Solid,
        }
    }
}

/// One physical entity in the scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneObject {
    pub id: ObjectId,
    /// Display name
    #[serde(default)]
    pub label: String,
    pub position: Point2D,
    /// Rotation in radians
    #[serde(default)]
    pub angle: f64,
    #[serde(default)]
    pub body_type: BodyType,
    /// Suppresses interactive dragging
    #[serde(default)]
    pub locked: bool,
    pub shape: Shape,
    #[serde(default)]
    pub physics: Physics,
    #[serde(default)]
    pub visual: Visual,
}

/// Spring parameters of a link
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkOptions {
    pub stiffness: f64,
    pub damping: f64,
    pub rest_length: f64,
}

impl LinkOptions {
    pub const DEFAULT_STIFFNESS: f64 = 0.05;
    pub const DEFAULT_DAMPING: f64 = 0.02;

    /// Default spring resting at the current distance between two points
    pub fn between(a: Point2D, b: Point2D) -> Self {
        Self {
            stiffness: Self::DEFAULT_STIFFNESS,
            damping: Self::DEFAULT_DAMPING,
            rest_length: a.distance(&b),
        }
    }
}

/// Spring constraint between two objects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpringLink {
    pub id: LinkId,
    pub a: ObjectId,
    pub b: ObjectId,
    pub options: LinkOptions,
}

impl SpringLink {
    /// Whether either endpoint is `id`
    pub fn touches(&self, id: &str) -> bool {
        self.a == id || self.b == id
    }
}

fn default_counter() -> u64 {
    1
}

/// Self-contained copy of the scene model state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub objects: Vec<SceneObject>,
    #[serde(default)]
    pub links: Vec<SpringLink>,
    #[serde(default = "default_counter")]
    pub next_id: u64,
    #[serde(default = "default_counter")]
    pub next_link_id: u64,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            objects: Vec::new(),
            links: Vec::new(),
            next_id: 1,
            next_link_id: 1,
        }
    }
}

/// Scene document as exchanged on disk. Every key except `objects` is optional;
/// `objects` is kept optional here so a missing key can be reported precisely.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objects: Option<Vec<SceneObject>>,
    #[serde(default)]
    pub links: Vec<SpringLink>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_link_id: Option<u64>,
}

impl From<&Snapshot> for SceneDocument {
    fn from(snapshot: &Snapshot) -> Self {
        Self {
            objects: Some(snapshot.objects.clone()),
            links: snapshot.links.clone(),
            next_id: Some(snapshot.next_id),
            next_link_id: Some(snapshot.next_link_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip<T: Serialize + for<'de> Deserialize<'de> + PartialEq + std::fmt::Debug>(val: &T) {
        let json = serde_json::to_string(val).expect("serialize");
        let back: T = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(*val, back);
    }

    fn circle(id: &str) -> SceneObject {
        SceneObject {
            id: id.to_string(),
            label: "Circle".to_string(),
            position: Point2D::new(100.0, 100.0),
            angle: 0.0,
            body_type: BodyType::Dynamic,
            locked: false,
            shape: Shape::Circle { radius: 20.0 },
            physics: Physics::default(),
            visual: Visual::default(),
        }
    }

    // --- Shape ---

    #[test]
    fn test_shape_circle_serde() {
        let s = Shape::Circle { radius: 20.0 };
        roundtrip(&s);
        let json = serde_json::to_string(&s).unwrap();
        assert!(json.contains(r#""type":"circle""#));
    }

    #[test]
    fn test_shape_rectangle_serde() {
        let s = Shape::Rectangle { width: 40.0, height: 30.0 };
        roundtrip(&s);
        let json = serde_json::to_string(&s).unwrap();
        assert!(json.contains(r#""type":"rectangle""#));
    }

    #[test]
    fn test_shape_polygon_serde() {
        let s = Shape::Polygon { sides: 6, radius: 25.0 };
        roundtrip(&s);
        let json = serde_json::to_string(&s).unwrap();
        assert!(json.contains(r#""sides":6"#));
    }

    #[test]
    fn test_shape_kind_name() {
        assert_eq!(Shape::Circle { radius: 1.0 }.kind_name(), "Circle");
        assert_eq!(Shape::Rectangle { width: 1.0, height: 1.0 }.kind_name(), "Rectangle");
        assert_eq!(Shape::Polygon { sides: 3, radius: 1.0 }.kind_name(), "Polygon");
    }

    // --- Enums ---

    #[test]
    fn test_body_type_serde() {
        assert_eq!(serde_json::to_string(&BodyType::Sensor).unwrap(), r#""sensor""#);
        for bt in [BodyType::Dynamic, BodyType::Static, BodyType::Sensor] {
            roundtrip(&bt);
        }
    }

    #[test]
    fn test_render_mode_serde() {
        assert_eq!(serde_json::to_string(&RenderMode::Gradient).unwrap(), r#""gradient""#);
        roundtrip(&RenderMode::Outline);
    }

    // --- SceneObject ---

    #[test]
    fn test_scene_object_camel_case_keys() {
        let json = serde_json::to_string(&circle("obj-1")).unwrap();
        assert!(json.contains(r#""bodyType":"dynamic""#));
        assert!(json.contains(r#""frictionAir""#));
        assert!(json.contains(r#""frictionStatic""#));
        assert!(json.contains(r#""strokeWidth""#));
        assert!(json.contains(r#""renderMode":"solid""#));
    }

    #[test]
    fn test_scene_object_minimal_json_fills_defaults() {
        let json = r#"{"id":"obj-7","position":{"x":1,"y":2},"shape":{"type":"circle","radius":5}}"#;
        let obj: SceneObject = serde_json::from_str(json).unwrap();
        assert_eq!(obj.body_type, BodyType::Dynamic);
        assert!(!obj.locked);
        assert_eq!(obj.physics, Physics::default());
        assert_eq!(obj.visual, Visual::default());
        assert_eq!(obj.angle, 0.0);
    }

    // --- Links ---

    #[test]
    fn test_link_options_between() {
        let opts = LinkOptions::between(Point2D::new(0.0, 0.0), Point2D::new(3.0, 4.0));
        assert!((opts.rest_length - 5.0).abs() < 1e-12);
        let json = serde_json::to_string(&opts).unwrap();
        assert!(json.contains("restLength"));
    }

    #[test]
    fn test_link_touches() {
        let link = SpringLink {
            id: "link-1".into(),
            a: "obj-1".into(),
            b: "obj-2".into(),
            options: LinkOptions::between(Point2D::default(), Point2D::default()),
        };
        assert!(link.touches("obj-1"));
        assert!(link.touches("obj-2"));
        assert!(!link.touches("obj-3"));
    }

    // --- Snapshot / document ---

    #[test]
    fn test_snapshot_keys_and_defaults() {
        let snap = Snapshot {
            objects: vec![circle("obj-1")],
            links: vec![],
            next_id: 2,
            next_link_id: 1,
        };
        let json = serde_json::to_string(&snap).unwrap();
        assert!(json.contains(r#""nextId":2"#));
        assert!(json.contains(r#""nextLinkId":1"#));
        roundtrip(&snap);
    }

    #[test]
    fn test_snapshot_clone_is_independent() {
        let snap = Snapshot {
            objects: vec![circle("obj-1")],
            ..Default::default()
        };
        let mut copy = snap.clone();
        copy.objects[0].position.x = 999.0;
        assert_eq!(snap.objects[0].position.x, 100.0);
        assert_ne!(snap, copy);
    }

    #[test]
    fn test_document_missing_objects_is_none() {
        let doc: SceneDocument = serde_json::from_str(r#"{"links": []}"#).unwrap();
        assert!(doc.objects.is_none());
        assert!(doc.next_id.is_none());
    }

    #[test]
    fn test_presets_are_distinct() {
        let all = PhysicsPreset::all();
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a.physics(), b.physics(), "{a:?} == {b:?}");
            }
        }
        assert_eq!(PhysicsPreset::Default.physics(), Physics::default());
    }
}
