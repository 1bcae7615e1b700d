//! Headless test harness for programmatic scene manipulation.
//!
//! Wraps an [`EditorSession`] over the reference world and adds shorthand
//! constructors and counts used by integration tests and the command layer.

use shared::{BodyType, ObjectId, Point2D, Shape};

use crate::session::EditorSession;
use crate::sim::SimWorld;
use crate::state::EditorSettings;
use crate::validation::SceneValidator;

/// Headless harness: session over the reference world
pub struct TestHarness {
    pub session: EditorSession<SimWorld>,
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

impl TestHarness {
    /// Create a new empty harness with default settings.
    pub fn new() -> Self {
        Self::with_settings(EditorSettings::default())
    }

    pub fn with_settings(settings: EditorSettings) -> Self {
        Self {
            session: EditorSession::headless(settings),
        }
    }

    // ── Scene manipulation ────────────────────────────────────

    /// Panics when the object id counter is exhausted; harness scenes never
    /// get there unless a test loads one that is.
    fn create(&mut self, position: Point2D, shape: Shape, body_type: BodyType) -> ObjectId {
        match self.session.add_object(position, shape, body_type) {
            Ok(id) => id,
            Err(e) => panic!("create failed: {e}"),
        }
    }

    /// Create a dynamic circle and return its ID
    pub fn create_circle(&mut self, x: f64, y: f64, radius: f64) -> ObjectId {
        self.create(Point2D::new(x, y), Shape::Circle { radius }, BodyType::Dynamic)
    }

    /// Create a dynamic rectangle and return its ID
    pub fn create_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> ObjectId {
        self.create(
            Point2D::new(x, y),
            Shape::Rectangle { width, height },
            BodyType::Dynamic,
        )
    }

    /// Create a dynamic regular polygon and return its ID
    pub fn create_polygon(&mut self, x: f64, y: f64, sides: u32, radius: f64) -> ObjectId {
        self.create(
            Point2D::new(x, y),
            Shape::Polygon { sides, radius },
            BodyType::Dynamic,
        )
    }

    /// Create a static ground slab and return its ID
    pub fn create_ground(&mut self, x: f64, y: f64, width: f64) -> ObjectId {
        self.create(
            Point2D::new(x, y),
            Shape::Rectangle {
                width,
                height: 20.0,
            },
            BodyType::Static,
        )
    }

    /// Link two objects; `None` when the endpoints are invalid
    pub fn link(&mut self, a: &str, b: &str) -> Option<String> {
        self.session.link(a, b).ok()
    }

    /// Select a single object
    pub fn select(&mut self, id: &str) -> bool {
        self.session.select(id)
    }

    /// Delete an object by ID
    pub fn delete(&mut self, id: &str) -> bool {
        self.session.delete_object(id)
    }

    pub fn undo(&mut self) -> bool {
        self.session.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.session.redo()
    }

    /// Clear the entire scene
    pub fn reset(&mut self) {
        self.session.reset();
    }

    /// Load a scene from JSON string
    pub fn load_scene_json(&mut self, json: &str) -> Result<(), String> {
        self.session.load_json(json).map_err(|e| e.to_string())
    }

    /// Export the current scene as JSON
    pub fn export_scene_json(&self) -> Result<String, String> {
        self.session.export_json().map_err(|e| e.to_string())
    }

    /// Step the simulation regardless of play state
    pub fn step(&mut self, steps: usize) {
        self.session.run_steps(steps);
    }

    // ── Inspection ────────────────────────────────────────────

    /// Number of objects in the scene
    pub fn object_count(&self) -> usize {
        self.session.scene().objects().len()
    }

    /// Number of links in the scene
    pub fn link_count(&self) -> usize {
        self.session.scene().links().len()
    }

    /// Number of live bodies in the simulation
    pub fn body_count(&self) -> usize {
        self.session.sync().live_ids().len()
    }

    /// Number of live springs in the simulation
    pub fn spring_count(&self) -> usize {
        self.session.sync().live_link_ids().len()
    }

    /// Selected object IDs
    pub fn selected(&self) -> Vec<ObjectId> {
        self.session.selection().all().to_vec()
    }

    /// Model position of an object
    pub fn position(&self, id: &str) -> Option<Point2D> {
        self.session.scene().object(id).map(|o| o.position)
    }

    /// Every consistency problem between model and simulation
    pub fn validate(&self) -> Vec<String> {
        SceneValidator::new(&self.session).validate_all()
    }

    /// Panic with the list of problems when model and simulation disagree
    pub fn assert_consistent(&self) {
        let problems = self.validate();
        assert!(problems.is_empty(), "inconsistent scene: {problems:#?}");
    }
}
