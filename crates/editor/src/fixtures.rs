//! Factory functions for creating test data.
//!
//! Provides convenient helpers to construct `SceneObject`, `SpringLink` and
//! `Snapshot` values used in tests and by the JSON command layer.

use shared::*;

// ── Object factories ────────────────────────────────────────────

/// Create an object with default physics and visuals.
pub fn object(id: &str, x: f64, y: f64, shape: Shape, body_type: BodyType) -> SceneObject {
    SceneObject {
        id: id.to_string(),
        label: shape.kind_name().to_string(),
        position: Point2D::new(x, y),
        angle: 0.0,
        body_type,
        locked: false,
        shape,
        physics: Physics::default(),
        visual: Visual::default(),
    }
}

/// Create a dynamic circle.
pub fn circle_object(id: &str, x: f64, y: f64, radius: f64) -> SceneObject {
    object(id, x, y, Shape::Circle { radius }, BodyType::Dynamic)
}

/// Create a dynamic rectangle.
pub fn rect_object(id: &str, x: f64, y: f64, width: f64, height: f64) -> SceneObject {
    object(id, x, y, Shape::Rectangle { width, height }, BodyType::Dynamic)
}

/// Create a dynamic regular polygon.
pub fn polygon_object(id: &str, x: f64, y: f64, sides: u32, radius: f64) -> SceneObject {
    object(id, x, y, Shape::Polygon { sides, radius }, BodyType::Dynamic)
}

/// Create a static ground slab.
pub fn ground_object(id: &str, x: f64, y: f64, width: f64) -> SceneObject {
    object(
        id,
        x,
        y,
        Shape::Rectangle {
            width,
            height: 20.0,
        },
        BodyType::Static,
    )
}

// ── Link factories ──────────────────────────────────────────────

/// Create a default spring resting at the current distance of its endpoints.
pub fn link_between(id: &str, a: &SceneObject, b: &SceneObject) -> SpringLink {
    SpringLink {
        id: id.to_string(),
        a: a.id.clone(),
        b: b.id.clone(),
        options: LinkOptions::between(a.position, b.position),
    }
}

// ── Snapshot factories ──────────────────────────────────────────

/// Snapshot with counters past every id it contains.
pub fn snapshot_of(objects: Vec<SceneObject>, links: Vec<SpringLink>) -> Snapshot {
    let next_id = infer_next_counter(objects.iter().map(|o| o.id.as_str())).unwrap_or(u64::MAX);
    let next_link_id =
        infer_next_counter(links.iter().map(|l| l.id.as_str())).unwrap_or(u64::MAX);
    Snapshot {
        objects,
        links,
        next_id,
        next_link_id,
    }
}

/// Two circles joined by a spring.
pub fn linked_pair_snapshot() -> Snapshot {
    let a = circle_object("obj-1", 100.0, 100.0, 20.0);
    let b = circle_object("obj-2", 200.0, 100.0, 20.0);
    let link = link_between("link-1", &a, &b);
    snapshot_of(vec![a, b], vec![link])
}

/// Scene document JSON without counters, for inference tests.
pub fn document_without_counters_json() -> String {
    let doc = serde_json::json!({
        "objects": [
            circle_object("obj-3", 10.0, 10.0, 5.0),
            rect_object("obj-8", 50.0, 10.0, 20.0, 10.0),
        ],
        "links": [],
    });
    doc.to_string()
}
