//! Display helper functions for objects and links

use shared::{BodyType, SceneObject, Shape, SpringLink};

/// Get display name for an object
pub fn object_display_name(object: &SceneObject) -> String {
    let label = if object.label.is_empty() {
        object.shape.kind_name()
    } else {
        object.label.as_str()
    };
    let suffix = match object.body_type {
        BodyType::Dynamic => "",
        BodyType::Static => " [static]",
        BodyType::Sensor => " [sensor]",
    };
    let lock = if object.locked { " (locked)" } else { "" };
    format!("{label} ({}){suffix}{lock}", short_id(&object.id))
}

/// Get display name for a link
pub fn link_display_name(link: &SpringLink) -> String {
    format!("{} \u{2194} {}", short_id(&link.a), short_id(&link.b))
}

/// One-line description of a shape's dimensions
pub fn shape_summary(shape: &Shape) -> String {
    match shape {
        Shape::Circle { radius } => format!("r={radius}"),
        Shape::Rectangle { width, height } => format!("{width}\u{d7}{height}"),
        Shape::Polygon { sides, radius } => format!("{sides} sides, r={radius}"),
    }
}

/// Get shortened ID (first 8 characters)
pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(8) {
        Some((idx, _)) => &id[..idx],
        None => id,
    }
}
