//! Geometry helpers: regular polygon vertices, mass properties, point containment

use std::f64::consts::PI;

use glam::DVec2;

use super::Geometry;

/// Vertices of a regular polygon in body-local coordinates
pub fn polygon_vertices(sides: u32, radius: f64) -> Vec<DVec2> {
    let sides = sides.max(3);
    let theta = 2.0 * PI / f64::from(sides);
    let offset = theta * 0.5;
    (0..sides)
        .map(|i| {
            let a = offset + f64::from(i) * theta;
            DVec2::new(a.cos() * radius, a.sin() * radius)
        })
        .collect()
}

/// Surface area of the geometry
pub fn area(geometry: &Geometry) -> f64 {
    match *geometry {
        Geometry::Circle { radius } => PI * radius * radius,
        Geometry::Rectangle { width, height } => width * height,
        Geometry::Polygon { sides, radius } => {
            let n = f64::from(sides.max(3));
            0.5 * n * radius * radius * (2.0 * PI / n).sin()
        }
    }
}

/// Half of the vertical extent of the geometry rotated by `angle`
pub fn vertical_half_extent(geometry: &Geometry, angle: f64) -> f64 {
    match *geometry {
        Geometry::Circle { radius } => radius,
        Geometry::Rectangle { width, height } => {
            (0.5 * width * angle.sin()).abs() + (0.5 * height * angle.cos()).abs()
        }
        Geometry::Polygon { sides, radius } => polygon_vertices(sides, radius)
            .into_iter()
            .map(|v| DVec2::from_angle(angle).rotate(v).y)
            .fold(0.0, f64::max),
    }
}

/// Whether `point` (world space) lies inside the geometry placed at
/// `position` with rotation `angle`.
pub fn contains(geometry: &Geometry, position: DVec2, angle: f64, point: DVec2) -> bool {
    let local = DVec2::from_angle(-angle).rotate(point - position);
    match *geometry {
        Geometry::Circle { radius } => local.length_squared() <= radius * radius,
        Geometry::Rectangle { width, height } => {
            local.x.abs() <= width * 0.5 && local.y.abs() <= height * 0.5
        }
        Geometry::Polygon { sides, radius } => {
            convex_contains(&polygon_vertices(sides, radius), local)
        }
    }
}

/// Point-in-convex-polygon test; accepts either winding
fn convex_contains(vertices: &[DVec2], p: DVec2) -> bool {
    let mut sign = 0.0_f64;
    for (i, a) in vertices.iter().enumerate() {
        let b = vertices[(i + 1) % vertices.len()];
        let cross = (b - *a).perp_dot(p - *a);
        if cross.abs() < 1e-12 {
            continue;
        }
        if sign == 0.0 {
            sign = cross.signum();
        } else if cross.signum() != sign {
            return false;
        }
    }
    true
}
