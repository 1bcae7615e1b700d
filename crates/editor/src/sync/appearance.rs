//! Render appearance derived from an object's visual settings

use shared::{RenderMode, Visual};

use crate::sim::{Appearance, Color, Paint};

const FALLBACK_COLOR: Color = [128, 128, 128];

/// Parse a CSS hex color (`#rgb` or `#rrggbb`, leading `#` optional)
pub fn parse_hex_color(s: &str) -> Option<Color> {
    let hex = s.trim().trim_start_matches('#');
    if !hex.is_ascii() {
        return None;
    }
    match hex.len() {
        3 => {
            let mut out = [0u8; 3];
            for (i, c) in hex.chars().enumerate() {
                let v = c.to_digit(16)? as u8;
                out[i] = v * 17;
            }
            Some(out)
        }
        6 => {
            let mut out = [0u8; 3];
            for (i, slot) in out.iter_mut().enumerate() {
                *slot = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16).ok()?;
            }
            Some(out)
        }
        _ => None,
    }
}

/// Format a color as `#rrggbb`
pub fn to_hex(color: Color) -> String {
    format!("#{:02x}{:02x}{:02x}", color[0], color[1], color[2])
}

/// Linear blend between two colors, `t` in [0, 1]
pub fn blend(a: Color, b: Color, t: f64) -> Color {
    let t = t.clamp(0.0, 1.0);
    let mix = |x: u8, y: u8| (f64::from(x) + (f64::from(y) - f64::from(x)) * t).round() as u8;
    [mix(a[0], b[0]), mix(a[1], b[1]), mix(a[2], b[2])]
}

fn color_or_fallback(s: &str, what: &str) -> Color {
    parse_hex_color(s).unwrap_or_else(|| {
        tracing::warn!("Unparsable {what} color {s:?}, using fallback");
        FALLBACK_COLOR
    })
}

/// Derive the appearance a body should be rendered with
pub fn appearance_for(visual: &Visual) -> Appearance {
    let fill = color_or_fallback(&visual.fill, "fill");
    let stroke = color_or_fallback(&visual.stroke, "stroke");

    let paint = match visual.render_mode {
        RenderMode::Solid => Paint::Solid(fill),
        RenderMode::Outline => Paint::Transparent,
        RenderMode::Gradient => Paint::Gradient([fill, blend(fill, stroke, 0.5), stroke]),
    };

    Appearance {
        fill: paint,
        stroke,
        stroke_width: visual.stroke_width.max(0.0),
        opacity: visual.opacity.clamp(0.0, 1.0),
    }
}
