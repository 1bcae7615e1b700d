//! Partial updates for physics and visual parameters.
//!
//! Every field is optional; `None` leaves the current value alone.

use serde::{Deserialize, Serialize};
use shared::{Physics, RenderMode, Visual};

/// Sparse physics edit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhysicsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restitution: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub friction: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub friction_air: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub friction_static: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub density: Option<f64>,
}

impl PhysicsPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Overwrite the fields that are set
    pub fn apply(&self, physics: &mut Physics) {
        if let Some(v) = self.restitution {
            physics.restitution = v;
        }
        if let Some(v) = self.friction {
            physics.friction = v;
        }
        if let Some(v) = self.friction_air {
            physics.friction_air = v;
        }
        if let Some(v) = self.friction_static {
            physics.friction_static = v;
        }
        if let Some(v) = self.density {
            physics.density = v;
        }
    }
}

/// Sparse visual edit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub render_mode: Option<RenderMode>,
}

impl VisualPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Overwrite the fields that are set
    pub fn apply(&self, visual: &mut Visual) {
        if let Some(fill) = &self.fill {
            visual.fill = fill.clone();
        }
        if let Some(stroke) = &self.stroke {
            visual.stroke = stroke.clone();
        }
        if let Some(v) = self.stroke_width {
            visual.stroke_width = v;
        }
        if let Some(v) = self.opacity {
            visual.opacity = v;
        }
        if let Some(mode) = self.render_mode {
            visual.render_mode = mode;
        }
    }
}
