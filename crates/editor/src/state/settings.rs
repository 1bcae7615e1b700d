//! Editor settings

use std::path::{Path, PathBuf};

use glam::DVec2;
use serde::{Deserialize, Serialize};
use shared::{Physics, Point2D, Visual};

use super::scene::{ObjectDefaults, DEFAULT_HISTORY_LIMIT};
use crate::error::{EditorError, EditorResult};
use crate::sim::WorldConfig;

/// Simulation world settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Gravity vector (units/s², y grows downwards)
    pub gravity: [f64; 2],
    /// Ticks per second while playing
    pub tick_hz: f64,
    /// Optional floor plane
    pub floor_y: Option<f64>,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            gravity: [0.0, 980.0],
            tick_hz: 60.0,
            floor_y: None,
        }
    }
}

impl SimulationSettings {
    /// Seconds advanced per tick
    pub fn dt(&self) -> f64 {
        if self.tick_hz > 0.0 {
            1.0 / self.tick_hz
        } else {
            1.0 / 60.0
        }
    }

    /// World configuration for the reference simulation
    pub fn world_config(&self) -> WorldConfig {
        WorldConfig {
            gravity: DVec2::from_array(self.gravity),
            floor_y: self.floor_y,
        }
    }
}

/// Undo history settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    /// Maximum number of snapshots kept
    pub limit: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

/// Editing behavior
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditingSettings {
    /// Displacement applied to duplicated objects
    pub duplicate_offset: Point2D,
    /// Write the scene to the autosave file after every commit
    pub autosave: bool,
    /// Autosave file; the platform data dir when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autosave_path: Option<PathBuf>,
}

impl Default for EditingSettings {
    fn default() -> Self {
        Self {
            duplicate_offset: Point2D::new(20.0, 20.0),
            autosave: false,
            autosave_path: None,
        }
    }
}

/// Physics and visuals given to new objects
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsSettings {
    pub physics: Physics,
    pub visual: Visual,
}

impl From<&DefaultsSettings> for ObjectDefaults {
    fn from(defaults: &DefaultsSettings) -> Self {
        Self {
            physics: defaults.physics,
            visual: defaults.visual.clone(),
        }
    }
}

/// All editor settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Simulation settings
    pub simulation: SimulationSettings,
    /// History settings
    pub history: HistorySettings,
    /// Editing settings
    pub editing: EditingSettings,
    /// New-object defaults
    pub defaults: DefaultsSettings,
}

impl EditorSettings {
    fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "physbox", "physbox")
            .map(|dirs| dirs.config_dir().join("settings.json"))
    }

    /// Load settings from file, or return default if not found
    pub fn load() -> Self {
        if let Some(path) = Self::config_path() {
            if path.exists() {
                match Self::load_from(&path) {
                    Ok(settings) => return settings,
                    Err(e) => tracing::warn!("Ignoring settings at {}: {e}", path.display()),
                }
            }
        }
        Self::default()
    }

    /// Load settings from an explicit file
    pub fn load_from(path: &Path) -> EditorResult<Self> {
        let json = std::fs::read_to_string(path)?;
        serde_json::from_str(&json)
            .map_err(|e| EditorError::InvalidSettings(format!("{}: {e}", path.display())))
    }

    /// Save settings to the config dir. Failures are logged.
    pub fn save(&self) {
        if let Some(path) = Self::config_path() {
            if let Err(e) = self.save_to(&path) {
                tracing::warn!("Saving settings to {} failed: {e}", path.display());
            }
        }
    }

    /// Save settings to an explicit file
    pub fn save_to(&self, path: &Path) -> EditorResult<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = EditorSettings::default();
        assert_eq!(s.simulation.gravity, [0.0, 980.0]);
        assert_eq!(s.simulation.tick_hz, 60.0);
        assert_eq!(s.history.limit, 100);
        assert_eq!(s.editing.duplicate_offset, Point2D::new(20.0, 20.0));
        assert!(!s.editing.autosave);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let s: EditorSettings =
            serde_json::from_str(r#"{"history": {"limit": 5}, "simulation": {"tick_hz": 120.0}}"#)
                .unwrap();
        assert_eq!(s.history.limit, 5);
        assert_eq!(s.simulation.tick_hz, 120.0);
        assert_eq!(s.simulation.gravity, [0.0, 980.0]);
        assert_eq!(s.defaults.physics, Physics::default());
    }

    #[test]
    fn test_dt_guards_zero_rate() {
        let mut sim = SimulationSettings::default();
        assert!((sim.dt() - 1.0 / 60.0).abs() < 1e-12);
        sim.tick_hz = 0.0;
        assert!((sim.dt() - 1.0 / 60.0).abs() < 1e-12);
    }

    #[test]
    fn test_world_config() {
        let sim = SimulationSettings {
            gravity: [1.0, 2.0],
            tick_hz: 30.0,
            floor_y: Some(500.0),
        };
        let config = sim.world_config();
        assert_eq!(config.gravity, DVec2::new(1.0, 2.0));
        assert_eq!(config.floor_y, Some(500.0));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("physbox-settings-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"editing": {"autosave": true, "autosave_path": "/tmp/a.json"}}"#).unwrap();
        let s = EditorSettings::load_from(&path).unwrap();
        assert!(s.editing.autosave);
        assert_eq!(s.editing.autosave_path, Some(PathBuf::from("/tmp/a.json")));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_save_to_then_load_from() {
        let path = std::env::temp_dir()
            .join(format!("physbox-save-{}", std::process::id()))
            .join("settings.json");
        let mut s = EditorSettings::default();
        s.history.limit = 7;
        s.simulation.floor_y = Some(320.0);
        s.save_to(&path).unwrap();
        assert_eq!(EditorSettings::load_from(&path).unwrap(), s);
        if let Some(dir) = path.parent() {
            let _ = std::fs::remove_dir_all(dir);
        }
    }

    #[test]
    fn test_load_from_bad_file() {
        let path = std::env::temp_dir().join(format!("physbox-bad-{}.json", std::process::id()));
        std::fs::write(&path, "[1, 2").unwrap();
        assert!(EditorSettings::load_from(&path).is_err());
        let _ = std::fs::remove_file(&path);
    }
}
