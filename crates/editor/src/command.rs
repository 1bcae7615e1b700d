//! JSON command protocol for scripted editing.
//!
//! Property edits act on the selection. When a command carries `ids`, those
//! objects become the selection first.

use serde::{Deserialize, Serialize};
use shared::{BodyType, PhysicsPreset, Point2D, Shape};

use crate::harness::TestHarness;
use crate::session::{PhysicsPatch, VisualPatch};
use crate::state::{object_display_name, shape_summary};

/// A command a script or agent can execute.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum AgentCommand {
    /// Create a new object
    CreateObject {
        position: Point2D,
        shape: Shape,
        #[serde(default)]
        body_type: BodyType,
    },
    /// Delete an object (and its links) by ID
    DeleteObject {
        id: String,
    },
    /// Duplicate the selected objects
    Duplicate {
        #[serde(default)]
        ids: Option<Vec<String>>,
    },
    SetShape {
        #[serde(default)]
        ids: Option<Vec<String>>,
        shape: Shape,
    },
    SetBodyType {
        #[serde(default)]
        ids: Option<Vec<String>>,
        body_type: BodyType,
    },
    SetPhysics {
        #[serde(default)]
        ids: Option<Vec<String>>,
        physics: PhysicsPatch,
    },
    ApplyPreset {
        #[serde(default)]
        ids: Option<Vec<String>>,
        preset: PhysicsPreset,
    },
    SetVisual {
        #[serde(default)]
        ids: Option<Vec<String>>,
        visual: VisualPatch,
    },
    SetLocked {
        #[serde(default)]
        ids: Option<Vec<String>>,
        locked: bool,
    },
    /// Spring-link two objects
    Link {
        a: String,
        b: String,
    },
    /// Select objects by IDs (replaces the selection)
    Select {
        ids: Vec<String>,
    },
    /// Clear selection.
    ClearSelection,
    /// Undo the last operation.
    Undo,
    /// Redo the last undone operation.
    Redo,
    /// Clear the entire scene.
    Reset,
    /// Advance the simulation
    Step {
        #[serde(default = "one_step")]
        steps: usize,
    },
    /// Inspect the scene: list all objects and links.
    Inspect,
    /// Export the scene as JSON.
    ExportScene,
    /// Replace the scene with a JSON document.
    LoadScene {
        scene_json: String,
    },
}

fn one_step() -> usize {
    1
}

/// Response from executing a command.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl CommandResponse {
    fn ok() -> Self {
        Self {
            success: true,
            error: None,
            data: None,
        }
    }

    fn ok_with_data(data: serde_json::Value) -> Self {
        Self {
            success: true,
            error: None,
            data: Some(data),
        }
    }

    fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(msg.into()),
            data: None,
        }
    }
}

fn target(harness: &mut TestHarness, ids: Option<Vec<String>>) -> Result<(), CommandResponse> {
    if let Some(ids) = ids {
        harness.session.select_many(&ids);
    }
    if harness.session.selection().is_empty() {
        return Err(CommandResponse::err("No objects selected"));
    }
    Ok(())
}

fn edited(changed: bool) -> CommandResponse {
    CommandResponse::ok_with_data(serde_json::json!({ "changed": changed }))
}

/// Execute a single command on the harness.
pub fn execute_command(harness: &mut TestHarness, cmd: AgentCommand) -> CommandResponse {
    match cmd {
        AgentCommand::CreateObject {
            position,
            shape,
            body_type,
        } => {
            match harness.session.add_object(position, shape, body_type) {
                Ok(id) => CommandResponse::ok_with_data(serde_json::json!({ "id": id })),
                Err(e) => CommandResponse::err(e.to_string()),
            }
        }

        AgentCommand::DeleteObject { id } => {
            let removed = harness.session.delete_object(&id);
            CommandResponse::ok_with_data(serde_json::json!({ "removed": removed }))
        }

        AgentCommand::Duplicate { ids } => {
            if let Err(resp) = target(harness, ids) {
                return resp;
            }
            match harness.session.duplicate_selected() {
                Ok(copies) => CommandResponse::ok_with_data(serde_json::json!({ "ids": copies })),
                Err(e) => CommandResponse::err(e.to_string()),
            }
        }

        AgentCommand::SetShape { ids, shape } => match target(harness, ids) {
            Ok(()) => edited(harness.session.set_shape(shape)),
            Err(resp) => resp,
        },

        AgentCommand::SetBodyType { ids, body_type } => match target(harness, ids) {
            Ok(()) => edited(harness.session.set_body_type(body_type)),
            Err(resp) => resp,
        },

        AgentCommand::SetPhysics { ids, physics } => match target(harness, ids) {
            Ok(()) => edited(harness.session.set_physics(physics)),
            Err(resp) => resp,
        },

        AgentCommand::ApplyPreset { ids, preset } => match target(harness, ids) {
            Ok(()) => edited(harness.session.apply_preset(preset)),
            Err(resp) => resp,
        },

        AgentCommand::SetVisual { ids, visual } => match target(harness, ids) {
            Ok(()) => edited(harness.session.set_visual(visual)),
            Err(resp) => resp,
        },

        AgentCommand::SetLocked { ids, locked } => match target(harness, ids) {
            Ok(()) => edited(harness.session.set_locked(locked)),
            Err(resp) => resp,
        },

        AgentCommand::Link { a, b } => match harness.session.link(&a, &b) {
            Ok(id) => CommandResponse::ok_with_data(serde_json::json!({ "id": id })),
            Err(e) => CommandResponse::err(e.to_string()),
        },

        AgentCommand::Select { ids } => {
            harness.session.select_many(&ids);
            let selected = harness.selected();
            CommandResponse::ok_with_data(serde_json::json!({ "selected": selected }))
        }

        AgentCommand::ClearSelection => {
            harness.session.clear_selection();
            CommandResponse::ok()
        }

        AgentCommand::Undo => {
            let success = harness.undo();
            CommandResponse::ok_with_data(serde_json::json!({ "undone": success }))
        }

        AgentCommand::Redo => {
            let success = harness.redo();
            CommandResponse::ok_with_data(serde_json::json!({ "redone": success }))
        }

        AgentCommand::Reset => {
            harness.reset();
            CommandResponse::ok()
        }

        AgentCommand::Step { steps } => {
            harness.step(steps);
            CommandResponse::ok_with_data(serde_json::json!({ "steps": steps }))
        }

        AgentCommand::Inspect => {
            let scene = harness.session.scene();
            let objects: Vec<serde_json::Value> = scene
                .objects()
                .iter()
                .map(|o| {
                    serde_json::json!({
                        "id": o.id,
                        "name": object_display_name(o),
                        "shape": shape_summary(&o.shape),
                        "position": [o.position.x, o.position.y],
                        "angle": o.angle,
                        "locked": o.locked,
                    })
                })
                .collect();
            let links: Vec<serde_json::Value> = scene
                .links()
                .iter()
                .map(|l| serde_json::json!({ "id": l.id, "a": l.a, "b": l.b }))
                .collect();
            CommandResponse::ok_with_data(serde_json::json!({
                "object_count": objects.len(),
                "link_count": links.len(),
                "objects": objects,
                "links": links,
                "selected": harness.selected(),
                "version": scene.version(),
            }))
        }

        AgentCommand::ExportScene => match harness.export_scene_json() {
            Ok(json) => CommandResponse::ok_with_data(serde_json::json!({ "scene_json": json })),
            Err(e) => CommandResponse::err(e),
        },

        AgentCommand::LoadScene { scene_json } => match harness.load_scene_json(&scene_json) {
            Ok(()) => CommandResponse::ok_with_data(serde_json::json!({
                "object_count": harness.object_count(),
                "link_count": harness.link_count(),
            })),
            Err(e) => CommandResponse::err(e),
        },
    }
}

/// Parse and execute a single JSON command string.
pub fn execute_json(harness: &mut TestHarness, json: &str) -> Result<CommandResponse, String> {
    let cmd: AgentCommand =
        serde_json::from_str(json).map_err(|e| format!("Invalid command JSON: {e}"))?;
    Ok(execute_command(harness, cmd))
}

/// Parse and execute multiple JSON commands (array).
pub fn execute_json_batch(
    harness: &mut TestHarness,
    json: &str,
) -> Result<Vec<CommandResponse>, String> {
    let cmds: Vec<AgentCommand> =
        serde_json::from_str(json).map_err(|e| format!("Invalid commands JSON: {e}"))?;
    Ok(cmds
        .into_iter()
        .map(|cmd| execute_command(harness, cmd))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_serde_undo() {
        let json = r#"{"command": "undo"}"#;
        let cmd: AgentCommand = serde_json::from_str(json).unwrap();
        assert!(matches!(cmd, AgentCommand::Undo));
    }

    #[test]
    fn test_command_serde_create_object() {
        let json = r#"{"command": "create_object", "position": {"x": 1.0, "y": 2.0}, "shape": {"type": "circle", "radius": 5.0}}"#;
        let cmd: AgentCommand = serde_json::from_str(json).unwrap();
        match cmd {
            AgentCommand::CreateObject {
                position,
                body_type,
                ..
            } => {
                assert_eq!(position, Point2D::new(1.0, 2.0));
                assert_eq!(body_type, BodyType::Dynamic);
            }
            _ => panic!("Expected CreateObject"),
        }
    }

    #[test]
    fn test_command_serde_step_default() {
        let cmd: AgentCommand = serde_json::from_str(r#"{"command": "step"}"#).unwrap();
        assert!(matches!(cmd, AgentCommand::Step { steps: 1 }));
    }

    #[test]
    fn test_command_serde_set_physics() {
        let json = r#"{"command": "set_physics", "ids": ["obj-1"], "physics": {"frictionAir": 0.2}}"#;
        let cmd: AgentCommand = serde_json::from_str(json).unwrap();
        match cmd {
            AgentCommand::SetPhysics { ids, physics } => {
                assert_eq!(ids, Some(vec!["obj-1".to_string()]));
                assert_eq!(physics.friction_air, Some(0.2));
            }
            _ => panic!("Expected SetPhysics"),
        }
    }

    #[test]
    fn test_execute_create_object() {
        let mut h = TestHarness::new();
        let json = r#"{"command": "create_object", "position": {"x": 100.0, "y": 100.0}, "shape": {"type": "circle", "radius": 20.0}}"#;
        let resp = execute_json(&mut h, json).unwrap();
        assert!(resp.success);
        assert_eq!(resp.data.unwrap()["id"], "obj-1");
        assert_eq!(h.object_count(), 1);
    }

    #[test]
    fn test_execute_create_object_with_exhausted_counter() {
        let mut h = TestHarness::new();
        h.load_scene_json(r#"{"objects": [], "nextId": 18446744073709551615}"#)
            .unwrap();
        let json = r#"{"command": "create_object", "position": {"x": 0.0, "y": 0.0}, "shape": {"type": "circle", "radius": 2.0}}"#;
        let resp = execute_json(&mut h, json).unwrap();
        assert!(!resp.success);
        assert!(resp.error.unwrap().contains("id counter exhausted"));
        assert_eq!(h.object_count(), 0);
    }

    #[test]
    fn test_execute_edit_without_selection_fails() {
        let mut h = TestHarness::new();
        h.create_circle(0.0, 0.0, 5.0);
        h.session.clear_selection();
        let resp = execute_json(&mut h, r#"{"command": "set_locked", "locked": true}"#).unwrap();
        assert!(!resp.success);
        assert!(resp.error.unwrap().contains("No objects selected"));
    }

    #[test]
    fn test_execute_link_error() {
        let mut h = TestHarness::new();
        let a = h.create_circle(0.0, 0.0, 5.0);
        let json = format!(r#"{{"command": "link", "a": "{a}", "b": "{a}"}}"#);
        let resp = execute_json(&mut h, &json).unwrap();
        assert!(!resp.success);
        assert!(resp.error.unwrap().contains("invalid link endpoints"));
    }

    #[test]
    fn test_execute_inspect() {
        let mut h = TestHarness::new();
        let a = h.create_circle(0.0, 0.0, 5.0);
        let b = h.create_rect(50.0, 0.0, 10.0, 10.0);
        h.link(&a, &b);

        let resp = execute_json(&mut h, r#"{"command": "inspect"}"#).unwrap();
        assert!(resp.success);
        let data = resp.data.unwrap();
        assert_eq!(data["object_count"], 2);
        assert_eq!(data["link_count"], 1);
        assert_eq!(data["objects"][1]["shape"], "10\u{d7}10");

        let version = data["version"].as_u64().unwrap();
        h.step(1);
        let resp = execute_json(&mut h, r#"{"command": "inspect"}"#).unwrap();
        assert!(resp.data.unwrap()["version"].as_u64().unwrap() > version);
    }

    #[test]
    fn test_execute_undo_redo() {
        let mut h = TestHarness::new();
        h.create_circle(0.0, 0.0, 5.0);

        let resp = execute_json(&mut h, r#"{"command": "undo"}"#).unwrap();
        assert_eq!(resp.data.unwrap()["undone"], true);
        assert_eq!(h.object_count(), 0);

        let resp = execute_json(&mut h, r#"{"command": "redo"}"#).unwrap();
        assert_eq!(resp.data.unwrap()["redone"], true);
        assert_eq!(h.object_count(), 1);
    }

    #[test]
    fn test_execute_export_scene() {
        let mut h = TestHarness::new();
        h.create_circle(0.0, 0.0, 5.0);

        let resp = execute_json(&mut h, r#"{"command": "export_scene"}"#).unwrap();
        let data = resp.data.unwrap();
        let scene_json = data["scene_json"].as_str().unwrap();
        assert!(scene_json.contains("nextLinkId"));
    }

    #[test]
    fn test_execute_invalid_json() {
        let mut h = TestHarness::new();
        assert!(execute_json(&mut h, "not valid json").is_err());
        assert!(execute_json(&mut h, r#"{"command": "fly"}"#).is_err());
    }
}
