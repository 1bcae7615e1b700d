//! Scene document codec and autosave/load
//!
//! The document is the flat snapshot shape `{objects, links, nextId,
//! nextLinkId}`. Only `objects` is required. Missing counters are inferred
//! from the trailing digits of existing ids.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use shared::{infer_next_counter, SceneDocument, Snapshot};

use crate::error::{EditorError, EditorResult};

/// Convert a snapshot into its document form
pub fn serialize(snapshot: &Snapshot) -> SceneDocument {
    SceneDocument::from(snapshot)
}

/// Pretty JSON text of a snapshot
pub fn to_json(snapshot: &Snapshot) -> EditorResult<String> {
    Ok(serde_json::to_string_pretty(&serialize(snapshot))?)
}

/// Validate a document and turn it into a snapshot.
///
/// Fails when `objects` is absent. Objects with duplicate ids and links whose
/// endpoints are missing or equal are dropped. Counters are raised to at
/// least one past the largest numeric id suffix.
pub fn deserialize(doc: SceneDocument) -> EditorResult<Snapshot> {
    let Some(raw_objects) = doc.objects else {
        return Err(EditorError::InvalidScene("missing \"objects\"".to_string()));
    };

    let mut seen = HashSet::new();
    let mut objects = Vec::with_capacity(raw_objects.len());
    for object in raw_objects {
        if seen.insert(object.id.clone()) {
            objects.push(object);
        } else {
            tracing::warn!("Dropping object with duplicate id {}", object.id);
        }
    }

    let mut link_ids = HashSet::new();
    let mut links = Vec::with_capacity(doc.links.len());
    for link in doc.links {
        let valid = link.a != link.b && seen.contains(&link.a) && seen.contains(&link.b);
        if !valid {
            tracing::warn!("Dropping link {} with invalid endpoints", link.id);
        } else if !link_ids.insert(link.id.clone()) {
            tracing::warn!("Dropping link with duplicate id {}", link.id);
        } else {
            links.push(link);
        }
    }

    let exhausted =
        |what: &str| EditorError::InvalidScene(format!("{what} id suffix leaves no room for new ids"));
    let inferred_id = infer_next_counter(objects.iter().map(|o| o.id.as_str()))
        .ok_or_else(|| exhausted("object"))?;
    let inferred_link_id = infer_next_counter(links.iter().map(|l| l.id.as_str()))
        .ok_or_else(|| exhausted("link"))?;

    Ok(Snapshot {
        next_id: doc.next_id.map_or(inferred_id, |n| n.max(inferred_id)),
        next_link_id: doc
            .next_link_id
            .map_or(inferred_link_id, |n| n.max(inferred_link_id)),
        objects,
        links,
    })
}

/// Parse JSON text into a snapshot
pub fn from_json(json: &str) -> EditorResult<Snapshot> {
    let doc: SceneDocument = serde_json::from_str(json)
        .map_err(|e| EditorError::InvalidScene(format!("JSON parse error: {e}")))?;
    deserialize(doc)
}

/// Read a scene file
pub fn load_file(path: &Path) -> EditorResult<Snapshot> {
    let json = std::fs::read_to_string(path)?;
    from_json(&json)
}

/// Write a scene file
pub fn save_file(path: &Path, snapshot: &Snapshot) -> EditorResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, to_json(snapshot)?)?;
    Ok(())
}

/// Autosave location under the platform data dir
pub fn default_autosave_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("com", "physbox", "physbox")
        .map(|dirs| dirs.data_dir().join("autosave.json"))
}

/// Save scene to autosave file. Failures are logged, never returned.
pub fn autosave(path: &Path, snapshot: &Snapshot) {
    if let Err(e) = save_file(path, snapshot) {
        tracing::warn!("Autosave to {} failed: {e}", path.display());
    }
}

/// Load scene from autosave file
pub fn load_autosave(path: &Path) -> Option<Snapshot> {
    match load_file(path) {
        Ok(snapshot) => Some(snapshot),
        Err(e) => {
            tracing::debug!("No usable autosave at {}: {e}", path.display());
            None
        }
    }
}

/// Check if autosave file exists
pub fn has_autosave(path: &Path) -> bool {
    path.exists()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{circle_object, document_without_counters_json, linked_pair_snapshot};

    #[test]
    fn test_serialize_keys() {
        let json = to_json(&linked_pair_snapshot()).unwrap();
        let v: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(v["objects"].is_array());
        assert!(v["links"].is_array());
        assert_eq!(v["nextId"], 3);
        assert_eq!(v["nextLinkId"], 2);
    }

    #[test]
    fn test_serialize_deserialize_serialize_idempotent() {
        let first = to_json(&linked_pair_snapshot()).unwrap();
        let second = to_json(&from_json(&first).unwrap()).unwrap();
        let third = to_json(&from_json(&second).unwrap()).unwrap();
        assert_eq!(second, third);
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_objects_is_invalid_scene() {
        let err = from_json(r#"{"links": [], "nextId": 4}"#).unwrap_err();
        assert!(matches!(err, EditorError::InvalidScene(_)));
    }

    #[test]
    fn test_malformed_json_is_invalid_scene() {
        assert!(matches!(from_json("{nope"), Err(EditorError::InvalidScene(_))));
    }

    #[test]
    fn test_counters_inferred_from_suffixes() {
        let snap = from_json(&document_without_counters_json()).unwrap();
        assert_eq!(snap.next_id, 9);
        assert_eq!(snap.next_link_id, 1);
        assert!(snap.links.is_empty());
    }

    #[test]
    fn test_counters_inferred_from_foreign_id_format() {
        let doc = SceneDocument {
            objects: Some(vec![
                circle_object("ball_41", 0.0, 0.0, 1.0),
                circle_object("wall", 0.0, 0.0, 1.0),
            ]),
            ..Default::default()
        };
        assert_eq!(deserialize(doc).unwrap().next_id, 42);
    }

    #[test]
    fn test_counters_default_to_one_when_unparsable() {
        let doc = SceneDocument {
            objects: Some(vec![circle_object("alpha", 0.0, 0.0, 1.0)]),
            ..Default::default()
        };
        let snap = deserialize(doc).unwrap();
        assert_eq!(snap.next_id, 1);
        assert_eq!(snap.next_link_id, 1);
    }

    #[test]
    fn test_low_explicit_counter_is_raised() {
        let doc = SceneDocument {
            objects: Some(vec![circle_object("obj-5", 0.0, 0.0, 1.0)]),
            next_id: Some(2),
            ..Default::default()
        };
        assert_eq!(deserialize(doc).unwrap().next_id, 6);
    }

    #[test]
    fn test_dangling_and_duplicate_records_dropped() {
        let mut snap = linked_pair_snapshot();
        snap.objects.push(circle_object("obj-1", 5.0, 5.0, 1.0));
        let mut dangling = snap.links[0].clone();
        dangling.id = "link-2".into();
        dangling.b = "obj-77".into();
        snap.links.push(dangling);

        let loaded = deserialize(serialize(&snap)).unwrap();
        assert_eq!(loaded.objects.len(), 2);
        assert_eq!(loaded.links.len(), 1);
        assert_eq!(loaded.links[0].id, "link-1");
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = std::env::temp_dir().join(format!("physbox-test-{}", std::process::id()));
        let path = dir.join("scene.json");
        let snap = linked_pair_snapshot();
        save_file(&path, &snap).unwrap();
        let loaded = load_file(&path).unwrap();
        assert_eq!(loaded, snap);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = load_file(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, EditorError::Io(_)));
    }

    #[test]
    fn test_max_id_suffix_is_rejected() {
        let doc = r#"{"objects": [{"id": "obj-18446744073709551615", "position": {"x": 0.0, "y": 0.0},
            "shape": {"type": "circle", "radius": 5.0}}]}"#;
        let err = from_json(doc).unwrap_err();
        assert!(matches!(err, EditorError::InvalidScene(_)));
    }

    #[test]
    fn test_autosave_roundtrip() {
        let path = std::env::temp_dir()
            .join(format!("physbox-autosave-{}", std::process::id()))
            .join("autosave.json");
        assert!(!has_autosave(&path));
        assert!(load_autosave(&path).is_none());

        autosave(&path, &linked_pair_snapshot());
        assert!(has_autosave(&path));
        assert_eq!(load_autosave(&path), Some(linked_pair_snapshot()));
        if let Some(dir) = path.parent() {
            let _ = std::fs::remove_dir_all(dir);
        }
    }
}
