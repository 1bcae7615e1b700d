//! Editor session
//!
//! Owns the scene model, the body synchronizer, selection, history and
//! settings, and runs the control flow that keeps them consistent:
//! mutate the model, reconcile live handles, prune the selection, then
//! commit one snapshot.

mod edit_ops;
mod interaction;
pub mod patch;
mod playback;

use std::path::PathBuf;

use shared::{ObjectId, Snapshot};

use crate::error::EditorResult;
use crate::sim::{SimWorld, SimulationAdapter};
use crate::state::scene::persistence;
use crate::state::{EditorSettings, History, SceneState, SelectionState, SimulationSettings};
use crate::sync::BodySynchronizer;

pub use interaction::LinkClick;
pub use patch::{PhysicsPatch, VisualPatch};

/// Pointer drag in progress
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DragState {
    pub(crate) id: ObjectId,
    pub(crate) moved: bool,
}

/// Interactive editing session over a simulation backend
pub struct EditorSession<S: SimulationAdapter> {
    pub(crate) scene: SceneState,
    pub(crate) sync: BodySynchronizer<S>,
    pub(crate) selection: SelectionState,
    pub(crate) history: History,
    pub(crate) settings: EditorSettings,
    pub(crate) playing: bool,
    /// First endpoint of a two-click link gesture
    pub(crate) pending_link: Option<ObjectId>,
    pub(crate) drag: Option<DragState>,
    /// Set while a continuous edit is open; true once something changed
    pub(crate) gesture: Option<bool>,
}

impl EditorSession<SimWorld> {
    /// Session over the reference world configured from settings
    pub fn headless(settings: EditorSettings) -> Self {
        let world = SimWorld::new(settings.simulation.world_config());
        Self::new(world, settings)
    }

    /// Swap gravity, tick rate and floor while the session runs
    pub fn set_simulation_settings(&mut self, simulation: SimulationSettings) {
        self.sync.sim_mut().set_config(simulation.world_config());
        self.settings.simulation = simulation;
        tracing::debug!("Simulation settings updated");
    }
}

impl<S: SimulationAdapter> EditorSession<S> {
    /// Empty session. The empty scene is the oldest history entry.
    pub fn new(sim: S, settings: EditorSettings) -> Self {
        let scene = SceneState::with_defaults((&settings.defaults).into());
        let mut history = History::new(settings.history.limit);
        history.commit(scene.snapshot());
        Self {
            scene,
            sync: BodySynchronizer::new(sim),
            selection: SelectionState::default(),
            history,
            settings,
            playing: false,
            pending_link: None,
            drag: None,
            gesture: None,
        }
    }

    // ── Accessors ─────────────────────────────────────────────

    pub fn scene(&self) -> &SceneState {
        &self.scene
    }

    pub fn sync(&self) -> &BodySynchronizer<S> {
        &self.sync
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    /// Independent copy of the current model
    pub fn snapshot(&self) -> Snapshot {
        self.scene.snapshot()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // ── History ───────────────────────────────────────────────

    /// Record the current model as a new history entry. Inside a gesture the
    /// commit is deferred to `end_gesture`.
    pub(crate) fn commit(&mut self) {
        if let Some(dirty) = self.gesture.as_mut() {
            *dirty = true;
            return;
        }
        self.history.commit(self.scene.snapshot());
        if self.settings.editing.autosave {
            if let Some(path) = self.autosave_path() {
                persistence::autosave(&path, &self.scene.scene);
            }
        }
    }

    /// Start a continuous edit (slider drag, scrub). Commits are held back
    /// until `end_gesture`.
    pub fn begin_gesture(&mut self) {
        if self.gesture.is_none() {
            self.gesture = Some(false);
        }
    }

    /// Close a continuous edit, committing once if anything changed
    pub fn end_gesture(&mut self) -> bool {
        match self.gesture.take() {
            Some(true) => {
                self.commit();
                true
            }
            _ => false,
        }
    }

    /// Whether a continuous edit is open
    pub fn in_gesture(&self) -> bool {
        self.gesture.is_some()
    }

    /// Commit any edit held back by an open gesture before the history
    /// cursor moves or the model is replaced
    fn settle_gesture(&mut self) {
        if self.end_gesture() {
            tracing::debug!("Closed open gesture before history change");
        }
    }

    /// Swap the model for a snapshot and rebuild every live handle
    fn apply_snapshot(&mut self, snapshot: &Snapshot) {
        self.scene.restore(snapshot);
        self.rebuild_handles();
    }

    /// Rebuild every handle from the model and drop transient interaction state
    fn rebuild_handles(&mut self) {
        self.sync
            .rebuild_all(self.scene.objects(), self.scene.links());
        self.selection.clear();
        self.pending_link = None;
        self.drag = None;
    }

    /// Step back one history entry
    pub fn undo(&mut self) -> bool {
        self.settle_gesture();
        let Some(snapshot) = self.history.undo().cloned() else {
            return false;
        };
        self.apply_snapshot(&snapshot);
        tracing::debug!("Undo to history index {}", self.history.index());
        true
    }

    /// Step forward one history entry
    pub fn redo(&mut self) -> bool {
        self.settle_gesture();
        let Some(snapshot) = self.history.redo().cloned() else {
            return false;
        };
        self.apply_snapshot(&snapshot);
        tracing::debug!("Redo to history index {}", self.history.index());
        true
    }

    /// Clear the scene. Counters restart at 1; the reset itself is undoable.
    pub fn reset(&mut self) {
        self.settle_gesture();
        self.scene.reset();
        self.sync.clear();
        self.selection.clear();
        self.pending_link = None;
        self.drag = None;
        self.commit();
        tracing::info!("Scene reset");
    }

    // ── Persistence ───────────────────────────────────────────

    /// Replace the scene with a JSON document. On failure the current model
    /// and handles are left untouched.
    pub fn load_json(&mut self, json: &str) -> EditorResult<()> {
        let snapshot = persistence::from_json(json)?;
        self.load_snapshot(snapshot);
        Ok(())
    }

    /// Replace the scene with a scene file
    pub fn load_file(&mut self, path: &std::path::Path) -> EditorResult<()> {
        let snapshot = persistence::load_file(path)?;
        self.load_snapshot(snapshot);
        Ok(())
    }

    fn load_snapshot(&mut self, snapshot: Snapshot) {
        self.settle_gesture();
        let (objects, links) = (snapshot.objects.len(), snapshot.links.len());
        self.scene.replace(snapshot);
        self.rebuild_handles();
        self.commit();
        tracing::info!("Loaded scene ({objects} objects, {links} links)");
    }

    /// Current scene as pretty JSON
    pub fn export_json(&self) -> EditorResult<String> {
        persistence::to_json(&self.scene.scene)
    }

    /// Write the current scene to a file
    pub fn save_file(&self, path: &std::path::Path) -> EditorResult<()> {
        persistence::save_file(path, &self.scene.scene)
    }

    /// Autosave file from settings, else the platform data dir
    pub fn autosave_path(&self) -> Option<PathBuf> {
        self.settings
            .editing
            .autosave_path
            .clone()
            .or_else(persistence::default_autosave_path)
    }

    pub fn has_autosave(&self) -> bool {
        self.autosave_path()
            .is_some_and(|path| persistence::has_autosave(&path))
    }

    /// Load the autosave file if one is usable. Returns whether it was loaded.
    pub fn recover_autosave(&mut self) -> bool {
        let Some(snapshot) = self
            .autosave_path()
            .and_then(|path| persistence::load_autosave(&path))
        else {
            return false;
        };
        self.load_snapshot(snapshot);
        true
    }
}
