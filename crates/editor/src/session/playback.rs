//! Fixed-tick simulation driver

use super::EditorSession;
use crate::sim::SimulationAdapter;

impl<S: SimulationAdapter> EditorSession<S> {
    pub fn play(&mut self) {
        self.playing = true;
    }

    /// Stop stepping. Model and handles are kept as they are.
    pub fn pause(&mut self) {
        self.playing = false;
    }

    pub fn toggle_play(&mut self) -> bool {
        self.playing = !self.playing;
        self.playing
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Advance one tick while playing. Returns false when paused.
    pub fn tick(&mut self) -> bool {
        if !self.playing {
            return false;
        }
        self.step_once();
        true
    }

    /// Advance one tick regardless of play state, then copy simulated
    /// position and angle back into the model
    pub fn step_once(&mut self) {
        let dt = self.settings.simulation.dt();
        self.sync.step(dt);
        self.sync
            .sync_model_from_simulation(self.scene.objects_mut());
        self.scene.notify_mutated();
    }

    /// Advance `steps` ticks regardless of play state
    pub fn run_steps(&mut self, steps: usize) {
        for _ in 0..steps {
            self.step_once();
        }
    }
}
