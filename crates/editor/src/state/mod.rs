pub mod scene;
pub mod selection;
pub mod settings;

pub use scene::{
    link_display_name, object_display_name, shape_summary, short_id, History, ObjectDefaults,
    SceneState,
};
pub use selection::SelectionState;
pub use settings::{
    DefaultsSettings, EditingSettings, EditorSettings, HistorySettings, SimulationSettings,
};
