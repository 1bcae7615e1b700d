// Library crate: the editor core, exposed for the headless runner and integration tests.
// Rendering and raw input wiring live outside this crate.

pub mod command;
pub mod error;
pub mod fixtures;
pub mod harness;
pub mod session;
pub mod sim;
pub mod state;
pub mod sync;
pub mod validation;
