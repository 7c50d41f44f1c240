//! State plumbing between the shared containers and the UI.

pub mod server_sources;
pub mod state_bindings;
