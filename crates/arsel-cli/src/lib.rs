//! CLI library components for the `arsel` selection manager.

pub mod logging;
pub mod script;
pub mod summary;
