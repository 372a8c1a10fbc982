mod core;
pub mod marker;
pub mod mtime;
mod script;
mod workspace;

pub use core::{Freshness, Orchestrator, RunOptions};
pub use script::{ARTIFACT_EXTENSION, Artifact, SCRIPT_EXTENSION, Script};
