//! Infrastructure layer for filesystem and environment interactions.
//!
//! Locates the per-workspace state file and turns the paths the host hands
//! us into the root-relative strings the State Store tracks.

pub mod paths;
pub mod workspace;

pub use paths::{get_data_dir, normalize, workspace_state_file};
pub use workspace::{ResolvedPath, Workspace};
