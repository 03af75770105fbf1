//! Pieces shared by every binary and library in the workspace.

pub mod types;
pub mod utils;
