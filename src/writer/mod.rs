//! Artifacts written after a successful run.
pub mod vars;
