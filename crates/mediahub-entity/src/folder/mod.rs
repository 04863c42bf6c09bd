//! Folder records, name sanitizing, and tree building.

pub mod model;
pub mod tree;

pub use model::{FolderRecord, compose_path, sanitize_name};
pub use tree::FolderNode;
