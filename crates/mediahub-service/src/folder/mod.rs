//! Folder create, delete, and list.

pub mod service;

pub use service::{FolderService, FolderSource};
