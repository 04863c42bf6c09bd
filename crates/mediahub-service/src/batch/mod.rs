//! Batch delete, update, and move-to-folder.

pub mod service;
pub mod validate;

pub use service::{BatchDeleteRequest, BatchService, BatchUpdateRequest};
pub use validate::{BatchMoveRequest, MoveTarget};
