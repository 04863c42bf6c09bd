//! Shared domain types.

pub mod id;
pub mod pagination;

pub use id::RecordId;
pub use pagination::{PageRequest, PageResponse};
