//! Seams between the reconciliation layer and the three upstream stores.
//!
//! The traits are defined here and implemented in `mediahub-storage`, once
//! over HTTPS and once in memory.

pub mod cms_mirror;
pub mod object_store;
pub mod record_store;

pub use cms_mirror::CmsMirror;
pub use object_store::{ObjectFolder, ObjectStore};
pub use record_store::RecordStore;
