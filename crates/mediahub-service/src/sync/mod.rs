//! CMS mirror synchronization.

pub mod fields;
pub mod service;

pub use service::{
    DeleteResult, FullSyncReport, MirrorSyncService, SyncFailure, SyncOutcome, SyncRequest,
    UpsertResult,
};
