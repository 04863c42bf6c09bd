//! # mediahub-service
//!
//! The batch reconciliation layer. Each service validates its input,
//! fans out to the upstream stores, and folds the outcomes into a single
//! result. Services hold `Arc` handles to the stores and are cheap to
//! clone.

pub mod aircheck;
pub mod batch;
pub mod folder;
pub mod media;
pub mod sync;

pub use aircheck::TrackService;
pub use batch::BatchService;
pub use folder::FolderService;
pub use media::MediaService;
pub use sync::MirrorSyncService;
