//! Media listing, search, upload, update, and delete.

pub mod search;
pub mod service;
pub mod upload;

pub use search::MediaQuery;
pub use service::{HealthStatus, MediaListing, MediaService};
pub use upload::UploadMetadata;
