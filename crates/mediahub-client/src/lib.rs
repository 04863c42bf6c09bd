//! # mediahub-client
//!
//! Client service layer for MediaHub: typed wrappers over the HTTP API
//! ([`MediaClient`], [`FolderClient`]), the object store's unsigned upload
//! ([`ObjectStoreClient`]) and the CMS mirror ([`CmsMirrorClient`]), plus
//! [`LocalView`], the in-memory file/folder state a UI keeps in step with
//! batch results.
//!
//! Every wrapper hands out canonical [`FileRecord`](mediahub_entity::file::FileRecord)s;
//! raw upstream shapes never leave this crate.

pub mod api;
pub mod cms;
pub mod config;
pub mod folder;
pub mod media;
pub mod object_store;
pub mod view;

pub use api::ApiClient;
pub use cms::CmsMirrorClient;
pub use config::ClientConfig;
pub use folder::FolderClient;
pub use media::{BulkValidation, MediaClient};
pub use object_store::ObjectStoreClient;
pub use view::LocalView;
