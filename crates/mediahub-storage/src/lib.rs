//! # mediahub-storage
//!
//! Implementations of the upstream store traits from `mediahub-core`:
//! HTTPS clients for the Xano record store, the Cloudinary object store
//! and the Webflow CMS mirror, plus in-memory stores for development and
//! tests.

pub mod manager;
pub mod providers;

pub use manager::Stores;
