//! # mediahub-entity
//!
//! Canonical shapes shared by the server and the client service layer:
//! [`file::FileRecord`], [`folder::FolderRecord`], batch requests/results,
//! and the aircheck track configuration. The per-source adapters in
//! [`file::normalize`] are the only place that knows about upstream
//! field-name aliases.

pub mod batch;
pub mod file;
pub mod folder;
pub mod track;
