//! # mediahub-api
//!
//! HTTP API layer for MediaHub built on Axum.
//!
//! Provides the batch, folder, media, mirror-sync and aircheck endpoints,
//! middleware (CORS, request logging, admin secret), extractors, DTOs, and
//! error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_app;
pub use state::AppState;
