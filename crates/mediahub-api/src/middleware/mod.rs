//! Axum middleware stack.

pub mod admin;
pub mod cors;
pub mod logging;
