//! Custom Axum extractors. Rejections surface as the usual JSON error body.

pub mod body;
pub mod query;

pub use body::JsonBody;
pub use query::QueryParams;
