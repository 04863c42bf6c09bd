//! Aircheck player track configuration.

pub mod service;

pub use service::{TrackListing, TrackService};
