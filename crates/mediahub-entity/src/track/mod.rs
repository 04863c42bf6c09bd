//! Aircheck player track configuration.

pub mod model;

pub use model::{TrackConfig, TracksSource, default_tracks};
