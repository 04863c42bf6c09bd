//! Track model stored as JSON inside a record-store row.

use serde::{Deserialize, Serialize};

/// One playable track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackConfig {
    /// Display label.
    pub label: String,
    /// Audio URL.
    pub url: String,
}

/// Where a served track list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TracksSource {
    /// Parsed from the configuration record.
    Database,
    /// Built-in fallback list.
    Defaults,
}

/// Fallback list served when the configuration record is unusable.
pub fn default_tracks() -> Vec<TrackConfig> {
    (1..=6)
        .map(|n| TrackConfig {
            label: format!("Track {n}"),
            url: format!("https://www.soundhelix.com/examples/mp3/SoundHelix-Song-{n}.mp3"),
        })
        .collect()
}
