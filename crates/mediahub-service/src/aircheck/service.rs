//! Aircheck track configuration, stored as JSON in the `description` of a
//! dedicated record-store row.

use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value, json};
use tracing::{info, instrument, warn};

use mediahub_core::config::AdminConfig;
use mediahub_core::error::AppError;
use mediahub_core::result::AppResult;
use mediahub_core::traits::RecordStore;
use mediahub_core::types::RecordId;
use mediahub_entity::track::{TracksSource, default_tracks};

/// Tracks served to the player.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackListing {
    pub tracks: Vec<Value>,
    pub source: TracksSource,
    /// Why the defaults were served, when reading the record failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Reads and writes the aircheck track list.
#[derive(Debug, Clone)]
pub struct TrackService {
    records: Arc<dyn RecordStore>,
    admin: AdminConfig,
}

impl TrackService {
    /// Creates a new track service.
    pub fn new(records: Arc<dyn RecordStore>, admin: AdminConfig) -> Self {
        Self { records, admin }
    }

    fn record_id(&self) -> RecordId {
        RecordId::Number(self.admin.aircheck_record_id as i64)
    }

    /// Check the shared secret. With no configured password every write is
    /// rejected.
    pub fn authorize(&self, supplied: Option<&str>) -> AppResult<()> {
        match (self.admin.password.as_deref(), supplied) {
            (Some(expected), Some(given)) if !expected.is_empty() && expected == given => Ok(()),
            _ => Err(AppError::unauthorized(
                "Unauthorized - Invalid admin password",
            )),
        }
    }

    /// The stored track list, or the defaults when it cannot be read.
    #[instrument(skip(self))]
    pub async fn get(&self) -> TrackListing {
        match self.load().await {
            Ok(Some(tracks)) => TrackListing {
                tracks,
                source: TracksSource::Database,
                error: None,
            },
            Ok(None) => {
                info!("No stored track configuration, serving defaults");
                Self::defaults(None)
            }
            Err(e) => {
                warn!(error = %e, "Reading track configuration failed, serving defaults");
                Self::defaults(Some(e.message))
            }
        }
    }

    /// Replace the stored track list. The caller must have passed
    /// [`authorize`](Self::authorize).
    #[instrument(skip(self, tracks))]
    pub async fn save(&self, tracks: Option<Value>) -> AppResult<Vec<Value>> {
        let tracks = match tracks {
            Some(Value::Array(tracks)) => tracks,
            _ => {
                return Err(AppError::validation(
                    "Invalid tracks data - must be an array",
                ));
            }
        };
        self.records.ensure_configured()?;

        let description = serde_json::to_string(&json!({ "tracks": tracks }))?;
        let mut fields = Map::new();
        fields.insert("description".to_string(), Value::String(description));

        self.records
            .update_record(&self.record_id(), &fields)
            .await
            .map_err(|e| e.context("Failed to save tracks to database"))?;

        info!(count = tracks.len(), "Track configuration saved");
        Ok(tracks)
    }

    async fn load(&self) -> AppResult<Option<Vec<Value>>> {
        let Some(record) = self.records.get_record(&self.record_id()).await? else {
            return Ok(None);
        };
        let Some(description) = record.get("description").and_then(Value::as_str) else {
            return Ok(None);
        };
        let parsed: Value = serde_json::from_str(description)?;
        Ok(parsed
            .get("tracks")
            .and_then(Value::as_array)
            .cloned())
    }

    fn defaults(error: Option<String>) -> TrackListing {
        TrackListing {
            tracks: default_tracks()
                .into_iter()
                .map(|t| json!({ "label": t.label, "url": t.url }))
                .collect(),
            source: TracksSource::Defaults,
            error,
        }
    }
}
