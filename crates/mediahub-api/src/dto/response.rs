//! Response DTOs.

use serde::Serialize;
use serde_json::Value;

use mediahub_entity::folder::FolderRecord;

/// `{success, results}` wrapper of the batch delete and update endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct BatchResults<T: Serialize> {
    pub success: bool,
    pub results: Vec<T>,
}

impl<T: Serialize> BatchResults<T> {
    /// A successful batch.
    pub fn ok(results: Vec<T>) -> Self {
        Self {
            success: true,
            results,
        }
    }
}

/// Body of a 201 from folder create.
#[derive(Debug, Clone, Serialize)]
pub struct FolderCreated {
    pub success: bool,
    pub folder: FolderRecord,
}

/// Body of a successful folder delete.
#[derive(Debug, Clone, Serialize)]
pub struct FolderDeleted {
    pub success: bool,
    pub message: String,
    pub path: String,
}

/// Body of a successful upload.
#[derive(Debug, Clone, Serialize)]
pub struct UploadAccepted {
    pub success: bool,
    pub record: Value,
}

/// Body of a successful track list write.
#[derive(Debug, Clone, Serialize)]
pub struct TracksSaved {
    pub success: bool,
    pub message: String,
    pub tracks: Vec<Value>,
}

/// Bare `{success}` acknowledgement.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Ack {
    pub success: bool,
}
