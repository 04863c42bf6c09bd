//! Batch request and result shapes.

pub mod model;

pub use model::{
    BatchItemResult, BatchMoveOutcome, BatchUpdate, DeleteOutcome, MAX_MOVE_BATCH,
};
