//! File records, normalization adapters, and object-store URL transforms.

pub mod model;
pub mod normalize;
pub mod transform;

pub use model::FileRecord;
pub use transform::MediaKind;
