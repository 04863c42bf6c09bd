//! Store provider implementations.

mod http;

pub mod cloudinary;
pub mod memory;
pub mod webflow;
pub mod xano;

pub use cloudinary::CloudinaryObjectStore;
pub use memory::{MemoryCmsMirror, MemoryObjectStore, MemoryRecordStore};
pub use webflow::WebflowMirror;
pub use xano::XanoRecordStore;
