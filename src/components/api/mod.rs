//! REST access to the EventSphere backend.

pub mod client;
pub mod payload;
pub mod resource;

pub use client::{error_message, ApiClient};
pub use payload::extract_records;
pub use resource::{Resource, ResourceLocator};
