//! Persistence layer
//!
//! JSON file storage for player settings.

pub mod settings;

pub use settings::{Settings, NOT_CONFIGURED_MESSAGE};
