//! Data model shared by every component.

pub mod models;

pub use models::*;
