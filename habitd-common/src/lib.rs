//! Shared types for the habitd services.

pub mod error;
pub mod time;

pub use error::{Error, Result};
