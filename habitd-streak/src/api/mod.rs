//! HTTP surface of the streak engine.

pub mod health;
pub mod streak;

pub use health::health_routes;
