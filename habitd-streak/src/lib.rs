//! habitd-streak — the Streak & Day-Validation Engine.
//!
//! Decides, per user and calendar date, whether that day counts toward a
//! consecutive-day streak, walks backward through history for the current
//! streak length, maps it to a flame tier, and persists the record that
//! the leaderboard subsystem reads.

use axum::routing::{get, post};
use axum::Router;
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod config;
pub mod db;
pub mod engine;
pub mod error;
pub mod facts;
pub mod flame;
pub mod frequency;
pub mod streak;
pub mod validator;

use validator::RuleSet;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// The configured day-validity rule set
    pub rules: RuleSet,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool, rules: RuleSet) -> Self {
        Self { db, rules }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/streak", get(api::streak::get_streak))
        .route("/streak/day", get(api::streak::get_streak_day))
        .route("/streak/recalculate", post(api::streak::recalculate_streak))
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
