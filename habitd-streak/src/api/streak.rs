//! Streak endpoints.
//!
//! The caller's identity arrives in the `X-User-Id` header, injected by
//! the fronting auth layer (out of scope here). The `date` query
//! parameter is optional and defaults to the server-local today; a
//! malformed date or user id is rejected before any computation runs.

use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use habitd_common::{time, Error};

use crate::engine::{self, StreakReport};
use crate::error::ApiError;
use crate::validator::DayValidation;
use crate::AppState;

/// Shared query shape for all streak endpoints.
#[derive(Debug, Deserialize)]
pub struct DateQuery {
    /// `YYYY-MM-DD`; defaults to today when absent
    pub date: Option<String>,
}

/// GET /streak
///
/// Computes the current streak as of the given date, persists the record,
/// and returns the full report including flame tiers.
pub async fn get_streak(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<DateQuery>,
) -> Result<Json<StreakReport>, ApiError> {
    let user = user_id(&headers)?;
    let date = resolve_date(&query)?;
    let report = engine::compute_streak(&state.db, &state.rules, user, date).await?;
    Ok(Json(report))
}

/// POST /streak/recalculate
///
/// Same walk as `GET /streak` — there is no cross-request cache to bust
/// yet, so "recalculate" and "read" do identical work. Kept as a separate
/// verb so clients have a stable mutation endpoint if caching lands.
pub async fn recalculate_streak(
    state: State<AppState>,
    headers: HeaderMap,
    query: Query<DateQuery>,
) -> Result<Json<StreakReport>, ApiError> {
    get_streak(state, headers, query).await
}

/// GET /streak/day
///
/// Validation detail for one date: counts, rates, and the validity flag.
/// Does not touch the persisted streak record.
pub async fn get_streak_day(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<DateQuery>,
) -> Result<Json<DayValidation>, ApiError> {
    let user = user_id(&headers)?;
    let date = resolve_date(&query)?;
    Ok(Json(
        engine::validate_day(&state.db, &state.rules, user, date).await,
    ))
}

fn resolve_date(query: &DateQuery) -> Result<NaiveDate, ApiError> {
    match &query.date {
        Some(raw) => Ok(time::parse_date(raw)?),
        None => Ok(time::today()),
    }
}

fn user_id(headers: &HeaderMap) -> Result<Uuid, ApiError> {
    let raw = headers
        .get("x-user-id")
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| Error::InvalidInput("missing X-User-Id header".to_string()))?;
    let user = Uuid::parse_str(raw)
        .map_err(|_| Error::InvalidInput(format!("X-User-Id '{raw}' is not a uuid")))?;
    Ok(user)
}
