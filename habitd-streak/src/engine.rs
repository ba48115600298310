//! End-to-end streak computation: fact window, backward walk, flame
//! mapping, record persistence.
//!
//! One request is one fully sequential computation. The fact window is
//! loaded with bounded range queries, the walk is a pure in-memory fold,
//! and the only write is the monotonic record upsert at the end. A client
//! disconnect drops the future between awaits, so an abandoned request
//! never persists a partial result.

use chrono::{Days, NaiveDate};
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::{debug, error};
use uuid::Uuid;

use habitd_common::{Error, Result};

use crate::db;
use crate::facts::FactWindow;
use crate::flame::{self, FlameLevel};
use crate::streak::{self, StreakOutcome};
use crate::validator::{self, DayValidation, RuleSet};

/// Full streak report for one user as of a reference date.
///
/// This is the response body of `GET /streak` and
/// `POST /streak/recalculate`.
#[derive(Debug, Clone, Serialize)]
pub struct StreakReport {
    pub current_streak: u32,
    pub longest_streak: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_valid_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub streak_start: Option<NaiveDate>,
    pub today_validation: DayValidation,
    pub flame_levels: Vec<FlameLevel>,
    pub current_flame_level: u8,
}

/// Recompute the streak for `user` as of `reference` and persist it.
///
/// The record upsert is best-effort: a persistence failure is logged for
/// alerting but the computed report is still returned to the caller.
pub async fn compute_streak(
    pool: &SqlitePool,
    rules: &RuleSet,
    user: Uuid,
    reference: NaiveDate,
) -> Result<StreakReport> {
    let window = load_window(pool, user, reference).await?;
    let outcome = streak::walk(reference, |date| {
        validator::validate(&window.facts_for(date), rules)
    });
    debug!(
        user = %user,
        %reference,
        current_streak = outcome.current_streak,
        "streak walk complete"
    );

    let longest = persist(pool, user, &outcome).await?;

    Ok(StreakReport {
        current_streak: outcome.current_streak,
        longest_streak: longest,
        last_valid_date: outcome.last_valid_date,
        streak_start: outcome.streak_start,
        today_validation: outcome.reference_day,
        flame_levels: flame::flame_levels(outcome.current_streak),
        current_flame_level: flame::current_level(outcome.current_streak),
    })
}

/// Validate a single day without touching the streak record.
///
/// Backs `GET /streak/day`.
pub async fn validate_day(
    pool: &SqlitePool,
    rules: &RuleSet,
    user: Uuid,
    date: NaiveDate,
) -> DayValidation {
    let window = FactWindow::load(pool, user, date, date).await;
    validator::validate(&window.facts_for(date), rules)
}

async fn load_window(pool: &SqlitePool, user: Uuid, reference: NaiveDate) -> Result<FactWindow> {
    let start = reference
        .checked_sub_days(Days::new(streak::LOOKBACK_DAYS))
        .ok_or_else(|| {
            Error::InvalidInput(format!("reference date {reference} is out of range"))
        })?;
    Ok(FactWindow::load(pool, user, start, reference).await)
}

/// Merge with the stored record and upsert. Returns the longest streak to
/// report. The record read still goes through `?` (a broken store is a
/// server error, not a degradable fact), but the upsert itself never fails
/// the request.
async fn persist(pool: &SqlitePool, user: Uuid, outcome: &StreakOutcome) -> Result<u32> {
    let stored_longest = db::streak_records::get(pool, user)
        .await?
        .map(|record| record.longest_streak)
        .unwrap_or(0);
    let longest = outcome.current_streak.max(stored_longest);

    if let Err(e) = db::streak_records::upsert(pool, user, outcome.current_streak, longest).await {
        error!(user = %user, error = %e, "failed to persist streak record");
    }

    Ok(longest)
}
