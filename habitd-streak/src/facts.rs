//! Activity fact collection.
//!
//! One [`FactWindow`] covers the whole lookback range with four range
//! queries up front; the backward walk then derives per-day facts purely
//! in memory and never touches the database.
//!
//! Each query's failure is degraded independently to that fact's neutral
//! default (no routines, no completions, no tasks, no intentions) with a
//! warning log. The engine prefers a best-effort streak over a failed
//! request; only structurally invalid input fails a request.

use std::collections::{HashMap, HashSet};

use chrono::{Datelike, NaiveDate};
use sqlx::SqlitePool;
use tracing::warn;
use uuid::Uuid;

use habitd_common::Result;

use crate::db;
use crate::db::tasks::TaskDayCount;
use crate::frequency::Frequency;

/// Raw facts for one user-day, input to the day validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayFacts {
    pub date: NaiveDate,
    pub has_intention: bool,
    /// Routines whose frequency applies to this date's weekday
    pub routines_due: u32,
    /// Due routines with a completion mark on this exact date
    pub routines_completed: u32,
    pub tasks_total: u32,
    pub tasks_completed: u32,
}

/// All facts for one user over a date range, loaded in one pass.
pub struct FactWindow {
    routines: Vec<(Uuid, Frequency)>,
    completions: HashSet<(Uuid, NaiveDate)>,
    tasks: HashMap<NaiveDate, TaskDayCount>,
    intentions: HashSet<NaiveDate>,
}

impl FactWindow {
    /// Fetch every fact for `user` in `[start, end]` (both inclusive).
    pub async fn load(pool: &SqlitePool, user: Uuid, start: NaiveDate, end: NaiveDate) -> Self {
        let routines = degrade(
            "routines",
            db::routines::list_for_user(pool, user).await,
        );
        let completions = degrade(
            "routine_completions",
            db::routines::completions_in_range(pool, user, start, end).await,
        );
        let tasks = degrade(
            "task_counts",
            db::tasks::counts_in_range(pool, user, start, end).await,
        );
        let intentions = degrade(
            "daily_intentions",
            db::intentions::dates_in_range(pool, user, start, end).await,
        );

        Self {
            routines: routines
                .into_iter()
                .map(|r| (r.id, Frequency::parse(&r.frequency)))
                .collect(),
            completions,
            tasks,
            intentions,
        }
    }

    /// Derive the facts for one date. Pure; any date is answerable, dates
    /// outside the loaded range just come back empty.
    pub fn facts_for(&self, date: NaiveDate) -> DayFacts {
        let weekday = date.weekday();

        let mut routines_due = 0;
        let mut routines_completed = 0;
        for &(id, frequency) in &self.routines {
            if frequency.applies_on(weekday) {
                routines_due += 1;
                if self.completions.contains(&(id, date)) {
                    routines_completed += 1;
                }
            }
        }

        let tasks = self.tasks.get(&date).copied().unwrap_or_default();

        DayFacts {
            date,
            has_intention: self.intentions.contains(&date),
            routines_due,
            routines_completed,
            tasks_total: tasks.total,
            tasks_completed: tasks.completed,
        }
    }
}

/// Degrade a failed fact query to its neutral default and keep going.
fn degrade<T: Default>(fact: &str, result: Result<T>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            warn!(fact, error = %e, "fact query failed; degrading to default");
            T::default()
        }
    }
}
