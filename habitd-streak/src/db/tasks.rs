//! Task count reads.
//!
//! Tasks are owned by the task CRUD collaborator; the engine only needs
//! per-day totals, so they are aggregated in SQL over the whole range.

use std::collections::HashMap;

use chrono::NaiveDate;
use sqlx::SqlitePool;
use uuid::Uuid;

use habitd_common::Result;

/// Scheduled/completed task counts for a single day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskDayCount {
    pub total: u32,
    pub completed: u32,
}

/// Task counts for `user`, grouped by day, for `start <= scheduled_on <= end`.
///
/// Days with no tasks simply have no entry.
pub async fn counts_in_range(
    pool: &SqlitePool,
    user: Uuid,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<HashMap<NaiveDate, TaskDayCount>> {
    let rows: Vec<(NaiveDate, i64, i64)> = sqlx::query_as(
        "SELECT scheduled_on,
                COUNT(*),
                SUM(CASE WHEN status = 'completed' THEN 1 ELSE 0 END)
         FROM tasks
         WHERE user_id = ? AND scheduled_on BETWEEN ? AND ?
         GROUP BY scheduled_on",
    )
    .bind(user.to_string())
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(date, total, completed)| {
            (
                date,
                TaskDayCount {
                    total: total as u32,
                    completed: completed as u32,
                },
            )
        })
        .collect())
}
