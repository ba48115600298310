//! Daily intention reads.
//!
//! An intention is an existence flag per (user, day), written by the
//! intention CRUD collaborator when the user checks in.

use std::collections::HashSet;

use chrono::NaiveDate;
use sqlx::SqlitePool;
use uuid::Uuid;

use habitd_common::Result;

/// Days in `[start, end]` on which `user` recorded a daily intention.
pub async fn dates_in_range(
    pool: &SqlitePool,
    user: Uuid,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<HashSet<NaiveDate>> {
    let rows: Vec<(NaiveDate,)> = sqlx::query_as(
        "SELECT intention_on FROM daily_intentions
         WHERE user_id = ? AND intention_on BETWEEN ? AND ?",
    )
    .bind(user.to_string())
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|(date,)| date).collect())
}
