//! Routine reads: definitions plus completion marks.
//!
//! Owned by the routine CRUD collaborator; this engine only reads. The
//! completion set is fetched for a whole date range at once so the streak
//! walk never issues per-day queries.

use std::collections::HashSet;

use chrono::NaiveDate;
use sqlx::SqlitePool;
use uuid::Uuid;

use habitd_common::{Error, Result};

/// A routine as the engine sees it: identity plus recurrence descriptor.
#[derive(Debug, Clone)]
pub struct RoutineRow {
    pub id: Uuid,
    pub frequency: String,
}

/// All routines belonging to `user`.
pub async fn list_for_user(pool: &SqlitePool, user: Uuid) -> Result<Vec<RoutineRow>> {
    let rows: Vec<(String, String)> =
        sqlx::query_as("SELECT id, frequency FROM routines WHERE user_id = ?")
            .bind(user.to_string())
            .fetch_all(pool)
            .await?;

    rows.into_iter()
        .map(|(id, frequency)| {
            let id = Uuid::parse_str(&id)
                .map_err(|e| Error::Internal(format!("routine id '{id}' is not a uuid: {e}")))?;
            Ok(RoutineRow { id, frequency })
        })
        .collect()
}

/// Completion marks for `user` with `start <= completed_on <= end`.
///
/// Completions are idempotent upstream (one row per routine per day), so a
/// set of (routine, date) pairs is the whole story.
pub async fn completions_in_range(
    pool: &SqlitePool,
    user: Uuid,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<HashSet<(Uuid, NaiveDate)>> {
    let rows: Vec<(String, NaiveDate)> = sqlx::query_as(
        "SELECT routine_id, completed_on FROM routine_completions
         WHERE user_id = ? AND completed_on BETWEEN ? AND ?",
    )
    .bind(user.to_string())
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await?;

    rows.into_iter()
        .map(|(routine_id, date)| {
            let routine_id = Uuid::parse_str(&routine_id).map_err(|e| {
                Error::Internal(format!("routine id '{routine_id}' is not a uuid: {e}"))
            })?;
            Ok((routine_id, date))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    async fn seeded_pool(user: Uuid, routine: Uuid) -> SqlitePool {
        let pool = db::connect_memory().await.unwrap();
        db::init_schema(&pool).await.unwrap();

        sqlx::query("INSERT INTO routines (id, user_id, name, frequency) VALUES (?, ?, ?, ?)")
            .bind(routine.to_string())
            .bind(user.to_string())
            .bind("morning pages")
            .bind("weekdays")
            .execute(&pool)
            .await
            .unwrap();

        for d in [3, 4, 10] {
            sqlx::query(
                "INSERT INTO routine_completions (routine_id, user_id, completed_on) VALUES (?, ?, ?)",
            )
            .bind(routine.to_string())
            .bind(user.to_string())
            .bind(date(d))
            .execute(&pool)
            .await
            .unwrap();
        }
        pool
    }

    #[tokio::test]
    async fn lists_only_the_users_routines() {
        let user = Uuid::new_v4();
        let routine = Uuid::new_v4();
        let pool = seeded_pool(user, routine).await;

        let mine = list_for_user(&pool, user).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].id, routine);
        assert_eq!(mine[0].frequency, "weekdays");

        let theirs = list_for_user(&pool, Uuid::new_v4()).await.unwrap();
        assert!(theirs.is_empty());
    }

    #[tokio::test]
    async fn completion_range_is_inclusive_on_both_ends() {
        let user = Uuid::new_v4();
        let routine = Uuid::new_v4();
        let pool = seeded_pool(user, routine).await;

        let set = completions_in_range(&pool, user, date(3), date(4)).await.unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.contains(&(routine, date(3))));
        assert!(set.contains(&(routine, date(4))));
        assert!(!set.contains(&(routine, date(10))));
    }
}
