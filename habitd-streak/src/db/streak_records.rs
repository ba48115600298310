//! Persisted streak records.
//!
//! One row per user, read by the leaderboard subsystem and by
//! notifications. The engine is the only writer. The upsert is a single
//! statement with `MAX()` on the longest column, so two concurrent
//! recomputations can race on `current_streak` (last write wins, readers
//! must tolerate staleness) but can never shrink `longest_streak`.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use habitd_common::Result;

/// A user's persisted streak state.
#[derive(Debug, Clone)]
pub struct StreakRecord {
    pub current_streak: u32,
    pub longest_streak: u32,
    pub updated_at: DateTime<Utc>,
}

/// Read the record for `user`, if one was ever computed.
pub async fn get(pool: &SqlitePool, user: Uuid) -> Result<Option<StreakRecord>> {
    let row: Option<(i64, i64, DateTime<Utc>)> = sqlx::query_as(
        "SELECT current_streak, longest_streak, updated_at
         FROM streak_records WHERE user_id = ?",
    )
    .bind(user.to_string())
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|(current, longest, updated_at)| StreakRecord {
        current_streak: current.max(0) as u32,
        longest_streak: longest.max(0) as u32,
        updated_at,
    }))
}

/// Write the record for `user`, keeping `longest_streak` monotone.
///
/// Idempotent, last-write-wins for `current_streak`. The `MAX()` in the
/// conflict clause is the compare-and-set that preserves "longest never
/// decreases" without a read-then-write window.
pub async fn upsert(pool: &SqlitePool, user: Uuid, current: u32, longest: u32) -> Result<()> {
    sqlx::query(
        "INSERT INTO streak_records (user_id, current_streak, longest_streak, updated_at)
         VALUES (?, ?, ?, ?)
         ON CONFLICT (user_id) DO UPDATE SET
             current_streak = excluded.current_streak,
             longest_streak = MAX(longest_streak, excluded.longest_streak),
             updated_at = excluded.updated_at",
    )
    .bind(user.to_string())
    .bind(i64::from(current))
    .bind(i64::from(longest))
    .bind(Utc::now())
    .execute(pool)
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    async fn pool() -> SqlitePool {
        let pool = db::connect_memory().await.unwrap();
        db::init_schema(&pool).await.unwrap();
        pool
    }

    #[tokio::test]
    async fn absent_user_reads_as_none() {
        let pool = pool().await;
        assert!(get(&pool, Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn upsert_then_get_round_trips() {
        let pool = pool().await;
        let user = Uuid::new_v4();

        upsert(&pool, user, 5, 5).await.unwrap();
        let record = get(&pool, user).await.unwrap().unwrap();
        assert_eq!(record.current_streak, 5);
        assert_eq!(record.longest_streak, 5);
    }

    #[tokio::test]
    async fn longest_never_decreases() {
        let pool = pool().await;
        let user = Uuid::new_v4();

        upsert(&pool, user, 12, 12).await.unwrap();
        // Chain broke: current drops to 0, caller passes a stale longest
        upsert(&pool, user, 0, 0).await.unwrap();

        let record = get(&pool, user).await.unwrap().unwrap();
        assert_eq!(record.current_streak, 0);
        assert_eq!(record.longest_streak, 12, "MAX() must keep the old longest");

        // Recovery past the old record
        upsert(&pool, user, 15, 15).await.unwrap();
        let record = get(&pool, user).await.unwrap().unwrap();
        assert_eq!(record.longest_streak, 15);
    }
}
