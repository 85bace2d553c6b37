use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::models::{ActionKind, DeferredAction};

pub async fn create(
    pool: &PgPool,
    guild_id: i64,
    subject_id: i64,
    kind: ActionKind,
    expires_at: DateTime<Utc>,
    reason: Option<&str>,
) -> Result<DeferredAction, sqlx::Error> {
    sqlx::query_as::<_, DeferredAction>(
        r#"
        INSERT INTO deferred_actions (guild_id, subject_id, kind, expires_at, reason)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(guild_id)
    .bind(subject_id)
    .bind(kind.as_str())
    .bind(expires_at)
    .bind(reason)
    .fetch_one(pool)
    .await
}

/// Delete a single action by id. Deleting an id that is already gone is fine;
/// a concurrent expiry or manual cancel may have beaten us to it.
pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM deferred_actions WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Delete every pending action for a subject, returning the ids removed so
/// the caller can also cancel any in-memory timers armed for them.
pub async fn delete_for_subject(
    pool: &PgPool,
    guild_id: i64,
    subject_id: i64,
    kind: ActionKind,
) -> Result<Vec<Uuid>, sqlx::Error> {
    let rows: Vec<(Uuid,)> = sqlx::query_as(
        r#"
        DELETE FROM deferred_actions
        WHERE guild_id = $1 AND subject_id = $2 AND kind = $3
        RETURNING id
        "#,
    )
    .bind(guild_id)
    .bind(subject_id)
    .bind(kind.as_str())
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|(id,)| id).collect())
}

/// All actions for a guild due at or before `cutoff`, most urgent first.
pub async fn expiring_before(
    pool: &PgPool,
    guild_id: i64,
    cutoff: DateTime<Utc>,
) -> Result<Vec<DeferredAction>, sqlx::Error> {
    sqlx::query_as::<_, DeferredAction>(
        r#"
        SELECT * FROM deferred_actions
        WHERE guild_id = $1 AND expires_at <= $2
        ORDER BY expires_at ASC
        "#,
    )
    .bind(guild_id)
    .bind(cutoff)
    .fetch_all(pool)
    .await
}

/// Guilds that have at least one action due at or before `cutoff`.
pub async fn guilds_with_pending(
    pool: &PgPool,
    cutoff: DateTime<Utc>,
) -> Result<Vec<i64>, sqlx::Error> {
    let rows: Vec<(i64,)> = sqlx::query_as(
        r#"
        SELECT DISTINCT guild_id FROM deferred_actions
        WHERE expires_at <= $1
        "#,
    )
    .bind(cutoff)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|(id,)| id).collect())
}
