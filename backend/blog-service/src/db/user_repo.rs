use crate::models::User;
use sqlx::PgPool;
use uuid::Uuid;

/// Insert the user, or refresh the username if the id is already known.
///
/// Usernames belong to whoever presents them last: a stale local row still
/// holding `username` under another id is renamed to `user-<id>` first.
pub async fn upsert_user(pool: &PgPool, user_id: Uuid, username: &str) -> Result<User, sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        UPDATE users
        SET username = 'user-' || id::text,
            updated_at = NOW()
        WHERE username = $1 AND id <> $2
        "#,
    )
    .bind(username)
    .bind(user_id)
    .execute(&mut *tx)
    .await?;

    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, username)
        VALUES ($1, $2)
        ON CONFLICT (id) DO UPDATE
            SET username = EXCLUDED.username,
                updated_at = NOW()
        RETURNING id, username, created_at, updated_at
        "#,
    )
    .bind(user_id)
    .bind(username)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(user)
}

/// Find a user by exact username
pub async fn find_by_username(pool: &PgPool, username: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "SELECT id, username, created_at, updated_at FROM users WHERE username = $1",
    )
    .bind(username)
    .fetch_optional(pool)
    .await
}

/// Delete a user; posts, comments and follows cascade
pub async fn delete_user(pool: &PgPool, user_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
