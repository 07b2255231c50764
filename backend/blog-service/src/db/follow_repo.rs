use crate::models::Follow;
use sqlx::PgPool;
use uuid::Uuid;

const FOLLOW_SELECT: &str = r#"
    SELECT f.id, f.user_id, fu.username AS user_username,
           f.following_id, tu.username AS following_username
    FROM follows f
    JOIN users fu ON fu.id = f.user_id
    JOIN users tu ON tu.id = f.following_id
"#;

/// Escape LIKE wildcards so `search` matches literally
fn like_pattern(search: &str) -> String {
    let escaped = search
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

/// List the subscriptions of `user_id`, optionally filtered by a
/// case-insensitive substring of the followed username
pub async fn list_follows(
    pool: &PgPool,
    user_id: Uuid,
    search: Option<&str>,
) -> Result<Vec<Follow>, sqlx::Error> {
    let query = format!(
        "{FOLLOW_SELECT} WHERE f.user_id = $1 AND ($2::TEXT IS NULL OR tu.username ILIKE $2) ORDER BY f.id"
    );

    sqlx::query_as::<_, Follow>(&query)
        .bind(user_id)
        .bind(search.map(like_pattern))
        .fetch_all(pool)
        .await
}

/// List everyone subscribed to `following_id`
pub async fn list_followers(pool: &PgPool, following_id: Uuid) -> Result<Vec<Follow>, sqlx::Error> {
    let query = format!("{FOLLOW_SELECT} WHERE f.following_id = $1 ORDER BY f.id");

    sqlx::query_as::<_, Follow>(&query)
        .bind(following_id)
        .fetch_all(pool)
        .await
}

/// Check whether `user_id` already follows `following_id`
pub async fn follow_exists(
    pool: &PgPool,
    user_id: Uuid,
    following_id: Uuid,
) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM follows WHERE user_id = $1 AND following_id = $2)",
    )
    .bind(user_id)
    .bind(following_id)
    .fetch_one(pool)
    .await
}

/// Create a subscription.
///
/// `unique_follow` and `prevent_self_follow` reject duplicates and
/// self-subscriptions even when concurrent requests race past validation.
pub async fn create_follow(
    pool: &PgPool,
    user_id: Uuid,
    following_id: Uuid,
) -> Result<Follow, sqlx::Error> {
    sqlx::query_as::<_, Follow>(
        r#"
        WITH f AS (
            INSERT INTO follows (user_id, following_id)
            VALUES ($1, $2)
            RETURNING id, user_id, following_id
        )
        SELECT f.id, f.user_id, fu.username AS user_username,
               f.following_id, tu.username AS following_username
        FROM f
        JOIN users fu ON fu.id = f.user_id
        JOIN users tu ON tu.id = f.following_id
        "#,
    )
    .bind(user_id)
    .bind(following_id)
    .fetch_one(pool)
    .await
}

/// Remove a subscription
pub async fn delete_follow(
    pool: &PgPool,
    user_id: Uuid,
    following_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM follows WHERE user_id = $1 AND following_id = $2")
        .bind(user_id)
        .bind(following_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
