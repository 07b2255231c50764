use crate::models::Comment;
use sqlx::PgPool;
use uuid::Uuid;

/// List a post's comments, oldest first
pub async fn list_comments(pool: &PgPool, post_id: i64) -> Result<Vec<Comment>, sqlx::Error> {
    sqlx::query_as::<_, Comment>(
        r#"
        SELECT c.id, c.text, c.author_id, u.username AS author_username, c.post_id, c.created
        FROM comments c
        JOIN users u ON u.id = c.author_id
        WHERE c.post_id = $1
        ORDER BY c.created, c.id
        "#,
    )
    .bind(post_id)
    .fetch_all(pool)
    .await
}

/// Get a comment by id, scoped to its parent post
pub async fn get_comment(
    pool: &PgPool,
    post_id: i64,
    comment_id: i64,
) -> Result<Option<Comment>, sqlx::Error> {
    sqlx::query_as::<_, Comment>(
        r#"
        SELECT c.id, c.text, c.author_id, u.username AS author_username, c.post_id, c.created
        FROM comments c
        JOIN users u ON u.id = c.author_id
        WHERE c.post_id = $1 AND c.id = $2
        "#,
    )
    .bind(post_id)
    .bind(comment_id)
    .fetch_optional(pool)
    .await
}

/// Create a comment on a post
pub async fn create_comment(
    pool: &PgPool,
    post_id: i64,
    author_id: Uuid,
    text: &str,
) -> Result<Comment, sqlx::Error> {
    sqlx::query_as::<_, Comment>(
        r#"
        WITH c AS (
            INSERT INTO comments (post_id, author_id, text)
            VALUES ($1, $2, $3)
            RETURNING id, text, author_id, post_id, created
        )
        SELECT c.id, c.text, c.author_id, u.username AS author_username, c.post_id, c.created
        FROM c
        JOIN users u ON u.id = c.author_id
        "#,
    )
    .bind(post_id)
    .bind(author_id)
    .bind(text)
    .fetch_one(pool)
    .await
}

/// Update comment text; `None` keeps the stored value
pub async fn update_comment(
    pool: &PgPool,
    comment_id: i64,
    text: Option<&str>,
) -> Result<Option<Comment>, sqlx::Error> {
    sqlx::query_as::<_, Comment>(
        r#"
        WITH c AS (
            UPDATE comments
            SET text = COALESCE($2, text)
            WHERE id = $1
            RETURNING id, text, author_id, post_id, created
        )
        SELECT c.id, c.text, c.author_id, u.username AS author_username, c.post_id, c.created
        FROM c
        JOIN users u ON u.id = c.author_id
        "#,
    )
    .bind(comment_id)
    .bind(text)
    .fetch_optional(pool)
    .await
}

/// Delete a comment
pub async fn delete_comment(pool: &PgPool, comment_id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM comments WHERE id = $1")
        .bind(comment_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
