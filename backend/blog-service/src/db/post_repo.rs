use crate::models::Post;
use sqlx::PgPool;
use uuid::Uuid;

const POST_COLUMNS: &str = r#"
    p.id, p.text, p.pub_date, p.author_id, u.username AS author_username, p.image, p.group_id
"#;

/// Count posts, optionally restricted to one group
pub async fn count_posts(pool: &PgPool, group_id: Option<i64>) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM posts WHERE ($1::BIGINT IS NULL OR group_id = $1)",
    )
    .bind(group_id)
    .fetch_one(pool)
    .await
}

/// List posts in id order, optionally restricted to one group.
///
/// A `limit` of `None` returns every matching row from `offset`.
pub async fn list_posts(
    pool: &PgPool,
    group_id: Option<i64>,
    limit: Option<i64>,
    offset: i64,
) -> Result<Vec<Post>, sqlx::Error> {
    let query = format!(
        r#"
        SELECT {POST_COLUMNS}
        FROM posts p
        JOIN users u ON u.id = p.author_id
        WHERE ($1::BIGINT IS NULL OR p.group_id = $1)
        ORDER BY p.id
        LIMIT $2 OFFSET $3
        "#
    );

    sqlx::query_as::<_, Post>(&query)
        .bind(group_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
}

/// Get a post by id
pub async fn get_post(pool: &PgPool, post_id: i64) -> Result<Option<Post>, sqlx::Error> {
    let query = format!(
        r#"
        SELECT {POST_COLUMNS}
        FROM posts p
        JOIN users u ON u.id = p.author_id
        WHERE p.id = $1
        "#
    );

    sqlx::query_as::<_, Post>(&query)
        .bind(post_id)
        .fetch_optional(pool)
        .await
}

/// Check whether a post exists
pub async fn post_exists(pool: &PgPool, post_id: i64) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM posts WHERE id = $1)")
        .bind(post_id)
        .fetch_one(pool)
        .await
}

/// Create a post; `pub_date` is assigned by the database
pub async fn create_post(
    pool: &PgPool,
    author_id: Uuid,
    text: &str,
    image: Option<&str>,
    group_id: Option<i64>,
) -> Result<Post, sqlx::Error> {
    let query = format!(
        r#"
        WITH p AS (
            INSERT INTO posts (text, author_id, image, group_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, text, pub_date, author_id, image, group_id
        )
        SELECT {POST_COLUMNS}
        FROM p
        JOIN users u ON u.id = p.author_id
        "#
    );

    sqlx::query_as::<_, Post>(&query)
        .bind(text)
        .bind(author_id)
        .bind(image)
        .bind(group_id)
        .fetch_one(pool)
        .await
}

/// Update a post.
///
/// `text: None` keeps the stored text. For `image` and `group_id` the outer
/// `Option` says whether to touch the column; `Some(None)` clears it.
pub async fn update_post(
    pool: &PgPool,
    post_id: i64,
    text: Option<&str>,
    image: Option<Option<&str>>,
    group_id: Option<Option<i64>>,
) -> Result<Option<Post>, sqlx::Error> {
    let query = format!(
        r#"
        WITH p AS (
            UPDATE posts
            SET text = COALESCE($2, text),
                image = CASE WHEN $3 THEN $4 ELSE image END,
                group_id = CASE WHEN $5 THEN $6 ELSE group_id END
            WHERE id = $1
            RETURNING id, text, pub_date, author_id, image, group_id
        )
        SELECT {POST_COLUMNS}
        FROM p
        JOIN users u ON u.id = p.author_id
        "#
    );

    sqlx::query_as::<_, Post>(&query)
        .bind(post_id)
        .bind(text)
        .bind(image.is_some())
        .bind(image.flatten())
        .bind(group_id.is_some())
        .bind(group_id.flatten())
        .fetch_optional(pool)
        .await
}

/// Delete a post; its comments cascade
pub async fn delete_post(pool: &PgPool, post_id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM posts WHERE id = $1")
        .bind(post_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
