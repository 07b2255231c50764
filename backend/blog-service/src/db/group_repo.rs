use crate::models::Group;
use sqlx::PgPool;

/// List all groups ordered by id
pub async fn list_groups(pool: &PgPool) -> Result<Vec<Group>, sqlx::Error> {
    sqlx::query_as::<_, Group>("SELECT id, title, slug, description FROM groups ORDER BY id")
        .fetch_all(pool)
        .await
}

/// Get a group by id
pub async fn get_group(pool: &PgPool, group_id: i64) -> Result<Option<Group>, sqlx::Error> {
    sqlx::query_as::<_, Group>("SELECT id, title, slug, description FROM groups WHERE id = $1")
        .bind(group_id)
        .fetch_optional(pool)
        .await
}

/// Get a group by slug
pub async fn get_group_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Group>, sqlx::Error> {
    sqlx::query_as::<_, Group>("SELECT id, title, slug, description FROM groups WHERE slug = $1")
        .bind(slug)
        .fetch_optional(pool)
        .await
}

/// Create a group
pub async fn create_group(
    pool: &PgPool,
    title: &str,
    slug: &str,
    description: &str,
) -> Result<Group, sqlx::Error> {
    sqlx::query_as::<_, Group>(
        r#"
        INSERT INTO groups (title, slug, description)
        VALUES ($1, $2, $3)
        RETURNING id, title, slug, description
        "#,
    )
    .bind(title)
    .bind(slug)
    .bind(description)
    .fetch_one(pool)
    .await
}

/// Update the given fields of a group; `None` keeps the stored value
pub async fn update_group(
    pool: &PgPool,
    group_id: i64,
    title: Option<&str>,
    slug: Option<&str>,
    description: Option<&str>,
) -> Result<Option<Group>, sqlx::Error> {
    sqlx::query_as::<_, Group>(
        r#"
        UPDATE groups
        SET title = COALESCE($2, title),
            slug = COALESCE($3, slug),
            description = COALESCE($4, description)
        WHERE id = $1
        RETURNING id, title, slug, description
        "#,
    )
    .bind(group_id)
    .bind(title)
    .bind(slug)
    .bind(description)
    .fetch_optional(pool)
    .await
}

/// Delete a group; posts in it keep existing with no group
pub async fn delete_group(pool: &PgPool, group_id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM groups WHERE id = $1")
        .bind(group_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
