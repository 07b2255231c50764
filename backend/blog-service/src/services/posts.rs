/// Post service - handles post listing, creation, and modification
use crypto_core::Identity;
use sqlx::PgPool;
use tracing::info;

use crate::db::{group_repo, post_repo};
use crate::error::{AppError, FieldErrors, Result};
use crate::models::Post;
use crate::pagination::Window;
use crate::serializers::messages;
use crate::serializers::post::PostChanges;

pub struct PostService {
    pool: PgPool,
}

impl PostService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Number of posts matching the filter
    pub async fn count_posts(&self, group_id: Option<i64>) -> Result<i64> {
        Ok(post_repo::count_posts(&self.pool, group_id).await?)
    }

    /// Posts matching the filter, restricted to `window` when given
    pub async fn list_posts(&self, group_id: Option<i64>, window: Option<Window>) -> Result<Vec<Post>> {
        let (limit, offset) = match window {
            Some(w) => (Some(w.limit), w.offset),
            None => (None, 0),
        };
        Ok(post_repo::list_posts(&self.pool, group_id, limit, offset).await?)
    }

    pub async fn get_post(&self, post_id: i64) -> Result<Post> {
        post_repo::get_post(&self.pool, post_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Post {} not found", post_id)))
    }

    /// Create a post authored by the caller
    pub async fn create_post(&self, author: &Identity, changes: PostChanges) -> Result<Post> {
        let text = changes
            .text
            .ok_or_else(|| FieldErrors::single("text", messages::REQUIRED))?;
        let group_id = changes.group.flatten();
        self.ensure_group_exists(group_id).await?;

        let post = post_repo::create_post(
            &self.pool,
            author.user_id,
            &text,
            changes.image.flatten().as_deref(),
            group_id,
        )
        .await?;

        info!(post_id = post.id, author_id = %author.user_id, "post created");
        Ok(post)
    }

    /// Apply validated changes to an existing post. Author and `pub_date`
    /// never change.
    pub async fn update_post(&self, post_id: i64, changes: PostChanges) -> Result<Post> {
        if let Some(group_id) = changes.group {
            self.ensure_group_exists(group_id).await?;
        }

        let image = changes.image.as_ref().map(|image| image.as_deref());
        post_repo::update_post(
            &self.pool,
            post_id,
            changes.text.as_deref(),
            image,
            changes.group,
        )
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post {} not found", post_id)))
    }

    pub async fn delete_post(&self, post_id: i64) -> Result<()> {
        if !post_repo::delete_post(&self.pool, post_id).await? {
            return Err(AppError::NotFound(format!("Post {} not found", post_id)));
        }
        info!(post_id, "post deleted");
        Ok(())
    }

    async fn ensure_group_exists(&self, group_id: Option<i64>) -> Result<()> {
        let Some(group_id) = group_id else {
            return Ok(());
        };
        if group_repo::get_group(&self.pool, group_id).await?.is_none() {
            return Err(FieldErrors::single("group", messages::invalid_pk(group_id)).into());
        }
        Ok(())
    }
}
