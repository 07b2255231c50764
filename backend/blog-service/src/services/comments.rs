/// Comment service - handles comments nested under a post
use crypto_core::Identity;
use sqlx::PgPool;
use tracing::info;

use crate::db::{comment_repo, post_repo};
use crate::error::{AppError, Result};
use crate::models::Comment;

pub struct CommentService {
    pool: PgPool,
}

impl CommentService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 404 unless the parent post exists
    pub async fn ensure_post_exists(&self, post_id: i64) -> Result<()> {
        if post_repo::post_exists(&self.pool, post_id).await? {
            Ok(())
        } else {
            Err(AppError::NotFound(format!("Post {} not found", post_id)))
        }
    }

    /// Comments of an existing post, oldest first
    pub async fn list_comments(&self, post_id: i64) -> Result<Vec<Comment>> {
        self.ensure_post_exists(post_id).await?;
        Ok(comment_repo::list_comments(&self.pool, post_id).await?)
    }

    /// A comment that belongs to `post_id`. A comment attached to another
    /// post is reported as missing.
    pub async fn get_comment(&self, post_id: i64, comment_id: i64) -> Result<Comment> {
        self.ensure_post_exists(post_id).await?;
        comment_repo::get_comment(&self.pool, post_id, comment_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Comment {} not found", comment_id)))
    }

    /// Create a comment. The caller checks the parent post first; a post
    /// deleted in between is reported as missing by the foreign key.
    pub async fn create_comment(&self, post_id: i64, author: &Identity, text: &str) -> Result<Comment> {
        let comment = comment_repo::create_comment(&self.pool, post_id, author.user_id, text).await?;

        info!(comment_id = comment.id, post_id, author_id = %author.user_id, "comment created");
        Ok(comment)
    }

    /// `text: None` leaves the comment as is.
    pub async fn update_comment(&self, comment_id: i64, text: Option<&str>) -> Result<Comment> {
        comment_repo::update_comment(&self.pool, comment_id, text)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Comment {} not found", comment_id)))
    }

    pub async fn delete_comment(&self, comment_id: i64) -> Result<()> {
        if !comment_repo::delete_comment(&self.pool, comment_id).await? {
            return Err(AppError::NotFound(format!("Comment {} not found", comment_id)));
        }
        info!(comment_id, "comment deleted");
        Ok(())
    }
}
