/// Follow service - subscriptions between users
use crypto_core::Identity;
use sqlx::PgPool;
use tracing::info;

use crate::db::{follow_repo, user_repo};
use crate::error::{AppError, Result};
use crate::models::Follow;
use crate::serializers::follow::{already_following, check_target, unknown_target};

pub struct FollowService {
    pool: PgPool,
}

impl FollowService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The caller's subscriptions, optionally filtered by a case-insensitive
    /// substring of the followed username
    pub async fn list_follows(&self, user: &Identity, search: Option<&str>) -> Result<Vec<Follow>> {
        let search = search.map(str::trim).filter(|s| !s.is_empty());
        Ok(follow_repo::list_follows(&self.pool, user.user_id, search).await?)
    }

    /// Subscribe the caller to `username`.
    ///
    /// Checks run in order: target exists, target is not the caller, no
    /// existing subscription. The storage constraints catch requests that race
    /// past these checks and surface the same errors.
    pub async fn create_follow(&self, user: &Identity, username: &str) -> Result<Follow> {
        let target = user_repo::find_by_username(&self.pool, username)
            .await?
            .ok_or_else(|| unknown_target(username))?;

        check_target(user.user_id, &target)?;

        if follow_repo::follow_exists(&self.pool, user.user_id, target.id).await? {
            return Err(already_following().into());
        }

        let follow = follow_repo::create_follow(&self.pool, user.user_id, target.id).await?;

        info!(user_id = %user.user_id, following_id = %target.id, "follow created");
        Ok(follow)
    }

    /// Everyone subscribed to `username`
    pub async fn list_followers(&self, username: &str) -> Result<Vec<Follow>> {
        let target = user_repo::find_by_username(&self.pool, username)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", username)))?;
        Ok(follow_repo::list_followers(&self.pool, target.id).await?)
    }

    /// Remove the subscription of `username` to `following`
    pub async fn unfollow(&self, username: &str, following: &str) -> Result<()> {
        let user = user_repo::find_by_username(&self.pool, username)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", username)))?;
        let target = user_repo::find_by_username(&self.pool, following)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", following)))?;

        if !follow_repo::delete_follow(&self.pool, user.id, target.id).await? {
            return Err(AppError::NotFound(format!(
                "{} does not follow {}",
                username, following
            )));
        }
        info!(user_id = %user.id, following_id = %target.id, "follow removed");
        Ok(())
    }
}
