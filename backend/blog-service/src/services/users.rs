/// User service - maintenance of the local user projection
use sqlx::PgPool;
use tracing::info;

use crate::db::user_repo;
use crate::error::{AppError, Result};
use crate::models::User;

pub struct UserService {
    pool: PgPool,
}

impl UserService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Remove a user together with their posts, comments and subscriptions
    pub async fn delete_user(&self, username: &str) -> Result<User> {
        let user = user_repo::find_by_username(&self.pool, username)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", username)))?;

        if !user_repo::delete_user(&self.pool, user.id).await? {
            return Err(AppError::NotFound(format!("User {} not found", username)));
        }

        info!(user_id = %user.id, "user deleted");
        Ok(user)
    }
}
