/// Group service - read access for the API, management for the admin CLI
use sqlx::PgPool;
use tracing::info;

use crate::db::group_repo;
use crate::error::{AppError, Result};
use crate::models::Group;
use crate::serializers::group::{GroupUpdate, NewGroup};

pub struct GroupService {
    pool: PgPool,
}

impl GroupService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_groups(&self) -> Result<Vec<Group>> {
        Ok(group_repo::list_groups(&self.pool).await?)
    }

    pub async fn get_group(&self, group_id: i64) -> Result<Group> {
        group_repo::get_group(&self.pool, group_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Group {} not found", group_id)))
    }

    pub async fn get_group_by_slug(&self, slug: &str) -> Result<Group> {
        group_repo::get_group_by_slug(&self.pool, slug)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Group '{}' not found", slug)))
    }

    pub async fn create_group(&self, group: NewGroup) -> Result<Group> {
        let group = group.clean()?;
        let created =
            group_repo::create_group(&self.pool, &group.title, &group.slug, &group.description)
                .await?;

        info!(group_id = created.id, slug = %created.slug, "group created");
        Ok(created)
    }

    pub async fn update_group(&self, slug: &str, update: GroupUpdate) -> Result<Group> {
        let update = update.clean()?;
        let existing = self.get_group_by_slug(slug).await?;
        if update.is_empty() {
            return Ok(existing);
        }

        let updated = group_repo::update_group(
            &self.pool,
            existing.id,
            update.title.as_deref(),
            update.slug.as_deref(),
            update.description.as_deref(),
        )
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Group '{}' not found", slug)))?;

        info!(group_id = updated.id, slug = %updated.slug, "group updated");
        Ok(updated)
    }

    /// Delete a group. Its posts stay, with no group.
    pub async fn delete_group(&self, slug: &str) -> Result<Group> {
        let existing = self.get_group_by_slug(slug).await?;
        if !group_repo::delete_group(&self.pool, existing.id).await? {
            return Err(AppError::NotFound(format!("Group '{}' not found", slug)));
        }

        info!(group_id = existing.id, slug = %existing.slug, "group deleted");
        Ok(existing)
    }
}
