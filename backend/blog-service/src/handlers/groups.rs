/// Group handlers - read-only
use actix_web::{web, HttpResponse};
use sqlx::PgPool;

use crate::error::Result;
use crate::serializers::group::GroupRepresentation;
use crate::services::GroupService;

/// List all groups
pub async fn list_groups(pool: web::Data<PgPool>) -> Result<HttpResponse> {
    let service = GroupService::new((**pool).clone());
    let groups: Vec<GroupRepresentation> = service
        .list_groups()
        .await?
        .into_iter()
        .map(GroupRepresentation::from)
        .collect();

    Ok(HttpResponse::Ok().json(groups))
}

/// Get a single group
pub async fn get_group(pool: web::Data<PgPool>, group_id: web::Path<i64>) -> Result<HttpResponse> {
    let service = GroupService::new((**pool).clone());
    let group = service.get_group(*group_id).await?;

    Ok(HttpResponse::Ok().json(GroupRepresentation::from(group)))
}
