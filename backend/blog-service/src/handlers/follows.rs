/// Follow handlers - the caller's own subscriptions
use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;

use crate::error::Result;
use crate::middleware::{check_permission, IsAuthenticated, MaybeUser};
use crate::serializers::follow::{FollowPayload, FollowRepresentation};
use crate::serializers::parse_body;
use crate::services::FollowService;

#[derive(Debug, Deserialize)]
pub struct FollowListQuery {
    pub search: Option<String>,
}

/// List the caller's subscriptions
pub async fn list_follows(
    req: HttpRequest,
    pool: web::Data<PgPool>,
    user: MaybeUser,
    query: web::Query<FollowListQuery>,
) -> Result<HttpResponse> {
    check_permission(&IsAuthenticated, req.method(), user.identity())?;
    let user = user.require()?;

    let service = FollowService::new((**pool).clone());
    let follows: Vec<FollowRepresentation> = service
        .list_follows(&user, query.search.as_deref())
        .await?
        .into_iter()
        .map(FollowRepresentation::from)
        .collect();

    Ok(HttpResponse::Ok().json(follows))
}

/// Subscribe the caller to another author
pub async fn create_follow(
    req: HttpRequest,
    pool: web::Data<PgPool>,
    user: MaybeUser,
    body: web::Bytes,
) -> Result<HttpResponse> {
    check_permission(&IsAuthenticated, req.method(), user.identity())?;
    let user = user.require()?;

    let following = parse_body::<FollowPayload>(&body)?.validate()?;

    let service = FollowService::new((**pool).clone());
    let follow = service.create_follow(&user, &following).await?;

    Ok(HttpResponse::Created().json(FollowRepresentation::from(follow)))
}
