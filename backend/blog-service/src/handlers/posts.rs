/// Post handlers - HTTP endpoints for post operations
use actix_web::http::Method;
use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;

use crate::config::PaginationConfig;
use crate::error::{FieldErrors, Result};
use crate::middleware::{check_object_permission, check_permission, IsAuthorOrReadOnly, MaybeUser};
use crate::pagination::{request_url, Listing, Page, PaginationQuery, Window};
use crate::serializers::messages;
use crate::serializers::parse_body;
use crate::serializers::post::{PostPayload, PostRepresentation};
use crate::serializers::WriteMode;
use crate::services::PostService;

#[derive(Debug, Deserialize)]
pub struct PostListQuery {
    pub group: Option<String>,
    #[serde(flatten)]
    pub page: PaginationQuery,
}

fn parse_group_filter(raw: Option<&str>) -> Result<Option<i64>> {
    match raw.map(str::trim).filter(|value| !value.is_empty()) {
        None => Ok(None),
        Some(value) => value
            .parse::<i64>()
            .map(Some)
            .map_err(|_| FieldErrors::single("group", messages::INVALID_INTEGER).into()),
    }
}

/// List posts, optionally filtered by group and paginated when `limit` is given
pub async fn list_posts(
    req: HttpRequest,
    pool: web::Data<PgPool>,
    pagination: web::Data<PaginationConfig>,
    user: MaybeUser,
    query: web::Query<PostListQuery>,
) -> Result<HttpResponse> {
    check_permission(&IsAuthorOrReadOnly, req.method(), user.identity())?;

    let group_id = parse_group_filter(query.group.as_deref())?;
    let service = PostService::new((**pool).clone());

    let listing = match Window::from_query(&query.page, pagination.max_limit) {
        None => {
            let posts = service.list_posts(group_id, None).await?;
            Listing::All(posts.into_iter().map(PostRepresentation::from).collect())
        }
        Some(window) => {
            let count = service.count_posts(group_id).await?;
            let posts = service.list_posts(group_id, Some(window)).await?;
            Listing::Page(Page::new(
                &request_url(&req),
                window,
                count,
                posts.into_iter().map(PostRepresentation::from).collect(),
            ))
        }
    };

    Ok(HttpResponse::Ok().json(listing))
}

/// Create a post authored by the caller
pub async fn create_post(
    req: HttpRequest,
    pool: web::Data<PgPool>,
    user: MaybeUser,
    body: web::Bytes,
) -> Result<HttpResponse> {
    check_permission(&IsAuthorOrReadOnly, req.method(), user.identity())?;
    let author = user.require()?;

    let changes = parse_body::<PostPayload>(&body)?.validate(WriteMode::Create)?;

    let service = PostService::new((**pool).clone());
    let post = service.create_post(&author, changes).await?;

    Ok(HttpResponse::Created().json(PostRepresentation::from(post)))
}

/// Get a single post
pub async fn get_post(
    req: HttpRequest,
    pool: web::Data<PgPool>,
    user: MaybeUser,
    post_id: web::Path<i64>,
) -> Result<HttpResponse> {
    check_permission(&IsAuthorOrReadOnly, req.method(), user.identity())?;

    let service = PostService::new((**pool).clone());
    let post = service.get_post(*post_id).await?;

    Ok(HttpResponse::Ok().json(PostRepresentation::from(post)))
}

/// Full (PUT) or partial (PATCH) update, by the author only
pub async fn update_post(
    req: HttpRequest,
    pool: web::Data<PgPool>,
    user: MaybeUser,
    post_id: web::Path<i64>,
    body: web::Bytes,
) -> Result<HttpResponse> {
    check_permission(&IsAuthorOrReadOnly, req.method(), user.identity())?;

    let service = PostService::new((**pool).clone());
    let post = service.get_post(*post_id).await?;
    check_object_permission(&IsAuthorOrReadOnly, req.method(), user.identity(), &post)?;

    let mode = if *req.method() == Method::PATCH {
        WriteMode::Partial
    } else {
        WriteMode::Replace
    };
    let changes = parse_body::<PostPayload>(&body)?.validate(mode)?;
    let updated = service.update_post(post.id, changes).await?;

    Ok(HttpResponse::Ok().json(PostRepresentation::from(updated)))
}

/// Delete a post and its comments, by the author only
pub async fn delete_post(
    req: HttpRequest,
    pool: web::Data<PgPool>,
    user: MaybeUser,
    post_id: web::Path<i64>,
) -> Result<HttpResponse> {
    check_permission(&IsAuthorOrReadOnly, req.method(), user.identity())?;

    let service = PostService::new((**pool).clone());
    let post = service.get_post(*post_id).await?;
    check_object_permission(&IsAuthorOrReadOnly, req.method(), user.identity(), &post)?;

    service.delete_post(post.id).await?;
    Ok(HttpResponse::NoContent().finish())
}
