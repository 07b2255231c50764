/// Comment handlers - endpoints nested under `/posts/{post_id}/comments`
use actix_web::http::Method;
use actix_web::{web, HttpRequest, HttpResponse};
use sqlx::PgPool;

use crate::error::Result;
use crate::middleware::{check_object_permission, check_permission, IsAuthorOrReadOnly, MaybeUser};
use crate::serializers::comment::{CommentPayload, CommentRepresentation};
use crate::serializers::{parse_body, WriteMode};
use crate::services::CommentService;

/// List a post's comments, oldest first
pub async fn list_comments(
    req: HttpRequest,
    pool: web::Data<PgPool>,
    user: MaybeUser,
    post_id: web::Path<i64>,
) -> Result<HttpResponse> {
    check_permission(&IsAuthorOrReadOnly, req.method(), user.identity())?;

    let service = CommentService::new((**pool).clone());
    let comments: Vec<CommentRepresentation> = service
        .list_comments(*post_id)
        .await?
        .into_iter()
        .map(CommentRepresentation::from)
        .collect();

    Ok(HttpResponse::Ok().json(comments))
}

/// Comment on a post as the caller
pub async fn create_comment(
    req: HttpRequest,
    pool: web::Data<PgPool>,
    user: MaybeUser,
    post_id: web::Path<i64>,
    body: web::Bytes,
) -> Result<HttpResponse> {
    check_permission(&IsAuthorOrReadOnly, req.method(), user.identity())?;
    let author = user.require()?;

    let service = CommentService::new((**pool).clone());
    service.ensure_post_exists(*post_id).await?;

    let text = parse_body::<CommentPayload>(&body)?
        .validate(WriteMode::Create)?
        .unwrap_or_default();
    let comment = service.create_comment(*post_id, &author, &text).await?;

    Ok(HttpResponse::Created().json(CommentRepresentation::from(comment)))
}

/// Get a single comment of a post
pub async fn get_comment(
    req: HttpRequest,
    pool: web::Data<PgPool>,
    user: MaybeUser,
    path: web::Path<(i64, i64)>,
) -> Result<HttpResponse> {
    check_permission(&IsAuthorOrReadOnly, req.method(), user.identity())?;
    let (post_id, comment_id) = path.into_inner();

    let service = CommentService::new((**pool).clone());
    let comment = service.get_comment(post_id, comment_id).await?;

    Ok(HttpResponse::Ok().json(CommentRepresentation::from(comment)))
}

/// Full (PUT) or partial (PATCH) update, by the author only
pub async fn update_comment(
    req: HttpRequest,
    pool: web::Data<PgPool>,
    user: MaybeUser,
    path: web::Path<(i64, i64)>,
    body: web::Bytes,
) -> Result<HttpResponse> {
    check_permission(&IsAuthorOrReadOnly, req.method(), user.identity())?;
    let (post_id, comment_id) = path.into_inner();

    let service = CommentService::new((**pool).clone());
    let comment = service.get_comment(post_id, comment_id).await?;
    check_object_permission(&IsAuthorOrReadOnly, req.method(), user.identity(), &comment)?;

    let mode = if *req.method() == Method::PATCH {
        WriteMode::Partial
    } else {
        WriteMode::Replace
    };
    let text = parse_body::<CommentPayload>(&body)?.validate(mode)?;
    let updated = service.update_comment(comment.id, text.as_deref()).await?;

    Ok(HttpResponse::Ok().json(CommentRepresentation::from(updated)))
}

/// Delete a comment, by the author only
pub async fn delete_comment(
    req: HttpRequest,
    pool: web::Data<PgPool>,
    user: MaybeUser,
    path: web::Path<(i64, i64)>,
) -> Result<HttpResponse> {
    check_permission(&IsAuthorOrReadOnly, req.method(), user.identity())?;
    let (post_id, comment_id) = path.into_inner();

    let service = CommentService::new((**pool).clone());
    let comment = service.get_comment(post_id, comment_id).await?;
    check_object_permission(&IsAuthorOrReadOnly, req.method(), user.identity(), &comment)?;

    service.delete_comment(comment.id).await?;
    Ok(HttpResponse::NoContent().finish())
}
