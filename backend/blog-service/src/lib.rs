/// Blog Service Library
///
/// Content API for posts, community groups, comments and author
/// subscriptions. Reads are public; writes need a Bearer token issued by the
/// upstream identity provider.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers
/// - `serializers`: payload validation and JSON representations
/// - `services`: business logic layer
/// - `db`: repositories and embedded migrations
/// - `middleware`: identity, permission policies and request metrics
/// - `pagination`: opt-in limit/offset pagination
/// - `error`: error types and HTTP mapping
/// - `config`: configuration management
/// - `metrics`: Prometheus collectors
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod models;
pub mod openapi;
pub mod pagination;
pub mod serializers;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};

use actix_web::web;
use utoipa::OpenApi;

/// Register every route of the service.
///
/// Paths are registered without a trailing slash; wrap the app in
/// `NormalizePath::trim()` so `/posts/` and `/posts` both match.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::PathConfig::default().error_handler(error::path_error_handler))
        .app_data(web::QueryConfig::default().error_handler(error::query_error_handler))
        .app_data(web::Data::new(openapi::ApiDoc::openapi()))
        .route("/metrics", web::get().to(metrics::serve_metrics))
        .route(
            openapi::ApiDoc::openapi_json_path(),
            web::get().to(openapi::openapi_json),
        )
        .route("/api/v1/health", web::get().to(handlers::health::health_summary))
        .route("/api/v1/health/ready", web::get().to(handlers::health::readiness))
        .route("/api/v1/health/live", web::get().to(handlers::health::liveness))
        .service(
            web::scope("/api/v1")
                .wrap(middleware::IdentityMiddleware)
                .service(web::resource("/groups").route(web::get().to(handlers::list_groups)))
                .service(
                    web::resource("/groups/{group_id}").route(web::get().to(handlers::get_group)),
                )
                .service(
                    web::resource("/posts")
                        .route(web::get().to(handlers::list_posts))
                        .route(web::post().to(handlers::create_post)),
                )
                .service(
                    web::resource("/posts/{post_id}")
                        .route(web::get().to(handlers::get_post))
                        .route(web::put().to(handlers::update_post))
                        .route(web::patch().to(handlers::update_post))
                        .route(web::delete().to(handlers::delete_post)),
                )
                .service(
                    web::resource("/posts/{post_id}/comments")
                        .route(web::get().to(handlers::list_comments))
                        .route(web::post().to(handlers::create_comment)),
                )
                .service(
                    web::resource("/posts/{post_id}/comments/{comment_id}")
                        .route(web::get().to(handlers::get_comment))
                        .route(web::put().to(handlers::update_comment))
                        .route(web::patch().to(handlers::update_comment))
                        .route(web::delete().to(handlers::delete_comment)),
                )
                .service(
                    web::resource("/follow")
                        .route(web::get().to(handlers::list_follows))
                        .route(web::post().to(handlers::create_follow)),
                ),
        );
}
