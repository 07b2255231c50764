/// OpenAPI documentation for the blog API
use actix_web::{web, HttpResponse};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

use crate::serializers::comment::CommentRepresentation;
use crate::serializers::follow::FollowRepresentation;
use crate::serializers::group::GroupRepresentation;
use crate::serializers::post::PostRepresentation;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Yatube Blog API",
        version = "1.0.0",
        description = "Posts, community groups, comments and author subscriptions. Reads are public; writes require a Bearer token and only the author may change a post or comment.",
        license(
            name = "MIT"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Development server"),
    ),
    tags(
        (name = "health", description = "Service health checks"),
        (name = "posts", description = "Posts with optional group and image"),
        (name = "groups", description = "Read-only community groups"),
        (name = "comments", description = "Comments nested under a post"),
        (name = "follow", description = "The caller's author subscriptions"),
    ),
    components(schemas(
        PostRepresentation,
        GroupRepresentation,
        CommentRepresentation,
        FollowRepresentation
    )),
    modifiers(&SecurityAddon),
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("RS256 access token from the identity provider"))
                        .build(),
                ),
            )
        }
    }
}

impl ApiDoc {
    pub fn openapi_json_path() -> &'static str {
        "/api/v1/openapi.json"
    }
}

/// Serve the OpenAPI document as JSON
pub async fn openapi_json(doc: web::Data<utoipa::openapi::OpenApi>) -> actix_web::Result<HttpResponse> {
    let body = serde_json::to_string(&**doc).map_err(|e| {
        tracing::error!("OpenAPI serialization failed: {}", e);
        actix_web::error::ErrorInternalServerError("OpenAPI serialization error")
    })?;

    Ok(HttpResponse::Ok()
        .content_type("application/json")
        .body(body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_schemas_and_bearer_auth() {
        let doc = ApiDoc::openapi();
        let json = serde_json::to_value(&doc).unwrap();

        let schemas = &json["components"]["schemas"];
        assert!(schemas.get("PostRepresentation").is_some());
        assert!(schemas.get("FollowRepresentation").is_some());
        assert_eq!(
            json["components"]["securitySchemes"]["bearer_auth"]["scheme"],
            "bearer"
        );
    }
}
