/// HTTP middleware for blog-service
///
/// Identity is optional: requests without an `Authorization` header proceed
/// anonymously, while a header carrying an invalid or expired token is
/// rejected with 401. Every authenticated caller is recorded in the local
/// `users` table so other users can follow them. Handlers read the caller
/// through [`MaybeUser`] and apply the policies in [`permissions`].
pub mod metrics;
pub mod permissions;

pub use metrics::MetricsMiddleware;
pub use permissions::*;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::AUTHORIZATION;
use actix_web::{web, Error, FromRequest, HttpMessage, HttpRequest};
use crypto_core::{jwt, Identity};
use futures::future::LocalBoxFuture;
use sqlx::PgPool;
use std::future::{ready, Ready};
use std::rc::Rc;

use crate::db::user_repo;
use crate::error::AppError;

// =====================================================================
// Bearer token identity
// =====================================================================

/// Actix middleware that resolves the caller from a Bearer token, if any.
pub struct IdentityMiddleware;

impl<S, B> Transform<S, ServiceRequest> for IdentityMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = IdentityMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(IdentityMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

pub struct IdentityMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for IdentityMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();

        Box::pin(async move {
            let authenticated = req
                .headers()
                .get(AUTHORIZATION)
                .map(|header| identity_from_header(header.to_str().ok()));

            match authenticated {
                Some(Ok(identity)) => {
                    tracing::debug!(user_id = %identity.user_id, "request authenticated");
                    if let Some(pool) = req.app_data::<web::Data<PgPool>>().cloned() {
                        if let Err(e) =
                            user_repo::upsert_user(&pool, identity.user_id, &identity.username).await
                        {
                            return Ok(req
                                .error_response(AppError::from(e))
                                .map_into_right_body());
                        }
                    }
                    req.extensions_mut().insert(identity);
                }
                Some(Err(err)) => return Ok(req.error_response(err).map_into_right_body()),
                None => {}
            }

            service
                .call(req)
                .await
                .map(ServiceResponse::map_into_left_body)
        })
    }
}

fn identity_from_header(value: Option<&str>) -> Result<Identity, AppError> {
    let token = value
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::Unauthorized("Invalid Authorization header".to_string()))?;

    jwt::authenticate(token).map_err(|e| {
        tracing::warn!(error = %e, "rejected bearer token");
        AppError::Unauthorized("Invalid or expired token".to_string())
    })
}

/// The caller's identity, or `None` for anonymous requests.
#[derive(Debug, Clone, Default)]
pub struct MaybeUser(pub Option<Identity>);

impl MaybeUser {
    pub fn identity(&self) -> Option<&Identity> {
        self.0.as_ref()
    }

    /// The authenticated identity, or 401.
    pub fn require(self) -> Result<Identity, AppError> {
        self.0.ok_or_else(|| {
            AppError::Unauthorized("Authentication credentials were not provided".to_string())
        })
    }
}

impl FromRequest for MaybeUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        ready(Ok(MaybeUser(req.extensions().get::<Identity>().cloned())))
    }
}
