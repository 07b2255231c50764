/// Authorization policies for blog-service
///
/// A policy answers two questions: may this caller use the endpoint at all
/// (checked before anything is loaded), and may this caller act on this
/// particular record (checked once the record exists). Anonymous callers
/// failing the first check get 401; authenticated callers failing either
/// check get 403.
use actix_web::http::Method;
use crypto_core::Identity;

use crate::error::{AppError, Result};
use crate::models::Authored;

/// Methods that never modify state
pub fn is_safe_method(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS)
}

pub trait Permission {
    fn has_permission(&self, method: &Method, user: Option<&Identity>) -> bool;

    fn has_object_permission<T: Authored>(
        &self,
        _method: &Method,
        _user: Option<&Identity>,
        _record: &T,
    ) -> bool {
        true
    }
}

/// Everyone may read; authenticated users may write; only the author may
/// modify or delete a record.
pub struct IsAuthorOrReadOnly;

impl Permission for IsAuthorOrReadOnly {
    fn has_permission(&self, method: &Method, user: Option<&Identity>) -> bool {
        is_safe_method(method) || user.is_some()
    }

    fn has_object_permission<T: Authored>(
        &self,
        method: &Method,
        user: Option<&Identity>,
        record: &T,
    ) -> bool {
        is_safe_method(method) || user.is_some_and(|u| u.user_id == record.author_id())
    }
}

/// Only authenticated users, for every method.
pub struct IsAuthenticated;

impl Permission for IsAuthenticated {
    fn has_permission(&self, _method: &Method, user: Option<&Identity>) -> bool {
        user.is_some()
    }
}

/// Endpoint-level check, run before any record is loaded.
pub fn check_permission<P: Permission>(
    policy: &P,
    method: &Method,
    user: Option<&Identity>,
) -> Result<()> {
    if policy.has_permission(method, user) {
        return Ok(());
    }
    match user {
        None => Err(AppError::Unauthorized(
            "Authentication credentials were not provided".to_string(),
        )),
        Some(_) => Err(AppError::Forbidden(
            "You do not have permission to perform this action".to_string(),
        )),
    }
}

/// Record-level check, run after the record has been loaded.
pub fn check_object_permission<P: Permission, T: Authored>(
    policy: &P,
    method: &Method,
    user: Option<&Identity>,
    record: &T,
) -> Result<()> {
    if policy.has_object_permission(method, user, record) {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "Changing someone else's content is not allowed".to_string(),
        ))
    }
}
