/// Database access layer
///
/// Repository functions are free functions over `&PgPool` returning
/// `sqlx::Error`; services translate failures into `AppError`.
use sqlx::migrate::Migrator;

pub mod comment_repo;
pub mod follow_repo;
pub mod group_repo;
pub mod post_repo;
pub mod user_repo;

/// Embedded schema migrations, applied on startup and by `blog-admin migrate`
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");
