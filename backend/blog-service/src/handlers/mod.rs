/// HTTP handlers for blog-service
///
/// - Groups: read-only listing and retrieval
/// - Posts: CRUD with group filter and optional pagination
/// - Comments: CRUD nested under a post
/// - Follows: the caller's own subscriptions
/// - Health: liveness and readiness probes
pub mod comments;
pub mod follows;
pub mod groups;
pub mod health;
pub mod posts;

pub use comments::{create_comment, delete_comment, get_comment, list_comments, update_comment};
pub use follows::{create_follow, list_follows};
pub use groups::{get_group, list_groups};
pub use posts::{create_post, delete_post, get_post, list_posts, update_post};
