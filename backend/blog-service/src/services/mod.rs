/// Business logic layer
///
/// Services sit between handlers and repositories: they resolve referenced
/// records, finish validation that needs the database, and translate
/// repository results into `AppError`.
pub mod comments;
pub mod follows;
pub mod groups;
pub mod posts;
pub mod users;

pub use comments::CommentService;
pub use follows::FollowService;
pub use groups::GroupService;
pub use posts::PostService;
pub use users::UserService;
