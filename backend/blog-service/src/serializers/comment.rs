use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{clean_text, nullable, WriteMode};
use crate::error::FieldErrors;
use crate::models::Comment;

/// Comment as rendered to clients
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CommentRepresentation {
    pub id: i64,
    pub text: String,
    /// Author username
    pub author: String,
    /// Parent post id
    pub post: i64,
    pub created: DateTime<Utc>,
}

impl From<Comment> for CommentRepresentation {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            text: comment.text,
            author: comment.author_username,
            post: comment.post_id,
            created: comment.created,
        }
    }
}

/// Incoming comment body. `author` and `post` come from the request context.
#[derive(Debug, Default, Deserialize)]
pub struct CommentPayload {
    #[serde(default, deserialize_with = "nullable")]
    pub text: Option<Option<String>>,
}

impl CommentPayload {
    /// Returns the trimmed text, or `None` for a partial update that leaves it
    /// unchanged.
    pub fn validate(self, mode: WriteMode) -> Result<Option<String>, FieldErrors> {
        let mut errors = FieldErrors::new();
        let text = clean_text("text", self.text, mode, &mut errors);

        if errors.is_empty() {
            Ok(text)
        } else {
            Err(errors)
        }
    }
}
