use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{clean_text, messages, nullable, WriteMode};
use crate::error::FieldErrors;
use crate::models::Post;

pub const IMAGE_MAX_LENGTH: usize = 255;

/// Post as rendered to clients
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PostRepresentation {
    pub id: i64,
    pub text: String,
    pub pub_date: DateTime<Utc>,
    /// Author username
    pub author: String,
    pub image: Option<String>,
    /// Group id
    pub group: Option<i64>,
}

impl From<Post> for PostRepresentation {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            text: post.text,
            pub_date: post.pub_date,
            author: post.author_username,
            image: post.image,
            group: post.group_id,
        }
    }
}

/// Incoming post body. `id`, `author` and `pub_date` are read-only and ignored.
#[derive(Debug, Default, Deserialize)]
pub struct PostPayload {
    #[serde(default, deserialize_with = "nullable")]
    pub text: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub image: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub group: Option<Option<i64>>,
}

/// Validated post changes.
///
/// `image` and `group` use `None` for "leave unchanged" and `Some(None)` for
/// "clear".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostChanges {
    pub text: Option<String>,
    pub image: Option<Option<String>>,
    pub group: Option<Option<i64>>,
}

impl PostPayload {
    /// Field-level validation. Group existence is checked by the service.
    pub fn validate(self, mode: WriteMode) -> Result<PostChanges, FieldErrors> {
        let mut errors = FieldErrors::new();

        let text = clean_text("text", self.text, mode, &mut errors);

        let image = self.image.map(|image| {
            image
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        });
        if let Some(Some(value)) = &image {
            if value.chars().count() > IMAGE_MAX_LENGTH {
                errors.add("image", messages::max_length(IMAGE_MAX_LENGTH));
            }
        }

        if errors.is_empty() {
            Ok(PostChanges {
                text,
                image,
                group: self.group,
            })
        } else {
            Err(errors)
        }
    }
}
