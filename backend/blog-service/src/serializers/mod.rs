/// Request payloads and response representations
///
/// Payloads are deserialized leniently (unknown keys such as `author` or
/// `pub_date` are ignored) and then validated into typed change sets. All
/// validation happens before anything is written.
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

use crate::error::{FieldErrors, Result};

pub mod comment;
pub mod follow;
pub mod group;
pub mod messages;
pub mod post;

/// How a write payload is applied to a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// POST: required fields must be present
    Create,
    /// PUT: required fields must be present
    Replace,
    /// PATCH: every field is optional
    Partial,
}

impl WriteMode {
    pub fn is_partial(self) -> bool {
        matches!(self, WriteMode::Partial)
    }
}

/// Distinguishes an absent key (`None`) from an explicit `null` (`Some(None)`).
/// Use together with `#[serde(default)]`.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Parse a JSON request body. An empty body is treated as `{}`.
pub fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(serde_json::from_slice(b"{}")?);
    }
    Ok(serde_json::from_slice(body)?)
}

/// Validate a required text field: present unless partial, not null, and
/// non-blank once trimmed. Returns the trimmed value when one was supplied.
pub(crate) fn clean_text(
    field: &str,
    value: Option<Option<String>>,
    mode: WriteMode,
    errors: &mut FieldErrors,
) -> Option<String> {
    match value {
        None => {
            if !mode.is_partial() {
                errors.add(field, messages::REQUIRED);
            }
            None
        }
        Some(None) => {
            errors.add(field, messages::NOT_NULL);
            None
        }
        Some(Some(text)) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                errors.add(field, messages::NOT_BLANK);
                None
            } else {
                Some(trimmed.to_string())
            }
        }
    }
}
