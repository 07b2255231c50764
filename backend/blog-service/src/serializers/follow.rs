use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{messages, nullable};
use crate::error::{FieldErrors, NON_FIELD_ERRORS};
use crate::models::{Follow, User};

/// Subscription as rendered to clients: exactly `user` and `following`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FollowRepresentation {
    /// Follower username
    pub user: String,
    /// Followed author username
    pub following: String,
}

impl From<Follow> for FollowRepresentation {
    fn from(follow: Follow) -> Self {
        Self {
            user: follow.user_username,
            following: follow.following_username,
        }
    }
}

/// Incoming follow body. `user` is always the requester and is ignored.
#[derive(Debug, Default, Deserialize)]
pub struct FollowPayload {
    #[serde(default, deserialize_with = "nullable")]
    pub following: Option<Option<String>>,
}

impl FollowPayload {
    /// Returns the username to subscribe to.
    pub fn validate(self) -> Result<String, FieldErrors> {
        match self.following {
            None => Err(FieldErrors::single("following", messages::REQUIRED)),
            Some(None) => Err(FieldErrors::single("following", messages::NOT_NULL)),
            Some(Some(username)) => {
                let username = username.trim();
                if username.is_empty() {
                    Err(FieldErrors::single("following", messages::NOT_BLANK))
                } else {
                    Ok(username.to_string())
                }
            }
        }
    }
}

/// Error for a `following` username with no matching user
pub fn unknown_target(username: &str) -> FieldErrors {
    FieldErrors::single("following", messages::unknown_username(username))
}

/// Reject subscribing to oneself.
pub fn check_target(requester: Uuid, target: &User) -> Result<(), FieldErrors> {
    if requester == target.id {
        return Err(FieldErrors::single("following", messages::SELF_FOLLOW));
    }
    Ok(())
}

/// Error for a subscription that already exists
pub fn already_following() -> FieldErrors {
    FieldErrors::single(NON_FIELD_ERRORS, messages::ALREADY_FOLLOWING)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user(id: Uuid, username: &str) -> User {
        User {
            id,
            username: username.into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_following_is_required() {
        let payload: FollowPayload = serde_json::from_str(r#"{"user": "someone"}"#).unwrap();
        let errors = payload.validate().unwrap_err();
        assert_eq!(errors.get("following").unwrap(), [messages::REQUIRED.to_string()]);
    }

    #[test]
    fn test_following_username_is_trimmed() {
        let payload: FollowPayload = serde_json::from_str(r#"{"following": " leo "}"#).unwrap();
        assert_eq!(payload.validate().unwrap(), "leo");
    }

    #[test]
    fn test_self_follow_rejected() {
        let me = Uuid::new_v4();
        let errors = check_target(me, &user(me, "me")).unwrap_err();
        assert_eq!(errors.get("following").unwrap(), [messages::SELF_FOLLOW.to_string()]);

        assert!(check_target(me, &user(Uuid::new_v4(), "other")).is_ok());
    }

    #[test]
    fn test_duplicate_reported_as_non_field_error() {
        let errors = already_following();
        assert_eq!(
            errors.get(NON_FIELD_ERRORS).unwrap(),
            [messages::ALREADY_FOLLOWING.to_string()]
        );
    }

    #[test]
    fn test_representation_has_exactly_two_fields() {
        let follow = Follow {
            id: 1,
            user_id: Uuid::new_v4(),
            user_username: "ann".into(),
            following_id: Uuid::new_v4(),
            following_username: "leo".into(),
        };
        let json = serde_json::to_value(FollowRepresentation::from(follow)).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 2);
        assert_eq!(json["user"], "ann");
        assert_eq!(json["following"], "leo");
    }
}
