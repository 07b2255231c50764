use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::messages;
use crate::error::FieldErrors;
use crate::models::Group;

/// Group as rendered to clients
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GroupRepresentation {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub description: String,
}

impl From<Group> for GroupRepresentation {
    fn from(group: Group) -> Self {
        Self {
            id: group.id,
            title: group.title,
            slug: group.slug,
            description: group.description,
        }
    }
}

/// Group definition accepted by the admin CLI
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewGroup {
    #[validate(length(max = 200, message = "Ensure this field has no more than 200 characters."))]
    pub title: String,
    #[validate(length(max = 50, message = "Ensure this field has no more than 50 characters."))]
    pub slug: String,
    pub description: String,
}

/// Partial group update accepted by the admin CLI
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct GroupUpdate {
    #[validate(length(max = 200, message = "Ensure this field has no more than 200 characters."))]
    pub title: Option<String>,
    #[validate(length(max = 50, message = "Ensure this field has no more than 50 characters."))]
    pub slug: Option<String>,
    pub description: Option<String>,
}

/// Slugs are ASCII letters, digits, underscores and hyphens.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn check_present(field: &str, value: &str, errors: &mut FieldErrors) {
    if value.is_empty() {
        errors.add(field, messages::NOT_BLANK);
    }
}

fn check_slug(slug: &str, errors: &mut FieldErrors) {
    if !slug.is_empty() && !is_valid_slug(slug) {
        errors.add("slug", messages::INVALID_SLUG);
    }
}

impl NewGroup {
    pub fn clean(self) -> Result<Self, FieldErrors> {
        let group = Self {
            title: self.title.trim().to_string(),
            slug: self.slug.trim().to_string(),
            description: self.description.trim().to_string(),
        };

        let mut errors = match group.validate() {
            Ok(()) => FieldErrors::new(),
            Err(e) => e.into(),
        };
        check_present("title", &group.title, &mut errors);
        check_present("slug", &group.slug, &mut errors);
        check_present("description", &group.description, &mut errors);
        check_slug(&group.slug, &mut errors);

        if errors.is_empty() {
            Ok(group)
        } else {
            Err(errors)
        }
    }
}

impl GroupUpdate {
    pub fn clean(self) -> Result<Self, FieldErrors> {
        let trim = |value: Option<String>| value.map(|v| v.trim().to_string());
        let update = Self {
            title: trim(self.title),
            slug: trim(self.slug),
            description: trim(self.description),
        };

        let mut errors = match update.validate() {
            Ok(()) => FieldErrors::new(),
            Err(e) => e.into(),
        };
        if let Some(title) = &update.title {
            check_present("title", title, &mut errors);
        }
        if let Some(slug) = &update.slug {
            check_present("slug", slug, &mut errors);
            check_slug(slug, &mut errors);
        }
        if let Some(description) = &update.description {
            check_present("description", description, &mut errors);
        }

        if errors.is_empty() {
            Ok(update)
        } else {
            Err(errors)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.slug.is_none() && self.description.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_group(title: &str, slug: &str, description: &str) -> NewGroup {
        NewGroup {
            title: title.into(),
            slug: slug.into(),
            description: description.into(),
        }
    }

    #[test]
    fn test_slug_charset() {
        assert!(is_valid_slug("cats_and-dogs-42"));
        assert!(!is_valid_slug("cats and dogs"));
        assert!(!is_valid_slug("кошки"));
        assert!(!is_valid_slug(""));
    }

    #[test]
    fn test_new_group_trims_and_accepts() {
        let group = new_group("  Cats ", " cats ", " All about cats ").clean().unwrap();
        assert_eq!(group.title, "Cats");
        assert_eq!(group.slug, "cats");
        assert_eq!(group.description, "All about cats");
    }

    #[test]
    fn test_new_group_field_errors() {
        let errors = new_group("", "bad slug", &"d".repeat(10))
            .clean()
            .unwrap_err();
        assert_eq!(errors.get("title").unwrap(), [messages::NOT_BLANK.to_string()]);
        assert_eq!(errors.get("slug").unwrap(), [messages::INVALID_SLUG.to_string()]);
        assert!(errors.get("description").is_none());
    }

    #[test]
    fn test_length_limits() {
        let errors = new_group(&"t".repeat(201), &"s".repeat(51), "d")
            .clean()
            .unwrap_err();
        assert_eq!(errors.get("title").unwrap(), [messages::max_length(200)]);
        assert_eq!(errors.get("slug").unwrap(), [messages::max_length(50)]);
    }

    #[test]
    fn test_update_validates_only_supplied_fields() {
        let update = GroupUpdate {
            slug: Some("new-slug".into()),
            ..GroupUpdate::default()
        }
        .clean()
        .unwrap();
        assert_eq!(update.slug.as_deref(), Some("new-slug"));
        assert!(!update.is_empty());
        assert!(GroupUpdate::default().is_empty());

        let errors = GroupUpdate {
            slug: Some("no spaces".into()),
            ..GroupUpdate::default()
        }
        .clean()
        .unwrap_err();
        assert!(errors.get("slug").is_some());
    }
}
