//! User-facing validation messages

pub const REQUIRED: &str = "This field is required.";
pub const NOT_NULL: &str = "This field may not be null.";
pub const NOT_BLANK: &str = "This field may not be blank.";
pub const SELF_FOLLOW: &str = "You cannot follow yourself.";
pub const ALREADY_FOLLOWING: &str = "You are already subscribed to this author.";
pub const DUPLICATE_SLUG: &str = "group with this slug already exists.";
pub const GROUP_DOES_NOT_EXIST: &str = "Invalid pk - object does not exist.";
pub const INVALID_SLUG: &str =
    "Enter a valid \"slug\" consisting of letters, numbers, underscores or hyphens.";
pub const INVALID_INTEGER: &str = "A valid integer is required.";

pub fn max_length(limit: usize) -> String {
    format!("Ensure this field has no more than {} characters.", limit)
}

pub fn invalid_pk(pk: i64) -> String {
    format!("Invalid pk \"{}\" - object does not exist.", pk)
}

pub fn unknown_username(username: &str) -> String {
    format!("Object with username={} does not exist.", username)
}
