//! Environment variable parsing helpers
//!
//! Missing or unparsable values fall back instead of panicking; callers that
//! need a hard failure use [`parse_env_required`].

use std::str::FromStr;

/// Parse `key`, falling back to `default` when unset or malformed.
pub fn parse_env_with_default<T: FromStr>(key: &str, default: T) -> T {
    parse_env_optional(key).unwrap_or(default)
}

/// Parse `key`, returning `None` when unset, blank or malformed.
pub fn parse_env_optional<T: FromStr>(key: &str) -> Option<T> {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .and_then(|v| v.trim().parse().ok())
}

/// Parse `key`, failing with a readable message when unset or malformed.
pub fn parse_env_required<T: FromStr>(key: &str) -> Result<T, String> {
    let raw = std::env::var(key).map_err(|_| format!("Environment variable {key} not set"))?;
    raw.trim()
        .parse()
        .map_err(|_| format!("Failed to parse environment variable {key}='{raw}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[serial_test::serial]
    fn test_default_when_unset_or_malformed() {
        std::env::remove_var("DB_POOL_TEST_VALUE");
        assert_eq!(parse_env_with_default("DB_POOL_TEST_VALUE", 7u32), 7);

        std::env::set_var("DB_POOL_TEST_VALUE", "seven");
        assert_eq!(parse_env_with_default("DB_POOL_TEST_VALUE", 7u32), 7);

        std::env::set_var("DB_POOL_TEST_VALUE", " 12 ");
        assert_eq!(parse_env_with_default("DB_POOL_TEST_VALUE", 7u32), 12);

        std::env::remove_var("DB_POOL_TEST_VALUE");
    }

    #[test]
    #[serial_test::serial]
    fn test_optional_treats_blank_as_missing() {
        std::env::set_var("DB_POOL_TEST_OPTIONAL", "  ");
        assert_eq!(parse_env_optional::<u64>("DB_POOL_TEST_OPTIONAL"), None);
        std::env::remove_var("DB_POOL_TEST_OPTIONAL");
    }

    #[test]
    #[serial_test::serial]
    fn test_required_reports_key() {
        std::env::remove_var("DB_POOL_TEST_REQUIRED");
        let err = parse_env_required::<u16>("DB_POOL_TEST_REQUIRED").unwrap_err();
        assert!(err.contains("DB_POOL_TEST_REQUIRED"));

        std::env::set_var("DB_POOL_TEST_REQUIRED", "5432");
        assert_eq!(parse_env_required::<u16>("DB_POOL_TEST_REQUIRED"), Ok(5432));
        std::env::remove_var("DB_POOL_TEST_REQUIRED");
    }
}
