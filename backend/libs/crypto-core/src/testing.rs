//! Fixed RSA key pair for tests. FOR TESTING ONLY.

use crate::jwt;
use std::sync::Once;

pub const TEST_PRIVATE_KEY_PEM: &str = include_str!("../test-keys/jwt_test_private.pem");
pub const TEST_PUBLIC_KEY_PEM: &str = include_str!("../test-keys/jwt_test_public.pem");

/// Install the test key pair into the process-wide key slots.
///
/// Safe to call from every test; only the first call does any work.
pub fn init_test_keys() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        jwt::initialize_jwt_keys(TEST_PRIVATE_KEY_PEM, TEST_PUBLIC_KEY_PEM)
            .expect("Failed to initialize test keys");
    });
}
