//! Shared token handling for Yatube services.
//!
//! Identities are issued upstream; services only need to validate bearer
//! tokens and read the subject and username out of them.

pub mod jwt;

#[cfg(any(test, feature = "test-keys"))]
pub mod testing;

pub use jwt::{Claims, Identity};
