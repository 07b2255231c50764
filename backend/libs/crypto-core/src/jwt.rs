/// Shared JWT module for Yatube services
///
/// Tokens are RS256 (RSA with SHA-256) only. Services that merely validate
/// tokens are initialized with the public key; the private key is only loaded
/// by the issuer (and by tests).
///
/// ## Usage
///
/// ```rust,ignore
/// use crypto_core::jwt;
///
/// let public_key = jwt::load_validation_key()?;
/// jwt::initialize_jwt_validation_only(&public_key)?;
///
/// let identity = jwt::authenticate(token)?;
/// println!("{} ({})", identity.username, identity.user_id);
/// ```
use anyhow::{anyhow, bail, Context, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, Algorithm, DecodingKey, EncodingKey, Header, TokenData, Validation,
};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Constants
// ============================================================================

const ACCESS_TOKEN_EXPIRY_HOURS: i64 = 1;

const ACCESS_TOKEN_TYPE: &str = "access";

/// Longest username a service stores for a caller
pub const MAX_USERNAME_LENGTH: usize = 150;

/// JWT algorithm - RS256 only, no symmetric fallback
const JWT_ALGORITHM: Algorithm = Algorithm::RS256;

// ============================================================================
// Data Structures
// ============================================================================

/// JWT claims issued by the identity provider
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID as UUID string)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Token type: only "access" tokens authenticate requests
    pub token_type: String,
    /// Username, rendered as the author of posts and comments
    pub username: String,
}

/// Authenticated caller, as read from a validated access token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: Uuid,
    pub username: String,
}

impl TryFrom<Claims> for Identity {
    type Error = anyhow::Error;

    fn try_from(claims: Claims) -> Result<Self> {
        if claims.token_type != ACCESS_TOKEN_TYPE {
            bail!("Expected an access token, got '{}'", claims.token_type);
        }

        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|e| anyhow!("Invalid user ID format in token: {e}"))?;

        let username = claims.username.trim();
        if username.is_empty() {
            bail!("Token carries an empty username");
        }
        if username.chars().count() > MAX_USERNAME_LENGTH {
            bail!("Token username exceeds {MAX_USERNAME_LENGTH} characters");
        }

        Ok(Self {
            user_id,
            username: username.to_string(),
        })
    }
}

// ============================================================================
// Key Storage
// ============================================================================

static JWT_ENCODING_KEY: OnceCell<EncodingKey> = OnceCell::new();
static JWT_DECODING_KEY: OnceCell<DecodingKey> = OnceCell::new();

// ============================================================================
// Initialization
// ============================================================================

/// Initialize both signing and validation keys from PEM strings.
///
/// Can only be called once per process.
pub fn initialize_jwt_keys(private_key_pem: &str, public_key_pem: &str) -> Result<()> {
    let encoding_key = EncodingKey::from_rsa_pem(private_key_pem.as_bytes())
        .map_err(|e| anyhow!("Failed to parse RSA private key: {e}"))?;

    JWT_ENCODING_KEY
        .set(encoding_key)
        .map_err(|_| anyhow!("JWT encoding key already initialized"))?;

    initialize_jwt_validation_only(public_key_pem)
}

/// Initialize the validation key only.
///
/// This is what the blog service uses: it never issues tokens.
pub fn initialize_jwt_validation_only(public_key_pem: &str) -> Result<()> {
    let decoding_key = DecodingKey::from_rsa_pem(public_key_pem.as_bytes())
        .map_err(|e| anyhow!("Failed to parse RSA public key: {e}"))?;

    JWT_DECODING_KEY
        .set(decoding_key)
        .map_err(|_| anyhow!("JWT decoding key already initialized"))?;

    Ok(())
}

/// Load the RS256 public key from `JWT_PUBLIC_KEY_PEM`, falling back to the
/// file named by `JWT_PUBLIC_KEY_FILE`.
pub fn load_validation_key() -> Result<String> {
    if let Ok(pem) = std::env::var("JWT_PUBLIC_KEY_PEM") {
        if !pem.trim().is_empty() {
            return Ok(pem);
        }
    }

    let path = std::env::var("JWT_PUBLIC_KEY_FILE")
        .map_err(|_| anyhow!("Neither JWT_PUBLIC_KEY_PEM nor JWT_PUBLIC_KEY_FILE is set"))?;

    std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read JWT public key from {path}"))
}

fn get_encoding_key() -> Result<&'static EncodingKey> {
    JWT_ENCODING_KEY.get().ok_or_else(|| {
        anyhow!("JWT signing key not initialized. Call initialize_jwt_keys() during startup.")
    })
}

fn get_decoding_key() -> Result<&'static DecodingKey> {
    JWT_DECODING_KEY.get().ok_or_else(|| {
        anyhow!("JWT keys not initialized. Call initialize_jwt_keys() or initialize_jwt_validation_only() during startup.")
    })
}

// ============================================================================
// Token Generation
// ============================================================================

/// Issue an access token valid for `ttl` from now.
///
/// A negative `ttl` yields an already-expired token.
pub fn issue_token(user_id: Uuid, username: &str, ttl: Duration) -> Result<String> {
    let now = Utc::now();

    let claims = Claims {
        sub: user_id.to_string(),
        iat: now.timestamp(),
        exp: (now + ttl).timestamp(),
        token_type: ACCESS_TOKEN_TYPE.to_string(),
        username: username.to_string(),
    };

    let encoding_key = get_encoding_key()?;
    encode(&Header::new(JWT_ALGORITHM), &claims, encoding_key)
        .map_err(|e| anyhow!("Failed to generate access token: {e}"))
}

/// Issue a standard one-hour access token.
pub fn generate_access_token(user_id: Uuid, username: &str) -> Result<String> {
    issue_token(user_id, username, Duration::hours(ACCESS_TOKEN_EXPIRY_HOURS))
}

// ============================================================================
// Token Validation
// ============================================================================

/// Validate signature and expiry, returning the decoded claims.
pub fn validate_token(token: &str) -> Result<TokenData<Claims>> {
    let decoding_key = get_decoding_key()?;

    let mut validation = Validation::new(JWT_ALGORITHM);
    validation.validate_exp = true;

    decode::<Claims>(token, decoding_key, &validation)
        .map_err(|e| anyhow!("Token validation failed: {e}"))
}

/// Validate a bearer token and turn it into an [`Identity`].
pub fn authenticate(token: &str) -> Result<Identity> {
    let token_data = validate_token(token)?;
    Identity::try_from(token_data.claims)
}

// ============================================================================
// Tests
// ============================================================================
