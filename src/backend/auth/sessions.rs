/**
 * Session Tokens
 *
 * Issues and validates the signed, self-contained session tokens handed out
 * at login. Nothing is stored server-side: a token is accepted if and only
 * if its signature verifies under the configured secret and algorithm, it
 * carries `sub` and `exp`, and `exp` has not passed.
 *
 * The signing secret, algorithm and default lifetime are fixed in a
 * [`TokenConfig`] when the service is constructed.
 */

use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default session lifetime
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(90 * 60);

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Username of the identity the token was issued to
    pub sub: String,
    /// Issued at (Unix timestamp, seconds)
    #[serde(default)]
    pub iat: i64,
    /// Expiration time (Unix timestamp, seconds)
    pub exp: i64,
}

/// Token failures
#[derive(Debug, Error)]
pub enum TokenError {
    /// Signature, structure, algorithm, claims or expiry check failed
    #[error("invalid token: {0}")]
    InvalidToken(#[source] jsonwebtoken::errors::Error),

    /// Signing failed
    #[error("failed to sign token: {0}")]
    Encoding(#[source] jsonwebtoken::errors::Error),
}

/// Signing parameters, fixed at startup
#[derive(Clone)]
pub struct TokenConfig {
    /// Shared HMAC secret
    pub secret: Vec<u8>,
    /// HMAC algorithm; tokens naming any other algorithm are rejected
    pub algorithm: Algorithm,
    /// Lifetime applied when `issue` is not given one
    pub ttl: Duration,
}

impl TokenConfig {
    /// HS256 with the default lifetime
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
            algorithm: Algorithm::HS256,
            ttl: DEFAULT_TOKEN_TTL,
        }
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

impl std::fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenConfig")
            .field("secret", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .field("ttl", &self.ttl)
            .finish()
    }
}

/// Issues and validates session tokens
pub struct TokenService {
    algorithm: Algorithm,
    ttl: Duration,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    pub fn new(config: TokenConfig) -> Self {
        let mut validation = Validation::new(config.algorithm);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            algorithm: config.algorithm,
            ttl: config.ttl,
            encoding_key: EncodingKey::from_secret(&config.secret),
            decoding_key: DecodingKey::from_secret(&config.secret),
            validation,
        }
    }

    /// Lifetime of tokens issued without an explicit TTL
    pub fn default_ttl(&self) -> Duration {
        self.ttl
    }

    /// Create a signed token for `subject`, expiring `ttl` from now
    /// (the configured default when `None`)
    pub fn issue(&self, subject: &str, ttl: Option<Duration>) -> Result<String, TokenError> {
        let now = Utc::now().timestamp();
        let ttl = ttl.unwrap_or(self.ttl);
        let lifetime = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);

        let claims = Claims {
            sub: subject.to_string(),
            iat: now,
            exp: now.saturating_add(lifetime),
        };

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key).map_err(TokenError::Encoding)
    }

    /// Verify a token and return its subject
    pub fn validate(&self, token: &str) -> Result<String, TokenError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(TokenError::InvalidToken)?;
        Ok(data.claims.sub)
    }
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("algorithm", &self.algorithm)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}
