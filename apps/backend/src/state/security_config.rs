use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use jsonwebtoken::{DecodingKey, EncodingKey};
use tracing::{debug, warn};

use crate::error::AppError;

/// Environment variable holding the HMAC secret (base64 or plain text).
pub const JWT_SECRET_ENV: &str = "BACKEND_JWT_SECRET";
/// Environment variable holding the token lifetime in milliseconds.
pub const JWT_EXPIRATION_ENV: &str = "BACKEND_JWT_EXPIRATION_MS";

/// How the configured secret was turned into key material.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySource {
    /// The secret was valid standard base64 and its decoded bytes are the key.
    Base64,
    /// The secret was not base64; its UTF-8 bytes are the key.
    Raw,
}

/// HMAC key material shared by issuance and verification.
///
/// Built once at startup and never mutated. `Debug` never prints the bytes.
pub struct SigningKey {
    bytes: Vec<u8>,
    source: KeySource,
}

impl SigningKey {
    /// Derive key material from a configured secret.
    ///
    /// The secret is decoded as standard base64 first; when that fails the raw
    /// bytes of the string are used. A plain-text secret that happens to be
    /// valid base64 therefore yields its decoded bytes, not its text.
    pub fn from_secret(secret: &str) -> Self {
        match STANDARD.decode(secret) {
            Ok(bytes) => {
                debug!(key_len = bytes.len(), "Using base64 decoded signing key");
                Self {
                    bytes,
                    source: KeySource::Base64,
                }
            }
            Err(_) => {
                debug!(key_len = secret.len(), "Using plain text signing key");
                Self::raw(secret.as_bytes())
            }
        }
    }

    /// Use `bytes` verbatim as key material.
    pub fn raw(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
            source: KeySource::Raw,
        }
    }

    pub fn source(&self) -> KeySource {
        self.source
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub(crate) fn encoding_key(&self) -> EncodingKey {
        EncodingKey::from_secret(&self.bytes)
    }

    pub(crate) fn decoding_key(&self) -> DecodingKey {
        DecodingKey::from_secret(&self.bytes)
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKey")
            .field("source", &self.source)
            .field("len", &self.bytes.len())
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// Configuration for JWT security settings
#[derive(Debug, Clone)]
pub struct SecurityConfig {
    /// Key used both to sign and to verify tokens
    pub signing_key: Arc<SigningKey>,
    /// Lifetime of issued tokens
    pub token_ttl: Duration,
}

impl SecurityConfig {
    /// 24 hours
    pub const DEFAULT_TTL: Duration = Duration::from_millis(86_400_000);

    /// Create a SecurityConfig from a textual secret with the default TTL
    pub fn new(secret: &str) -> Self {
        Self {
            signing_key: Arc::new(SigningKey::from_secret(secret)),
            token_ttl: Self::DEFAULT_TTL,
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl;
        self
    }

    /// Read `BACKEND_JWT_SECRET` and `BACKEND_JWT_EXPIRATION_MS`.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_parts(
            std::env::var(JWT_SECRET_ENV).ok(),
            std::env::var(JWT_EXPIRATION_ENV).ok(),
        )
    }

    /// Validate raw configuration values.
    pub fn from_parts(secret: Option<String>, expiration_ms: Option<String>) -> Result<Self, AppError> {
        let secret = secret
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| AppError::config(format!("{JWT_SECRET_ENV} must be set")))?;

        let ttl = match expiration_ms {
            None => Self::DEFAULT_TTL,
            Some(raw) => {
                let millis = raw.trim().parse::<u64>().map_err(|_| {
                    AppError::config(format!("{JWT_EXPIRATION_ENV} must be a positive integer"))
                })?;
                if millis == 0 {
                    return Err(AppError::config(format!(
                        "{JWT_EXPIRATION_ENV} must be a positive integer"
                    )));
                }
                Duration::from_millis(millis)
            }
        };

        let config = Self::new(&secret).with_ttl(ttl);
        if config.signing_key.is_empty() {
            return Err(AppError::config("signing key is empty"));
        }
        if config.signing_key.len() < 32 {
            warn!(
                key_len = config.signing_key.len(),
                source = ?config.signing_key.source(),
                "Signing key is shorter than 256 bits"
            );
        }
        Ok(config)
    }

    /// Config with a fresh random secret and the default TTL.
    pub fn for_tests() -> Self {
        let secret = format!("test-secret-{}", uuid::Uuid::new_v4());
        Self {
            signing_key: Arc::new(SigningKey::raw(secret.into_bytes())),
            token_ttl: Self::DEFAULT_TTL,
        }
    }
}
