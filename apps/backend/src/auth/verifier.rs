use std::sync::Arc;
use std::time::SystemTime;

use tracing::debug;

use super::claims::{millis_since_epoch, Claims};
use super::codec;
use super::error::AuthError;
use super::identity::Identity;
use crate::state::security_config::{SecurityConfig, SigningKey};

/// Checks signature, expiry and (optionally) subject of presented tokens.
#[derive(Debug, Clone)]
pub struct TokenVerifier {
    key: Arc<SigningKey>,
}

impl TokenVerifier {
    pub fn new(security: &SecurityConfig) -> Self {
        Self {
            key: Arc::clone(&security.signing_key),
        }
    }

    pub fn verify(&self, token: &str, expected: Option<&Identity>) -> Result<Claims, AuthError> {
        self.verify_at(token, expected, SystemTime::now())
    }

    /// Verify `token` against the clock value `now`.
    ///
    /// Order: signature/structure, then expiry (`exp <= now` is expired), then
    /// subject equality when `expected` is given.
    pub fn verify_at(
        &self,
        token: &str,
        expected: Option<&Identity>,
        now: SystemTime,
    ) -> Result<Claims, AuthError> {
        let claims = codec::decode(token, &self.key)?;

        let now_ms = millis_since_epoch(now).ok_or(AuthError::Expired)?;
        if claims.is_expired_at(now_ms) {
            return Err(AuthError::Expired);
        }

        if let Some(identity) = expected {
            if claims.sub != identity.subject() {
                return Err(AuthError::SubjectMismatch);
            }
        }

        Ok(claims)
    }

    /// Subject of a correctly signed token, expired or not.
    pub fn extract_subject(&self, token: &str) -> Result<String, AuthError> {
        codec::decode(token, &self.key).map(|claims| claims.sub)
    }

    /// `userId` claim of a correctly signed token; failures are logged, not raised.
    pub fn extract_user_id(&self, token: &str) -> Option<i64> {
        match codec::decode(token, &self.key) {
            Ok(claims) => {
                let user_id = claims.user_id();
                if user_id.is_none() {
                    debug!("Token carries no usable userId claim");
                }
                user_id
            }
            Err(e) => {
                debug!(reason = e.reason(), "Could not extract userId from token");
                None
            }
        }
    }

    pub fn is_valid(&self, token: &str, identity: &Identity) -> bool {
        self.verify(token, Some(identity)).is_ok()
    }

    pub fn is_valid_at(&self, token: &str, identity: &Identity, now: SystemTime) -> bool {
        self.verify_at(token, Some(identity), now).is_ok()
    }
}
