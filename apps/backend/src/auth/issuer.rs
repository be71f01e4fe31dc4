use std::sync::Arc;
use std::time::{Duration, SystemTime};

use serde_json::{Map, Value};
use tracing::debug;

use super::claims::{millis_since_epoch, Claims, RESERVED_CLAIMS, USER_ID_CLAIM};
use super::codec;
use super::error::AuthError;
use super::identity::Identity;
use crate::logging::pii::Redacted;
use crate::state::security_config::{SecurityConfig, SigningKey};

/// Mints tokens for identities using the configured key and lifetime.
#[derive(Debug, Clone)]
pub struct TokenIssuer {
    key: Arc<SigningKey>,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(security: &SecurityConfig) -> Self {
        Self {
            key: Arc::clone(&security.signing_key),
            ttl: security.token_ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token for `identity` valid from now.
    pub fn issue(&self, identity: &Identity, extra: Map<String, Value>) -> Result<String, AuthError> {
        self.issue_at(identity, extra, SystemTime::now())
    }

    /// Issue a token as if the current time were `now`.
    pub fn issue_at(
        &self,
        identity: &Identity,
        extra: Map<String, Value>,
        now: SystemTime,
    ) -> Result<String, AuthError> {
        let claims = self.claims_at(identity, extra, now)?;
        let token = codec::encode(&claims, &self.key)?;
        debug!(subject = %Redacted(&claims.sub), exp = claims.exp, "Issued access token");
        Ok(token)
    }

    /// Claim set that [`issue_at`](Self::issue_at) would sign.
    ///
    /// `userId` is always the identity's id; extra claims named `sub`, `iat`
    /// or `exp` are dropped.
    pub fn claims_at(
        &self,
        identity: &Identity,
        mut extra: Map<String, Value>,
        now: SystemTime,
    ) -> Result<Claims, AuthError> {
        let iat = millis_since_epoch(now)
            .ok_or_else(|| AuthError::Signing("system clock is before the Unix epoch".into()))?;
        let ttl = i64::try_from(self.ttl.as_millis()).unwrap_or(i64::MAX);

        for name in RESERVED_CLAIMS {
            extra.remove(name);
        }
        extra.insert(USER_ID_CLAIM.to_string(), Value::from(identity.id));

        Ok(Claims {
            sub: identity.subject().to_string(),
            iat,
            exp: iat.saturating_add(ttl),
            extra,
        })
    }
}
