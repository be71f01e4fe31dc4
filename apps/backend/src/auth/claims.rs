//! Claim set carried inside every token.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Extra claim holding the numeric user id.
pub const USER_ID_CLAIM: &str = "userId";

/// Registered claim names that extra claims may not override.
pub const RESERVED_CLAIMS: [&str; 3] = ["sub", "iat", "exp"];

/// Decoded token payload.
///
/// `iat` and `exp` are milliseconds since the Unix epoch so that
/// `exp - iat` is exactly the configured lifetime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Identity subject (the user's email)
    pub sub: String,
    /// Issued-at (milliseconds since epoch)
    pub iat: i64,
    /// Expiry (milliseconds since epoch)
    pub exp: i64,
    /// Caller-supplied claims, e.g. `userId`
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Claims {
    /// Numeric `userId` claim, if present and integral.
    ///
    /// Accepts JSON numbers (fractions are truncated) and decimal strings.
    /// Numbers outside the `i64` range are absent.
    pub fn user_id(&self) -> Option<i64> {
        match self.extra.get(USER_ID_CLAIM)? {
            Value::Number(n) => n.as_i64().or_else(|| {
                n.as_f64()
                    .filter(|f| (i64::MIN as f64..i64::MAX as f64).contains(f))
                    .map(|f| f as i64)
            }),
            Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    pub fn is_expired_at(&self, now_ms: i64) -> bool {
        self.exp <= now_ms
    }
}

/// Milliseconds since the Unix epoch, or `None` for a clock set before it.
pub fn millis_since_epoch(t: SystemTime) -> Option<i64> {
    t.duration_since(UNIX_EPOCH)
        .ok()
        .and_then(|d| i64::try_from(d.as_millis()).ok())
}
