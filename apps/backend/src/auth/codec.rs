//! Compact JWS encoding of [`Claims`] with HMAC-SHA256.
//!
//! The codec only checks structure and signature. Expiry and subject are the
//! verifier's business, so `exp` is read back without being enforced here.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, Header, Validation};
use serde_json::Value;

use super::claims::Claims;
use super::error::AuthError;
use crate::state::security_config::SigningKey;

pub const ALGORITHM: Algorithm = Algorithm::HS256;

/// Sign `claims` into `header.payload.signature`.
///
/// Deterministic: the same claims and key always give the same string.
pub fn encode(claims: &Claims, key: &SigningKey) -> Result<String, AuthError> {
    jsonwebtoken::encode(&Header::new(ALGORITHM), claims, &key.encoding_key())
        .map_err(|e| AuthError::Signing(e.to_string()))
}

/// Verify the signature of `token` and return its claims.
///
/// Errors:
/// - signature mismatch, including a signature segment that is not valid
///   base64url under a well-formed header and payload → [`AuthError::InvalidSignature`]
/// - anything else (bad segments, bad base64/JSON, other algorithm,
///   missing `sub`/`exp`) → [`AuthError::Malformed`]
pub fn decode(token: &str, key: &SigningKey) -> Result<Claims, AuthError> {
    let mut validation = Validation::new(ALGORITHM);
    validation.validate_exp = false;
    validation.set_required_spec_claims(&["exp", "sub"]);

    jsonwebtoken::decode::<Claims>(token, &key.decoding_key(), &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::InvalidSignature => AuthError::InvalidSignature,
            ErrorKind::Base64(_) if header_and_payload_are_json(token) => {
                AuthError::InvalidSignature
            }
            _ => AuthError::Malformed,
        })
}

/// Three segments whose first two decode to JSON objects.
fn header_and_payload_are_json(token: &str) -> bool {
    let segments: Vec<&str> = token.split('.').collect();
    let [header, payload, _signature] = segments.as_slice() else {
        return false;
    };
    [*header, *payload].into_iter().all(|segment| {
        URL_SAFE_NO_PAD
            .decode(segment)
            .ok()
            .and_then(|bytes| serde_json::from_slice::<Value>(&bytes).ok())
            .is_some_and(|value| value.is_object())
    })
}
