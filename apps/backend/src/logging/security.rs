use tracing::warn;

use crate::logging::pii::Redacted;
use crate::trace_ctx;

/// Log a rejected email/password login attempt.
pub fn login_failed(reason: &str, email: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_LOGIN_FAILED",
        %trace_id,
        email = %Redacted(email),
        reason,
        "Authentication failure"
    );
}

/// Log a bearer token that carried a subject but did not yield an
/// authentication context.
pub fn token_rejected(reason: &str, subject: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_TOKEN_REJECTED",
        %trace_id,
        subject = %Redacted(subject),
        reason,
        "Bearer token rejected; continuing unauthenticated"
    );
}
