use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Regex patterns used for log redaction. All are vetted literals.
pub struct PiiRegexRegistry;

impl PiiRegexRegistry {
    /// Compact JWS (`header.payload.signature`) in base64url.
    pub fn jwt() -> &'static Regex {
        static JWT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"\b[A-Za-z0-9_-]{8,}\.[A-Za-z0-9_-]{8,}\.[A-Za-z0-9_-]{8,}\b").unwrap()
        });
        &JWT_REGEX
    }

    /// Standard email addresses.
    pub fn email() -> &'static Regex {
        static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{1,}\b").unwrap()
        });
        &EMAIL_REGEX
    }

    /// Opaque base64/base64url runs of at least 16 characters.
    pub fn opaque_token() -> &'static Regex {
        static TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"\b[A-Za-z0-9+/_-]{16,}={0,2}").unwrap()
        });
        &TOKEN_REGEX
    }
}

/// Masks secrets and personal data in free text before it reaches the logs.
///
/// - JWTs become `[REDACTED_JWT]`
/// - emails keep the first local character and the domain (`a***@x.com`)
/// - remaining opaque runs of 16+ base64 characters become `[REDACTED_TOKEN]`
///
/// JWTs go first so their segments are not half-matched by the later passes.
pub fn redact(input: &str) -> String {
    let without_jwt = PiiRegexRegistry::jwt().replace_all(input, "[REDACTED_JWT]");

    let without_email =
        PiiRegexRegistry::email().replace_all(&without_jwt, |caps: &regex::Captures| {
            let full = &caps[0];
            match full.split_once('@') {
                Some((local, domain)) => match local.chars().next() {
                    Some(first) => format!("{first}***@{domain}"),
                    None => format!("@{domain}"),
                },
                None => full.to_string(),
            }
        });

    PiiRegexRegistry::opaque_token()
        .replace_all(&without_email, "[REDACTED_TOKEN]")
        .into_owned()
}

/// Display wrapper that applies [`redact`] when formatted.
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}
