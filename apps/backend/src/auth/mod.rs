//! Stateless bearer-token authentication.
//!
//! [`codec`] signs and parses compact HS256 tokens, [`issuer`] mints them for
//! an [`Identity`], [`verifier`] checks signature, expiry and subject, and
//! [`resolver`] turns a verified subject back into a stored identity.

pub mod claims;
pub mod codec;
pub mod context;
pub mod error;
pub mod identity;
pub mod issuer;
pub mod password;
pub mod resolver;
pub mod verifier;

pub use claims::{Claims, USER_ID_CLAIM};
pub use context::AuthContext;
pub use error::AuthError;
pub use identity::{Identity, Role};
pub use issuer::TokenIssuer;
pub use resolver::{IdentityResolver, IdentityStore};
pub use verifier::TokenVerifier;
