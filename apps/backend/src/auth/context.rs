use actix_web::{HttpMessage, HttpRequest};

use super::identity::Identity;

/// Authenticated principal attached to a request by the gate.
///
/// Read-only once attached; handlers get it through the extractors.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthContext {
    identity: Identity,
    authorities: Vec<String>,
}

impl AuthContext {
    pub fn from_identity(identity: Identity) -> Self {
        let authorities = identity.role.authorities();
        Self {
            identity,
            authorities,
        }
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn user_id(&self) -> i64 {
        self.identity.id
    }

    pub fn email(&self) -> &str {
        &self.identity.email
    }

    pub fn authorities(&self) -> &[String] {
        &self.authorities
    }

    pub fn has_authority(&self, authority: &str) -> bool {
        self.authorities.iter().any(|a| a == authority)
    }

    pub fn is_admin(&self) -> bool {
        self.identity.is_admin()
    }

    /// Context attached to `req`, if any.
    pub fn from_req(req: &HttpRequest) -> Option<Self> {
        req.extensions().get::<AuthContext>().cloned()
    }
}
