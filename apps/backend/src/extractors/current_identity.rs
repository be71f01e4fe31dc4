use std::future::{ready, Ready};
use std::ops::Deref;

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};

use crate::auth::AuthContext;
use crate::error::AppError;

/// Authentication context attached by `AuthGate`; rejects anonymous
/// requests with 401.
#[derive(Debug, Clone)]
pub struct CurrentIdentity(pub AuthContext);

impl CurrentIdentity {
    pub fn into_inner(self) -> AuthContext {
        self.0
    }
}

impl Deref for CurrentIdentity {
    type Target = AuthContext;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for CurrentIdentity {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            AuthContext::from_req(req)
                .map(CurrentIdentity)
                .ok_or_else(AppError::unauthorized),
        )
    }
}

/// Authentication context when present; never rejects.
#[derive(Debug, Clone, Default)]
pub struct MaybeIdentity(pub Option<AuthContext>);

impl MaybeIdentity {
    pub fn context(&self) -> Option<&AuthContext> {
        self.0.as_ref()
    }
}

impl FromRequest for MaybeIdentity {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(MaybeIdentity(AuthContext::from_req(req))))
    }
}
