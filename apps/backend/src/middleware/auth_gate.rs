//! Request authentication gate.
//!
//! Reads `Authorization: Bearer <token>`, verifies the token, resolves the
//! identity it names and stores an [`AuthContext`] in request extensions.
//! Every failure degrades to "proceed unauthenticated": the gate never
//! produces a response of its own. Handlers decide through the
//! `CurrentIdentity` / `MaybeIdentity` extractors.

use std::rc::Rc;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{self, HeaderValue};
use actix_web::{web, Error, HttpMessage};
use futures_util::future::{ready, LocalBoxFuture, Ready};
use tracing::{debug, warn};

use crate::auth::AuthContext;
use crate::logging::security;
use crate::state::app_state::AppState;

const BEARER_PREFIX: &str = "Bearer ";

pub struct AuthGate;

impl<S, B> Transform<S, ServiceRequest> for AuthGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthGateMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthGateMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct AuthGateMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthGateMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            authenticate(&req).await;
            service.call(req).await
        })
    }
}

/// Token part of a `Bearer` authorization header.
///
/// `None` for a missing header, non-UTF-8 bytes, any other scheme or an
/// empty token.
pub fn extract_bearer_token(header_value: Option<&HeaderValue>) -> Option<&str> {
    let value = header_value?.to_str().ok()?;
    let token = value.strip_prefix(BEARER_PREFIX)?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

async fn authenticate(req: &ServiceRequest) {
    let token = match extract_bearer_token(req.headers().get(header::AUTHORIZATION)) {
        Some(token) => token.to_owned(),
        None => return,
    };

    let state = match req.app_data::<web::Data<AppState>>() {
        Some(state) => state.clone(),
        None => {
            warn!("AppState not available; request continues unauthenticated");
            return;
        }
    };

    let verifier = state.verifier();
    let subject = match verifier.extract_subject(&token) {
        Ok(subject) => subject,
        Err(e) => {
            debug!(reason = e.reason(), "Bearer token could not be decoded");
            return;
        }
    };

    if req.extensions().contains::<AuthContext>() {
        return;
    }

    let identity = match state.resolver().resolve(&subject).await {
        Ok(identity) => identity,
        Err(e) => {
            security::token_rejected(e.reason(), &subject);
            return;
        }
    };

    if let Err(e) = verifier.verify(&token, Some(&identity)) {
        security::token_rejected(e.reason(), &subject);
        return;
    }

    debug!(user_id = identity.id, "Request authenticated");
    req.extensions_mut()
        .insert(AuthContext::from_identity(identity));
}
