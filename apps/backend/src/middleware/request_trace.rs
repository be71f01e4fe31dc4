use std::rc::Rc;

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    HttpMessage,
};
use futures_util::future::{ready, LocalBoxFuture, Ready};
use uuid::Uuid;

use crate::trace_ctx;

/// Assigns every request a trace id.
///
/// The id is stored as a `String` in request extensions, installed as the
/// task-local [`trace_ctx`] value for the rest of the chain and echoed in the
/// `x-request-id` response header.
pub struct RequestTrace;

impl<S, B> Transform<S, ServiceRequest> for RequestTrace
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = RequestTraceMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestTraceMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequestTraceMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequestTraceMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let trace_id = Uuid::new_v4().to_string();
        req.extensions_mut().insert(trace_id.clone());

        let service = Rc::clone(&self.service);
        let header_value = header::HeaderValue::from_str(&trace_id)
            .unwrap_or_else(|_| header::HeaderValue::from_static("invalid-uuid"));

        Box::pin(trace_ctx::with_trace_id(trace_id, async move {
            let mut res = service.call(req).await?;
            res.headers_mut().insert(
                header::HeaderName::from_static("x-request-id"),
                header_value,
            );
            Ok(res)
        }))
    }
}
