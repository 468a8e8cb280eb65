//! Navigation guard middleware
//!
//! Assembles the session from request headers, resolves the gate chain
//! for the requested path, and answers redirects with `303 See Other`
//! before the inner service runs. The chain is short-circuit: a redirect
//! is immediate and final for that request.

use crate::auth::guards::{GateContext, GateResult, evaluate_chain};
use crate::server::AppState;
use crate::server::middleware::helpers::{gates_for_path, session_from_headers};
use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::{HttpResponse, http::header, web};
use futures::future::{Ready, ready};
use serde::Serialize;
use std::future::Future;
use std::pin::Pin;
use tracing::debug;

#[derive(Serialize)]
struct RedirectBody<'a> {
    outcome: &'a str,
    to: &'a str,
}

/// Guard middleware for Actix-web
pub struct GuardMiddleware;

impl<S, B> Transform<S, ServiceRequest> for GuardMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = GuardMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(GuardMiddlewareService { service }))
    }
}

/// Service implementation for guard middleware
pub struct GuardMiddlewareService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for GuardMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let gates = gates_for_path(req.path());

        // Borrows of the request end here; only the owned target escapes
        let redirect_to = if gates.is_empty() {
            None
        } else {
            req.app_data::<web::Data<AppState>>().and_then(|state| {
                let session_config = state.config.session();
                let session = session_from_headers(req.headers());
                let identity = session.read_identity();
                let ctx = GateContext {
                    session: &session,
                    identity: identity.as_ref(),
                    config: session_config,
                };

                match evaluate_chain(&gates, &ctx) {
                    GateResult::Allow => None,
                    GateResult::Redirect { to } => Some(to),
                }
            })
        };

        if let Some(to) = redirect_to {
            debug!(path = req.path(), to = %to, "navigation redirected");
            let response = HttpResponse::SeeOther()
                .insert_header((header::LOCATION, to.clone()))
                .json(RedirectBody {
                    outcome: "redirect",
                    to: &to,
                });
            let response = req.into_response(response).map_into_right_body();
            return Box::pin(ready(Ok(response)));
        }

        let fut = self.service.call(req);
        Box::pin(async move {
            let res = fut.await?;
            Ok(res.map_into_left_body())
        })
    }
}
