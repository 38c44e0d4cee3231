//! Session resolution
//!
//! The boundary to the external session/credential collaborator. This
//! service never verifies credentials itself; it receives an authenticated
//! [`Principal`] through the [`SessionResolver`] seam and trusts it
//! completely. Callers without a resolvable principal are rejected with 401
//! before any authorization logic runs; "who are you" failures and "you may
//! not" failures must never share a status.

use crate::core::models::{Principal, Role};
use crate::server::state::AppState;
use crate::utils::error::AppError;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{web, FromRequest, HttpMessage, HttpRequest};
use futures::future::{ready, Ready};
use std::future::Future;
use std::pin::Pin;
use std::str::FromStr;
use tracing::debug;

/// Resolves the authenticated principal of a request.
///
/// Implemented outside the access engine: by the fronting session service in
/// production, by a header-based resolver in development and tests.
pub trait SessionResolver: Send + Sync {
    /// Resolve the principal, or explain why there is none.
    fn resolve(&self, req: &HttpRequest) -> Result<Principal, AppError>;
}

/// Resolver for deployments behind an authenticating proxy.
///
/// The proxy terminates the session and injects identity headers; this
/// resolver only reads them. It is also what the test suites use to act as
/// arbitrary principals.
pub struct ProxyHeaderResolver {
    id_header: String,
    role_header: String,
}

impl ProxyHeaderResolver {
    /// Resolver reading the standard `x-auth-user-id` / `x-auth-user-role`
    /// headers.
    pub fn new() -> Self {
        Self {
            id_header: "x-auth-user-id".to_string(),
            role_header: "x-auth-user-role".to_string(),
        }
    }
}

impl Default for ProxyHeaderResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionResolver for ProxyHeaderResolver {
    fn resolve(&self, req: &HttpRequest) -> Result<Principal, AppError> {
        let id = req
            .headers()
            .get(&self.id_header)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| AppError::unauthorized("no session"))?;

        let role = req
            .headers()
            .get(&self.role_header)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("no session role"))?;

        let role = Role::from_str(role)
            .map_err(|_| AppError::unauthorized("unrecognized session role"))?;

        Ok(Principal::new(id, role))
    }
}

/// Middleware that resolves the principal and stores it in request
/// extensions for handlers and the authorization gate downstream.
pub struct Authenticate;

impl<S, B> Transform<S, ServiceRequest> for Authenticate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = AuthenticateService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthenticateService { service }))
    }
}

/// Service implementation for [`Authenticate`]
pub struct AuthenticateService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AuthenticateService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let resolved = match req.app_data::<web::Data<AppState>>() {
            Some(state) => state.session.resolve(req.request()),
            None => Err(AppError::internal("missing application state")),
        };

        match resolved {
            Ok(principal) => {
                debug!(principal = %principal.id, role = %principal.role, "Session resolved");
                req.extensions_mut().insert(principal);
                Box::pin(self.service.call(req))
            }
            Err(e) => Box::pin(async move { Err(e.into()) }),
        }
    }
}

impl FromRequest for Principal {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let principal = req
            .extensions()
            .get::<Principal>()
            .cloned()
            .ok_or_else(|| AppError::unauthorized("no session").into());
        ready(principal)
    }
}
