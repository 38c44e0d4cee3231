//! Authorization gate middleware
//!
//! [`RequireAccess`] sits between the transport layer and a handler. Every
//! protected route declares its `(resource, action)` pair here, at
//! registration time; the gate consults the access engine and answers 403
//! before the handler ever runs. Object-level ownership checks stay inside
//! handlers, because the target record is not loaded yet when the gate fires.

use crate::auth::rbac::{Action, Resource};
use crate::core::models::Principal;
use crate::server::state::AppState;
use crate::utils::error::AppError;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::Method;
use actix_web::{web, HttpMessage};
use futures::future::{ready, Ready};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use tracing::debug;

#[derive(Debug, Clone)]
struct Gate {
    resource: Resource,
    default_action: Option<Action>,
    rules: Vec<(Method, Action)>,
    defer_self_service: bool,
}

impl Gate {
    fn action_for(&self, method: &Method) -> Option<Action> {
        self.rules
            .iter()
            .find(|(m, _)| m == method)
            .map(|(_, a)| *a)
            .or(self.default_action)
    }
}

/// Per-route authorization gate.
///
/// Strict by default: the principal's role must hold the blanket grant.
/// Routes whose records support self-service opt into [`or_owner`]
/// semantics: read/update pass the gate and the handler finishes the
/// decision with `can_access_object` (or `filter_by_permission` for
/// collections) once it knows the record's owner.
///
/// [`or_owner`]: RequireAccess::or_owner
pub struct RequireAccess {
    gate: Rc<Gate>,
}

impl RequireAccess {
    /// Gate every method of the wrapped route behind one action.
    pub fn new(resource: Resource, action: Action) -> Self {
        Self {
            gate: Rc::new(Gate {
                resource,
                default_action: Some(action),
                rules: Vec::new(),
                defer_self_service: false,
            }),
        }
    }

    /// Gate with per-method actions; methods without a mapping are denied.
    pub fn resource(resource: Resource) -> Self {
        Self {
            gate: Rc::new(Gate {
                resource,
                default_action: None,
                rules: Vec::new(),
                defer_self_service: false,
            }),
        }
    }

    /// Map an HTTP method to the action it requires.
    pub fn method(mut self, method: Method, action: Action) -> Self {
        let gate = Rc::make_mut(&mut self.gate);
        gate.rules.push((method, action));
        self
    }

    /// Map `GET` to the given action.
    pub fn get(self, action: Action) -> Self {
        self.method(Method::GET, action)
    }

    /// Map `POST` to the given action.
    pub fn post(self, action: Action) -> Self {
        self.method(Method::POST, action)
    }

    /// Map `PUT` to the given action.
    pub fn put(self, action: Action) -> Self {
        self.method(Method::PUT, action)
    }

    /// Map `DELETE` to the given action.
    pub fn delete(self, action: Action) -> Self {
        self.method(Method::DELETE, action)
    }

    /// Let self-service actions (read/update) through to the handler, which
    /// must finish the decision at object level. Ownership can substitute
    /// for a missing blanket grant, and only the handler knows the owner.
    pub fn or_owner(mut self) -> Self {
        let gate = Rc::make_mut(&mut self.gate);
        gate.defer_self_service = true;
        self
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireAccess
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = RequireAccessService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireAccessService {
            service,
            gate: self.gate.clone(),
        }))
    }
}

/// Service implementation for [`RequireAccess`]
pub struct RequireAccessService<S> {
    service: S,
    gate: Rc<Gate>,
}

impl<S, B> Service<ServiceRequest> for RequireAccessService<S>
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
        let principal = req.extensions().get::<Principal>().cloned();
        let Some(principal) = principal else {
            // The session middleware runs before this gate; reaching here
            // without a principal means the route is miswired.
            return Box::pin(async move {
                Err(AppError::unauthorized("no session").into())
            });
        };

        let Some(action) = self.gate.action_for(req.method()) else {
            let method = req.method().clone();
            let resource = self.gate.resource;
            return Box::pin(async move {
                Err(AppError::forbidden(format!(
                    "method {} not permitted on {}",
                    method, resource
                ))
                .into())
            });
        };

        let Some(state) = req.app_data::<web::Data<AppState>>() else {
            return Box::pin(async move {
                Err(AppError::internal("missing application state").into())
            });
        };

        let engine = state.access.engine();
        let allowed = engine.has_permission(principal.role, self.gate.resource, action)
            || (self.gate.defer_self_service && action.is_self_service());

        if !allowed {
            debug!(
                principal = %principal.id,
                role = %principal.role,
                resource = %self.gate.resource,
                action = %action,
                "Request denied at the resource gate"
            );
            let resource = self.gate.resource;
            return Box::pin(async move {
                Err(AppError::forbidden(format!(
                    "role may not {} {}",
                    action, resource
                ))
                .into())
            });
        }

        Box::pin(self.service.call(req))
    }
}
