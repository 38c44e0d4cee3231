//! HTTP middleware implementations
//!
//! This module provides the middleware around request processing:
//! - Session resolution (who is calling)
//! - Per-route authorization gates (may they call this)
//! - Request ID tagging

mod authorize;
mod request_id;
mod session;


pub use authorize::{RequireAccess, RequireAccessService};
pub use request_id::{RequestIdMiddleware, RequestIdMiddlewareService};
pub use session::{Authenticate, AuthenticateService, ProxyHeaderResolver, SessionResolver};
