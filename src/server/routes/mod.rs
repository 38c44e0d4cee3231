//! HTTP route modules
//!
//! All route handlers, organized per collection. Every privileged scope
//! declares its resource/action gate at registration; handlers only add the
//! object-level decisions the gate cannot make.

pub mod analytics;
pub mod clients;
pub mod health;
pub mod notifications;
pub mod permissions;
pub mod reports;
pub mod schedule;
pub mod settings;
pub mod system;
pub mod trainers;
pub mod users;

use crate::server::middleware::Authenticate;
use actix_web::web;

/// Standard API response structure
#[derive(Debug, Clone, serde::Serialize)]
pub struct ApiResponse<T> {
    /// Whether the request was successful
    pub success: bool,
    /// Response data (if successful)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error message (if failed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T>
where
    T: serde::Serialize,
{
    /// Create a successful response
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Create an error response
    pub fn error(message: String) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            error: Some(message),
        }
    }
}

/// Mount the authenticated API under `/api/v1`.
///
/// Session resolution wraps the whole scope; the per-resource gates inside
/// run with the principal already in place.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .wrap(Authenticate)
            .configure(users::configure_routes)
            .configure(trainers::configure_routes)
            .configure(clients::configure_routes)
            .configure(schedule::configure_routes)
            .configure(analytics::configure_routes)
            .configure(reports::configure_routes)
            .configure(notifications::configure_routes)
            .configure(settings::configure_routes)
            .configure(system::configure_routes)
            .configure(permissions::configure_routes),
    );
}
