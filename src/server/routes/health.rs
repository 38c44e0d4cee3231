//! Health check endpoint
//!
//! Public liveness probe for load balancers; everything else on the API
//! requires a session.

use crate::server::routes::ApiResponse;
use actix_web::{HttpResponse, Result as ActixResult};
use serde::Serialize;
use std::borrow::Cow;
use tracing::debug;

/// Health status payload
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    /// Service status
    pub status: Cow<'static, str>,
    /// Current time
    pub timestamp: chrono::DateTime<chrono::Utc>,
    /// Build version
    pub version: Cow<'static, str>,
}

/// Basic health check endpoint
pub async fn health_check() -> ActixResult<HttpResponse> {
    debug!("Health check requested");

    let health_status = HealthStatus {
        status: Cow::Borrowed("healthy"),
        timestamp: chrono::Utc::now(),
        version: Cow::Borrowed(env!("CARGO_PKG_VERSION")),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(health_status)))
}
