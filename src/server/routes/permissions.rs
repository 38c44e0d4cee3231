//! Permission query endpoints
//!
//! The UI asks here what to show: the summary grid drives which screens and
//! buttons render, and the point query backs per-record affordances. Both
//! answers come from the same engine the route gates use, so what the UI
//! offers and what the server allows cannot drift apart.

use crate::auth::rbac::{Action, Resource};
use crate::core::models::Principal;
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use actix_web::{web, HttpResponse, Result as ActixResult};
use serde::{Deserialize, Serialize};

/// Configure permission query routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/permissions")
            .route("/me", web::get().to(my_permissions))
            .route("/check", web::get().to(check_permission)),
    );
}

/// Point permission query
#[derive(Debug, Deserialize)]
struct CheckQuery {
    resource: Resource,
    action: Action,
    owner_id: Option<String>,
}

/// Point permission verdict
#[derive(Debug, Serialize)]
struct CheckResponse {
    resource: Resource,
    action: Action,
    allowed: bool,
}

/// Full permission grid for the caller
async fn my_permissions(
    state: web::Data<AppState>,
    principal: Principal,
) -> ActixResult<HttpResponse> {
    let summary = state.facade.summary_for(&principal);
    Ok(HttpResponse::Ok().json(ApiResponse::success(summary)))
}

/// Single verdict for a UI affordance
async fn check_permission(
    state: web::Data<AppState>,
    principal: Principal,
    query: web::Query<CheckQuery>,
) -> ActixResult<HttpResponse> {
    let query = query.into_inner();
    let allowed = state.facade.can_touch(
        &principal,
        query.owner_id.as_deref(),
        query.resource,
        query.action,
    );

    Ok(HttpResponse::Ok().json(ApiResponse::success(CheckResponse {
        resource: query.resource,
        action: query.action,
        allowed,
    })))
}
