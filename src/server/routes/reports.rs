//! Report endpoints
//!
//! Exports move data out of the platform, so they sit behind the `export`
//! action rather than plain reads.

use crate::auth::rbac::{Action, Resource};
use crate::core::models::{Principal, ScheduleEntry};
use crate::server::middleware::RequireAccess;
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use actix_web::{web, HttpResponse, Result as ActixResult};
use serde::Serialize;
use tracing::info;

/// Configure report routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/reports").service(
            web::resource("/export")
                .wrap(RequireAccess::new(Resource::Reports, Action::Export))
                .route(web::get().to(export_schedule)),
        ),
    );
}

/// Exported schedule report
#[derive(Debug, Serialize)]
struct ScheduleExport {
    entries: Vec<ScheduleEntry>,
    entry_count: usize,
    exported_by: String,
    exported_at: chrono::DateTime<chrono::Utc>,
}

async fn export_schedule(
    state: web::Data<AppState>,
    principal: Principal,
) -> ActixResult<HttpResponse> {
    let entries = state.store.list_schedule();
    let export = ScheduleExport {
        entry_count: entries.len(),
        entries,
        exported_by: principal.id.clone(),
        exported_at: chrono::Utc::now(),
    };

    info!(by = %principal.id, entries = export.entry_count, "Schedule exported");
    Ok(HttpResponse::Ok().json(ApiResponse::success(export)))
}
