//! Platform operations endpoints

use crate::auth::rbac::{Action, Resource};
use crate::core::models::Principal;
use crate::server::middleware::RequireAccess;
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use actix_web::{web, HttpResponse, Result as ActixResult};
use serde::Deserialize;
use tracing::warn;

/// Configure platform operation routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/system").service(
            web::resource("/maintenance")
                .wrap(RequireAccess::new(Resource::System, Action::Maintenance))
                .route(web::post().to(set_maintenance)),
        ),
    );
}

/// Maintenance toggle request
#[derive(Debug, Deserialize)]
struct MaintenanceRequest {
    enabled: bool,
}

/// Pause or resume booking across the club
async fn set_maintenance(
    state: web::Data<AppState>,
    principal: Principal,
    body: web::Json<MaintenanceRequest>,
) -> ActixResult<HttpResponse> {
    let mut settings = state.store.get_settings();
    settings.maintenance_mode = body.enabled;
    settings.updated_at = chrono::Utc::now();
    state.store.put_settings(settings.clone());

    warn!(enabled = body.enabled, by = %principal.id, "Maintenance mode changed");
    Ok(HttpResponse::Ok().json(ApiResponse::success(settings)))
}
