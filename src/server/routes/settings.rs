//! Club settings endpoints
//!
//! Settings are owner-less: only blanket grants apply, and the gate alone
//! decides.

use crate::auth::rbac::{Action, Resource};
use crate::core::models::Principal;
use crate::server::middleware::RequireAccess;
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::utils::error::AppError;
use actix_web::{web, HttpResponse, Result as ActixResult};
use serde::Deserialize;
use tracing::info;

/// Configure settings routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/settings")
            .wrap(
                RequireAccess::resource(Resource::Settings)
                    .get(Action::Read)
                    .put(Action::Update),
            )
            .route(web::get().to(get_settings))
            .route(web::put().to(update_settings)),
    );
}

/// Settings update request
#[derive(Debug, Deserialize)]
struct UpdateSettingsRequest {
    club_name: Option<String>,
    timezone: Option<String>,
    opening_hour: Option<u8>,
    closing_hour: Option<u8>,
}

async fn get_settings(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::success(state.store.get_settings())))
}

async fn update_settings(
    state: web::Data<AppState>,
    principal: Principal,
    body: web::Json<UpdateSettingsRequest>,
) -> ActixResult<HttpResponse> {
    let body = body.into_inner();
    let mut settings = state.store.get_settings();

    if let Some(club_name) = body.club_name {
        if club_name.trim().is_empty() {
            return Err(AppError::validation("club_name must not be empty").into());
        }
        settings.club_name = club_name;
    }
    if let Some(timezone) = body.timezone {
        settings.timezone = timezone;
    }
    if let Some(opening) = body.opening_hour {
        settings.opening_hour = opening;
    }
    if let Some(closing) = body.closing_hour {
        settings.closing_hour = closing;
    }
    if settings.opening_hour > 23 || settings.closing_hour > 23 {
        return Err(AppError::validation("hours must be between 0 and 23").into());
    }
    if settings.closing_hour <= settings.opening_hour {
        return Err(AppError::validation("closing hour must be after opening hour").into());
    }
    settings.updated_at = chrono::Utc::now();
    state.store.put_settings(settings.clone());

    info!(by = %principal.id, "Club settings updated");
    Ok(HttpResponse::Ok().json(ApiResponse::success(settings)))
}
