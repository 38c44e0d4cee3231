//! Trainer profile endpoints
//!
//! Trainers hold no blanket grant on this collection; editing their own
//! profile rides on the ownership branch of the access engine.

use crate::auth::rbac::{Action, Resource};
use crate::core::models::{Principal, TrainerProfile};
use crate::server::middleware::RequireAccess;
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::utils::error::AppError;
use actix_web::{web, HttpResponse, Result as ActixResult};
use serde::Deserialize;
use tracing::info;

/// Configure trainer profile routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/trainers")
            .service(
                web::resource("/{id}")
                    .wrap(
                        RequireAccess::resource(Resource::Trainers)
                            .get(Action::Read)
                            .put(Action::Update)
                            .delete(Action::Delete)
                            .or_owner(),
                    )
                    .route(web::get().to(get_trainer))
                    .route(web::put().to(update_trainer))
                    .route(web::delete().to(delete_trainer)),
            )
            .service(
                web::resource("")
                    .wrap(
                        RequireAccess::resource(Resource::Trainers)
                            .get(Action::Read)
                            .post(Action::Create)
                            .or_owner(),
                    )
                    .route(web::get().to(list_trainers))
                    .route(web::post().to(create_trainer)),
            ),
    );
}

/// New trainer profile request
#[derive(Debug, Deserialize)]
struct CreateTrainerRequest {
    user_id: String,
    full_name: String,
    bio: Option<String>,
    #[serde(default)]
    specialties: Vec<String>,
}

/// Trainer profile update request
#[derive(Debug, Deserialize)]
struct UpdateTrainerRequest {
    full_name: Option<String>,
    bio: Option<String>,
    specialties: Option<Vec<String>>,
    accepting_clients: Option<bool>,
}

/// List profiles visible to the caller
async fn list_trainers(
    state: web::Data<AppState>,
    principal: Principal,
) -> ActixResult<HttpResponse> {
    let visible = state.access.engine().filter_by_permission(
        state.store.list_trainers(),
        principal.role,
        &principal.id,
        Resource::Trainers,
        |t| t.owner_id(),
    );
    Ok(HttpResponse::Ok().json(ApiResponse::success(visible)))
}

/// Fetch a single profile
async fn get_trainer(
    state: web::Data<AppState>,
    principal: Principal,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let id = path.into_inner();
    let profile = load_visible_trainer(&state, &principal, &id, Action::Read)?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(profile)))
}

/// Create a profile for a user account
async fn create_trainer(
    state: web::Data<AppState>,
    principal: Principal,
    body: web::Json<CreateTrainerRequest>,
) -> ActixResult<HttpResponse> {
    let body = body.into_inner();

    if body.full_name.trim().is_empty() {
        return Err(AppError::validation("full_name must not be empty").into());
    }
    if state.store.get_user(&body.user_id).is_none() {
        return Err(AppError::validation(format!("user {} does not exist", body.user_id)).into());
    }

    let mut profile = TrainerProfile::new(body.user_id, body.full_name);
    profile.bio = body.bio;
    profile.specialties = body.specialties;
    state.store.put_trainer(profile.clone());

    info!(trainer = %profile.id, by = %principal.id, "Trainer profile created");
    Ok(HttpResponse::Created().json(ApiResponse::success(profile)))
}

/// Update a profile
async fn update_trainer(
    state: web::Data<AppState>,
    principal: Principal,
    path: web::Path<String>,
    body: web::Json<UpdateTrainerRequest>,
) -> ActixResult<HttpResponse> {
    let id = path.into_inner();
    let body = body.into_inner();
    let mut profile = load_visible_trainer(&state, &principal, &id, Action::Update)?;

    if let Some(full_name) = body.full_name {
        profile.full_name = full_name;
    }
    if body.bio.is_some() {
        profile.bio = body.bio;
    }
    if let Some(specialties) = body.specialties {
        profile.specialties = specialties;
    }
    if let Some(accepting) = body.accepting_clients {
        profile.accepting_clients = accepting;
    }
    profile.updated_at = chrono::Utc::now();
    state.store.put_trainer(profile.clone());

    info!(trainer = %profile.id, by = %principal.id, "Trainer profile updated");
    Ok(HttpResponse::Ok().json(ApiResponse::success(profile)))
}

/// Remove a profile
async fn delete_trainer(
    state: web::Data<AppState>,
    principal: Principal,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let id = path.into_inner();
    if !state.store.delete_trainer(&id) {
        return Err(AppError::not_found(format!("trainer {}", id)).into());
    }
    info!(trainer = %id, by = %principal.id, "Trainer profile deleted");
    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success(())))
}

fn load_visible_trainer(
    state: &AppState,
    principal: &Principal,
    id: &str,
    action: Action,
) -> Result<TrainerProfile, AppError> {
    let profile = state
        .store
        .get_trainer(id)
        .ok_or_else(|| AppError::not_found(format!("trainer {}", id)))?;

    let allowed = state.access.engine().can_access_object(
        principal.role,
        &principal.id,
        profile.owner_id(),
        Resource::Trainers,
        action,
    );
    if !allowed {
        return Err(AppError::not_found(format!("trainer {}", id)));
    }
    Ok(profile)
}
