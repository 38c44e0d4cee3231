//! Schedule endpoints
//!
//! Trainers manage the sessions they run, clients see the sessions booked
//! for them, managers see the whole board. Cancelling a session is an
//! update (ownership covers it); removing one from history is a delete and
//! needs a blanket grant.

use crate::auth::rbac::{Action, Resource};
use crate::core::models::{EntryStatus, Principal, Role, ScheduleEntry};
use crate::server::middleware::RequireAccess;
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::utils::error::AppError;
use actix_web::{web, HttpResponse, Result as ActixResult};
use serde::Deserialize;
use tracing::{debug, info};

/// Configure schedule routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/schedule")
            .service(
                web::resource("/{id}")
                    .wrap(
                        RequireAccess::resource(Resource::Schedule)
                            .get(Action::Read)
                            .put(Action::Update)
                            .delete(Action::Delete)
                            .or_owner(),
                    )
                    .route(web::get().to(get_entry))
                    .route(web::put().to(update_entry))
                    .route(web::delete().to(delete_entry)),
            )
            .service(
                web::resource("")
                    .wrap(
                        RequireAccess::resource(Resource::Schedule)
                            .get(Action::Read)
                            .post(Action::Create)
                            .or_owner(),
                    )
                    .route(web::get().to(list_entries))
                    .route(web::post().to(create_entry)),
            ),
    );
}

/// New schedule entry request
#[derive(Debug, Deserialize)]
struct CreateEntryRequest {
    title: String,
    trainer_id: Option<String>,
    client_id: Option<String>,
    starts_at: chrono::DateTime<chrono::Utc>,
    ends_at: chrono::DateTime<chrono::Utc>,
}

/// Schedule entry update request
#[derive(Debug, Deserialize)]
struct UpdateEntryRequest {
    title: Option<String>,
    client_id: Option<String>,
    starts_at: Option<chrono::DateTime<chrono::Utc>>,
    ends_at: Option<chrono::DateTime<chrono::Utc>>,
    status: Option<EntryStatus>,
}

/// List entries visible to the caller
async fn list_entries(
    state: web::Data<AppState>,
    principal: Principal,
) -> ActixResult<HttpResponse> {
    let role = principal.role;
    let visible = state.access.engine().filter_by_permission(
        state.store.list_schedule(),
        role,
        &principal.id,
        Resource::Schedule,
        |entry| entry.owner_for(role),
    );

    debug!(count = visible.len(), "Listing schedule entries");
    Ok(HttpResponse::Ok().json(ApiResponse::success(visible)))
}

/// Fetch a single entry
async fn get_entry(
    state: web::Data<AppState>,
    principal: Principal,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let id = path.into_inner();
    let entry = load_visible_entry(&state, &principal, &id, Action::Read)?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(entry)))
}

/// Book a session
async fn create_entry(
    state: web::Data<AppState>,
    principal: Principal,
    body: web::Json<CreateEntryRequest>,
) -> ActixResult<HttpResponse> {
    let body = body.into_inner();

    if state.store.get_settings().maintenance_mode {
        return Err(AppError::conflict("booking is paused for maintenance").into());
    }
    if body.title.trim().is_empty() {
        return Err(AppError::validation("title must not be empty").into());
    }
    if body.ends_at <= body.starts_at {
        return Err(AppError::validation("session must end after it starts").into());
    }

    // Trainers book for themselves; scheduling on behalf of another trainer
    // is for roles holding the blanket grant.
    let trainer_id = match principal.role {
        Role::Trainer => principal.id.clone(),
        _ => body
            .trainer_id
            .ok_or_else(|| AppError::validation("trainer_id is required"))?,
    };

    let mut entry = ScheduleEntry::new(body.title, trainer_id, body.starts_at, body.ends_at);
    entry.client_id = body.client_id;
    state.store.put_schedule_entry(entry.clone());

    info!(entry = %entry.id, trainer = %entry.trainer_id, by = %principal.id, "Session booked");
    Ok(HttpResponse::Created().json(ApiResponse::success(entry)))
}

/// Update or cancel a session
async fn update_entry(
    state: web::Data<AppState>,
    principal: Principal,
    path: web::Path<String>,
    body: web::Json<UpdateEntryRequest>,
) -> ActixResult<HttpResponse> {
    let id = path.into_inner();
    let body = body.into_inner();
    let mut entry = load_visible_entry(&state, &principal, &id, Action::Update)?;

    if let Some(title) = body.title {
        entry.title = title;
    }
    if body.client_id.is_some() {
        entry.client_id = body.client_id;
    }
    if let Some(starts_at) = body.starts_at {
        entry.starts_at = starts_at;
    }
    if let Some(ends_at) = body.ends_at {
        entry.ends_at = ends_at;
    }
    if let Some(status) = body.status {
        entry.status = status;
    }
    if entry.ends_at <= entry.starts_at {
        return Err(AppError::validation("session must end after it starts").into());
    }
    entry.updated_at = chrono::Utc::now();
    state.store.put_schedule_entry(entry.clone());

    info!(entry = %entry.id, by = %principal.id, "Session updated");
    Ok(HttpResponse::Ok().json(ApiResponse::success(entry)))
}

/// Remove an entry from the board
async fn delete_entry(
    state: web::Data<AppState>,
    principal: Principal,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let id = path.into_inner();
    if !state.store.delete_schedule_entry(&id) {
        return Err(AppError::not_found(format!("schedule entry {}", id)).into());
    }
    info!(entry = %id, by = %principal.id, "Session removed");
    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success(())))
}

fn load_visible_entry(
    state: &AppState,
    principal: &Principal,
    id: &str,
    action: Action,
) -> Result<ScheduleEntry, AppError> {
    let entry = state
        .store
        .get_schedule_entry(id)
        .ok_or_else(|| AppError::not_found(format!("schedule entry {}", id)))?;

    let allowed = state.access.engine().can_access_object(
        principal.role,
        &principal.id,
        entry.owner_for(principal.role),
        Resource::Schedule,
        action,
    );
    if !allowed {
        return Err(AppError::not_found(format!("schedule entry {}", id)));
    }
    Ok(entry)
}
