//! Coached-client record endpoints
//!
//! Trainers see and edit only the records assigned to them; the member
//! behind a record sees it through the same ownership branch from the other
//! side. Which side counts as owner is decided by the record itself, so
//! list and detail views can never drift apart.

use crate::auth::rbac::{Action, Resource};
use crate::core::models::{ClientRecord, Principal};
use crate::server::middleware::RequireAccess;
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::utils::error::AppError;
use actix_web::{web, HttpResponse, Result as ActixResult};
use serde::Deserialize;
use tracing::info;

/// Configure client record routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/clients")
            .service(
                web::resource("/{id}")
                    .wrap(
                        RequireAccess::resource(Resource::Clients)
                            .get(Action::Read)
                            .put(Action::Update)
                            .delete(Action::Delete)
                            .or_owner(),
                    )
                    .route(web::get().to(get_client))
                    .route(web::put().to(update_client))
                    .route(web::delete().to(delete_client)),
            )
            .service(
                web::resource("")
                    .wrap(
                        RequireAccess::resource(Resource::Clients)
                            .get(Action::Read)
                            .post(Action::Create)
                            .or_owner(),
                    )
                    .route(web::get().to(list_clients))
                    .route(web::post().to(create_client)),
            ),
    );
}

/// New client record request
#[derive(Debug, Deserialize)]
struct CreateClientRequest {
    full_name: String,
    trainer_id: Option<String>,
    member_user_id: Option<String>,
    goals: Option<String>,
}

/// Client record update request
#[derive(Debug, Deserialize)]
struct UpdateClientRequest {
    full_name: Option<String>,
    trainer_id: Option<String>,
    goals: Option<String>,
    notes: Option<String>,
}

/// List records visible to the caller
async fn list_clients(
    state: web::Data<AppState>,
    principal: Principal,
) -> ActixResult<HttpResponse> {
    let role = principal.role;
    let visible = state.access.engine().filter_by_permission(
        state.store.list_clients(),
        role,
        &principal.id,
        Resource::Clients,
        |record| record.owner_for(role),
    );
    Ok(HttpResponse::Ok().json(ApiResponse::success(visible)))
}

/// Fetch a single record
async fn get_client(
    state: web::Data<AppState>,
    principal: Principal,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let id = path.into_inner();
    let record = load_visible_client(&state, &principal, &id, Action::Read)?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(record)))
}

/// Create a record
async fn create_client(
    state: web::Data<AppState>,
    principal: Principal,
    body: web::Json<CreateClientRequest>,
) -> ActixResult<HttpResponse> {
    let body = body.into_inner();

    if body.full_name.trim().is_empty() {
        return Err(AppError::validation("full_name must not be empty").into());
    }

    let mut record = ClientRecord::new(body.full_name);
    record.trainer_id = body.trainer_id;
    record.member_user_id = body.member_user_id;
    record.goals = body.goals;
    state.store.put_client(record.clone());

    info!(client = %record.id, by = %principal.id, "Client record created");
    Ok(HttpResponse::Created().json(ApiResponse::success(record)))
}

/// Update a record
async fn update_client(
    state: web::Data<AppState>,
    principal: Principal,
    path: web::Path<String>,
    body: web::Json<UpdateClientRequest>,
) -> ActixResult<HttpResponse> {
    let id = path.into_inner();
    let body = body.into_inner();
    let mut record = load_visible_client(&state, &principal, &id, Action::Update)?;

    // Reassigning a record to another trainer is a management act, not
    // self-service.
    if let Some(trainer_id) = body.trainer_id {
        if !state
            .access
            .engine()
            .has_permission(principal.role, Resource::Clients, Action::Update)
        {
            return Err(AppError::forbidden("reassigning clients requires a clients grant").into());
        }
        record.trainer_id = Some(trainer_id);
    }
    if let Some(full_name) = body.full_name {
        record.full_name = full_name;
    }
    if body.goals.is_some() {
        record.goals = body.goals;
    }
    if body.notes.is_some() {
        record.notes = body.notes;
    }
    record.updated_at = chrono::Utc::now();
    state.store.put_client(record.clone());

    info!(client = %record.id, by = %principal.id, "Client record updated");
    Ok(HttpResponse::Ok().json(ApiResponse::success(record)))
}

/// Remove a record
async fn delete_client(
    state: web::Data<AppState>,
    principal: Principal,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let id = path.into_inner();
    if !state.store.delete_client(&id) {
        return Err(AppError::not_found(format!("client {}", id)).into());
    }
    info!(client = %id, by = %principal.id, "Client record deleted");
    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success(())))
}

fn load_visible_client(
    state: &AppState,
    principal: &Principal,
    id: &str,
    action: Action,
) -> Result<ClientRecord, AppError> {
    let record = state
        .store
        .get_client(id)
        .ok_or_else(|| AppError::not_found(format!("client {}", id)))?;

    let allowed = state.access.engine().can_access_object(
        principal.role,
        &principal.id,
        record.owner_for(principal.role),
        Resource::Clients,
        action,
    );
    if !allowed {
        return Err(AppError::not_found(format!("client {}", id)));
    }
    Ok(record)
}
