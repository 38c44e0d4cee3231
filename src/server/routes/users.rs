//! User account endpoints
//!
//! Account listing and detail are ownership-aware: roles without a blanket
//! grant still see and edit their own account. Provisioning goes through the
//! delegation ladder: the requested role must be one the caller may manage.

use crate::auth::rbac::{Action, Resource};
use crate::core::models::{Principal, Role, UserAccount};
use crate::server::middleware::RequireAccess;
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::utils::error::AppError;
use actix_web::{web, HttpResponse, Result as ActixResult};
use serde::Deserialize;
use tracing::{debug, info};

/// Configure user account routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users")
            .service(
                web::resource("/assignable-roles")
                    .wrap(RequireAccess::new(Resource::Users, Action::Read).or_owner())
                    .route(web::get().to(assignable_roles)),
            )
            .service(
                web::resource("/{id}")
                    .wrap(
                        RequireAccess::resource(Resource::Users)
                            .get(Action::Read)
                            .put(Action::Update)
                            .delete(Action::Delete)
                            .or_owner(),
                    )
                    .route(web::get().to(get_user))
                    .route(web::put().to(update_user))
                    .route(web::delete().to(delete_user)),
            )
            .service(
                web::resource("")
                    .wrap(
                        RequireAccess::resource(Resource::Users)
                            .get(Action::Read)
                            .post(Action::Create)
                            .or_owner(),
                    )
                    .route(web::get().to(list_users))
                    .route(web::post().to(create_user)),
            ),
    );
}

/// New account request
#[derive(Debug, Deserialize)]
struct CreateUserRequest {
    username: String,
    email: String,
    role: Role,
    display_name: Option<String>,
}

/// Account update request
#[derive(Debug, Deserialize)]
struct UpdateUserRequest {
    email: Option<String>,
    display_name: Option<String>,
    role: Option<Role>,
}

/// List accounts visible to the caller
async fn list_users(
    state: web::Data<AppState>,
    principal: Principal,
) -> ActixResult<HttpResponse> {
    let engine = state.access.engine();
    let visible = engine.filter_by_permission(
        state.store.list_users(),
        principal.role,
        &principal.id,
        Resource::Users,
        |u| Some(u.id.as_str()),
    );

    debug!(count = visible.len(), "Listing user accounts");
    Ok(HttpResponse::Ok().json(ApiResponse::success(visible)))
}

/// Fetch a single account
async fn get_user(
    state: web::Data<AppState>,
    principal: Principal,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let id = path.into_inner();
    let user = load_visible_user(&state, &principal, &id, Action::Read)?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(user)))
}

/// Provision a new account
async fn create_user(
    state: web::Data<AppState>,
    principal: Principal,
    body: web::Json<CreateUserRequest>,
) -> ActixResult<HttpResponse> {
    let body = body.into_inner();

    if body.username.trim().is_empty() {
        return Err(AppError::validation("username must not be empty").into());
    }
    if !body.email.contains('@') {
        return Err(AppError::validation("email address is not valid").into());
    }
    if state.store.username_taken(&body.username) {
        return Err(AppError::conflict(format!("username '{}' is taken", body.username)).into());
    }

    // Provisioning follows the delegation ladder, not the matrix: the
    // requested role must sit strictly below the caller's.
    let engine = state.access.engine();
    if !engine.can_manage_role(principal.role, body.role) {
        return Err(AppError::forbidden(format!(
            "role {} may not provision {} accounts",
            principal.role, body.role
        ))
        .into());
    }

    let mut user = UserAccount::new(body.username, body.email, body.role);
    user.display_name = body.display_name;
    state.store.put_user(user.clone());

    info!(user = %user.id, role = %user.role, by = %principal.id, "Account provisioned");
    Ok(HttpResponse::Created().json(ApiResponse::success(user)))
}

/// Update an account
async fn update_user(
    state: web::Data<AppState>,
    principal: Principal,
    path: web::Path<String>,
    body: web::Json<UpdateUserRequest>,
) -> ActixResult<HttpResponse> {
    let id = path.into_inner();
    let body = body.into_inner();
    let mut user = load_visible_user(&state, &principal, &id, Action::Update)?;

    if let Some(role) = body.role {
        // A role change is a provisioning act on both the old and the new
        // role; self-service never qualifies.
        let engine = state.access.engine();
        if !engine.can_manage_role(principal.role, user.role)
            || !engine.can_manage_role(principal.role, role)
        {
            return Err(AppError::forbidden(format!(
                "role {} may not move this account to {}",
                principal.role, role
            ))
            .into());
        }
        user.role = role;
    }
    if let Some(email) = body.email {
        if !email.contains('@') {
            return Err(AppError::validation("email address is not valid").into());
        }
        user.email = email;
    }
    if body.display_name.is_some() {
        user.display_name = body.display_name;
    }
    user.updated_at = chrono::Utc::now();
    state.store.put_user(user.clone());

    info!(user = %user.id, by = %principal.id, "Account updated");
    Ok(HttpResponse::Ok().json(ApiResponse::success(user)))
}

/// Delete an account
async fn delete_user(
    state: web::Data<AppState>,
    principal: Principal,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let id = path.into_inner();
    let user = state
        .store
        .get_user(&id)
        .ok_or_else(|| AppError::not_found(format!("user {}", id)))?;

    if !state.access.engine().can_manage_role(principal.role, user.role) {
        return Err(AppError::forbidden(format!(
            "role {} may not delete {} accounts",
            principal.role, user.role
        ))
        .into());
    }

    state.store.delete_user(&id);
    info!(user = %id, by = %principal.id, "Account deleted");
    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success(())))
}

/// Roles the caller may assign when provisioning
async fn assignable_roles(
    state: web::Data<AppState>,
    principal: Principal,
) -> ActixResult<HttpResponse> {
    let roles = state.facade.creatable_roles(&principal);
    Ok(HttpResponse::Ok().json(ApiResponse::success(roles)))
}

/// Load an account the caller may act on, folding authorization denial into
/// "not found" so account ids cannot be probed.
fn load_visible_user(
    state: &AppState,
    principal: &Principal,
    id: &str,
    action: Action,
) -> Result<UserAccount, AppError> {
    let user = state
        .store
        .get_user(id)
        .ok_or_else(|| AppError::not_found(format!("user {}", id)))?;

    let allowed = state.access.engine().can_access_object(
        principal.role,
        &principal.id,
        Some(&user.id),
        Resource::Users,
        action,
    );
    if !allowed {
        return Err(AppError::not_found(format!("user {}", id)));
    }
    Ok(user)
}
