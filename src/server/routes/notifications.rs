//! Notification endpoints
//!
//! Recipients own their notifications: reading and marking them read rides
//! on the ownership branch. Deleting them is deliberately not self-service;
//! it would need a matrix grant nobody below admin holds.

use crate::auth::rbac::{Action, Resource};
use crate::core::models::{Notification, Principal};
use crate::server::middleware::RequireAccess;
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::utils::error::AppError;
use actix_web::{web, HttpResponse, Result as ActixResult};
use serde::Deserialize;
use tracing::info;

/// Configure notification routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/notifications")
            .service(
                web::resource("/{id}/read")
                    .wrap(RequireAccess::new(Resource::Notifications, Action::Update).or_owner())
                    .route(web::post().to(mark_read)),
            )
            .service(
                web::resource("")
                    .wrap(
                        RequireAccess::resource(Resource::Notifications)
                            .get(Action::Read)
                            .post(Action::Create)
                            .or_owner(),
                    )
                    .route(web::get().to(list_notifications))
                    .route(web::post().to(create_notification)),
            ),
    );
}

/// New notification request
#[derive(Debug, Deserialize)]
struct CreateNotificationRequest {
    recipient_id: String,
    subject: String,
    body: String,
}

/// List notifications visible to the caller
async fn list_notifications(
    state: web::Data<AppState>,
    principal: Principal,
) -> ActixResult<HttpResponse> {
    let visible = state.access.engine().filter_by_permission(
        state.store.list_notifications(),
        principal.role,
        &principal.id,
        Resource::Notifications,
        |n| n.owner_id(),
    );
    Ok(HttpResponse::Ok().json(ApiResponse::success(visible)))
}

/// Send a notification
async fn create_notification(
    state: web::Data<AppState>,
    principal: Principal,
    body: web::Json<CreateNotificationRequest>,
) -> ActixResult<HttpResponse> {
    let body = body.into_inner();

    if body.subject.trim().is_empty() {
        return Err(AppError::validation("subject must not be empty").into());
    }
    if state.store.get_user(&body.recipient_id).is_none() {
        return Err(
            AppError::validation(format!("recipient {} does not exist", body.recipient_id)).into(),
        );
    }

    let notification = Notification::new(
        body.recipient_id,
        principal.id.clone(),
        body.subject,
        body.body,
    );
    state.store.put_notification(notification.clone());

    info!(
        notification = %notification.id,
        recipient = %notification.recipient_id,
        by = %principal.id,
        "Notification sent"
    );
    Ok(HttpResponse::Created().json(ApiResponse::success(notification)))
}

/// Mark a notification read
async fn mark_read(
    state: web::Data<AppState>,
    principal: Principal,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let id = path.into_inner();
    let mut notification = state
        .store
        .get_notification(&id)
        .ok_or_else(|| AppError::not_found(format!("notification {}", id)))?;

    let allowed = state.access.engine().can_access_object(
        principal.role,
        &principal.id,
        notification.owner_id(),
        Resource::Notifications,
        Action::Update,
    );
    if !allowed {
        return Err(AppError::not_found(format!("notification {}", id)).into());
    }

    notification.read = true;
    state.store.put_notification(notification.clone());
    Ok(HttpResponse::Ok().json(ApiResponse::success(notification)))
}
