//! Analytics endpoints
//!
//! Aggregates have no owner; access is blanket-grant only.

use crate::auth::rbac::{Action, Resource};
use crate::core::models::EntryStatus;
use crate::server::middleware::RequireAccess;
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use actix_web::{web, HttpResponse, Result as ActixResult};
use serde::Serialize;

/// Configure analytics routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/analytics").service(
            web::resource("/summary")
                .wrap(RequireAccess::new(Resource::Analytics, Action::Read))
                .route(web::get().to(summary)),
        ),
    );
}

/// Club-wide usage summary
#[derive(Debug, Serialize)]
struct AnalyticsSummary {
    total_accounts: usize,
    active_accounts: usize,
    trainer_profiles: usize,
    client_records: usize,
    confirmed_sessions: usize,
    cancelled_sessions: usize,
    generated_at: chrono::DateTime<chrono::Utc>,
}

async fn summary(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    let users = state.store.list_users();
    let schedule = state.store.list_schedule();

    let summary = AnalyticsSummary {
        total_accounts: users.len(),
        active_accounts: users.iter().filter(|u| u.is_active()).count(),
        trainer_profiles: state.store.list_trainers().len(),
        client_records: state.store.list_clients().len(),
        confirmed_sessions: schedule
            .iter()
            .filter(|e| e.status == EntryStatus::Confirmed)
            .count(),
        cancelled_sessions: schedule
            .iter()
            .filter(|e| e.status == EntryStatus::Cancelled)
            .count(),
        generated_at: chrono::Utc::now(),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(summary)))
}
