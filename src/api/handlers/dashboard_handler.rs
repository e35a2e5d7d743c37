//! Admin dashboard handlers.

use axum::{
    extract::{Extension, State},
    response::Json,
    routing::get,
    Router,
};

use crate::api::middleware::{require_admin, CurrentUser};
use crate::api::AppState;
use crate::errors::AppResult;
use crate::services::DashboardSummary;

/// Create dashboard routes
pub fn dashboard_routes() -> Router<AppState> {
    Router::new().route("/dashboard/summary", get(summary))
}

/// Aggregate shelter counts (admin only)
#[utoipa::path(
    get,
    path = "/dashboard-management/dashboard/summary",
    tag = "Dashboard Management",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Dashboard summary", body = DashboardSummary),
        (status = 403, description = "Admin access only")
    )
)]
pub async fn summary(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<DashboardSummary>> {
    require_admin(&current_user)?;

    let summary = state.dashboard_service.summary().await?;
    Ok(Json(summary))
}
