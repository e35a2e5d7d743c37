//! Adoption application handlers.

use axum::{
    extract::{Extension, Path, Query, State},
    response::Json,
    routing::{get, patch, put},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{require_admin, require_role, CurrentUser};
use crate::api::AppState;
use crate::config::{DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE};
use crate::domain::{ApplicationResponse, ApplicationStatus, UserRole};
use crate::errors::{AppError, AppResult};
use crate::types::{Created, NoContent, Paginated, PaginationParams};

/// Application submission request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateApplicationRequest {
    /// Animal to apply for
    pub animal_id: Uuid,
    /// Why this adopter is a good match
    #[schema(example = "I have a fenced garden and no other pets")]
    pub reason: Option<String>,
}

/// Status transition request (admin decision)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateApplicationStatusRequest {
    /// Target status: Approved or Rejected
    #[schema(example = "Approved")]
    pub application_status: ApplicationStatus,
}

/// Adopter-side update: change the reason, or cancel the application
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateApplicationByAdopterRequest {
    /// Replacement reason text
    pub reason: Option<String>,
    /// Withdraw the application entirely
    #[serde(default)]
    pub cancel: bool,
}

/// Listing query: pagination plus an optional status filter
#[derive(Debug, Deserialize)]
pub struct ListApplicationsQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub status: Option<String>,
}

impl ListApplicationsQuery {
    fn pagination(&self) -> PaginationParams {
        PaginationParams {
            page: self.page.unwrap_or(DEFAULT_PAGE_NUMBER),
            limit: self.limit.unwrap_or(DEFAULT_PAGE_SIZE),
        }
    }

    fn status(&self) -> AppResult<Option<ApplicationStatus>> {
        match self.status.as_deref() {
            None => Ok(None),
            Some("Submitted") => Ok(Some(ApplicationStatus::Submitted)),
            Some("Approved") => Ok(Some(ApplicationStatus::Approved)),
            Some("Rejected") => Ok(Some(ApplicationStatus::Rejected)),
            Some(other) => Err(AppError::validation(format!(
                "Unknown application status '{}'",
                other
            ))),
        }
    }
}

/// Create application management routes
pub fn application_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/applications",
            get(list_applications).post(create_application),
        )
        .route("/applications/current-adopter", get(my_applications))
        .route("/applications/:id", get(get_application))
        .route("/applications/:id/status", patch(update_application_status))
        .route("/applications/:id/adopter", put(update_application_by_adopter))
}

/// List all applications, paginated (admin only)
#[utoipa::path(
    get,
    path = "/application-management/applications",
    tag = "Application Management",
    security(("bearer_auth" = [])),
    params(
        ("page" = Option<u64>, Query, description = "Page number, starting at 1"),
        ("limit" = Option<u64>, Query, description = "Page size, 1..100"),
        ("status" = Option<String>, Query, description = "Submitted, Approved or Rejected")
    ),
    responses(
        (status = 200, description = "Page of applications"),
        (status = 403, description = "Admin access only")
    )
)]
pub async fn list_applications(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Query(query): Query<ListApplicationsQuery>,
) -> AppResult<Json<Paginated<ApplicationResponse>>> {
    require_admin(&current_user)?;

    let params = query.pagination();
    params.validate()?;
    let status = query.status()?;

    let (details, total) = state
        .application_service
        .list_applications(status, params.clone())
        .await?;

    Ok(Json(Paginated::new(
        details.into_iter().map(ApplicationResponse::from).collect(),
        params.page,
        params.limit(),
        total,
    )))
}

/// List the authenticated adopter's own applications
#[utoipa::path(
    get,
    path = "/application-management/applications/current-adopter",
    tag = "Application Management",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "The adopter's applications"),
        (status = 403, description = "Adopter access only")
    )
)]
pub async fn my_applications(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ApplicationResponse>>> {
    require_role(&current_user, &[UserRole::Adopter])?;

    let details = state
        .application_service
        .list_for_adopter(current_user.id)
        .await?;

    Ok(Json(
        details.into_iter().map(ApplicationResponse::from).collect(),
    ))
}

/// Get one application (admin, or the owning adopter)
#[utoipa::path(
    get,
    path = "/application-management/applications/{id}",
    tag = "Application Management",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Application details", body = ApplicationResponse),
        (status = 403, description = "Not allowed to view this application"),
        (status = 404, description = "Application not found")
    )
)]
pub async fn get_application(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApplicationResponse>> {
    require_role(&current_user, &[UserRole::Admin, UserRole::Adopter])?;

    let details = state.application_service.get_application(id).await?;

    // Adopters may only see their own applications
    if current_user.role == UserRole::Adopter
        && details.application.adopter_id != current_user.id
    {
        return Err(AppError::Forbidden);
    }

    Ok(Json(ApplicationResponse::from(details)))
}

/// Submit an adoption application (adopter only)
#[utoipa::path(
    post,
    path = "/application-management/applications",
    tag = "Application Management",
    security(("bearer_auth" = [])),
    request_body = CreateApplicationRequest,
    responses(
        (status = 201, description = "Application submitted", body = ApplicationResponse),
        (status = 403, description = "Adopter access only"),
        (status = 404, description = "Animal not found"),
        (status = 409, description = "Animal already adopted, or duplicate application")
    )
)]
pub async fn create_application(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateApplicationRequest>,
) -> AppResult<Created<ApplicationResponse>> {
    require_role(&current_user, &[UserRole::Adopter])?;

    let application = state
        .application_service
        .create_application(
            current_user.id,
            current_user.username.clone(),
            payload.animal_id,
            payload.reason,
        )
        .await?;

    // Echo back the fresh row; the animal is known to exist, the adopter is
    // the caller, so the names are filled locally instead of re-querying
    let animal = state.animal_service.get_animal(application.animal_id).await?;

    Ok(Created(ApplicationResponse {
        id: application.id,
        animal_id: application.animal_id,
        animal_name: animal.name,
        adopter_id: application.adopter_id,
        adopter_name: current_user.username,
        reason: application.reason,
        status: application.status,
        created_at: application.created_at,
        created_by: application.created_by,
        updated_at: application.updated_at,
        updated_by: application.updated_by,
    }))
}

/// Approve or reject an application (admin only).
///
/// Approval also marks the animal as Adopted.
#[utoipa::path(
    patch,
    path = "/application-management/applications/{id}/status",
    tag = "Application Management",
    security(("bearer_auth" = [])),
    request_body = UpdateApplicationStatusRequest,
    responses(
        (status = 204, description = "Status updated"),
        (status = 400, description = "Submitted is not a valid target status"),
        (status = 403, description = "Admin access only"),
        (status = 404, description = "Application not found"),
        (status = 409, description = "Cannot modify a completed application")
    )
)]
pub async fn update_application_status(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateApplicationStatusRequest>,
) -> AppResult<NoContent> {
    require_admin(&current_user)?;

    state
        .application_service
        .update_status(id, payload.application_status, current_user.username)
        .await?;

    Ok(NoContent)
}

/// Update or cancel one's own application (adopter only)
#[utoipa::path(
    put,
    path = "/application-management/applications/{id}/adopter",
    tag = "Application Management",
    security(("bearer_auth" = [])),
    request_body = UpdateApplicationByAdopterRequest,
    responses(
        (status = 204, description = "Application updated"),
        (status = 403, description = "Not the owner of this application"),
        (status = 404, description = "Application not found"),
        (status = 409, description = "Cannot modify a completed application")
    )
)]
pub async fn update_application_by_adopter(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateApplicationByAdopterRequest>,
) -> AppResult<NoContent> {
    require_role(&current_user, &[UserRole::Adopter])?;

    state
        .application_service
        .update_by_adopter(
            id,
            current_user.id,
            payload.reason,
            payload.cancel,
            current_user.username,
        )
        .await?;

    Ok(NoContent)
}
