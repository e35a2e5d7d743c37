//! User management handlers.
//!
//! Adopter self-registration is public; everything else sits behind the
//! JWT middleware with per-handler role checks.

use axum::{
    extract::{Extension, Path, Query, State},
    response::Json,
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{require_admin, CurrentUser};
use crate::api::AppState;
use crate::config::{DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE};
use crate::domain::{UserResponse, UserRole};
use crate::errors::{AppError, AppResult};
use crate::services::{AdopterRegistration, NewAdminAccount, ProfileUpdate};
use crate::types::{Created, NoContent, Paginated, PaginationParams};

/// Adopter self-registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterAdopterRequest {
    /// Display name
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Jane Doe")]
    pub name: String,
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "jane@example.com")]
    pub email: String,
    /// Password (minimum 8 characters)
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[schema(example = "SecurePass123!", min_length = 8)]
    pub password: String,
    /// Contact phone number
    #[validate(length(min = 1, message = "Phone is required"))]
    #[schema(example = "555-0100")]
    pub phone: String,
    /// Postal address
    #[validate(length(min = 1, message = "Address is required"))]
    #[schema(example = "12 Shelter Lane")]
    pub address: String,
}

/// Admin account creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAdminRequest {
    /// Display name
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Sam Admin")]
    pub name: String,
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "sam@example.com")]
    pub email: String,
    /// Password (minimum 8 characters)
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[schema(example = "SecurePass123!", min_length = 8)]
    pub password: String,
    /// Contact phone number
    pub phone: Option<String>,
    /// Postal address
    pub address: Option<String>,
}

/// Profile update request; all fields optional
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileRequest {
    /// New display name
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    #[schema(example = "Jane D.")]
    pub name: Option<String>,
    /// New email address
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    /// New password (minimum 8 characters)
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: Option<String>,
    /// New phone number
    pub phone: Option<String>,
    /// New postal address
    pub address: Option<String>,
}

impl From<UpdateProfileRequest> for ProfileUpdate {
    fn from(request: UpdateProfileRequest) -> Self {
        ProfileUpdate {
            name: request.name,
            email: request.email,
            password: request.password,
            phone: request.phone,
            address: request.address,
        }
    }
}

/// Listing query: pagination plus a name/email substring search
#[derive(Debug, Deserialize)]
pub struct ListUsersQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub search: Option<String>,
}

impl ListUsersQuery {
    fn pagination(&self) -> PaginationParams {
        PaginationParams {
            page: self.page.unwrap_or(DEFAULT_PAGE_NUMBER),
            limit: self.limit.unwrap_or(DEFAULT_PAGE_SIZE),
        }
    }
}

/// Routes reachable without a token
pub fn user_public_routes() -> Router<AppState> {
    Router::new().route("/adopters", post(register_adopter))
}

/// Routes behind the JWT middleware
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/current-user", get(get_current_user))
        .route("/users", post(create_admin).get(list_admins))
        .route("/users/:id", put(update_admin).delete(hard_delete_admin))
        .route("/adopters", get(list_adopters))
        .route("/adopters/:id", put(update_adopter).delete(delete_adopter))
}

/// Register a new adopter account
#[utoipa::path(
    post,
    path = "/user-management/adopters",
    tag = "User Management",
    request_body = RegisterAdopterRequest,
    responses(
        (status = 201, description = "Adopter registered successfully", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn register_adopter(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterAdopterRequest>,
) -> AppResult<Created<UserResponse>> {
    let user = state
        .user_service
        .register_adopter(AdopterRegistration {
            name: payload.name,
            email: payload.email,
            password: payload.password,
            phone: payload.phone,
            address: payload.address,
        })
        .await?;

    Ok(Created(UserResponse::from(user)))
}

/// Get the authenticated user's own profile
#[utoipa::path(
    get,
    path = "/user-management/current-user",
    tag = "User Management",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user profile", body = UserResponse),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_current_user(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<UserResponse>> {
    let user = state.user_service.get_user(current_user.id).await?;
    Ok(Json(UserResponse::from(user)))
}

/// Create a new admin account (admin only)
#[utoipa::path(
    post,
    path = "/user-management/users",
    tag = "User Management",
    security(("bearer_auth" = [])),
    request_body = CreateAdminRequest,
    responses(
        (status = 201, description = "Admin account created", body = UserResponse),
        (status = 403, description = "Admin access only"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn create_admin(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateAdminRequest>,
) -> AppResult<Created<UserResponse>> {
    require_admin(&current_user)?;

    let user = state
        .user_service
        .create_admin(
            NewAdminAccount {
                name: payload.name,
                email: payload.email,
                password: payload.password,
                phone: payload.phone,
                address: payload.address,
            },
            current_user.username,
        )
        .await?;

    Ok(Created(UserResponse::from(user)))
}

/// List admin accounts, paginated (admin only)
#[utoipa::path(
    get,
    path = "/user-management/users",
    tag = "User Management",
    security(("bearer_auth" = [])),
    params(
        ("page" = Option<u64>, Query, description = "Page number, starting at 1"),
        ("limit" = Option<u64>, Query, description = "Page size, 1..100"),
        ("search" = Option<String>, Query, description = "Name/email substring")
    ),
    responses(
        (status = 200, description = "Page of admin accounts"),
        (status = 403, description = "Admin access only")
    )
)]
pub async fn list_admins(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Query(query): Query<ListUsersQuery>,
) -> AppResult<Json<Paginated<UserResponse>>> {
    require_admin(&current_user)?;

    let params = query.pagination();
    params.validate()?;

    let (users, total) = state
        .user_service
        .list_users(UserRole::Admin, query.search, params.clone())
        .await?;

    Ok(Json(Paginated::new(
        users.into_iter().map(UserResponse::from).collect(),
        params.page,
        params.limit(),
        total,
    )))
}

/// Update an admin account (admin only)
#[utoipa::path(
    put,
    path = "/user-management/users/{id}",
    tag = "User Management",
    security(("bearer_auth" = [])),
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Updated profile", body = UserResponse),
        (status = 403, description = "Admin access only"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_admin(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateProfileRequest>,
) -> AppResult<Json<UserResponse>> {
    require_admin(&current_user)?;

    let user = state
        .user_service
        .update_profile(id, payload.into(), current_user.username)
        .await?;

    Ok(Json(UserResponse::from(user)))
}

/// Permanently delete an admin account (admin only).
///
/// This is the one hard-delete path; every other removal is a soft delete.
#[utoipa::path(
    delete,
    path = "/user-management/users/{id}",
    tag = "User Management",
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Admin account deleted"),
        (status = 403, description = "Admin access only"),
        (status = 404, description = "User not found")
    )
)]
pub async fn hard_delete_admin(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<NoContent> {
    require_admin(&current_user)?;

    state.user_service.hard_delete_admin(id).await?;

    Ok(NoContent)
}

/// List adopter accounts, paginated (admin only)
#[utoipa::path(
    get,
    path = "/user-management/adopters",
    tag = "User Management",
    security(("bearer_auth" = [])),
    params(
        ("page" = Option<u64>, Query, description = "Page number, starting at 1"),
        ("limit" = Option<u64>, Query, description = "Page size, 1..100"),
        ("search" = Option<String>, Query, description = "Name/email substring")
    ),
    responses(
        (status = 200, description = "Page of adopter accounts"),
        (status = 403, description = "Admin access only")
    )
)]
pub async fn list_adopters(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Query(query): Query<ListUsersQuery>,
) -> AppResult<Json<Paginated<UserResponse>>> {
    require_admin(&current_user)?;

    let params = query.pagination();
    params.validate()?;

    let (users, total) = state
        .user_service
        .list_users(UserRole::Adopter, query.search, params.clone())
        .await?;

    Ok(Json(Paginated::new(
        users.into_iter().map(UserResponse::from).collect(),
        params.page,
        params.limit(),
        total,
    )))
}

/// Update an adopter profile (the adopter themself, or an admin)
#[utoipa::path(
    put,
    path = "/user-management/adopters/{id}",
    tag = "User Management",
    security(("bearer_auth" = [])),
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Updated profile", body = UserResponse),
        (status = 403, description = "Adopters may only update their own profile"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_adopter(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateProfileRequest>,
) -> AppResult<Json<UserResponse>> {
    // Adopters may only touch their own profile; admins may touch any
    if !current_user.is_admin() && current_user.id != id {
        return Err(AppError::Forbidden);
    }

    let user = state
        .user_service
        .update_profile(id, payload.into(), current_user.username)
        .await?;

    Ok(Json(UserResponse::from(user)))
}

/// Soft delete an adopter account (admin only)
#[utoipa::path(
    delete,
    path = "/user-management/adopters/{id}",
    tag = "User Management",
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Adopter account deactivated"),
        (status = 403, description = "Admin access only"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_adopter(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<NoContent> {
    require_admin(&current_user)?;

    state
        .user_service
        .delete_adopter(id, current_user.username)
        .await?;

    Ok(NoContent)
}
