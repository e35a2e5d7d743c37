//! Authentication handlers.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::post,
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::UserRole;
use crate::errors::{AppError, AppResult};
use crate::services::TokenResponse;

/// Login request, shared by both role portals
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    /// Account email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "jane@example.com")]
    pub email: String,
    /// Account password
    #[schema(example = "SecurePass123!")]
    pub password: String,
}

/// Create authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/login/:role", post(login))
}

/// Map the login portal path segment to the role it authenticates
fn portal_role(role: &str) -> AppResult<UserRole> {
    match role {
        "admin" => Ok(UserRole::Admin),
        "adopter" => Ok(UserRole::Adopter),
        _ => Err(AppError::NotFound),
    }
}

/// Login through a role portal and get a JWT token
#[utoipa::path(
    post,
    path = "/auth/login/{role}",
    tag = "Auth Management",
    params(
        ("role" = String, Path, description = "Login portal: admin or adopter")
    ),
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials"),
        (status = 403, description = "Account exists but holds a different role"),
        (status = 404, description = "Unknown login portal")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Path(role): Path<String>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    let expected_role = portal_role(&role)?;

    let token = state
        .auth_service
        .login(payload.email, payload.password, expected_role)
        .await?;

    Ok(Json(token))
}
