//! Integration tests for API building blocks.
//!
//! These tests use mock services to exercise the service traits and shared
//! types without requiring a database connection.

use async_trait::async_trait;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Utc;
use uuid::Uuid;

use shelter_api::domain::{AdoptionStatus, ApplicationStatus, User, UserResponse, UserRole};
use shelter_api::errors::{AppError, AppResult};
use shelter_api::services::{AuthService, Claims, TokenResponse};
use shelter_api::types::{Created, NoContent, Paginated};

// =============================================================================
// Mock Services for Testing
// =============================================================================

/// Mock auth service that returns predefined responses
struct MockAuthService;

#[async_trait]
impl AuthService for MockAuthService {
    async fn login(
        &self,
        _email: String,
        _password: String,
        expected_role: UserRole,
    ) -> AppResult<TokenResponse> {
        if expected_role == UserRole::Admin {
            return Err(AppError::Forbidden);
        }

        Ok(TokenResponse {
            access_token: "mock-token".to_string(),
            token_type: "Bearer".to_string(),
            expires_in: 3600,
        })
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        if token == "valid-test-token" {
            Ok(Claims {
                sub: Uuid::new_v4(),
                username: "Jane Doe".to_string(),
                role: "Adopter".to_string(),
                exp: Utc::now().timestamp() + 3600,
                iat: Utc::now().timestamp(),
            })
        } else {
            Err(AppError::Unauthorized)
        }
    }
}

// =============================================================================
// Response Helper Tests
// =============================================================================

#[tokio::test]
async fn test_created_helper_returns_201() {
    let response = Created("payload").into_response();
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_no_content_helper_returns_204() {
    let response = NoContent.into_response();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_paginated_meta() {
    let paged = Paginated::new(vec![1, 2, 3], 1, 3, 7);
    assert_eq!(paged.meta.page, 1);
    assert_eq!(paged.meta.limit, 3);
    assert_eq!(paged.meta.total, 7);
    assert_eq!(paged.meta.total_pages, 3);
}

// =============================================================================
// Domain Wire Format Tests
// =============================================================================

#[tokio::test]
async fn test_role_wire_values() {
    assert_eq!(serde_json::to_string(&UserRole::Admin).unwrap(), "\"Admin\"");
    assert_eq!(
        serde_json::to_string(&UserRole::Adopter).unwrap(),
        "\"Adopter\""
    );
}

#[tokio::test]
async fn test_adoption_status_wire_values() {
    assert_eq!(
        serde_json::to_string(&AdoptionStatus::Available).unwrap(),
        "\"Available\""
    );
    assert_eq!(
        serde_json::to_string(&AdoptionStatus::Adopted).unwrap(),
        "\"Adopted\""
    );
}

#[tokio::test]
async fn test_application_status_wire_values() {
    assert_eq!(
        serde_json::to_string(&ApplicationStatus::Submitted).unwrap(),
        "\"Submitted\""
    );
    assert_eq!(
        serde_json::to_string(&ApplicationStatus::Approved).unwrap(),
        "\"Approved\""
    );
    assert_eq!(
        serde_json::to_string(&ApplicationStatus::Rejected).unwrap(),
        "\"Rejected\""
    );
}

#[tokio::test]
async fn test_application_status_deserializes_from_wire() {
    let status: ApplicationStatus = serde_json::from_str("\"Approved\"").unwrap();
    assert_eq!(status, ApplicationStatus::Approved);

    // Unknown values are a deserialization error, not a silent default
    assert!(serde_json::from_str::<ApplicationStatus>("\"Pending\"").is_err());
}

#[tokio::test]
async fn test_user_response_hides_password_hash() {
    let user = User {
        id: Uuid::new_v4(),
        name: "Jane Doe".to_string(),
        email: "jane@example.com".to_string(),
        password_hash: "super-secret-hash".to_string(),
        phone: None,
        address: None,
        role: UserRole::Adopter,
        created_at: Utc::now(),
        created_by: "Jane Doe".to_string(),
        updated_at: None,
        updated_by: None,
        deleted_at: None,
    };

    let response = UserResponse::from(user);
    let json = serde_json::to_string(&response).unwrap();
    assert!(!json.contains("super-secret-hash"));
    assert!(json.contains("jane@example.com"));
}

// =============================================================================
// Error Type Tests
// =============================================================================

#[tokio::test]
async fn test_app_error_status_codes() {
    let cases = [
        (AppError::Unauthorized, StatusCode::UNAUTHORIZED),
        (AppError::InvalidCredentials, StatusCode::UNAUTHORIZED),
        (AppError::Forbidden, StatusCode::FORBIDDEN),
        (AppError::NotFound, StatusCode::NOT_FOUND),
        (
            AppError::conflict("Cannot modify a completed application"),
            StatusCode::CONFLICT,
        ),
        (
            AppError::validation("limit must be between 1 and 100"),
            StatusCode::BAD_REQUEST,
        ),
        (
            AppError::internal("boom"),
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
    ];

    for (error, expected) in cases {
        assert_eq!(error.into_response().status(), expected);
    }
}

// =============================================================================
// Mock Service Tests
// =============================================================================

#[tokio::test]
async fn test_mock_auth_service_login() {
    let service = MockAuthService;
    let token = service
        .login(
            "jane@example.com".to_string(),
            "password123".to_string(),
            UserRole::Adopter,
        )
        .await
        .unwrap();

    assert_eq!(token.token_type, "Bearer");
    assert!(!token.access_token.is_empty());
}

#[tokio::test]
async fn test_mock_auth_service_wrong_portal() {
    let service = MockAuthService;
    let result = service
        .login(
            "jane@example.com".to_string(),
            "password123".to_string(),
            UserRole::Admin,
        )
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Forbidden));
}

#[tokio::test]
async fn test_mock_auth_service_verify_valid_token() {
    let service = MockAuthService;
    let claims = service.verify_token("valid-test-token").unwrap();
    assert_eq!(claims.role, "Adopter");
    assert!(claims.exp > claims.iat);
}

#[tokio::test]
async fn test_mock_auth_service_verify_invalid_token() {
    let service = MockAuthService;
    let result = service.verify_token("invalid-token");
    assert!(matches!(result.unwrap_err(), AppError::Unauthorized));
}
