//! Authentication service - Token issuing and verification.
//!
//! Each login portal (`/auth/login/admin`, `/auth/login/adopter`) expects a
//! specific role; an authenticated user of the wrong role is rejected with
//! an authorization error rather than an authentication error.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{Config, SECONDS_PER_MINUTE, TOKEN_TYPE_BEARER};
use crate::domain::{Password, User, UserRole};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// JWT claims payload: subject id, display name, role.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub username: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

/// Token response returned after successful authentication
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    /// JWT access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    /// Token type (always "Bearer")
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Token expiration time in seconds
    #[schema(example = 3600)]
    pub expires_in: i64,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Authenticate against a role-specific login portal and return a JWT.
    async fn login(
        &self,
        email: String,
        password: String,
        expected_role: UserRole,
    ) -> AppResult<TokenResponse>;

    /// Verify JWT token and extract claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;
}

/// Generate JWT token for a user (shared helper to avoid duplication)
fn generate_token(user: &User, config: &Config) -> AppResult<TokenResponse> {
    let now = Utc::now();
    let expires_at = now + Duration::minutes(config.jwt_expiration_minutes);

    let claims = Claims {
        sub: user.id,
        username: user.name.clone(),
        role: user.role.to_string(),
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret_bytes()),
    )?;

    Ok(TokenResponse {
        access_token: token,
        token_type: TOKEN_TYPE_BEARER.to_string(),
        expires_in: config.jwt_expiration_minutes * SECONDS_PER_MINUTE,
    })
}

/// Verify JWT token and extract claims (shared helper)
fn verify_token_internal(token: &str, config: &Config) -> AppResult<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret_bytes()),
        &Validation::default(),
    )?;

    Ok(token_data.claims)
}

/// Concrete implementation of AuthService using Unit of Work.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    config: Config,
}

impl<U: UnitOfWork> Authenticator<U> {
    /// Create new auth service instance with Unit of Work
    pub fn new(uow: Arc<U>, config: Config) -> Self {
        Self { uow, config }
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn login(
        &self,
        email: String,
        password: String,
        expected_role: UserRole,
    ) -> AppResult<TokenResponse> {
        // find_by_email excludes soft-deleted accounts, so a deleted
        // account cannot log in.
        let user_result = self.uow.users().find_by_email(&email).await?;

        // SECURITY: Perform password verification even if user doesn't exist
        // to prevent timing attacks that could enumerate valid emails.
        // We use a dummy hash that will always fail verification.
        let dummy_hash = "$argon2id$v=19$m=19456,t=2,p=1$dummysalt123456$dummyhash1234567890123456789012";

        let (password_hash, user_exists) = match &user_result {
            Some(user) => (user.password_hash.as_str(), true),
            None => (dummy_hash, false),
        };

        let stored_password = Password::from_hash(password_hash.to_string());
        let password_valid = stored_password.verify(&password);

        // Only succeed if both user exists AND password is valid
        if !user_exists || !password_valid {
            return Err(AppError::InvalidCredentials);
        }

        let user = user_result.as_ref().expect("checked above");

        // The caller authenticated fine but through the wrong portal
        if user.role != expected_role {
            tracing::warn!(
                email = %email,
                portal = %expected_role,
                "Login attempt through wrong role portal"
            );
            return Err(AppError::Forbidden);
        }

        generate_token(user, &self.config)
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        verify_token_internal(token, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::User;
    use crate::infra::{
        MockAnimalRepository, MockApplicationRepository, MockUserRepository, TransactionContext,
    };
    use crate::infra::{AnimalRepository, ApplicationRepository, UserRepository};

    const TEST_SECRET: &str = "test-secret-key-for-testing-only-32chars";

    fn test_user(role: UserRole, password: &str) -> User {
        User {
            id: Uuid::new_v4(),
            name: "Test User".to_string(),
            email: "test@example.com".to_string(),
            password_hash: Password::new(password).unwrap().into_string(),
            phone: None,
            address: None,
            role,
            created_at: Utc::now(),
            created_by: "System".to_string(),
            updated_at: None,
            updated_by: None,
            deleted_at: None,
        }
    }

    /// Test Unit of Work wrapping mock repositories.
    struct TestUnitOfWork {
        user_repo: Arc<MockUserRepository>,
    }

    impl TestUnitOfWork {
        fn new(user_repo: MockUserRepository) -> Self {
            Self {
                user_repo: Arc::new(user_repo),
            }
        }
    }

    #[async_trait]
    impl UnitOfWork for TestUnitOfWork {
        fn users(&self) -> Arc<dyn UserRepository> {
            self.user_repo.clone()
        }

        fn animals(&self) -> Arc<dyn AnimalRepository> {
            Arc::new(MockAnimalRepository::new())
        }

        fn applications(&self) -> Arc<dyn ApplicationRepository> {
            Arc::new(MockApplicationRepository::new())
        }

        async fn transaction<F, T>(&self, _f: F) -> AppResult<T>
        where
            F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                    Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
                > + Send,
            T: Send,
        {
            Err(AppError::internal("Transactions not supported in test mock"))
        }
    }

    fn authenticator(repo: MockUserRepository) -> Authenticator<TestUnitOfWork> {
        Authenticator::new(
            Arc::new(TestUnitOfWork::new(repo)),
            Config::for_tests(TEST_SECRET),
        )
    }

    #[tokio::test]
    async fn test_login_success_returns_bearer_token() {
        let user = test_user(UserRole::Adopter, "CorrectHorse1");
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(move |_| Ok(Some(user.clone())));

        let service = authenticator(repo);
        let token = service
            .login(
                "test@example.com".to_string(),
                "CorrectHorse1".to_string(),
                UserRole::Adopter,
            )
            .await
            .unwrap();

        assert_eq!(token.token_type, "Bearer");
        assert!(!token.access_token.is_empty());

        let claims = service.verify_token(&token.access_token).unwrap();
        assert_eq!(claims.username, "Test User");
        assert_eq!(claims.role, "Adopter");
        assert!(claims.exp > claims.iat);
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let user = test_user(UserRole::Adopter, "CorrectHorse1");
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(move |_| Ok(Some(user.clone())));

        let service = authenticator(repo);
        let result = service
            .login(
                "test@example.com".to_string(),
                "WrongPassword".to_string(),
                UserRole::Adopter,
            )
            .await;

        assert!(matches!(result.unwrap_err(), AppError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().returning(|_| Ok(None));

        let service = authenticator(repo);
        let result = service
            .login(
                "nobody@example.com".to_string(),
                "AnyPassword1".to_string(),
                UserRole::Adopter,
            )
            .await;

        assert!(matches!(result.unwrap_err(), AppError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_login_wrong_portal_role() {
        let user = test_user(UserRole::Adopter, "CorrectHorse1");
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(move |_| Ok(Some(user.clone())));

        let service = authenticator(repo);
        // An adopter authenticating through the admin portal
        let result = service
            .login(
                "test@example.com".to_string(),
                "CorrectHorse1".to_string(),
                UserRole::Admin,
            )
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Forbidden));
    }

    #[tokio::test]
    async fn test_verify_rejects_garbage_token() {
        let repo = MockUserRepository::new();
        let service = authenticator(repo);

        assert!(service.verify_token("not-a-jwt").is_err());
    }
}
