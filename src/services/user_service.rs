//! User service - Account management use cases.
//!
//! Covers adopter self-registration, admin-created admin accounts, profile
//! updates, listings for the admin dashboard, and both delete flavours:
//! soft delete for adopters, the legacy hard delete for admin accounts.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{NewUser, Password, User, UserChanges, UserRole};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;
use crate::types::PaginationParams;

/// Adopter self-registration payload
#[derive(Debug, Clone)]
pub struct AdopterRegistration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub address: String,
}

/// Admin account creation payload (created by another admin)
#[derive(Debug, Clone)]
pub struct NewAdminAccount {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Profile changes; all fields optional
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// User service trait for dependency injection.
///
/// Operations act on active (non-deleted) users.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Register a new adopter account (self-service)
    async fn register_adopter(&self, registration: AdopterRegistration) -> AppResult<User>;

    /// Create a new admin account on behalf of an existing admin
    async fn create_admin(&self, account: NewAdminAccount, created_by: String) -> AppResult<User>;

    /// Get active user by ID
    async fn get_user(&self, id: Uuid) -> AppResult<User>;

    /// List active users of a role, paginated, optionally searched by
    /// name/email substring
    async fn list_users(
        &self,
        role: UserRole,
        search: Option<String>,
        params: PaginationParams,
    ) -> AppResult<(Vec<User>, u64)>;

    /// Apply profile changes
    async fn update_profile(
        &self,
        id: Uuid,
        update: ProfileUpdate,
        updated_by: String,
    ) -> AppResult<User>;

    /// Soft delete an adopter account
    async fn delete_adopter(&self, id: Uuid, updated_by: String) -> AppResult<()>;

    /// Permanently delete an admin account (legacy hard-delete path)
    async fn hard_delete_admin(&self, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of UserService using Unit of Work.
pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> UserManager<U> {
    /// Create new user service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    /// Reject emails already registered, including soft-deleted accounts,
    /// so a deleted account's address cannot be silently reused.
    async fn ensure_email_free(&self, email: &str) -> AppResult<()> {
        if self
            .uow
            .users()
            .find_by_email_with_deleted(email)
            .await?
            .is_some()
        {
            return Err(AppError::conflict("Email already registered"));
        }
        Ok(())
    }
}

#[async_trait]
impl<U: UnitOfWork> UserService for UserManager<U> {
    async fn register_adopter(&self, registration: AdopterRegistration) -> AppResult<User> {
        self.ensure_email_free(&registration.email).await?;

        let password_hash = Password::new(&registration.password)?.into_string();
        let created_by = registration.name.clone();

        let user = self
            .uow
            .users()
            .create(NewUser {
                name: registration.name,
                email: registration.email,
                password_hash,
                phone: Some(registration.phone),
                address: Some(registration.address),
                role: UserRole::Adopter,
                created_by,
            })
            .await?;

        tracing::info!(user_id = %user.id, "Adopter registered");
        Ok(user)
    }

    async fn create_admin(&self, account: NewAdminAccount, created_by: String) -> AppResult<User> {
        self.ensure_email_free(&account.email).await?;

        let password_hash = Password::new(&account.password)?.into_string();

        let user = self
            .uow
            .users()
            .create(NewUser {
                name: account.name,
                email: account.email,
                password_hash,
                phone: account.phone,
                address: account.address,
                role: UserRole::Admin,
                created_by,
            })
            .await?;

        tracing::info!(user_id = %user.id, "Admin account created");
        Ok(user)
    }

    async fn get_user(&self, id: Uuid) -> AppResult<User> {
        self.uow
            .users()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn list_users(
        &self,
        role: UserRole,
        search: Option<String>,
        params: PaginationParams,
    ) -> AppResult<(Vec<User>, u64)> {
        self.uow
            .users()
            .list_paged(role, search, params.page, params.limit())
            .await
    }

    async fn update_profile(
        &self,
        id: Uuid,
        update: ProfileUpdate,
        updated_by: String,
    ) -> AppResult<User> {
        // Email change must not collide with any existing account
        if let Some(email) = &update.email {
            let current = self.get_user(id).await?;
            if current.email != *email {
                self.ensure_email_free(email).await?;
            }
        }

        let password_hash = match update.password {
            Some(password) => Some(Password::new(&password)?.into_string()),
            None => None,
        };

        self.uow
            .users()
            .update(
                id,
                UserChanges {
                    name: update.name,
                    email: update.email,
                    password_hash,
                    phone: update.phone,
                    address: update.address,
                },
                updated_by,
            )
            .await
    }

    async fn delete_adopter(&self, id: Uuid, updated_by: String) -> AppResult<()> {
        let user = self.get_user(id).await?;
        if user.role != UserRole::Adopter {
            return Err(AppError::BadRequest(
                "Only adopter accounts can be removed here".to_string(),
            ));
        }

        self.uow.users().delete(id, updated_by).await?;
        tracing::info!(user_id = %id, "Adopter account soft-deleted");
        Ok(())
    }

    async fn hard_delete_admin(&self, id: Uuid) -> AppResult<()> {
        let user = self.get_user(id).await?;
        if user.role != UserRole::Admin {
            return Err(AppError::BadRequest(
                "Only admin accounts can be removed here".to_string(),
            ));
        }

        self.uow.users().hard_delete(id).await?;
        tracing::warn!(user_id = %id, "Admin account permanently deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use mockall::predicate::eq;

    use crate::infra::{
        AnimalRepository, ApplicationRepository, MockAnimalRepository, MockApplicationRepository,
        MockUserRepository, TransactionContext, UserRepository,
    };

    fn test_user(id: Uuid, role: UserRole) -> User {
        User {
            id,
            name: "Test User".to_string(),
            email: "test@example.com".to_string(),
            password_hash: "hashed".to_string(),
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

    fn service(repo: MockUserRepository) -> UserManager<TestUnitOfWork> {
        UserManager::new(Arc::new(TestUnitOfWork::new(repo)))
    }

    fn registration() -> AdopterRegistration {
        AdopterRegistration {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            password: "SecurePass1".to_string(),
            phone: "555-0100".to_string(),
            address: "12 Shelter Lane".to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_adopter_success() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email_with_deleted()
            .returning(|_| Ok(None));
        repo.expect_create().returning(|new_user| {
            let mut user = test_user(Uuid::new_v4(), new_user.role);
            user.name = new_user.name;
            user.email = new_user.email;
            Ok(user)
        });

        let result = service(repo).register_adopter(registration()).await.unwrap();
        assert_eq!(result.role, UserRole::Adopter);
        assert_eq!(result.email, "jane@example.com");
    }

    #[tokio::test]
    async fn test_register_adopter_duplicate_email() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email_with_deleted()
            .returning(|_| Ok(Some(test_user(Uuid::new_v4(), UserRole::Adopter))));

        let result = service(repo).register_adopter(registration()).await;
        assert!(matches!(result.unwrap_err(), AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_create_admin_assigns_admin_role() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email_with_deleted()
            .returning(|_| Ok(None));
        repo.expect_create()
            .withf(|new_user| new_user.role == UserRole::Admin && new_user.created_by == "Root")
            .returning(|new_user| Ok(test_user(Uuid::new_v4(), new_user.role)));

        let account = NewAdminAccount {
            name: "Second Admin".to_string(),
            email: "admin2@example.com".to_string(),
            password: "SecurePass1".to_string(),
            phone: None,
            address: None,
        };

        let result = service(repo)
            .create_admin(account, "Root".to_string())
            .await
            .unwrap();
        assert!(result.is_admin());
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let result = service(repo).get_user(Uuid::new_v4()).await;
        assert!(matches!(result.unwrap_err(), AppError::NotFound));
    }

    #[tokio::test]
    async fn test_delete_adopter_rejects_admin_target() {
        let id = Uuid::new_v4();
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .with(eq(id))
            .returning(|id| Ok(Some(test_user(id, UserRole::Admin))));

        let result = service(repo).delete_adopter(id, "Admin".to_string()).await;
        assert!(matches!(result.unwrap_err(), AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_hard_delete_rejects_adopter_target() {
        let id = Uuid::new_v4();
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .with(eq(id))
            .returning(|id| Ok(Some(test_user(id, UserRole::Adopter))));

        let result = service(repo).hard_delete_admin(id).await;
        assert!(matches!(result.unwrap_err(), AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_hard_delete_admin_success() {
        let id = Uuid::new_v4();
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(test_user(id, UserRole::Admin))));
        repo.expect_hard_delete().with(eq(id)).returning(|_| Ok(()));

        assert!(service(repo).hard_delete_admin(id).await.is_ok());
    }
}
