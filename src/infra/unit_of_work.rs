//! Unit of Work pattern implementation.
//!
//! Centralizes access to all repositories and manages database
//! transactions (begin, commit, rollback). The approve transition uses it
//! to land the application write and the animal write atomically.

use async_trait::async_trait;
use sea_orm::{
    AccessMode, ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, IsolationLevel, QueryFilter, Set, TransactionTrait,
};
use std::sync::Arc;
use uuid::Uuid;

use super::repositories::entities::{animal, application};
use super::repositories::{
    AnimalRepository, AnimalStore, ApplicationRepository, ApplicationStore, UserRepository,
    UserStore,
};
use crate::domain::{AdoptionStatus, Animal, Application, ApplicationStatus};
use crate::errors::{AppError, AppResult};

/// Unit of Work trait for dependency injection.
///
/// Provides centralized access to all repositories and transaction management.
/// Note: This trait is not mockable directly due to generic methods.
/// For testing, mock the repositories and stub `transaction` at the
/// implementation level.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Get user repository
    fn users(&self) -> Arc<dyn UserRepository>;

    /// Get animal repository
    fn animals(&self) -> Arc<dyn AnimalRepository>;

    /// Get application repository
    fn applications(&self) -> Arc<dyn ApplicationRepository>;

    /// Execute a closure within a transaction.
    ///
    /// The transaction is automatically committed on success or rolled back
    /// on error. Uses ReadCommitted isolation level.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send;
}

/// Transaction context providing repository access within a transaction.
///
/// All repository operations performed through this context are part
/// of the same database transaction. The context borrows the transaction
/// to ensure proper lifetime management.
pub struct TransactionContext<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TransactionContext<'a> {
    /// Create a new transaction context
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Get application repository for this transaction
    pub fn applications(&self) -> TxApplicationRepository<'_> {
        TxApplicationRepository::new(self.txn)
    }

    /// Get animal repository for this transaction
    pub fn animals(&self) -> TxAnimalRepository<'_> {
        TxAnimalRepository::new(self.txn)
    }
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    db: DatabaseConnection,
    user_repo: Arc<UserStore>,
    animal_repo: Arc<AnimalStore>,
    application_repo: Arc<ApplicationStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: DatabaseConnection) -> Self {
        let user_repo = Arc::new(UserStore::new(db.clone()));
        let animal_repo = Arc::new(AnimalStore::new(db.clone()));
        let application_repo = Arc::new(ApplicationStore::new(db.clone()));
        Self {
            db,
            user_repo,
            animal_repo,
            application_repo,
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn animals(&self) -> Arc<dyn AnimalRepository> {
        self.animal_repo.clone()
    }

    fn applications(&self) -> Arc<dyn ApplicationRepository> {
        self.application_repo.clone()
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        let txn = self
            .db
            .begin_with_config(Some(IsolationLevel::ReadCommitted), Some(AccessMode::ReadWrite))
            .await
            .map_err(AppError::from)?;

        let ctx = TransactionContext::new(&txn);

        match f(ctx).await {
            Ok(result) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

/// Transaction-aware application repository.
///
/// Executes all operations within the provided transaction.
/// Query methods exclude soft-deleted records.
pub struct TxApplicationRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxApplicationRepository<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Find active application by ID
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Application>> {
        let result = application::Entity::find_by_id(id)
            .filter(application::Column::DeletedAt.is_null())
            .one(self.txn)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Application::from))
    }

    /// Set the status of an active application
    pub async fn set_status(
        &self,
        id: Uuid,
        status: ApplicationStatus,
        updated_by: &str,
    ) -> AppResult<Application> {
        let model = application::Entity::find_by_id(id)
            .filter(application::Column::DeletedAt.is_null())
            .one(self.txn)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: application::ActiveModel = model.into();
        active.status = Set(status.to_string());
        active.updated_at = Set(Some(chrono::Utc::now()));
        active.updated_by = Set(Some(updated_by.to_string()));

        let model = active.update(self.txn).await.map_err(AppError::from)?;

        Ok(Application::from(model))
    }
}

/// Transaction-aware animal repository.
pub struct TxAnimalRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxAnimalRepository<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Find active animal by ID
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Animal>> {
        let result = animal::Entity::find_by_id(id)
            .filter(animal::Column::DeletedAt.is_null())
            .one(self.txn)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Animal::from))
    }

    /// Set the adoption status of an active animal
    pub async fn set_adoption_status(
        &self,
        id: Uuid,
        status: AdoptionStatus,
        updated_by: &str,
    ) -> AppResult<Animal> {
        let model = animal::Entity::find_by_id(id)
            .filter(animal::Column::DeletedAt.is_null())
            .one(self.txn)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: animal::ActiveModel = model.into();
        active.adoption_status = Set(status.to_string());
        active.updated_at = Set(Some(chrono::Utc::now()));
        active.updated_by = Set(Some(updated_by.to_string()));

        let model = active.update(self.txn).await.map_err(AppError::from)?;

        Ok(Animal::from(model))
    }
}
