//! Adoption application repository with soft delete support.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::application::{self, ActiveModel, Entity as ApplicationEntity};
use crate::domain::{Application, ApplicationStatus, NewApplication};
use crate::errors::{AppError, AppResult};

/// Application repository trait for dependency injection.
///
/// Query methods exclude soft-deleted applications unless stated otherwise.
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    /// Find active application by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Application>>;

    /// Find the active application for an (animal, adopter) pair, any status
    async fn find_active(&self, animal_id: Uuid, adopter_id: Uuid)
        -> AppResult<Option<Application>>;

    /// Create a new application with status Submitted
    async fn create(&self, new_application: NewApplication) -> AppResult<Application>;

    /// List active applications, paginated, optionally filtered by status.
    /// Returns the page plus the total row count.
    async fn list_paged(
        &self,
        status: Option<ApplicationStatus>,
        page: u64,
        limit: u64,
    ) -> AppResult<(Vec<Application>, u64)>;

    /// List all active applications of an adopter
    async fn list_for_adopter(&self, adopter_id: Uuid) -> AppResult<Vec<Application>>;

    /// Replace the reason text of an active application
    async fn update_reason(&self, id: Uuid, reason: String, updated_by: String)
        -> AppResult<Application>;

    /// Soft delete application by ID (sets deleted_at timestamp)
    async fn delete(&self, id: Uuid, updated_by: String) -> AppResult<()>;

    /// Count active applications in a status
    async fn count_by_status(&self, status: ApplicationStatus) -> AppResult<u64>;
}

/// SeaORM-backed implementation of ApplicationRepository.
pub struct ApplicationStore {
    db: DatabaseConnection,
}

impl ApplicationStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ApplicationRepository for ApplicationStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Application>> {
        let result = ApplicationEntity::find_by_id(id)
            .filter(application::Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Application::from))
    }

    async fn find_active(
        &self,
        animal_id: Uuid,
        adopter_id: Uuid,
    ) -> AppResult<Option<Application>> {
        let result = ApplicationEntity::find()
            .filter(application::Column::AnimalId.eq(animal_id))
            .filter(application::Column::AdopterId.eq(adopter_id))
            .filter(application::Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Application::from))
    }

    async fn create(&self, new_application: NewApplication) -> AppResult<Application> {
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            animal_id: Set(new_application.animal_id),
            adopter_id: Set(new_application.adopter_id),
            reason: Set(new_application.reason),
            status: Set(ApplicationStatus::Submitted.to_string()),
            created_at: Set(Utc::now()),
            created_by: Set(new_application.created_by),
            updated_at: Set(None),
            updated_by: Set(None),
            deleted_at: Set(None),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;

        Ok(Application::from(model))
    }

    async fn list_paged(
        &self,
        status: Option<ApplicationStatus>,
        page: u64,
        limit: u64,
    ) -> AppResult<(Vec<Application>, u64)> {
        let mut query = ApplicationEntity::find()
            .filter(application::Column::DeletedAt.is_null())
            .order_by_asc(application::Column::CreatedAt);

        if let Some(status) = status {
            query = query.filter(application::Column::Status.eq(status.to_string()));
        }

        let paginator = query.paginate(&self.db, limit);
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(page.saturating_sub(1)).await?;

        Ok((models.into_iter().map(Application::from).collect(), total))
    }

    async fn list_for_adopter(&self, adopter_id: Uuid) -> AppResult<Vec<Application>> {
        let models = ApplicationEntity::find()
            .filter(application::Column::AdopterId.eq(adopter_id))
            .filter(application::Column::DeletedAt.is_null())
            .order_by_asc(application::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Application::from).collect())
    }

    async fn update_reason(
        &self,
        id: Uuid,
        reason: String,
        updated_by: String,
    ) -> AppResult<Application> {
        let model = ApplicationEntity::find_by_id(id)
            .filter(application::Column::DeletedAt.is_null())
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = model.into();
        active.reason = Set(Some(reason));
        active.updated_at = Set(Some(Utc::now()));
        active.updated_by = Set(Some(updated_by));

        let model = active.update(&self.db).await.map_err(AppError::from)?;

        Ok(Application::from(model))
    }

    async fn delete(&self, id: Uuid, updated_by: String) -> AppResult<()> {
        let model = ApplicationEntity::find_by_id(id)
            .filter(application::Column::DeletedAt.is_null())
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = model.into();
        let now = Utc::now();
        active.deleted_at = Set(Some(now));
        active.updated_at = Set(Some(now));
        active.updated_by = Set(Some(updated_by));

        active.update(&self.db).await.map_err(AppError::from)?;
        Ok(())
    }

    async fn count_by_status(&self, status: ApplicationStatus) -> AppResult<u64> {
        ApplicationEntity::find()
            .filter(application::Column::DeletedAt.is_null())
            .filter(application::Column::Status.eq(status.to_string()))
            .count(&self.db)
            .await
            .map_err(AppError::from)
    }
}
