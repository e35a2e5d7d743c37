//! Animal service - Catalog management use cases.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{Animal, AnimalChanges, AnimalFilter, NewAnimal};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;
use crate::types::PaginationParams;

/// Animal service trait for dependency injection.
///
/// Operations act on active (non-deleted) listings.
#[async_trait]
pub trait AnimalService: Send + Sync {
    /// List active animals, paginated and filtered
    async fn list_animals(
        &self,
        filter: AnimalFilter,
        params: PaginationParams,
    ) -> AppResult<(Vec<Animal>, u64)>;

    /// Get active animal by ID
    async fn get_animal(&self, id: Uuid) -> AppResult<Animal>;

    /// Create a new listing; duplicate (name, species, breed) is a conflict
    async fn create_animal(&self, new_animal: NewAnimal) -> AppResult<Animal>;

    /// Apply listing changes
    async fn update_animal(
        &self,
        id: Uuid,
        changes: AnimalChanges,
        updated_by: String,
    ) -> AppResult<Animal>;

    /// Soft delete a listing
    async fn delete_animal(&self, id: Uuid, updated_by: String) -> AppResult<()>;
}

/// Concrete implementation of AnimalService using Unit of Work.
pub struct AnimalManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> AnimalManager<U> {
    /// Create new animal service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> AnimalService for AnimalManager<U> {
    async fn list_animals(
        &self,
        filter: AnimalFilter,
        params: PaginationParams,
    ) -> AppResult<(Vec<Animal>, u64)> {
        self.uow
            .animals()
            .list_paged(filter, params.page, params.limit())
            .await
    }

    async fn get_animal(&self, id: Uuid) -> AppResult<Animal> {
        self.uow.animals().find_by_id(id).await?.ok_or_not_found()
    }

    async fn create_animal(&self, new_animal: NewAnimal) -> AppResult<Animal> {
        if self
            .uow
            .animals()
            .find_duplicate(&new_animal.name, &new_animal.species, &new_animal.breed)
            .await?
            .is_some()
        {
            return Err(AppError::conflict(
                "Animal with similar information already exists",
            ));
        }

        let animal = self.uow.animals().create(new_animal).await?;
        tracing::info!(animal_id = %animal.id, name = %animal.name, "Animal listing created");
        Ok(animal)
    }

    async fn update_animal(
        &self,
        id: Uuid,
        changes: AnimalChanges,
        updated_by: String,
    ) -> AppResult<Animal> {
        self.uow.animals().update(id, changes, updated_by).await
    }

    async fn delete_animal(&self, id: Uuid, updated_by: String) -> AppResult<()> {
        self.uow.animals().delete(id, updated_by).await?;
        tracing::info!(animal_id = %id, "Animal listing soft-deleted");
        Ok(())
    }
}
