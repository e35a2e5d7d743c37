//! Animal catalog repository with soft delete support.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::animal::{self, ActiveModel, Entity as AnimalEntity};
use crate::domain::{Animal, AnimalChanges, AnimalFilter, NewAnimal};
use crate::errors::{AppError, AppResult};

/// Animal repository trait for dependency injection.
///
/// Query methods exclude soft-deleted animals unless stated otherwise.
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait AnimalRepository: Send + Sync {
    /// Find active animal by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Animal>>;

    /// Find animals by IDs, including soft-deleted (for historical lookups)
    async fn find_by_ids(&self, ids: Vec<Uuid>) -> AppResult<Vec<Animal>>;

    /// Find an active animal with the same name, species and breed
    async fn find_duplicate(
        &self,
        name: &str,
        species: &str,
        breed: &str,
    ) -> AppResult<Option<Animal>>;

    /// Create a new animal listing
    async fn create(&self, new_animal: NewAnimal) -> AppResult<Animal>;

    /// Apply listing changes to an active animal
    async fn update(
        &self,
        id: Uuid,
        changes: AnimalChanges,
        updated_by: String,
    ) -> AppResult<Animal>;

    /// Soft delete animal by ID (sets deleted_at timestamp)
    async fn delete(&self, id: Uuid, updated_by: String) -> AppResult<()>;

    /// List active animals, paginated and filtered.
    /// Returns the page plus the total row count.
    async fn list_paged(
        &self,
        filter: AnimalFilter,
        page: u64,
        limit: u64,
    ) -> AppResult<(Vec<Animal>, u64)>;

    /// Count active animals
    async fn count_active(&self) -> AppResult<u64>;
}

/// SeaORM-backed implementation of AnimalRepository.
pub struct AnimalStore {
    db: DatabaseConnection,
}

impl AnimalStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AnimalRepository for AnimalStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Animal>> {
        let result = AnimalEntity::find_by_id(id)
            .filter(animal::Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Animal::from))
    }

    async fn find_by_ids(&self, ids: Vec<Uuid>) -> AppResult<Vec<Animal>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = AnimalEntity::find()
            .filter(animal::Column::Id.is_in(ids))
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Animal::from).collect())
    }

    async fn find_duplicate(
        &self,
        name: &str,
        species: &str,
        breed: &str,
    ) -> AppResult<Option<Animal>> {
        let result = AnimalEntity::find()
            .filter(animal::Column::Name.eq(name))
            .filter(animal::Column::Species.eq(species))
            .filter(animal::Column::Breed.eq(breed))
            .filter(animal::Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Animal::from))
    }

    async fn create(&self, new_animal: NewAnimal) -> AppResult<Animal> {
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(new_animal.name),
            species: Set(new_animal.species),
            breed: Set(new_animal.breed),
            age: Set(new_animal.age),
            gender: Set(new_animal.gender),
            description: Set(new_animal.description),
            photo_url: Set(new_animal.photo_url),
            adoption_status: Set(new_animal.adoption_status.to_string()),
            created_at: Set(Utc::now()),
            created_by: Set(new_animal.created_by),
            updated_at: Set(None),
            updated_by: Set(None),
            deleted_at: Set(None),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;

        Ok(Animal::from(model))
    }

    async fn update(
        &self,
        id: Uuid,
        changes: AnimalChanges,
        updated_by: String,
    ) -> AppResult<Animal> {
        let model = AnimalEntity::find_by_id(id)
            .filter(animal::Column::DeletedAt.is_null())
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = model.into();

        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(species) = changes.species {
            active.species = Set(species);
        }
        if let Some(breed) = changes.breed {
            active.breed = Set(breed);
        }
        if let Some(age) = changes.age {
            active.age = Set(Some(age));
        }
        if let Some(gender) = changes.gender {
            active.gender = Set(gender);
        }
        if let Some(description) = changes.description {
            active.description = Set(Some(description));
        }
        if let Some(adoption_status) = changes.adoption_status {
            active.adoption_status = Set(adoption_status.to_string());
        }
        if let Some(photo_url) = changes.photo_url {
            active.photo_url = Set(photo_url);
        }
        active.updated_at = Set(Some(Utc::now()));
        active.updated_by = Set(Some(updated_by));

        let model = active.update(&self.db).await.map_err(AppError::from)?;

        Ok(Animal::from(model))
    }

    async fn delete(&self, id: Uuid, updated_by: String) -> AppResult<()> {
        let model = AnimalEntity::find_by_id(id)
            .filter(animal::Column::DeletedAt.is_null())
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

    async fn list_paged(
        &self,
        filter: AnimalFilter,
        page: u64,
        limit: u64,
    ) -> AppResult<(Vec<Animal>, u64)> {
        let mut query = AnimalEntity::find()
            .filter(animal::Column::DeletedAt.is_null())
            .order_by_asc(animal::Column::CreatedAt);

        if let Some(search) = filter.search {
            query = query.filter(
                Condition::any()
                    .add(animal::Column::Name.contains(&search))
                    .add(animal::Column::Species.contains(&search))
                    .add(animal::Column::Breed.contains(&search)),
            );
        }
        if let Some(gender) = filter.gender {
            query = query.filter(animal::Column::Gender.eq(gender));
        }
        if let Some(adoption_status) = filter.adoption_status {
            query = query.filter(animal::Column::AdoptionStatus.eq(adoption_status.to_string()));
        }

        let paginator = query.paginate(&self.db, limit);
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(page.saturating_sub(1)).await?;

        Ok((models.into_iter().map(Animal::from).collect(), total))
    }

    async fn count_active(&self) -> AppResult<u64> {
        AnimalEntity::find()
            .filter(animal::Column::DeletedAt.is_null())
            .count(&self.db)
            .await
            .map_err(AppError::from)
    }
}
