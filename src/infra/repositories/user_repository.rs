//! User repository with soft delete support.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::domain::{NewUser, User, UserChanges, UserRole};
use crate::errors::{AppError, AppResult};

/// User repository trait for dependency injection.
///
/// Query methods exclude soft-deleted users unless stated otherwise.
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find active user by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find active user by email
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Find user by email including soft-deleted
    async fn find_by_email_with_deleted(&self, email: &str) -> AppResult<Option<User>>;

    /// Find users by IDs, including soft-deleted (for historical lookups)
    async fn find_by_ids(&self, ids: Vec<Uuid>) -> AppResult<Vec<User>>;

    /// Create a new user
    async fn create(&self, new_user: NewUser) -> AppResult<User>;

    /// Apply profile changes to an active user
    async fn update(&self, id: Uuid, changes: UserChanges, updated_by: String) -> AppResult<User>;

    /// Soft delete user by ID (sets deleted_at timestamp)
    async fn delete(&self, id: Uuid, updated_by: String) -> AppResult<()>;

    /// Permanently delete user from database (hard delete)
    async fn hard_delete(&self, id: Uuid) -> AppResult<()>;

    /// List active users of a role, paginated, optionally filtered by a
    /// name/email substring. Returns the page plus the total row count.
    async fn list_paged(
        &self,
        role: UserRole,
        search: Option<String>,
        page: u64,
        limit: u64,
    ) -> AppResult<(Vec<User>, u64)>;

    /// Count active users of a role
    async fn count_by_role(&self, role: UserRole) -> AppResult<u64>;
}

/// SeaORM-backed implementation of UserRepository.
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id)
            .filter(user::Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .filter(user::Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn find_by_email_with_deleted(&self, email: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn find_by_ids(&self, ids: Vec<Uuid>) -> AppResult<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = UserEntity::find()
            .filter(user::Column::Id.is_in(ids))
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(User::from).collect())
    }

    async fn create(&self, new_user: NewUser) -> AppResult<User> {
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(new_user.name),
            email: Set(new_user.email),
            password_hash: Set(new_user.password_hash),
            phone: Set(new_user.phone),
            address: Set(new_user.address),
            role: Set(new_user.role.to_string()),
            created_at: Set(Utc::now()),
            created_by: Set(new_user.created_by),
            updated_at: Set(None),
            updated_by: Set(None),
            deleted_at: Set(None),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;

        Ok(User::from(model))
    }

    async fn update(&self, id: Uuid, changes: UserChanges, updated_by: String) -> AppResult<User> {
        let model = UserEntity::find_by_id(id)
            .filter(user::Column::DeletedAt.is_null())
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = model.into();

        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(email) = changes.email {
            active.email = Set(email);
        }
        if let Some(password_hash) = changes.password_hash {
            active.password_hash = Set(password_hash);
        }
        if let Some(phone) = changes.phone {
            active.phone = Set(Some(phone));
        }
        if let Some(address) = changes.address {
            active.address = Set(Some(address));
        }
        active.updated_at = Set(Some(Utc::now()));
        active.updated_by = Set(Some(updated_by));

        let model = active.update(&self.db).await.map_err(AppError::from)?;

        Ok(User::from(model))
    }

    async fn delete(&self, id: Uuid, updated_by: String) -> AppResult<()> {
        let model = UserEntity::find_by_id(id)
            .filter(user::Column::DeletedAt.is_null())
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

    async fn hard_delete(&self, id: Uuid) -> AppResult<()> {
        let result = UserEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    async fn list_paged(
        &self,
        role: UserRole,
        search: Option<String>,
        page: u64,
        limit: u64,
    ) -> AppResult<(Vec<User>, u64)> {
        let mut query = UserEntity::find()
            .filter(user::Column::DeletedAt.is_null())
            .filter(user::Column::Role.eq(role.to_string()))
            .order_by_asc(user::Column::CreatedAt);

        if let Some(search) = search {
            query = query.filter(
                Condition::any()
                    .add(user::Column::Name.contains(&search))
                    .add(user::Column::Email.contains(&search)),
            );
        }

        let paginator = query.paginate(&self.db, limit);
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(page.saturating_sub(1)).await?;

        Ok((models.into_iter().map(User::from).collect(), total))
    }

    async fn count_by_role(&self, role: UserRole) -> AppResult<u64> {
        UserEntity::find()
            .filter(user::Column::DeletedAt.is_null())
            .filter(user::Column::Role.eq(role.to_string()))
            .count(&self.db)
            .await
            .map_err(AppError::from)
    }
}
