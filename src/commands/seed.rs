//! Seed command - Creates the initial admin account.
//!
//! Idempotent: if any admin account already exists, nothing is written.

use std::sync::Arc;

use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

use crate::cli::args::SeedArgs;
use crate::config::{Config, ROLE_ADMIN};
use crate::errors::{AppError, AppResult};
use crate::infra::repositories::entities::user;
use crate::infra::{Database, Persistence};
use crate::services::{NewAdminAccount, UserManager, UserService};

/// Execute the seed command
pub async fn execute(args: SeedArgs, config: Config) -> AppResult<()> {
    tracing::info!("Seeding initial admin account...");

    let db = Arc::new(Database::connect(&config).await);

    // Skip when an admin already exists
    let existing_admins = user::Entity::find()
        .filter(user::Column::Role.eq(ROLE_ADMIN))
        .filter(user::Column::DeletedAt.is_null())
        .count(db.connection())
        .await
        .map_err(AppError::from)?;

    if existing_admins > 0 {
        tracing::info!("An admin account already exists, nothing to do");
        return Ok(());
    }

    let uow = Arc::new(Persistence::new(db.get_connection()));
    let users = UserManager::new(uow);

    let admin = users
        .create_admin(
            NewAdminAccount {
                name: args.name,
                email: args.email,
                password: args.password,
                phone: None,
                address: None,
            },
            "System".to_string(),
        )
        .await?;

    tracing::info!(user_id = %admin.id, email = %admin.email, "Initial admin created");
    Ok(())
}
