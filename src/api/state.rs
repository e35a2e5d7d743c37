//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::infra::{Database, ImageStore};
use crate::services::{
    AnimalService, ApplicationService, AuthService, DashboardService, ServiceContainer, Services,
    UserService,
};

/// Application state containing all services (DI container).
///
/// Use `from_config()` for recommended initialization with the full
/// ServiceContainer and Unit of Work wiring.
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth_service: Arc<dyn AuthService>,
    /// User service
    pub user_service: Arc<dyn UserService>,
    /// Animal catalog service
    pub animal_service: Arc<dyn AnimalService>,
    /// Adoption application service
    pub application_service: Arc<dyn ApplicationService>,
    /// Dashboard summary service
    pub dashboard_service: Arc<dyn DashboardService>,
    /// Uploaded image store
    pub image_store: Arc<ImageStore>,
    /// Database connection
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state from database connection and config.
    pub fn from_config(
        database: Arc<Database>,
        image_store: Arc<ImageStore>,
        config: crate::config::Config,
    ) -> Self {
        let container = Services::from_connection(database.get_connection(), config);

        Self {
            auth_service: container.auth(),
            user_service: container.users(),
            animal_service: container.animals(),
            application_service: container.applications(),
            dashboard_service: container.dashboard(),
            image_store,
            database,
        }
    }

    /// Create new application state with manually injected services.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        user_service: Arc<dyn UserService>,
        animal_service: Arc<dyn AnimalService>,
        application_service: Arc<dyn ApplicationService>,
        dashboard_service: Arc<dyn DashboardService>,
        image_store: Arc<ImageStore>,
        database: Arc<Database>,
    ) -> Self {
        Self {
            auth_service,
            user_service,
            animal_service,
            application_service,
            dashboard_service,
            image_store,
            database,
        }
    }
}
