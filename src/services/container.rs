//! Service Container - Centralized service access.
//!
//! Wires the Unit of Work into every service once, so the HTTP layer only
//! ever sees service traits.

use std::sync::Arc;

use super::{AnimalService, ApplicationService, AuthService, DashboardService, UserService};
use crate::config::Config;
use crate::infra::Persistence;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
///
/// Provides centralized access to all application services.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    /// Get authentication service
    fn auth(&self) -> Arc<dyn AuthService>;

    /// Get user service
    fn users(&self) -> Arc<dyn UserService>;

    /// Get animal service
    fn animals(&self) -> Arc<dyn AnimalService>;

    /// Get application service
    fn applications(&self) -> Arc<dyn ApplicationService>;

    /// Get dashboard service
    fn dashboard(&self) -> Arc<dyn DashboardService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    user_service: Arc<dyn UserService>,
    animal_service: Arc<dyn AnimalService>,
    application_service: Arc<dyn ApplicationService>,
    dashboard_service: Arc<dyn DashboardService>,
}

impl Services {
    /// Create a new service container with all services initialized
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        user_service: Arc<dyn UserService>,
        animal_service: Arc<dyn AnimalService>,
        application_service: Arc<dyn ApplicationService>,
        dashboard_service: Arc<dyn DashboardService>,
    ) -> Self {
        Self {
            auth_service,
            user_service,
            animal_service,
            application_service,
            dashboard_service,
        }
    }

    /// Create service container from database connection and config
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: Config) -> Self {
        use super::{
            AnimalManager, ApplicationManager, Authenticator, DashboardManager, UserManager,
        };

        let uow = Arc::new(Persistence::new(db));
        let auth_service = Arc::new(Authenticator::new(uow.clone(), config));
        let user_service = Arc::new(UserManager::new(uow.clone()));
        let animal_service = Arc::new(AnimalManager::new(uow.clone()));
        let application_service = Arc::new(ApplicationManager::new(uow.clone()));
        let dashboard_service = Arc::new(DashboardManager::new(uow));

        Self {
            auth_service,
            user_service,
            animal_service,
            application_service,
            dashboard_service,
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    fn animals(&self) -> Arc<dyn AnimalService> {
        self.animal_service.clone()
    }

    fn applications(&self) -> Arc<dyn ApplicationService> {
        self.application_service.clone()
    }

    fn dashboard(&self) -> Arc<dyn DashboardService> {
        self.dashboard_service.clone()
    }
}
