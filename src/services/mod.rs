//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.
//!
//! All services use the Unit of Work for centralized repository access;
//! the application status transition additionally uses its transaction
//! support for the cross-entity write on approval.

mod animal_service;
mod application_service;
mod auth_service;
pub mod container;
mod dashboard_service;
mod user_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use animal_service::{AnimalManager, AnimalService};
pub use application_service::{ApplicationManager, ApplicationService};
pub use auth_service::{AuthService, Authenticator, Claims, TokenResponse};
pub use dashboard_service::{DashboardManager, DashboardService, DashboardSummary};
pub use user_service::{AdopterRegistration, NewAdminAccount, ProfileUpdate, UserManager, UserService};

#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
