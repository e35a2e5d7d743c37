//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.
//! By default, query methods exclude soft-deleted records.

mod animal_repository;
mod application_repository;
pub(crate) mod entities;
mod user_repository;

pub use animal_repository::{AnimalRepository, AnimalStore};
pub use application_repository::{ApplicationRepository, ApplicationStore};
pub use user_repository::{UserRepository, UserStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use animal_repository::MockAnimalRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use application_repository::MockApplicationRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
