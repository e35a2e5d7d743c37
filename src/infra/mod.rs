//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connections and repositories
//! - Database migrations
//! - Image blob storage on the local filesystem
//! - Unit of Work for transaction management

pub mod db;
pub mod repositories;
pub mod storage;
pub mod unit_of_work;

pub use db::{Database, Migrator};
pub use repositories::{
    AnimalRepository, AnimalStore, ApplicationRepository, ApplicationStore, UserRepository,
    UserStore,
};
pub use storage::ImageStore;
pub use unit_of_work::{Persistence, TransactionContext, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{MockAnimalRepository, MockApplicationRepository, MockUserRepository};
