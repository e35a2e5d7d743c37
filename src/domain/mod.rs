//! Domain layer - Core business entities and logic
//!
//! This module contains the core domain models that represent
//! business concepts independent of infrastructure concerns.

pub mod animal;
pub mod application;
pub mod password;
pub mod user;

pub use animal::{AdoptionStatus, Animal, AnimalChanges, AnimalFilter, AnimalResponse, NewAnimal};
pub use application::{
    Application, ApplicationDetails, ApplicationResponse, ApplicationStatus, NewApplication,
};
pub use password::Password;
pub use user::{NewUser, User, UserChanges, UserResponse, UserRole};
