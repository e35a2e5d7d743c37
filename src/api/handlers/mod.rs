//! HTTP request handlers.

pub mod animal_handler;
pub mod application_handler;
pub mod auth_handler;
pub mod dashboard_handler;
pub mod user_handler;

pub use animal_handler::animal_routes;
pub use application_handler::application_routes;
pub use auth_handler::auth_routes;
pub use dashboard_handler::dashboard_routes;
pub use user_handler::{user_public_routes, user_routes};
