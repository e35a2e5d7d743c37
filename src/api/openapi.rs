//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{
    animal_handler, application_handler, auth_handler, dashboard_handler, user_handler,
};
use crate::domain::{
    AdoptionStatus, AnimalResponse, ApplicationResponse, ApplicationStatus, UserResponse, UserRole,
};
use crate::services::{DashboardSummary, TokenResponse};

/// OpenAPI documentation for the Shelter API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Shelter API",
        version = "0.1.0",
        description = "Animal shelter adoption workflow API with Axum and SeaORM",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // Auth endpoints
        auth_handler::login,
        // User management endpoints
        user_handler::register_adopter,
        user_handler::get_current_user,
        user_handler::create_admin,
        user_handler::list_admins,
        user_handler::update_admin,
        user_handler::hard_delete_admin,
        user_handler::list_adopters,
        user_handler::update_adopter,
        user_handler::delete_adopter,
        // Animal management endpoints
        animal_handler::list_animals,
        animal_handler::get_animal,
        animal_handler::create_animal,
        animal_handler::update_animal,
        animal_handler::delete_animal,
        // Application management endpoints
        application_handler::list_applications,
        application_handler::my_applications,
        application_handler::get_application,
        application_handler::create_application,
        application_handler::update_application_status,
        application_handler::update_application_by_adopter,
        // Dashboard endpoints
        dashboard_handler::summary,
    ),
    components(
        schemas(
            // Domain types
            UserRole,
            AdoptionStatus,
            ApplicationStatus,
            UserResponse,
            AnimalResponse,
            ApplicationResponse,
            DashboardSummary,
            TokenResponse,
            // Request types
            auth_handler::LoginRequest,
            user_handler::RegisterAdopterRequest,
            user_handler::CreateAdminRequest,
            user_handler::UpdateProfileRequest,
            animal_handler::CreateAnimalRequest,
            animal_handler::UpdateAnimalRequest,
            application_handler::CreateApplicationRequest,
            application_handler::UpdateApplicationStatusRequest,
            application_handler::UpdateApplicationByAdopterRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth Management", description = "Role-specific login portals"),
        (name = "User Management", description = "Admin and adopter accounts"),
        (name = "Animal Management", description = "Animal catalog with photo uploads"),
        (name = "Application Management", description = "Adoption application lifecycle"),
        (name = "Dashboard Management", description = "Admin summary counts")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /auth/login/{role}"))
                        .build(),
                ),
            );
        }
    }
}
