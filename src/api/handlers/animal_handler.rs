//! Animal catalog handlers.
//!
//! Create and update take `multipart/form-data` with a `request_data` JSON
//! part plus an `animal_image` file part, mirroring how the admin UI
//! submits listings.

use axum::{
    extract::{Extension, Multipart, Path, Query, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::middleware::{require_admin, require_role, CurrentUser};
use crate::api::AppState;
use crate::config::{DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE};
use crate::domain::{
    AdoptionStatus, AnimalChanges, AnimalFilter, AnimalResponse, NewAnimal, UserRole,
};
use crate::errors::{AppError, AppResult};
use crate::types::{Created, NoContent, Paginated, PaginationParams};

/// JSON carried in the `request_data` multipart part on creation
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAnimalRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Buddy")]
    pub name: String,
    #[validate(length(min = 1, message = "Species is required"))]
    #[schema(example = "Dog")]
    pub species: String,
    #[validate(length(min = 1, message = "Breed is required"))]
    #[schema(example = "Labrador")]
    pub breed: String,
    #[validate(range(min = 0, message = "Age cannot be negative"))]
    #[schema(example = 3)]
    pub age: Option<i32>,
    #[validate(length(min = 1, message = "Gender is required"))]
    #[schema(example = "Male")]
    pub gender: String,
    pub description: Option<String>,
    #[serde(default = "default_adoption_status")]
    #[schema(example = "Available")]
    pub adoption_status: AdoptionStatus,
}

fn default_adoption_status() -> AdoptionStatus {
    AdoptionStatus::Available
}

/// JSON carried in the `request_data` multipart part on update
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateAnimalRequest {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "Species cannot be empty"))]
    pub species: Option<String>,
    #[validate(length(min = 1, message = "Breed cannot be empty"))]
    pub breed: Option<String>,
    #[validate(range(min = 0, message = "Age cannot be negative"))]
    pub age: Option<i32>,
    #[validate(length(min = 1, message = "Gender cannot be empty"))]
    pub gender: Option<String>,
    pub description: Option<String>,
    pub adoption_status: Option<AdoptionStatus>,
}

/// Catalog listing query
#[derive(Debug, Deserialize)]
pub struct ListAnimalsQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    /// Substring match on name, species or breed
    pub search: Option<String>,
    pub gender: Option<String>,
    pub adoption_status: Option<String>,
}

impl ListAnimalsQuery {
    fn pagination(&self) -> PaginationParams {
        PaginationParams {
            page: self.page.unwrap_or(DEFAULT_PAGE_NUMBER),
            limit: self.limit.unwrap_or(DEFAULT_PAGE_SIZE),
        }
    }

    fn filter(&self) -> AppResult<AnimalFilter> {
        let adoption_status = match self.adoption_status.as_deref() {
            None => None,
            Some("Available") => Some(AdoptionStatus::Available),
            Some("Adopted") => Some(AdoptionStatus::Adopted),
            Some(other) => {
                return Err(AppError::validation(format!(
                    "Unknown adoption status '{}'",
                    other
                )))
            }
        };

        Ok(AnimalFilter {
            search: self.search.clone(),
            gender: self.gender.clone(),
            adoption_status,
        })
    }
}

/// Create animal catalog routes
pub fn animal_routes() -> Router<AppState> {
    Router::new()
        .route("/animals", get(list_animals).post(create_animal))
        .route(
            "/animals/:id",
            get(get_animal).put(update_animal).delete(delete_animal),
        )
}

/// Parts accepted by the create/update endpoints
struct AnimalForm {
    request_data: Option<String>,
    image: Option<(String, Vec<u8>)>,
}

/// Pull the `request_data` and `animal_image` parts out of the form
async fn read_animal_form(mut multipart: Multipart) -> AppResult<AnimalForm> {
    let mut form = AnimalForm {
        request_data: None,
        image: None,
    };

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Invalid multipart payload: {}", e)))?
    {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("request_data") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::validation(format!("Invalid request_data part: {}", e)))?;
                form.request_data = Some(text);
            }
            Some("animal_image") => {
                let filename = field
                    .file_name()
                    .map(str::to_owned)
                    .ok_or_else(|| AppError::validation("animal_image must be a file"))?;
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::validation(format!("Invalid animal_image part: {}", e)))?;
                form.image = Some((filename, bytes.to_vec()));
            }
            _ => {}
        }
    }

    Ok(form)
}

/// Parse and validate the JSON carried in `request_data`
fn parse_request_data<T>(raw: &str) -> AppResult<T>
where
    T: serde::de::DeserializeOwned + Validate,
{
    let payload: T = serde_json::from_str(raw)
        .map_err(|e| AppError::validation(format!("Invalid JSON in request_data: {}", e)))?;
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    Ok(payload)
}

/// List animals with pagination, search and filters
#[utoipa::path(
    get,
    path = "/animal-management/animals",
    tag = "Animal Management",
    security(("bearer_auth" = [])),
    params(
        ("page" = Option<u64>, Query, description = "Page number, starting at 1"),
        ("limit" = Option<u64>, Query, description = "Page size, 1..100"),
        ("search" = Option<String>, Query, description = "Name/species/breed substring"),
        ("gender" = Option<String>, Query, description = "Exact gender match"),
        ("adoption_status" = Option<String>, Query, description = "Available or Adopted")
    ),
    responses(
        (status = 200, description = "Page of animal listings"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_animals(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Query(query): Query<ListAnimalsQuery>,
) -> AppResult<Json<Paginated<AnimalResponse>>> {
    require_role(&current_user, &[UserRole::Admin, UserRole::Adopter])?;

    let params = query.pagination();
    params.validate()?;
    let filter = query.filter()?;

    let (animals, total) = state.animal_service.list_animals(filter, params.clone()).await?;

    Ok(Json(Paginated::new(
        animals.into_iter().map(AnimalResponse::from).collect(),
        params.page,
        params.limit(),
        total,
    )))
}

/// Get one animal listing
#[utoipa::path(
    get,
    path = "/animal-management/animals/{id}",
    tag = "Animal Management",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Animal listing", body = AnimalResponse),
        (status = 404, description = "Animal not found")
    )
)]
pub async fn get_animal(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<AnimalResponse>> {
    require_role(&current_user, &[UserRole::Admin, UserRole::Adopter])?;

    let animal = state.animal_service.get_animal(id).await?;
    Ok(Json(AnimalResponse::from(animal)))
}

/// Create an animal listing with an uploaded photo (admin only).
///
/// Accepts `multipart/form-data` with a `request_data` JSON part
/// ([`CreateAnimalRequest`]) and an `animal_image` file part.
#[utoipa::path(
    post,
    path = "/animal-management/animals",
    tag = "Animal Management",
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Animal created", body = AnimalResponse),
        (status = 400, description = "Missing parts, bad JSON, or unsupported image format"),
        (status = 403, description = "Admin access only"),
        (status = 409, description = "Animal with similar information already exists")
    )
)]
pub async fn create_animal(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Created<AnimalResponse>> {
    require_admin(&current_user)?;

    let form = read_animal_form(multipart).await?;

    let payload: CreateAnimalRequest = parse_request_data(
        form.request_data
            .as_deref()
            .ok_or_else(|| AppError::validation("request_data part is required"))?,
    )?;

    let (filename, bytes) = form
        .image
        .ok_or_else(|| AppError::validation("animal_image part is required"))?;

    let photo_url = state.image_store.save(&filename, &bytes).await?;

    let animal = state
        .animal_service
        .create_animal(NewAnimal {
            name: payload.name,
            species: payload.species,
            breed: payload.breed,
            age: payload.age,
            gender: payload.gender,
            description: payload.description,
            photo_url,
            adoption_status: payload.adoption_status,
            created_by: current_user.username,
        })
        .await?;

    Ok(Created(AnimalResponse::from(animal)))
}

/// Update an animal listing; fields and photo are both optional (admin only).
///
/// Accepts `multipart/form-data` with an optional `request_data` JSON part
/// ([`UpdateAnimalRequest`]) and an optional `animal_image` file part.
#[utoipa::path(
    put,
    path = "/animal-management/animals/{id}",
    tag = "Animal Management",
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Animal updated"),
        (status = 400, description = "Bad JSON or unsupported image format"),
        (status = 403, description = "Admin access only"),
        (status = 404, description = "Animal not found")
    )
)]
pub async fn update_animal(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> AppResult<NoContent> {
    require_admin(&current_user)?;

    let form = read_animal_form(multipart).await?;

    let payload: Option<UpdateAnimalRequest> = match form.request_data.as_deref() {
        Some(raw) => Some(parse_request_data(raw)?),
        None => None,
    };

    let photo_url = match form.image {
        Some((filename, bytes)) => Some(state.image_store.save(&filename, &bytes).await?),
        None => None,
    };

    let mut changes = match payload {
        Some(payload) => AnimalChanges {
            name: payload.name,
            species: payload.species,
            breed: payload.breed,
            age: payload.age,
            gender: payload.gender,
            description: payload.description,
            adoption_status: payload.adoption_status,
            photo_url: None,
        },
        None => AnimalChanges::default(),
    };
    changes.photo_url = photo_url;

    state
        .animal_service
        .update_animal(id, changes, current_user.username)
        .await?;

    Ok(NoContent)
}

/// Soft delete an animal listing (admin only)
#[utoipa::path(
    delete,
    path = "/animal-management/animals/{id}",
    tag = "Animal Management",
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Animal removed from the catalog"),
        (status = 403, description = "Admin access only"),
        (status = 404, description = "Animal not found")
    )
)]
pub async fn delete_animal(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<NoContent> {
    require_admin(&current_user)?;

    state
        .animal_service
        .delete_animal(id, current_user.username)
        .await?;

    Ok(NoContent)
}
