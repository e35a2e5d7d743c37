//! Animal domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Adoption status of an animal listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum AdoptionStatus {
    Available,
    Adopted,
}

impl AdoptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdoptionStatus::Available => "Available",
            AdoptionStatus::Adopted => "Adopted",
        }
    }
}

impl From<&str> for AdoptionStatus {
    fn from(s: &str) -> Self {
        match s {
            "Adopted" => AdoptionStatus::Adopted,
            _ => AdoptionStatus::Available,
        }
    }
}

impl std::fmt::Display for AdoptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Animal domain entity
#[derive(Debug, Clone, Serialize)]
pub struct Animal {
    pub id: Uuid,
    pub name: String,
    pub species: String,
    pub breed: String,
    pub age: Option<i32>,
    pub gender: String,
    pub description: Option<String>,
    pub photo_url: String,
    pub adoption_status: AdoptionStatus,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
    pub updated_at: Option<DateTime<Utc>>,
    pub updated_by: Option<String>,
    /// Soft delete timestamp (None = active, Some = deleted)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Animal {
    /// Check if the animal can still receive applications
    pub fn is_available(&self) -> bool {
        self.adoption_status == AdoptionStatus::Available
    }

    /// Check if the listing is soft deleted
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Fields required to persist a new animal listing
#[derive(Debug, Clone)]
pub struct NewAnimal {
    pub name: String,
    pub species: String,
    pub breed: String,
    pub age: Option<i32>,
    pub gender: String,
    pub description: Option<String>,
    pub photo_url: String,
    pub adoption_status: AdoptionStatus,
    pub created_by: String,
}

/// Optional listing changes applied on update
#[derive(Debug, Clone, Default)]
pub struct AnimalChanges {
    pub name: Option<String>,
    pub species: Option<String>,
    pub breed: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub description: Option<String>,
    pub adoption_status: Option<AdoptionStatus>,
    pub photo_url: Option<String>,
}

/// Catalog listing filters: substring search over name/species/breed,
/// plus exact gender and adoption-status matches.
#[derive(Debug, Clone, Default)]
pub struct AnimalFilter {
    pub search: Option<String>,
    pub gender: Option<String>,
    pub adoption_status: Option<AdoptionStatus>,
}

/// Animal response (safe to return to client)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AnimalResponse {
    pub id: Uuid,
    #[schema(example = "Buddy")]
    pub name: String,
    #[schema(example = "Dog")]
    pub species: String,
    #[schema(example = "Labrador")]
    pub breed: String,
    #[schema(example = 3)]
    pub age: Option<i32>,
    #[schema(example = "Male")]
    pub gender: String,
    pub description: Option<String>,
    /// Public URL of the uploaded photo
    #[schema(example = "/images/1704067200_buddy.jpg")]
    pub photo_url: String,
    #[schema(example = "Available")]
    pub adoption_status: AdoptionStatus,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
    pub updated_at: Option<DateTime<Utc>>,
    pub updated_by: Option<String>,
}

impl From<Animal> for AnimalResponse {
    fn from(animal: Animal) -> Self {
        Self {
            id: animal.id,
            name: animal.name,
            species: animal.species,
            breed: animal.breed,
            age: animal.age,
            gender: animal.gender,
            description: animal.description,
            photo_url: animal.photo_url,
            adoption_status: animal.adoption_status,
            created_at: animal.created_at,
            created_by: animal.created_by,
            updated_at: animal.updated_at,
            updated_by: animal.updated_by,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adoption_status_round_trip() {
        assert_eq!(AdoptionStatus::from("Available"), AdoptionStatus::Available);
        assert_eq!(AdoptionStatus::from("Adopted"), AdoptionStatus::Adopted);
        assert_eq!(AdoptionStatus::Available.as_str(), "Available");
        assert_eq!(AdoptionStatus::Adopted.as_str(), "Adopted");
    }

    #[test]
    fn test_availability_check() {
        let animal = Animal {
            id: Uuid::new_v4(),
            name: "Buddy".to_string(),
            species: "Dog".to_string(),
            breed: "Labrador".to_string(),
            age: Some(3),
            gender: "Male".to_string(),
            description: None,
            photo_url: "/images/buddy.jpg".to_string(),
            adoption_status: AdoptionStatus::Available,
            created_at: Utc::now(),
            created_by: "Admin".to_string(),
            updated_at: None,
            updated_by: None,
            deleted_at: None,
        };

        assert!(animal.is_available());

        let adopted = Animal {
            adoption_status: AdoptionStatus::Adopted,
            ..animal
        };
        assert!(!adopted.is_available());
    }
}
