//! Animal database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{AdoptionStatus, Animal};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "animals")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub species: String,
    pub breed: String,
    pub age: Option<i32>,
    pub gender: String,
    pub description: Option<String>,
    pub photo_url: String,
    pub adoption_status: String,
    pub created_at: DateTimeUtc,
    pub created_by: String,
    pub updated_at: Option<DateTimeUtc>,
    pub updated_by: Option<String>,
    /// Soft delete timestamp (NULL = active, set = deleted)
    pub deleted_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::application::Entity")]
    Applications,
}

impl Related<super::application::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Applications.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for Animal {
    fn from(model: Model) -> Self {
        Animal {
            id: model.id,
            name: model.name,
            species: model.species,
            breed: model.breed,
            age: model.age,
            gender: model.gender,
            description: model.description,
            photo_url: model.photo_url,
            adoption_status: AdoptionStatus::from(model.adoption_status.as_str()),
            created_at: model.created_at,
            created_by: model.created_by,
            updated_at: model.updated_at,
            updated_by: model.updated_by,
            deleted_at: model.deleted_at,
        }
    }
}
