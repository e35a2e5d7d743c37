//! Adoption application database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{Application, ApplicationStatus};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "applications")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub animal_id: Uuid,
    pub adopter_id: Uuid,
    pub reason: Option<String>,
    pub status: String,
    pub created_at: DateTimeUtc,
    pub created_by: String,
    pub updated_at: Option<DateTimeUtc>,
    pub updated_by: Option<String>,
    /// Soft delete timestamp (NULL = active, set = deleted)
    pub deleted_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::animal::Entity",
        from = "Column::AnimalId",
        to = "super::animal::Column::Id"
    )]
    Animal,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AdopterId",
        to = "super::user::Column::Id"
    )]
    Adopter,
}

impl Related<super::animal::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Animal.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Adopter.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for Application {
    fn from(model: Model) -> Self {
        Application {
            id: model.id,
            animal_id: model.animal_id,
            adopter_id: model.adopter_id,
            reason: model.reason,
            status: ApplicationStatus::from(model.status.as_str()),
            created_at: model.created_at,
            created_by: model.created_by,
            updated_at: model.updated_at,
            updated_by: model.updated_by,
            deleted_at: model.deleted_at,
        }
    }
}
