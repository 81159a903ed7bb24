//! SeaORM entities for database tables

use sea_orm::entity::prelude::*;

/// Documents table: every nomenclature collection shares it
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "documents")]
pub struct Model {
    /// Insertion sequence, defines newest-first ordering
    #[sea_orm(primary_key)]
    pub seq: i32,

    /// Opaque record key exposed to clients
    #[sea_orm(unique)]
    pub id: Uuid,

    /// Collection name (activities, ptschemeobjects, ...)
    pub collection: String,

    /// Entity fields as JSON
    pub body: Json,

    /// Creation timestamp
    pub created_at: DateTimeUtc,

    /// Last update timestamp
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
