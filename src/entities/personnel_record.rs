use sea_orm::prelude::*;
use serde::{Deserialize, Serialize};

/// One issued item for one person, scoped by category group.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "personnel_records")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub quantity: i32,
    pub category: String,
    pub size: Option<String>,
    /// Recorded for OCP and Blues issue flows.
    pub ranks: Option<String>,
    /// Ribbon count, Blues flow only.
    pub ribbons: Option<i32>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
