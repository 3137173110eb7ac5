use sea_orm::prelude::*;
use serde::{Deserialize, Serialize};

/// Additive-quantity ledger row, keyed by (name, category, size).
///
/// `size` is stored as an empty string when unsized so the unique key index
/// behaves (SQL treats NULLs as distinct).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ledger_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub category: String,
    pub size: String,
    pub quantity: i32,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
