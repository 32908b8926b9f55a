use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Legacy category table, only read as the source of the category migration.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "old_category")]
pub struct Model {
    #[sea_orm(primary_key, column_name = "category_id")]
    pub id: i64,
    pub name: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
