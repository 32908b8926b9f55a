use sea_orm::*;
use serde::{Deserialize, Serialize};

use crate::database::entities::{categories, products};
use crate::errors::QueryError;

/// One row of the per-category price sum.
#[derive(Clone, Debug, PartialEq, FromQueryResult, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub total: f64,
    pub category: Option<String>,
}

/// `count(name)` over all products. Rows with a NULL name are not counted.
pub async fn count_named_products<C: ConnectionTrait>(db: &C) -> Result<i64, QueryError> {
    let count = products::Entity::find()
        .select_only()
        .column_as(products::Column::Name.count(), "named")
        .into_tuple::<i64>()
        .one(db)
        .await?;
    Ok(count.unwrap_or(0))
}

/// Sum of product prices for each category that has products.
pub async fn price_totals_by_category<C: ConnectionTrait>(
    db: &C,
) -> Result<Vec<CategoryTotal>, QueryError> {
    let totals = products::Entity::find()
        .select_only()
        .column_as(products::Column::Price.sum(), "total")
        .column_as(categories::Column::Name, "category")
        .inner_join(categories::Entity)
        .group_by(categories::Column::Id)
        .group_by(categories::Column::Name)
        .into_model::<CategoryTotal>()
        .all(db)
        .await?;
    Ok(totals)
}
