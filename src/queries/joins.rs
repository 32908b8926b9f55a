use chrono::NaiveDate;
use sea_orm::*;
use serde::{Deserialize, Serialize};

use crate::database::entities::{categories, orders, products};
use crate::errors::QueryError;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProductWithCategory {
    pub product: products::Model,
    pub category: categories::Model,
}

/// An order together with the product it was placed for.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub order: orders::Model,
    pub product: Option<products::Model>,
}

pub fn parse_date(value: &str) -> Result<NaiveDate, QueryError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|source| QueryError::InvalidDate {
        value: value.to_string(),
        source,
    })
}

/// Products priced above `min_price`, each paired with its category.
/// Products without a category are left out, as with an inner join.
pub async fn products_with_category_above<C: ConnectionTrait>(
    db: &C,
    min_price: f64,
) -> Result<Vec<ProductWithCategory>, QueryError> {
    let rows = products::Entity::find()
        .find_also_related(categories::Entity)
        .filter(products::Column::Price.gt(min_price))
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .filter_map(|(product, category)| {
            category.map(|category| ProductWithCategory { product, category })
        })
        .collect())
}

/// Orders purchased between `begin` and `end`, both inclusive.
///
/// The bounds are `YYYY-MM-DD` literals; a malformed one fails before any
/// statement is sent.
pub async fn orders_between<C: ConnectionTrait>(
    db: &C,
    begin: &str,
    end: &str,
) -> Result<Vec<OrderLine>, QueryError> {
    let begin_date = parse_date(begin)?;
    let end_date = parse_date(end)?;
    tracing::debug!("Binding purchase date range {} ..= {}", begin_date, end_date);

    let rows = orders::Entity::find()
        .find_also_related(products::Entity)
        .filter(orders::Column::PurchaseDate.gte(begin_date))
        .filter(orders::Column::PurchaseDate.lte(end_date))
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(order, product)| OrderLine { order, product })
        .collect())
}
