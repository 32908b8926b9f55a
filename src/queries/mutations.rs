//! Bulk statements that report how many rows they touched.

use sea_orm::sea_query::{Expr, Query};
use sea_orm::*;
use tracing::info;

use crate::database::entities::{categories, old_categories, products};
use crate::errors::QueryError;

/// Copy every legacy category into the category table, keeping ids and names.
///
/// Equivalent to `INSERT INTO category (category_id, name) SELECT category_id,
/// name FROM old_category`.
pub async fn copy_old_categories<C: ConnectionTrait>(db: &C) -> Result<u64, QueryError> {
    let select = Query::select()
        .columns([old_categories::Column::Id, old_categories::Column::Name])
        .from(old_categories::Entity)
        .to_owned();

    let insert = Query::insert()
        .into_table(categories::Entity)
        .columns([categories::Column::Id, categories::Column::Name])
        .select_from(select)
        .map_err(|e| DbErr::Custom(format!("invalid insert-select: {}", e)))?
        .to_owned();

    let backend = db.get_database_backend();
    let rows = db.execute(backend.build(&insert)).await?.rows_affected();
    if rows > 0 {
        info!("Copied {} legacy categories", rows);
    }
    Ok(rows)
}

pub async fn update_product_price<C: ConnectionTrait>(
    db: &C,
    product_id: i64,
    price: f64,
) -> Result<u64, QueryError> {
    let result = products::Entity::update_many()
        .col_expr(products::Column::Price, Expr::value(price))
        .filter(products::Column::Id.eq(product_id))
        .exec(db)
        .await?;

    if result.rows_affected > 0 {
        info!("Set price of product {} to {}", product_id, price);
    }
    Ok(result.rows_affected)
}

pub async fn delete_old_category<C: ConnectionTrait>(
    db: &C,
    old_category_id: i64,
) -> Result<u64, QueryError> {
    let result = old_categories::Entity::delete_by_id(old_category_id)
        .exec(db)
        .await?;

    if result.rows_affected > 0 {
        info!("Deleted legacy category {}", old_category_id);
    }
    Ok(result.rows_affected)
}
