//! Entity listings: plain selects, filters, ordering and paging over products
//! and categories.

use sea_orm::*;

use crate::database::entities::{categories, products};
use crate::errors::QueryError;

/// Wrap a raw keyword in LIKE wildcards so it matches anywhere in the column.
pub fn like_contains(keyword: &str) -> String {
    format!("%{}%", keyword)
}

/// Every category, in whatever order the store returns them.
pub async fn list_categories<C: ConnectionTrait>(
    db: &C,
) -> Result<Vec<categories::Model>, QueryError> {
    Ok(categories::Entity::find().all(db).await?)
}

/// Products whose category name equals `category_name` exactly.
pub async fn products_in_category<C: ConnectionTrait>(
    db: &C,
    category_name: &str,
) -> Result<Vec<products::Model>, QueryError> {
    let products = products::Entity::find()
        .inner_join(categories::Entity)
        .filter(categories::Column::Name.eq(category_name))
        .all(db)
        .await?;
    Ok(products)
}

/// Products whose description contains `keyword`.
pub async fn products_matching_description<C: ConnectionTrait>(
    db: &C,
    keyword: &str,
) -> Result<Vec<products::Model>, QueryError> {
    let pattern = like_contains(keyword);
    tracing::debug!("Binding description pattern {:?}", pattern);

    let products = products::Entity::find()
        .filter(products::Column::Description.like(pattern))
        .all(db)
        .await?;
    Ok(products)
}

pub async fn products_by_price<C: ConnectionTrait>(
    db: &C,
) -> Result<Vec<products::Model>, QueryError> {
    let products = products::Entity::find()
        .order_by_asc(products::Column::Price)
        .all(db)
        .await?;
    Ok(products)
}

/// At most `max_results` products, skipping the first `first_result`.
///
/// Ordered by id so consecutive pages never overlap.
pub async fn products_page<C: ConnectionTrait>(
    db: &C,
    first_result: u64,
    max_results: u64,
) -> Result<Vec<products::Model>, QueryError> {
    let products = products::Entity::find()
        .order_by_asc(products::Column::Id)
        .offset(first_result)
        .limit(max_results)
        .all(db)
        .await?;
    Ok(products)
}

/// Products with `min_price <= price <= max_price`.
pub async fn products_priced_between<C: ConnectionTrait>(
    db: &C,
    min_price: f64,
    max_price: f64,
) -> Result<Vec<products::Model>, QueryError> {
    let products = products::Entity::find()
        .filter(products::Column::Price.gte(min_price))
        .filter(products::Column::Price.lte(max_price))
        .all(db)
        .await?;
    Ok(products)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_contains_wraps_keyword() {
        assert_eq!(like_contains("New"), "%New%");
        assert_eq!(like_contains(""), "%%");
    }
}
