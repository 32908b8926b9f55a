//! The catalogue of demo queries
//!
//! Each demo is a single call into sea-orm: the filtering, joining, grouping
//! and paging are all expressed in the generated SQL and executed by the
//! store. Every function takes any [`ConnectionTrait`], so the same query runs
//! against a plain connection or a session's transaction.

pub mod aggregates;
pub mod joins;
pub mod listing;
pub mod mutations;

pub use aggregates::*;
pub use joins::*;
pub use listing::*;
pub use mutations::*;

use clap::{Args, ValueEnum};
use sea_orm::ConnectionTrait;
use tracing::info;

use crate::errors::QueryError;
use crate::report::{Mutation, QueryOutput};

pub const DEFAULT_CATEGORY: &str = "Computer";
pub const DEFAULT_KEYWORD: &str = "New";
pub const DEFAULT_PRODUCT_ID: i64 = 43;
pub const DEFAULT_PRICE: f64 = 488.0;
pub const DEFAULT_OLD_CATEGORY_ID: i64 = 1;
pub const DEFAULT_JOIN_MIN_PRICE: f64 = 500.0;
pub const DEFAULT_FIRST_RESULT: u64 = 0;
pub const DEFAULT_MAX_RESULTS: u64 = 2;
pub const DEFAULT_MIN_PRICE: f64 = 500.0;
pub const DEFAULT_MAX_PRICE: f64 = 1000.0;
pub const DEFAULT_BEGIN_DATE: &str = "2014-11-01";
pub const DEFAULT_END_DATE: &str = "2014-11-22";

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueryDemo {
    List,
    Search,
    Count,
    Insert,
    Keyword,
    Update,
    Delete,
    Join,
    OrderBy,
    Page,
    GroupBy,
    DateRange,
    PriceRange,
}

impl QueryDemo {
    pub fn name(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Search => "search",
            Self::Count => "count",
            Self::Insert => "insert",
            Self::Keyword => "keyword",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Join => "join",
            Self::OrderBy => "order-by",
            Self::Page => "page",
            Self::GroupBy => "group-by",
            Self::DateRange => "date-range",
            Self::PriceRange => "price-range",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::List => "list every category",
            Self::Search => "products in the category named --category",
            Self::Count => "count of products with a name",
            Self::Insert => "copy legacy categories into the category table",
            Self::Keyword => "products whose description contains --keyword",
            Self::Update => "set the price of --product-id to --price",
            Self::Delete => "delete the legacy category --old-category-id",
            Self::Join => "products above --join-min-price with their category",
            Self::OrderBy => "products ordered by price, cheapest first",
            Self::Page => "one page of products (--first-result, --max-results)",
            Self::GroupBy => "price totals per category",
            Self::DateRange => "orders purchased between --from and --to",
            Self::PriceRange => "products priced between --min-price and --max-price",
        }
    }

    pub fn all() -> &'static [QueryDemo] {
        Self::value_variants()
    }

    pub fn is_mutation(&self) -> bool {
        matches!(self, Self::Insert | Self::Update | Self::Delete)
    }
}

impl std::fmt::Display for QueryDemo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Values bound to the parameterized demos.
#[derive(Args, Clone, Debug, PartialEq)]
pub struct QueryParams {
    /// Category name matched by `search`
    #[clap(long, default_value = DEFAULT_CATEGORY)]
    pub category: String,
    /// Description keyword matched by `keyword`
    #[clap(long, default_value = DEFAULT_KEYWORD)]
    pub keyword: String,
    /// Product updated by `update`
    #[clap(long, default_value_t = DEFAULT_PRODUCT_ID)]
    pub product_id: i64,
    /// New price written by `update`
    #[clap(long, default_value_t = DEFAULT_PRICE)]
    pub price: f64,
    /// Legacy category removed by `delete`
    #[clap(long, default_value_t = DEFAULT_OLD_CATEGORY_ID)]
    pub old_category_id: i64,
    /// Exclusive lower price bound for `join`
    #[clap(long, default_value_t = DEFAULT_JOIN_MIN_PRICE)]
    pub join_min_price: f64,
    #[clap(long, default_value_t = DEFAULT_FIRST_RESULT)]
    pub first_result: u64,
    #[clap(long, default_value_t = DEFAULT_MAX_RESULTS)]
    pub max_results: u64,
    #[clap(long, default_value_t = DEFAULT_MIN_PRICE)]
    pub min_price: f64,
    #[clap(long, default_value_t = DEFAULT_MAX_PRICE)]
    pub max_price: f64,
    /// First purchase date for `date-range` (YYYY-MM-DD, inclusive)
    #[clap(long = "from", default_value = DEFAULT_BEGIN_DATE)]
    pub begin_date: String,
    /// Last purchase date for `date-range` (YYYY-MM-DD, inclusive)
    #[clap(long = "to", default_value = DEFAULT_END_DATE)]
    pub end_date: String,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            category: DEFAULT_CATEGORY.to_string(),
            keyword: DEFAULT_KEYWORD.to_string(),
            product_id: DEFAULT_PRODUCT_ID,
            price: DEFAULT_PRICE,
            old_category_id: DEFAULT_OLD_CATEGORY_ID,
            join_min_price: DEFAULT_JOIN_MIN_PRICE,
            first_result: DEFAULT_FIRST_RESULT,
            max_results: DEFAULT_MAX_RESULTS,
            min_price: DEFAULT_MIN_PRICE,
            max_price: DEFAULT_MAX_PRICE,
            begin_date: DEFAULT_BEGIN_DATE.to_string(),
            end_date: DEFAULT_END_DATE.to_string(),
        }
    }
}

pub async fn run_demo<C: ConnectionTrait>(
    db: &C,
    demo: QueryDemo,
    params: &QueryParams,
) -> Result<QueryOutput, QueryError> {
    if demo.is_mutation() {
        info!("Running {} statement", demo);
    } else {
        info!("Running {} query", demo);
    }

    let output = match demo {
        QueryDemo::List => QueryOutput::Categories {
            rows: list_categories(db).await?,
        },
        QueryDemo::Search => QueryOutput::ProductNames {
            rows: products_in_category(db, &params.category).await?,
        },
        QueryDemo::Count => QueryOutput::Count {
            value: count_named_products(db).await?,
        },
        QueryDemo::Insert => QueryOutput::RowsAffected {
            action: Mutation::Inserted,
            rows: copy_old_categories(db).await?,
        },
        QueryDemo::Keyword => QueryOutput::ProductNames {
            rows: products_matching_description(db, &params.keyword).await?,
        },
        QueryDemo::Update => QueryOutput::RowsAffected {
            action: Mutation::Updated,
            rows: update_product_price(db, params.product_id, params.price).await?,
        },
        QueryDemo::Delete => QueryOutput::RowsAffected {
            action: Mutation::Deleted,
            rows: delete_old_category(db, params.old_category_id).await?,
        },
        QueryDemo::Join => QueryOutput::ProductsWithCategory {
            rows: products_with_category_above(db, params.join_min_price).await?,
        },
        QueryDemo::OrderBy => QueryOutput::ProductPrices {
            rows: products_by_price(db).await?,
        },
        QueryDemo::Page => QueryOutput::ProductPrices {
            rows: products_page(db, params.first_result, params.max_results).await?,
        },
        QueryDemo::GroupBy => QueryOutput::CategoryTotals {
            rows: price_totals_by_category(db).await?,
        },
        QueryDemo::DateRange => QueryOutput::Orders {
            rows: orders_between(db, &params.begin_date, &params.end_date).await?,
        },
        QueryDemo::PriceRange => QueryOutput::ProductPrices {
            rows: products_priced_between(db, params.min_price, params.max_price).await?,
        },
    };

    Ok(output)
}

/// Run `demos` in order, stopping at the first failure.
pub async fn run_demos<C: ConnectionTrait>(
    db: &C,
    demos: &[QueryDemo],
    params: &QueryParams,
) -> Result<Vec<(QueryDemo, QueryOutput)>, QueryError> {
    let mut outputs = Vec::with_capacity(demos.len());
    for demo in demos {
        let output = run_demo(db, *demo, params).await?;
        outputs.push((*demo, output));
    }
    Ok(outputs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct ParamsCli {
        #[clap(flatten)]
        params: QueryParams,
    }

    #[test]
    fn test_clap_defaults_match_default_params() {
        let cli = ParamsCli::parse_from(["catalog"]);
        assert_eq!(cli.params, QueryParams::default());
    }

    #[test]
    fn test_params_override() {
        let cli = ParamsCli::parse_from([
            "catalog",
            "--keyword",
            "Pro",
            "--from",
            "2014-10-01",
            "--max-results",
            "5",
        ]);
        assert_eq!(cli.params.keyword, "Pro");
        assert_eq!(cli.params.begin_date, "2014-10-01");
        assert_eq!(cli.params.end_date, DEFAULT_END_DATE);
        assert_eq!(cli.params.max_results, 5);
    }

    #[test]
    fn test_demo_names_round_trip_through_clap() {
        for demo in QueryDemo::all() {
            let parsed = QueryDemo::from_str(demo.name(), false).unwrap();
            assert_eq!(parsed, *demo);
        }
        assert_eq!(QueryDemo::all().len(), 13);
    }

    #[test]
    fn test_only_insert_update_delete_mutate() {
        let mutations: Vec<_> = QueryDemo::all()
            .iter()
            .filter(|demo| demo.is_mutation())
            .collect();
        assert_eq!(
            mutations,
            vec![&QueryDemo::Insert, &QueryDemo::Update, &QueryDemo::Delete]
        );
    }
}
