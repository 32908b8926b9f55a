use chrono::NaiveDate;
use sea_orm::*;
use tracing::info;

use crate::database::entities::{categories, old_categories, orders, products};

pub const COMPUTER: i64 = 11;
pub const PRINTER: i64 = 12;
pub const PHONE: i64 = 13;
pub const TABLET: i64 = 14;

/// Rows inserted by [`seed_catalog`]; all zero when the catalog was already populated.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub categories: usize,
    pub products: usize,
    pub orders: usize,
    pub old_categories: usize,
}

impl SeedSummary {
    pub fn is_empty(&self) -> bool {
        self.categories + self.products + self.orders + self.old_categories == 0
    }
}

/// Populate the catalog with the dataset the query demos are written against.
pub async fn seed_catalog(db: &DatabaseConnection) -> Result<SeedSummary, DbErr> {
    let existing = categories::Entity::find().count(db).await?;
    if existing > 0 {
        info!("Catalog already holds {} categories, skipping seed data creation", existing);
        return Ok(SeedSummary::default());
    }

    info!("Creating catalog seed data");
    let txn = db.begin().await?;

    let summary = SeedSummary {
        categories: create_categories(&txn).await?,
        products: create_products(&txn).await?,
        orders: create_orders(&txn).await?,
        old_categories: create_old_categories(&txn).await?,
    };

    txn.commit().await?;

    info!(
        "Seeded {} categories, {} products, {} orders, {} legacy categories",
        summary.categories, summary.products, summary.orders, summary.old_categories
    );
    Ok(summary)
}

async fn create_categories(txn: &DatabaseTransaction) -> Result<usize, DbErr> {
    let categories_data = vec![
        (COMPUTER, "Computer"),
        (PRINTER, "Printer"),
        (PHONE, "Phone"),
        (TABLET, "Tablet"),
    ];

    let count = categories_data.len();
    let models = categories_data
        .into_iter()
        .map(|(id, name)| categories::ActiveModel {
            id: Set(id),
            name: Set(Some(name.to_string())),
        });

    categories::Entity::insert_many(models).exec(txn).await?;
    Ok(count)
}

async fn create_products(txn: &DatabaseTransaction) -> Result<usize, DbErr> {
    let products_data = vec![
        (40, "ThinkPad X1 Carbon", Some("New ultralight business laptop"), 1399.0, COMPUTER),
        (41, "MacBook Air", Some("Thin and light notebook"), 999.0, COMPUTER),
        (42, "Dell OptiPlex 3020", Some("Compact office desktop"), 579.0, COMPUTER),
        (43, "HP LaserJet Pro", Some("Monochrome laser printer"), 312.0, PRINTER),
        (44, "Canon PIXMA", Some("New wireless inkjet all-in-one"), 89.0, PRINTER),
        (45, "iPhone 6", Some("Smartphone with Retina HD display"), 649.0, PHONE),
        (46, "Galaxy Note 4", Some("Phablet with stylus"), 749.0, PHONE),
        (47, "iPad Mini 3", Some("Compact tablet"), 399.0, TABLET),
        (48, "Nexus 9", None, 479.0, TABLET),
    ];

    let count = products_data.len();
    let models = products_data
        .into_iter()
        .map(|(id, name, description, price, category_id)| products::ActiveModel {
            id: Set(id),
            name: Set(Some(name.to_string())),
            description: Set(description.map(|s| s.to_string())),
            price: Set(price),
            category_id: Set(Some(category_id)),
        });

    products::Entity::insert_many(models).exec(txn).await?;
    Ok(count)
}

async fn create_orders(txn: &DatabaseTransaction) -> Result<usize, DbErr> {
    let orders_data = vec![
        ("Alice Nguyen", (2014, 10, 28), 999.0, 41),
        ("Bob Martin", (2014, 11, 1), 1399.0, 40),
        ("Carol Diaz", (2014, 11, 12), 178.0, 44),
        ("Dan Kowalski", (2014, 11, 22), 649.0, 45),
        ("Eve Laurent", (2014, 11, 23), 749.0, 46),
        ("Frank Osei", (2014, 12, 2), 399.0, 47),
    ];

    let mut models = Vec::with_capacity(orders_data.len());
    for (customer_name, (year, month, day), amount, product_id) in orders_data {
        let purchase_date = NaiveDate::from_ymd_opt(year, month, day)
            .ok_or_else(|| DbErr::Custom(format!("invalid seed date {year}-{month}-{day}")))?;

        models.push(orders::ActiveModel {
            customer_name: Set(Some(customer_name.to_string())),
            purchase_date: Set(purchase_date),
            amount: Set(amount),
            product_id: Set(Some(product_id)),
            ..Default::default()
        });
    }

    let count = models.len();
    orders::Entity::insert_many(models).exec(txn).await?;
    Ok(count)
}

async fn create_old_categories(txn: &DatabaseTransaction) -> Result<usize, DbErr> {
    let old_data = vec![(1, "Camera"), (2, "Television"), (3, "Audio")];

    let count = old_data.len();
    let models = old_data
        .into_iter()
        .map(|(id, name)| old_categories::ActiveModel {
            id: Set(id),
            name: Set(Some(name.to_string())),
        });

    old_categories::Entity::insert_many(models).exec(txn).await?;
    Ok(count)
}
