//! Database functionality tests
//!
//! Tests for migrations, seed data and entity relations

use anyhow::Result;
use catalog::config::DatabaseConfig;
use catalog::database::entities::*;
use catalog::database::seed_data::{seed_catalog, COMPUTER};
use catalog::database::{establish_connection, migrate_database, setup_database, MigrateDirection};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait, Set,
};
use tempfile::NamedTempFile;

/// Create a test database connection with migrations
async fn setup_test_db() -> Result<(DatabaseConnection, NamedTempFile)> {
    let temp_file = NamedTempFile::new()?;
    let config = DatabaseConfig {
        path: Some(temp_file.path().display().to_string()),
        ..Default::default()
    };

    let db = establish_connection(&config).await?;
    setup_database(&db).await?;

    Ok((db, temp_file))
}

#[tokio::test]
async fn test_database_migrations() -> Result<()> {
    let (db, _temp_file) = setup_test_db().await?;

    // Verify all tables exist by attempting to query them
    assert_eq!(Categories::find().all(&db).await?.len(), 0);
    assert_eq!(Products::find().all(&db).await?.len(), 0);
    assert_eq!(Orders::find().all(&db).await?.len(), 0);
    assert_eq!(OldCategories::find().all(&db).await?.len(), 0);

    Ok(())
}

#[tokio::test]
async fn test_fresh_migration_drops_rows() -> Result<()> {
    let (db, _temp_file) = setup_test_db().await?;
    seed_catalog(&db).await?;
    assert!(Products::find().count(&db).await? > 0);

    migrate_database(&db, MigrateDirection::Fresh).await?;

    assert_eq!(Categories::find().count(&db).await?, 0);
    assert_eq!(Products::find().count(&db).await?, 0);

    Ok(())
}

#[tokio::test]
async fn test_seed_is_idempotent() -> Result<()> {
    let (db, _temp_file) = setup_test_db().await?;

    let first = seed_catalog(&db).await?;
    assert_eq!(first.categories, 4);
    assert_eq!(first.products, 9);
    assert_eq!(first.orders, 6);
    assert_eq!(first.old_categories, 3);

    let second = seed_catalog(&db).await?;
    assert!(second.is_empty());
    assert_eq!(Products::find().count(&db).await?, 9);

    Ok(())
}

#[tokio::test]
async fn test_identity_is_generated_on_insert() -> Result<()> {
    let (db, _temp_file) = setup_test_db().await?;

    let first = categories::ActiveModel {
        name: Set(Some("Camera".to_string())),
        ..Default::default()
    }
    .insert(&db)
    .await?;
    let second = categories::ActiveModel {
        name: Set(Some("Audio".to_string())),
        ..Default::default()
    }
    .insert(&db)
    .await?;

    assert!(first.id > 0);
    assert_ne!(first.id, second.id);

    Ok(())
}

#[tokio::test]
async fn test_product_relations() -> Result<()> {
    let (db, _temp_file) = setup_test_db().await?;
    seed_catalog(&db).await?;

    let computer = Categories::find_by_id(COMPUTER)
        .one(&db)
        .await?
        .expect("Computer category should exist");
    let computers = computer.find_related(Products).all(&db).await?;
    assert_eq!(computers.len(), 3);
    assert!(computers.iter().all(|p| p.category_id == Some(COMPUTER)));

    let order = Orders::find()
        .one(&db)
        .await?
        .expect("an order should exist");
    let product = order
        .find_related(Products)
        .one(&db)
        .await?
        .expect("order should reference a product");
    assert_eq!(Some(product.id), order.product_id);

    Ok(())
}
