#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use kiosk_engine::{
    db_types::{NewProduct, Price, Product, ProductType, SellingStatus},
    ProductApi,
    SqliteDatabase,
};
use log::*;
use sqlx::{migrate::MigrateDatabase, Sqlite};

/// Creates a fresh, migrated database in the system temp directory and connects to it.
pub async fn prepare_test_db() -> SqliteDatabase {
    dotenvy::from_filename(".env.test").ok();
    let _ = env_logger::try_init();
    let url = format!("sqlite://{}/kiosk_it_{}.db", std::env::temp_dir().display(), rand::random::<u64>());
    if Sqlite::database_exists(&url).await.unwrap_or(false) {
        Sqlite::drop_database(&url).await.expect("Error dropping database");
    }
    Sqlite::create_database(&url).await.expect("Error creating database");
    let db = SqliteDatabase::new_with_url(&url, 10).await.expect("Error creating connection to database");
    db.run_migrations().await.expect("Error running DB migrations");
    debug!("🚀️ Test database ready at {url}");
    db
}

pub fn registered_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2023, 3, 8, 10, 0, 0).unwrap()
}

/// Registers the products in order, so the first gets number 001, the second 002, and so on.
pub async fn seed_products(db: &SqliteDatabase, products: &[(ProductType, &str, i64)]) -> Vec<Product> {
    let api = ProductApi::new(db.clone());
    let mut result = Vec::with_capacity(products.len());
    for (product_type, name, price) in products {
        let product = api
            .create_product(NewProduct::new(*product_type, *name, Price::from_won(*price)))
            .await
            .expect("Error registering product");
        result.push(product);
    }
    result
}

pub async fn seed_product_with_status(
    db: &SqliteDatabase,
    product_type: ProductType,
    name: &str,
    status: SellingStatus,
) -> Product {
    ProductApi::new(db.clone())
        .create_product(NewProduct::new(product_type, name, Price::from_won(4000)).with_selling_status(status))
        .await
        .expect("Error registering product")
}
