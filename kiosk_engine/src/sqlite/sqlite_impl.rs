//! `SqliteDatabase` is a concrete implementation of a kiosk engine backend.
//!
//! Unsurprisingly, it uses SQLite as the backend and implements all the traits defined in the [`crate::traits`]
//! module.
use std::fmt::Debug;

use chrono::{DateTime, Utc};
use log::*;
use sqlx::{migrate::MigrateError, SqlitePool};

use super::db::{db_url, mail_history, new_pool, orders, products, stocks};
use crate::{
    db_types::{MailSendHistory, NewMailSendHistory, NewProduct, Order, Product, ProductNumber, SellingStatus, Stock},
    order_objects::{OrderCreateRequest, OrderDraft},
    traits::{CatalogManagement, KioskDatabase, KioskError, MailHistoryManagement, StockManagement},
};

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({:?})", self.pool)
    }
}

impl KioskDatabase for SqliteDatabase {
    async fn insert_product(&self, product: NewProduct) -> Result<Product, KioskError> {
        let mut tx = self.pool.begin().await?;
        let latest = products::fetch_latest_product_number(&mut tx).await?;
        let number = ProductNumber::next(latest.as_ref())?;
        trace!("🗃️ Assigning product number {number} to {}", product.name);
        let product = products::insert_product(&number, product, &mut tx).await?;
        tx.commit().await?;
        Ok(product)
    }

    async fn place_order(
        &self,
        request: &OrderCreateRequest,
        registered_at: DateTime<Utc>,
    ) -> Result<Order, KioskError> {
        if request.is_empty() {
            return Err(KioskError::EmptyOrder);
        }
        let mut tx = self.pool.begin().await?;
        let catalog = products::fetch_products_by_numbers(&request.distinct_product_numbers(), &mut tx).await?;
        let draft = OrderDraft::resolve(request, catalog)?;
        let total_price = draft.total_price()?;
        let demand = draft.stock_demand();
        if !demand.is_empty() {
            let numbers = demand.keys().cloned().collect::<Vec<_>>();
            let on_hand = stocks::fetch_stocks_by_numbers(&numbers, &mut tx).await?;
            draft.check_stock(&on_hand)?;
            for (number, quantity) in &demand {
                stocks::deduct(number, *quantity, &mut tx).await?.ok_or(KioskError::InsufficientStock)?;
            }
            debug!("🗃️ Stock deducted for {} products", demand.len());
        }
        let order = orders::insert_order(total_price, registered_at, &draft.line_items(), &mut tx).await?;
        tx.commit().await?;
        Ok(order)
    }

    async fn fetch_order(&self, id: i64) -> Result<Option<Order>, KioskError> {
        let mut conn = self.pool.acquire().await?;
        let order = orders::fetch_order(id, &mut conn).await?;
        Ok(order)
    }

    async fn close(&mut self) -> Result<(), KioskError> {
        self.pool.close().await;
        Ok(())
    }
}

impl CatalogManagement for SqliteDatabase {
    async fn fetch_products_by_numbers(&self, numbers: &[ProductNumber]) -> Result<Vec<Product>, KioskError> {
        let mut conn = self.pool.acquire().await?;
        let products = products::fetch_products_by_numbers(numbers, &mut conn).await?;
        Ok(products)
    }

    async fn fetch_latest_product_number(&self) -> Result<Option<ProductNumber>, KioskError> {
        let mut conn = self.pool.acquire().await?;
        let number = products::fetch_latest_product_number(&mut conn).await?;
        Ok(number)
    }

    async fn fetch_products_by_status(&self, statuses: &[SellingStatus]) -> Result<Vec<Product>, KioskError> {
        let mut conn = self.pool.acquire().await?;
        let products = products::fetch_products_by_status(statuses, &mut conn).await?;
        Ok(products)
    }
}

impl StockManagement for SqliteDatabase {
    async fn fetch_stocks_by_numbers(&self, numbers: &[ProductNumber]) -> Result<Vec<Stock>, KioskError> {
        let mut conn = self.pool.acquire().await?;
        let stocks = stocks::fetch_stocks_by_numbers(numbers, &mut conn).await?;
        Ok(stocks)
    }

    async fn deduct_stock(&self, number: &ProductNumber, quantity: i64) -> Result<Stock, KioskError> {
        if quantity < 0 {
            return Err(KioskError::InvalidQuantity(quantity));
        }
        let mut tx = self.pool.begin().await?;
        let stock = stocks::deduct(number, quantity, &mut tx).await?.ok_or(KioskError::InsufficientStock)?;
        tx.commit().await?;
        Ok(stock)
    }

    async fn upsert_stock(&self, number: &ProductNumber, quantity: i64) -> Result<Stock, KioskError> {
        if quantity < 0 {
            return Err(KioskError::InvalidQuantity(quantity));
        }
        let mut tx = self.pool.begin().await?;
        let stock = stocks::upsert(number, quantity, &mut tx).await?;
        tx.commit().await?;
        Ok(stock)
    }
}

impl MailHistoryManagement for SqliteDatabase {
    async fn insert_mail_history(&self, history: NewMailSendHistory) -> Result<MailSendHistory, KioskError> {
        let mut tx = self.pool.begin().await?;
        let record = mail_history::insert_mail_history(history, &mut tx).await?;
        tx.commit().await?;
        Ok(record)
    }
}

impl SqliteDatabase {
    /// Creates a new database API object using the URL in `KIOSK_DATABASE_URL`.
    pub async fn new(max_connections: u32) -> Result<Self, sqlx::Error> {
        let url = db_url();
        SqliteDatabase::new_with_url(url.as_str(), max_connections).await
    }

    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        trace!("Creating new database connection pool with url {url}");
        let pool = new_pool(url, max_connections).await?;
        let url = url.to_string();
        Ok(Self { url, pool })
    }

    /// The URL of the database
    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    /// Returns a reference to the database connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Brings the schema up to date. Migrations that have already been applied are skipped.
    pub async fn run_migrations(&self) -> Result<(), MigrateError> {
        sqlx::migrate!("./src/sqlite/migrations").run(&self.pool).await?;
        info!("🗃️ Database migrations complete");
        Ok(())
    }

    /// All recorded mail sends, oldest first.
    pub async fn fetch_mail_histories(&self) -> Result<Vec<MailSendHistory>, KioskError> {
        let mut conn = self.pool.acquire().await?;
        let records = mail_history::fetch_mail_histories(&mut conn).await?;
        Ok(records)
    }
}
