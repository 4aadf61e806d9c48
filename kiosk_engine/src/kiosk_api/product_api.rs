use std::fmt::Debug;

use log::*;

use crate::{
    db_types::{NewProduct, Product, ProductNumber, SellingStatus, Stock},
    helpers::{retry_on_conflict, RetryPolicy},
    traits::{KioskDatabase, KioskError},
};

/// `ProductApi` manages the kiosk's catalog: registering products, listing the menu, and provisioning stock for
/// products that need it.
pub struct ProductApi<B> {
    db: B,
    retry_policy: RetryPolicy,
}

impl<B> Debug for ProductApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ProductApi")
    }
}

impl<B> ProductApi<B> {
    pub fn new(db: B) -> Self {
        Self { db, retry_policy: RetryPolicy::default() }
    }

    pub fn with_retry_policy(mut self, retry_policy: RetryPolicy) -> Self {
        self.retry_policy = retry_policy;
        self
    }

    pub fn db(&self) -> &B {
        &self.db
    }
}

impl<B> ProductApi<B>
where B: KioskDatabase
{
    /// Adds a product to the catalog under the next free product number.
    ///
    /// If a concurrent registration claims the same number, the whole registration is retried with a fresh number.
    /// Once product numbers run out, this fails with [`KioskError::InvalidProductNumber`].
    pub async fn create_product(&self, product: NewProduct) -> Result<Product, KioskError> {
        let db = &self.db;
        let product = retry_on_conflict(self.retry_policy, "Product registration", move || {
            db.insert_product(product.clone())
        })
        .await?;
        info!("📦️ Product {} ({}) registered at {}", product.product_number, product.name, product.price);
        Ok(product)
    }

    /// The kiosk menu: every product that is selling or on hold, ordered by product number.
    pub async fn selling_products(&self) -> Result<Vec<Product>, KioskError> {
        self.db.fetch_products_by_status(SellingStatus::for_display()).await
    }

    pub async fn products_by_numbers(&self, numbers: &[ProductNumber]) -> Result<Vec<Product>, KioskError> {
        self.db.fetch_products_by_numbers(numbers).await
    }

    pub async fn product_by_number(&self, number: &ProductNumber) -> Result<Option<Product>, KioskError> {
        let products = self.db.fetch_products_by_numbers(std::slice::from_ref(number)).await?;
        Ok(products.into_iter().next())
    }

    /// Sets the on-hand quantity for a stock-tracked product, creating its ledger entry if needed.
    ///
    /// Fails with [`KioskError::StockNotTracked`] for products that are made to order.
    pub async fn provision_stock(&self, number: &ProductNumber, quantity: i64) -> Result<Stock, KioskError> {
        if quantity < 0 {
            return Err(KioskError::InvalidQuantity(quantity));
        }
        let product =
            self.product_by_number(number).await?.ok_or_else(|| KioskError::ProductNotFound(number.clone()))?;
        if !product.product_type.tracks_stock() {
            warn!("📦️ Refusing to provision stock for {number}. {} products are not stock-tracked", product.product_type);
            return Err(KioskError::StockNotTracked(number.clone()));
        }
        let stock = self.db.upsert_stock(number, quantity).await?;
        debug!("📦️ Stock for {number} provisioned: {}", stock.quantity);
        Ok(stock)
    }
}
