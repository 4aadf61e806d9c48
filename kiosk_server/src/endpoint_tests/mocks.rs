use chrono::{DateTime, Utc};
use kiosk_engine::{
    db_types::{MailSendHistory, NewMailSendHistory, NewProduct, Order, Product, ProductNumber, SellingStatus, Stock},
    order_objects::OrderCreateRequest,
    traits::{CatalogManagement, KioskDatabase, KioskError, MailHistoryManagement, StockManagement},
};
use mockall::mock;

mock! {
    pub KioskBackend {}
    impl Clone for KioskBackend {
        fn clone(&self) -> Self;
    }
    impl CatalogManagement for KioskBackend {
        async fn fetch_products_by_numbers(&self, numbers: &[ProductNumber]) -> Result<Vec<Product>, KioskError>;
        async fn fetch_latest_product_number(&self) -> Result<Option<ProductNumber>, KioskError>;
        async fn fetch_products_by_status(&self, statuses: &[SellingStatus]) -> Result<Vec<Product>, KioskError>;
    }
    impl StockManagement for KioskBackend {
        async fn fetch_stocks_by_numbers(&self, numbers: &[ProductNumber]) -> Result<Vec<Stock>, KioskError>;
        async fn deduct_stock(&self, number: &ProductNumber, quantity: i64) -> Result<Stock, KioskError>;
        async fn upsert_stock(&self, number: &ProductNumber, quantity: i64) -> Result<Stock, KioskError>;
    }
    impl KioskDatabase for KioskBackend {
        async fn insert_product(&self, product: NewProduct) -> Result<Product, KioskError>;
        async fn place_order(&self, request: &OrderCreateRequest, registered_at: DateTime<Utc>) -> Result<Order, KioskError>;
        async fn fetch_order(&self, id: i64) -> Result<Option<Order>, KioskError>;
    }
}

mock! {
    pub MailHistory {}
    impl MailHistoryManagement for MailHistory {
        async fn insert_mail_history(&self, history: NewMailSendHistory) -> Result<MailSendHistory, KioskError>;
    }
}
