//! Kiosk Engine
//!
//! The kiosk engine is the core of a café kiosk ordering service. It manages the product catalog, keeps the stock
//! ledger for products that are sold from a finite supply, places orders, and sends notification mails.
//!
//! The library is divided into three main sections:
//! 1. Data types ([`mod@db_types`]) shared by every layer, such as products, stock entries and orders.
//! 2. Backend contracts ([`mod@traits`]) and a SQLite implementation of them ([`SqliteDatabase`]). You should never
//!    need to access the database directly. Instead, use the public API provided by the engine.
//! 3. The public API: [`ProductApi`], [`StockApi`], [`OrderApi`] and [`MailApi`]. These are generic over the
//!    backend traits, so the storage layer can be swapped out or mocked.
//!
//! Placing an order and registering a product are each a single atomic transaction. Collisions with concurrent
//! writers surface as [`traits::KioskError::PersistenceConflict`] and are retried by the API layer.
pub mod db_types;
pub mod helpers;
mod kiosk_api;
pub mod traits;

#[cfg(feature = "sqlite")]
mod sqlite;

#[cfg(any(feature = "test_utils", test))]
pub mod test_utils;

pub use kiosk_api::{
    mail_api::MailApi,
    order_api::OrderApi,
    order_objects,
    product_api::ProductApi,
    stock_api::StockApi,
    RetryPolicy,
};
#[cfg(feature = "sqlite")]
pub use sqlite::{db, SqliteDatabase};
