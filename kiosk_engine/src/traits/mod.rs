//! # Backend interface contracts
//!
//! This module defines the behaviour that a storage backend must expose in order to act as the persistence layer for
//! the kiosk engine. The public APIs in [`crate::kiosk_api`] are generic over these traits, so that a backend can be
//! swapped out, or mocked in tests.
//!
//! * [`CatalogManagement`] provides read access to the product catalog.
//! * [`StockManagement`] manages the stock ledger for stock-tracked products.
//! * [`KioskDatabase`] ties the two together and adds the multi-step, atomic workflows: assigning product numbers
//!   and placing orders.
//! * [`MailHistoryManagement`] records successfully sent notification mails.
//! * [`MailSendClient`] is the boundary to the external mail service.
mod catalog_management;
mod kiosk_database;
mod mail;
mod stock_management;

pub use catalog_management::CatalogManagement;
pub use kiosk_database::{
    KioskDatabase,
    KioskError,
    INSUFFICIENT_STOCK_MESSAGE,
    INVALID_ITEM_COUNT_MESSAGE,
    OUTSIDE_OPENING_HOURS_MESSAGE,
};
pub use mail::{LogMailSendClient, MailHistoryManagement, MailSendClient};
pub use stock_management::StockManagement;
