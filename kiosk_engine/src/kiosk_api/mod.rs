//! # Kiosk engine public API
//!
//! The APIs in this module are the entry points for everything the kiosk does. Each one wraps a backend that
//! implements the relevant traits from [`crate::traits`]:
//!
//! * [`product_api::ProductApi`] manages the catalog and provisions stock.
//! * [`stock_api::StockApi`] reads and draws down the stock ledger.
//! * [`order_api::OrderApi`] places orders.
//! * [`mail_api::MailApi`] sends notification mails and keeps a history of the ones that went out.
//!
//! Writes that can collide with a concurrent writer are retried according to a [`RetryPolicy`].
pub mod mail_api;
pub mod order_api;
pub mod order_objects;
pub mod product_api;
pub mod stock_api;

pub use crate::helpers::RetryPolicy;
