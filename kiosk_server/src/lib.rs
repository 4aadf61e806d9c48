//! # Kiosk server
//! This crate hosts the HTTP server for the café kiosk. It is responsible for:
//! * Registering products in the catalog and listing the menu.
//! * Accepting orders from the kiosk and returning the stored order.
//! * Sending a notification mail for every order that is placed, if a recipient is configured.
//!
//! All the business logic lives in [`kiosk_engine`]. This crate only parses and validates requests, and wraps every
//! response in an [`data_objects::ApiResponse`] envelope.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.
//!
//! ## Routes
//! The server exposes the following routes:
//! * `GET /health`: A health check route that returns a 200 OK response.
//! * `POST /api/v1/products/new`: Register a new product.
//! * `GET /api/v1/products/selling`: The products currently shown on the kiosk.
//! * `POST /api/v1/orders/new`: Place an order.
//! * `GET /api/v1/orders/{id}`: Fetch a placed order.
pub mod cli;
pub mod config;
pub mod data_objects;
pub mod errors;
pub mod notifier;
pub mod routes;
pub mod server;

#[cfg(test)]
mod endpoint_tests;
