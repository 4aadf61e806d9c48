//! # SQLite Database methods
//!
//! This module contains "low-level" SQLite database interactions.
//!
//! All these interaction are maintained by simple functions (rather than stateful structs) that accept a
//! `&mut SqliteConnection` argument. Callers can obtain a connection from a pool,
//! or create an atomic transaction as the need arises and call through to the functions without any other changes.
//!
//! Statements are always run with `fetch_all`, even when at most one row is expected. SQLite only finishes a statement
//! once every row has been stepped through. Until then its implicit transaction stays open on the pooled connection,
//! and a write made by it stays invisible to every other connection.
use std::env;

use log::info;
use sqlx::{sqlite::SqlitePoolOptions, Error as SqlxError, SqlitePool};

pub mod mail_history;
pub mod orders;
pub mod products;
pub mod stocks;

const SQLITE_DB_URL: &str = "sqlite://data/kiosk_store.db?mode=rwc";

pub fn db_url() -> String {
    let result = env::var("KIOSK_DATABASE_URL").unwrap_or_else(|_| {
        info!("KIOSK_DATABASE_URL is not set. Using the default.");
        SQLITE_DB_URL.to_string()
    });
    info!("Using database URL: {result}");
    result
}

pub async fn new_pool(url: &str, max_connections: u32) -> Result<SqlitePool, SqlxError> {
    let pool = SqlitePoolOptions::new().max_connections(max_connections).connect(url).await?;
    Ok(pool)
}
