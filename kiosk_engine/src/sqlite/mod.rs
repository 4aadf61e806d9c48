//! SQLite backend for the kiosk engine.
//!
//! [`SqliteDatabase`] implements every backend trait in [`crate::traits`]. The row-level queries live in [`db`].
mod sqlite_impl;

pub mod db;
pub use sqlite_impl::SqliteDatabase;
