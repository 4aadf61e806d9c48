use crate::{
    db_types::{ProductNumber, Stock},
    traits::KioskError,
};

/// The stock ledger: on-hand quantities for stock-tracked products, keyed by product number.
#[allow(async_fn_in_trait)]
pub trait StockManagement {
    /// Fetches the ledger entries for the given product numbers. Products without an entry are absent from the
    /// result.
    async fn fetch_stocks_by_numbers(&self, numbers: &[ProductNumber]) -> Result<Vec<Stock>, KioskError>;

    /// Removes `quantity` units from the ledger entry for `number`.
    ///
    /// The check and the subtraction happen as a single conditional update, so two concurrent deductions can never
    /// both consume the same units. If the entry does not exist, or holds fewer than `quantity` units,
    /// [`KioskError::InsufficientStock`] is returned and the entry is left untouched.
    async fn deduct_stock(&self, number: &ProductNumber, quantity: i64) -> Result<Stock, KioskError>;

    /// Creates the ledger entry for `number`, or replaces its quantity if it already exists.
    async fn upsert_stock(&self, number: &ProductNumber, quantity: i64) -> Result<Stock, KioskError>;
}
