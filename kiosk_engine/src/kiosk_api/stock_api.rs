use std::fmt::Debug;

use crate::{
    db_types::{ProductNumber, Stock},
    traits::{KioskError, StockManagement},
};

/// Read access to the stock ledger, plus single-product deductions.
pub struct StockApi<B> {
    db: B,
}

impl<B> Debug for StockApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "StockApi")
    }
}

impl<B> StockApi<B> {
    pub fn new(db: B) -> Self {
        Self { db }
    }
}

impl<B> StockApi<B>
where B: StockManagement
{
    pub async fn stock(&self, number: &ProductNumber) -> Result<Option<Stock>, KioskError> {
        let stocks = self.db.fetch_stocks_by_numbers(std::slice::from_ref(number)).await?;
        Ok(stocks.into_iter().next())
    }

    pub async fn stocks(&self, numbers: &[ProductNumber]) -> Result<Vec<Stock>, KioskError> {
        self.db.fetch_stocks_by_numbers(numbers).await
    }

    /// Removes `amount` units of the product from the ledger. Either all of them are removed, or, if there are not
    /// enough on hand, none are and [`KioskError::InsufficientStock`] is returned.
    pub async fn deduct(&self, number: &ProductNumber, amount: i64) -> Result<Stock, KioskError> {
        if amount < 0 {
            return Err(KioskError::InvalidQuantity(amount));
        }
        self.db.deduct_stock(number, amount).await
    }

    /// Whether at least `amount` units are on hand. A product with no ledger entry has none.
    pub async fn sufficient_for(&self, number: &ProductNumber, amount: i64) -> Result<bool, KioskError> {
        let stock = self.stock(number).await?;
        Ok(stock.map(|s| !s.is_quantity_less_than(amount)).unwrap_or(false))
    }
}
