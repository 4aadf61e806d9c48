use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::{
    db_types::{NewProduct, Order, Product, ProductNumber, ProductNumberError},
    order_objects::OrderCreateRequest,
    traits::{CatalogManagement, StockManagement},
};

/// The message returned to kiosk users when an order cannot be filled from stock.
pub const INSUFFICIENT_STOCK_MESSAGE: &str = "재고가 부족한 상품이 있습니다.";
pub const OUTSIDE_OPENING_HOURS_MESSAGE: &str = "주문 시간이 아닙니다. 관리자에게 문의하세요.";
pub const INVALID_ITEM_COUNT_MESSAGE: &str = "음료는 1잔 이상 주문하실 수 있습니다";

/// This trait defines the highest level of behaviour for backends supporting the kiosk engine.
///
/// On top of catalog and stock access, a backend is responsible for the two workflows that must be atomic:
/// * Assigning the next product number and inserting a new product.
/// * Placing an order: resolving products, checking and deducting stock, and persisting the order with its line
///   items.
///
/// Implementations must run each of these inside a single transaction. Any error leaves no partial writes behind.
#[allow(async_fn_in_trait)]
pub trait KioskDatabase: Clone + CatalogManagement + StockManagement {
    /// Takes a new product, and in a single atomic transaction,
    /// * reads the latest product number in the catalog,
    /// * derives the next number from it (see [`ProductNumber::next`]),
    /// * inserts the product under that number.
    ///
    /// If another writer claims the same number first, [`KioskError::PersistenceConflict`] is returned and nothing
    /// is written. Callers may retry.
    async fn insert_product(&self, product: NewProduct) -> Result<Product, KioskError>;

    /// Places an order for the products in `request`, in a single atomic transaction:
    /// * Every requested number is resolved against the catalog. Unknown numbers fail with
    ///   [`KioskError::UnresolvedProduct`].
    /// * Stock for stock-tracked products is checked for the whole order and then deducted, counting duplicates.
    ///   Any shortfall fails with [`KioskError::InsufficientStock`].
    /// * The order is stored with one line item per requested number, in request order, each carrying a snapshot of
    ///   the product's price. The total price is the sum of the line items.
    ///
    /// Returns the stored order, including its line items.
    async fn place_order(
        &self,
        request: &OrderCreateRequest,
        registered_at: DateTime<Utc>,
    ) -> Result<Order, KioskError>;

    /// Fetches an order and its line items. Returns `None` if there is no order with this id.
    async fn fetch_order(&self, id: i64) -> Result<Option<Order>, KioskError>;

    /// Closes the database connection.
    async fn close(&mut self) -> Result<(), KioskError> {
        Ok(())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum KioskError {
    #[error("We have an internal database engine (configuration/uptime etc.) : {0}")]
    DatabaseError(String),
    #[error("{}", INSUFFICIENT_STOCK_MESSAGE)]
    InsufficientStock,
    #[error("The following product numbers are not in the catalog: {}", .0.join(", "))]
    UnresolvedProduct(Vec<String>),
    #[error("A concurrent update collided with this one. {0}")]
    PersistenceConflict(String),
    #[error("An order must contain at least one product")]
    EmptyOrder,
    #[error("{0}")]
    InvalidProductNumber(#[from] ProductNumberError),
    #[error("Product {0} is not a stock-tracked product")]
    StockNotTracked(ProductNumber),
    #[error("The requested product {0} does not exist")]
    ProductNotFound(ProductNumber),
    #[error("The requested order {0} does not exist")]
    OrderNotFound(i64),
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),
    #[error("{}", INVALID_ITEM_COUNT_MESSAGE)]
    InvalidItemCount,
    #[error("{}", OUTSIDE_OPENING_HOURS_MESSAGE)]
    OutsideOpeningHours,
    #[error("The order total is larger than the largest supported price")]
    PriceOverflow,
}

impl KioskError {
    /// Whether the error was caused by a collision with a concurrent writer. Retrying the whole operation is safe.
    pub fn is_conflict(&self) -> bool {
        matches!(self, KioskError::PersistenceConflict(_))
    }
}

// SQLite result codes for lock contention: SQLITE_BUSY and SQLITE_LOCKED, plus their extended variants
// (BUSY_RECOVERY, LOCKED_SHAREDCACHE, BUSY_SNAPSHOT and BUSY_TIMEOUT).
const SQLITE_CONTENTION_CODES: [&str; 6] = ["5", "6", "261", "262", "517", "773"];

impl From<sqlx::Error> for KioskError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &e {
            if db_err.is_unique_violation() {
                return KioskError::PersistenceConflict(db_err.message().to_string());
            }
            let contended = db_err.code().map(|c| SQLITE_CONTENTION_CODES.contains(&&*c)).unwrap_or(false);
            if contended {
                return KioskError::PersistenceConflict(db_err.message().to_string());
            }
        }
        KioskError::DatabaseError(e.to_string())
    }
}
