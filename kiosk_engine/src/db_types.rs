use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, Utc};
pub use kiosk_common::{Price, MAX_PRICE};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Invalid value: {0}")]
pub struct ConversionError(String);

//--------------------------------------    ProductNumber      ---------------------------------------------------------
/// The catalog identifier of a product: a zero-padded, three-digit sequence number such as `"001"`.
///
/// Any string can be wrapped, since incoming requests may name products that do not exist. Only numbers produced
/// by [`ProductNumber::next`] are ever stored in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Type, Serialize, Deserialize)]
#[sqlx(transparent)]
#[serde(transparent)]
pub struct ProductNumber(pub String);

/// The largest sequence number that fits in a product number.
pub const MAX_PRODUCT_SEQUENCE: u32 = 999;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProductNumberError {
    #[error("Product number {0} is not a valid sequence number")]
    NotASequenceNumber(String),
    #[error("All product numbers up to 999 have been issued")]
    Exhausted,
}

impl ProductNumber {
    /// The first number issued in an empty catalog.
    pub fn first() -> Self {
        Self::from_sequence(1)
    }

    fn from_sequence(seq: u32) -> Self {
        Self(format!("{seq:03}"))
    }

    /// Derives the product number that follows `latest`. An empty catalog (`None`) starts at `"001"`.
    ///
    /// Numbers never grow past three digits: the successor of `"999"` is [`ProductNumberError::Exhausted`].
    pub fn next(latest: Option<&ProductNumber>) -> Result<ProductNumber, ProductNumberError> {
        let Some(latest) = latest else {
            return Ok(Self::first());
        };
        let seq = latest.sequence()?;
        if seq >= MAX_PRODUCT_SEQUENCE {
            return Err(ProductNumberError::Exhausted);
        }
        Ok(Self::from_sequence(seq + 1))
    }

    pub fn sequence(&self) -> Result<u32, ProductNumberError> {
        let is_digits = !self.0.is_empty() && self.0.bytes().all(|b| b.is_ascii_digit());
        if !is_digits {
            return Err(ProductNumberError::NotASequenceNumber(self.0.clone()));
        }
        self.0.parse::<u32>().map_err(|_| ProductNumberError::NotASequenceNumber(self.0.clone()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ProductNumber {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

impl From<String> for ProductNumber {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ProductNumber {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl Display for ProductNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

//--------------------------------------     ProductType       ---------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Type, Serialize, Deserialize)]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductType {
    /// Drinks made to order. There is no finite stock to track.
    Handmade,
    Bottle,
    Bakery,
}

impl ProductType {
    /// Whether selling a product of this type draws down a quantity in the stock ledger.
    pub fn tracks_stock(&self) -> bool {
        match self {
            ProductType::Handmade => false,
            ProductType::Bottle | ProductType::Bakery => true,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ProductType::Handmade => "제조 음료",
            ProductType::Bottle => "병 음료",
            ProductType::Bakery => "베이커리",
        }
    }
}

impl Display for ProductType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProductType::Handmade => write!(f, "HANDMADE"),
            ProductType::Bottle => write!(f, "BOTTLE"),
            ProductType::Bakery => write!(f, "BAKERY"),
        }
    }
}

impl FromStr for ProductType {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HANDMADE" => Ok(Self::Handmade),
            "BOTTLE" => Ok(Self::Bottle),
            "BAKERY" => Ok(Self::Bakery),
            s => Err(ConversionError(format!("Invalid product type: {s}"))),
        }
    }
}

//--------------------------------------    SellingStatus      ---------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Type, Serialize, Deserialize)]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SellingStatus {
    Selling,
    /// Shown on the kiosk, but temporarily unavailable.
    Hold,
    StopSelling,
}

impl SellingStatus {
    /// The statuses of products that are shown on the kiosk menu.
    pub fn for_display() -> &'static [SellingStatus] {
        &[SellingStatus::Selling, SellingStatus::Hold]
    }

    pub fn description(&self) -> &'static str {
        match self {
            SellingStatus::Selling => "판매중",
            SellingStatus::Hold => "판매보류",
            SellingStatus::StopSelling => "판매중지",
        }
    }
}

impl Display for SellingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SellingStatus::Selling => write!(f, "SELLING"),
            SellingStatus::Hold => write!(f, "HOLD"),
            SellingStatus::StopSelling => write!(f, "STOP_SELLING"),
        }
    }
}

impl FromStr for SellingStatus {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SELLING" => Ok(Self::Selling),
            "HOLD" => Ok(Self::Hold),
            "STOP_SELLING" => Ok(Self::StopSelling),
            s => Err(ConversionError(format!("Invalid selling status: {s}"))),
        }
    }
}

//--------------------------------------       Product         ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub product_number: ProductNumber,
    pub product_type: ProductType,
    pub selling_status: SellingStatus,
    pub name: String,
    pub price: Price,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

//--------------------------------------      NewProduct       ---------------------------------------------------------
/// A catalog entry that has not been assigned a product number yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub product_type: ProductType,
    pub selling_status: SellingStatus,
    pub name: String,
    pub price: Price,
}

impl NewProduct {
    pub fn new<S: Into<String>>(product_type: ProductType, name: S, price: Price) -> Self {
        Self { product_type, selling_status: SellingStatus::Selling, name: name.into(), price }
    }

    pub fn with_selling_status(mut self, status: SellingStatus) -> Self {
        self.selling_status = status;
        self
    }
}

//--------------------------------------        Stock          ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Stock {
    pub id: i64,
    pub product_number: ProductNumber,
    pub quantity: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Cannot deduct {requested} from stock for product {product_number}: only {available} left")]
pub struct StockShortfall {
    pub product_number: ProductNumber,
    pub requested: i64,
    pub available: i64,
}

impl Stock {
    pub fn is_quantity_less_than(&self, quantity: i64) -> bool {
        self.quantity < quantity
    }

    /// Removes `quantity` units from this record. Nothing changes if there are not enough units on hand.
    pub fn deduct_quantity(&mut self, quantity: i64) -> Result<(), StockShortfall> {
        if quantity < 0 || self.is_quantity_less_than(quantity) {
            return Err(StockShortfall {
                product_number: self.product_number.clone(),
                requested: quantity,
                available: self.quantity,
            });
        }
        self.quantity -= quantity;
        Ok(())
    }
}

//--------------------------------------     OrderStatus       ---------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// The order has been created. Every order starts here.
    Init,
    Canceled,
    PaymentCompleted,
    PaymentFailed,
    Received,
    Completed,
}

impl OrderStatus {
    pub fn description(&self) -> &'static str {
        match self {
            OrderStatus::Init => "주문생성",
            OrderStatus::Canceled => "주문취소",
            OrderStatus::PaymentCompleted => "결제완료",
            OrderStatus::PaymentFailed => "결제실패",
            OrderStatus::Received => "주문접수",
            OrderStatus::Completed => "처리완료",
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Init => write!(f, "INIT"),
            OrderStatus::Canceled => write!(f, "CANCELED"),
            OrderStatus::PaymentCompleted => write!(f, "PAYMENT_COMPLETED"),
            OrderStatus::PaymentFailed => write!(f, "PAYMENT_FAILED"),
            OrderStatus::Received => write!(f, "RECEIVED"),
            OrderStatus::Completed => write!(f, "COMPLETED"),
        }
    }
}

//--------------------------------------    OrderLineItem      ---------------------------------------------------------
/// One unit of a product within an order. The price is a snapshot taken when the order was placed, so later
/// catalog changes do not alter historical orders.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct OrderLineItem {
    pub id: i64,
    pub order_id: i64,
    pub product_number: ProductNumber,
    pub price: Price,
    /// Zero-based position of the item in the original request
    pub position: i64,
}

//--------------------------------------        Order          ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub status: OrderStatus,
    pub total_price: Price,
    /// The time supplied by the caller when the order was placed
    pub registered_at: DateTime<Utc>,
    #[sqlx(skip)]
    pub line_items: Vec<OrderLineItem>,
}

//--------------------------------------   MailSendHistory     ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct MailSendHistory {
    pub id: i64,
    pub from_email: String,
    pub to_email: String,
    pub subject: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMailSendHistory {
    pub from_email: String,
    pub to_email: String,
    pub subject: String,
    pub content: String,
}

impl NewMailSendHistory {
    pub fn new(from: &str, to: &str, subject: &str, content: &str) -> Self {
        Self {
            from_email: from.to_string(),
            to_email: to.to_string(),
            subject: subject.to_string(),
            content: content.to_string(),
        }
    }
}
