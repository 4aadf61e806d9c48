mod price;

pub use price::{Price, PriceConversionError, MAX_PRICE};
