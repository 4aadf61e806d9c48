use std::fmt::Display;

use serde::{Deserialize, Serialize};
use sqlx::Type;
use thiserror::Error;

/// The largest price a single product may carry, in won.
pub const MAX_PRICE: i64 = i32::MAX as i64;

//--------------------------------------        Price         ---------------------------------------------------------
/// A price in whole won, between zero and [`MAX_PRICE`]. Use [`Price::try_from`] when the source value has not been
/// validated.
///
/// Prices only ever add up through [`Price::checked_add`] and [`Price::checked_sum`], so an order total that would
/// overflow is reported instead of wrapping.
#[derive(Debug, Clone, Copy, Default, Type, PartialEq, Eq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[sqlx(transparent)]
#[serde(transparent)]
pub struct Price(i64);

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Value cannot be used as a price: {0}")]
pub struct PriceConversionError(String);

impl TryFrom<i64> for Price {
    type Error = PriceConversionError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if value < 0 {
            Err(PriceConversionError(format!("{value} is negative")))
        } else if value > MAX_PRICE {
            Err(PriceConversionError(format!("{value} is more than {MAX_PRICE}")))
        } else {
            Ok(Self(value))
        }
    }
}

impl Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}원", self.0)
    }
}

impl Price {
    /// Creates a price from a literal amount, clamped to `0..=MAX_PRICE`.
    pub const fn from_won(won: i64) -> Self {
        if won < 0 {
            Self(0)
        } else if won > MAX_PRICE {
            Self(MAX_PRICE)
        } else {
            Self(won)
        }
    }

    /// Returns `None` if the sum does not fit in an `i64`.
    pub fn checked_add(self, rhs: Price) -> Option<Price> {
        self.0.checked_add(rhs.0).map(Self)
    }

    pub fn checked_sum<I: IntoIterator<Item = Price>>(prices: I) -> Option<Price> {
        prices.into_iter().try_fold(Price::default(), Price::checked_add)
    }
}
