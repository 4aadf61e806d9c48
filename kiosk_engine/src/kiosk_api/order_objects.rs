use std::{
    collections::{BTreeMap, HashMap},
    fmt::Display,
};

use chrono::{DateTime, FixedOffset, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    db_types::{Price, Product, ProductNumber, Stock},
    traits::KioskError,
};

//--------------------------------------  OrderCreateRequest   ---------------------------------------------------------
/// A request to order the listed products. A number may appear more than once; each occurrence is one unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCreateRequest {
    pub product_numbers: Vec<ProductNumber>,
}

impl OrderCreateRequest {
    pub fn new<I, S>(numbers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<ProductNumber>,
    {
        Self { product_numbers: numbers.into_iter().map(Into::into).collect() }
    }

    pub fn is_empty(&self) -> bool {
        self.product_numbers.is_empty()
    }

    /// The requested numbers with duplicates removed, in the order they first appear.
    pub fn distinct_product_numbers(&self) -> Vec<ProductNumber> {
        let mut result: Vec<ProductNumber> = Vec::with_capacity(self.product_numbers.len());
        for number in &self.product_numbers {
            if !result.contains(number) {
                result.push(number.clone());
            }
        }
        result
    }
}

//--------------------------------------   NewOrderLineItem    ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrderLineItem {
    pub product_number: ProductNumber,
    pub price: Price,
    pub position: i64,
}

//--------------------------------------      OrderDraft       ---------------------------------------------------------
/// An order that has been resolved against the catalog and priced, but not stored yet.
///
/// The draft holds one product per requested number, in request order, so duplicates are kept.
#[derive(Debug, Clone)]
pub struct OrderDraft {
    products: Vec<Product>,
}

impl OrderDraft {
    /// Resolves each requested number through `catalog`, which should be the result of a single batched lookup of
    /// the request's distinct numbers.
    ///
    /// Fails with [`KioskError::EmptyOrder`] for an empty request, and with [`KioskError::UnresolvedProduct`] if any
    /// requested number is missing from `catalog`.
    pub fn resolve(request: &OrderCreateRequest, catalog: Vec<Product>) -> Result<Self, KioskError> {
        if request.is_empty() {
            return Err(KioskError::EmptyOrder);
        }
        let by_number: HashMap<ProductNumber, Product> =
            catalog.into_iter().map(|p| (p.product_number.clone(), p)).collect();
        let mut missing: Vec<String> = vec![];
        let mut products = Vec::with_capacity(request.product_numbers.len());
        for number in &request.product_numbers {
            match by_number.get(number) {
                Some(product) => products.push(product.clone()),
                None if !missing.contains(&number.0) => missing.push(number.0.clone()),
                None => {},
            }
        }
        if !missing.is_empty() {
            return Err(KioskError::UnresolvedProduct(missing));
        }
        Ok(Self { products })
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Fails with [`KioskError::PriceOverflow`] if the total does not fit in a [`Price`].
    pub fn total_price(&self) -> Result<Price, KioskError> {
        Price::checked_sum(self.products.iter().map(|p| p.price)).ok_or(KioskError::PriceOverflow)
    }

    pub fn line_items(&self) -> Vec<NewOrderLineItem> {
        self.products
            .iter()
            .zip(0i64..)
            .map(|(p, position)| NewOrderLineItem { product_number: p.product_number.clone(), price: p.price, position })
            .collect()
    }

    /// The number of units needed from the stock ledger, per stock-tracked product. Products that are not
    /// stock-tracked do not appear.
    ///
    /// Entries are sorted by product number, so that every order touches ledger rows in the same sequence.
    pub fn stock_demand(&self) -> BTreeMap<ProductNumber, i64> {
        self.products.iter().filter(|p| p.product_type.tracks_stock()).fold(BTreeMap::new(), |mut demand, p| {
            *demand.entry(p.product_number.clone()).or_insert(0) += 1;
            demand
        })
    }

    /// Checks that `stocks` can cover the whole stock demand of this order. A stock-tracked product with no ledger
    /// entry counts as out of stock.
    pub fn check_stock(&self, stocks: &[Stock]) -> Result<(), KioskError> {
        let on_hand: HashMap<&ProductNumber, i64> = stocks.iter().map(|s| (&s.product_number, s.quantity)).collect();
        let sufficient = self
            .stock_demand()
            .iter()
            .all(|(number, required)| on_hand.get(number).map(|&available| available >= *required).unwrap_or(false));
        if sufficient {
            Ok(())
        } else {
            Err(KioskError::InsufficientStock)
        }
    }
}

//--------------------------------------     OpeningHours      ---------------------------------------------------------
/// The daily window in which the kiosk accepts orders, in the café's local time. Both ends are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpeningHours {
    open: NaiveTime,
    close: NaiveTime,
    offset: FixedOffset,
}

impl OpeningHours {
    pub fn new(open: NaiveTime, close: NaiveTime, offset: FixedOffset) -> Self {
        Self { open, close, offset }
    }

    pub fn is_open_at(&self, at: DateTime<Utc>) -> bool {
        let local = at.with_timezone(&self.offset).time();
        self.open <= local && local <= self.close
    }

    /// Fails with [`KioskError::OutsideOpeningHours`] if `at` falls outside the window.
    pub fn check(&self, at: DateTime<Utc>) -> Result<(), KioskError> {
        if self.is_open_at(at) {
            Ok(())
        } else {
            Err(KioskError::OutsideOpeningHours)
        }
    }
}

impl Display for OpeningHours {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{} (UTC{})", self.open.format("%H:%M"), self.close.format("%H:%M"), self.offset)
    }
}

//--------------------------------------         Cart          ---------------------------------------------------------
/// The products a customer has picked at the kiosk, before the order is sent.
///
/// Like an order, the cart keeps one entry per unit, in the order they were added.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    products: Vec<Product>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `count` units of `product`. At least one unit must be added.
    pub fn add(&mut self, product: &Product, count: u32) -> Result<(), KioskError> {
        if count == 0 {
            return Err(KioskError::InvalidItemCount);
        }
        self.products.extend(std::iter::repeat(product).take(count as usize).cloned());
        Ok(())
    }

    /// Removes one unit of the product with this number. Returns whether there was one to remove.
    pub fn remove(&mut self, number: &ProductNumber) -> bool {
        match self.products.iter().position(|p| &p.product_number == number) {
            Some(index) => {
                self.products.remove(index);
                true
            },
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.products.clear();
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn total_price(&self) -> Result<Price, KioskError> {
        Price::checked_sum(self.products.iter().map(|p| p.price)).ok_or(KioskError::PriceOverflow)
    }

    pub fn to_request(&self) -> OrderCreateRequest {
        OrderCreateRequest::new(self.products.iter().map(|p| p.product_number.clone()))
    }
}
