use std::fmt::Debug;

use chrono::{DateTime, Utc};
use log::*;

use crate::{
    db_types::Order,
    helpers::{retry_on_conflict, RetryPolicy},
    order_objects::{OpeningHours, OrderCreateRequest},
    traits::{KioskDatabase, KioskError},
};

/// `OrderApi` turns kiosk order requests into stored orders.
pub struct OrderApi<B> {
    db: B,
    retry_policy: RetryPolicy,
    opening_hours: Option<OpeningHours>,
}

impl<B> Debug for OrderApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OrderApi")
    }
}

impl<B> OrderApi<B> {
    pub fn new(db: B) -> Self {
        Self { db, retry_policy: RetryPolicy::default(), opening_hours: None }
    }

    pub fn with_retry_policy(mut self, retry_policy: RetryPolicy) -> Self {
        self.retry_policy = retry_policy;
        self
    }

    /// Only accept orders registered within `hours`. Without opening hours, orders are accepted at any time.
    pub fn with_opening_hours(mut self, hours: OpeningHours) -> Self {
        self.opening_hours = Some(hours);
        self
    }

    pub fn db(&self) -> &B {
        &self.db
    }
}

impl<B> OrderApi<B>
where B: KioskDatabase
{
    /// Places a new order for the requested product numbers, registered at the given time.
    ///
    /// Every occurrence of a number in the request becomes its own line item, priced at the product's current price.
    /// Stock is deducted for bottled drinks and bakery items; made-to-order drinks are not stock-tracked.
    ///
    /// The order is all-or-nothing. It fails, leaving stock untouched, if
    /// * `registered_at` is outside the opening hours ([`KioskError::OutsideOpeningHours`]),
    /// * the request is empty ([`KioskError::EmptyOrder`]),
    /// * any number is not in the catalog ([`KioskError::UnresolvedProduct`]),
    /// * there is not enough stock for any stock-tracked product ([`KioskError::InsufficientStock`]).
    ///
    /// Collisions with concurrent orders are retried from scratch, so the stock check always sees committed
    /// quantities.
    pub async fn create_order(
        &self,
        request: OrderCreateRequest,
        registered_at: DateTime<Utc>,
    ) -> Result<Order, KioskError> {
        if let Some(hours) = &self.opening_hours {
            hours.check(registered_at)?;
        }
        if request.is_empty() {
            return Err(KioskError::EmptyOrder);
        }
        let db = &self.db;
        let request = &request;
        let result =
            retry_on_conflict(self.retry_policy, "Order placement", move || db.place_order(request, registered_at))
                .await;
        match &result {
            Ok(order) => {
                info!("🛒️ Order #{} placed: {} items for {}", order.id, order.line_items.len(), order.total_price)
            },
            Err(e) => debug!("🛒️ Order for {} items was not placed. {e}", request.product_numbers.len()),
        }
        result
    }

    /// Fetches a stored order, with its line items in request order.
    pub async fn order_by_id(&self, id: i64) -> Result<Option<Order>, KioskError> {
        self.db.fetch_order(id).await
    }
}
