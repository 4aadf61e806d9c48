use chrono::{DateTime, Utc};
use log::{debug, trace};
use sqlx::{QueryBuilder, SqliteConnection};

use crate::{
    db_types::{Order, OrderLineItem, Price},
    order_objects::NewOrderLineItem,
};

/// Inserts a new order and its line items using the given connection. This is not atomic. You can embed this call
/// inside a transaction if you need to ensure atomicity, and pass `&mut tx` as the connection argument.
///
/// New orders always start with the `Init` status.
pub async fn insert_order(
    total_price: Price,
    registered_at: DateTime<Utc>,
    line_items: &[NewOrderLineItem],
    conn: &mut SqliteConnection,
) -> Result<Order, sqlx::Error> {
    let inserted: Vec<Order> = sqlx::query_as(
        r#"
            INSERT INTO orders (status, total_price, registered_at)
            VALUES ('INIT', $1, $2)
            RETURNING *;
        "#,
    )
    .bind(total_price)
    .bind(registered_at)
    .fetch_all(&mut *conn)
    .await?;
    let mut order = inserted.into_iter().next().ok_or(sqlx::Error::RowNotFound)?;
    order.line_items = insert_line_items(order.id, line_items, conn).await?;
    debug!("📝️ Order #{} inserted with {} line items for {}", order.id, order.line_items.len(), order.total_price);
    Ok(order)
}

async fn insert_line_items(
    order_id: i64,
    items: &[NewOrderLineItem],
    conn: &mut SqliteConnection,
) -> Result<Vec<OrderLineItem>, sqlx::Error> {
    if items.is_empty() {
        return Ok(vec![]);
    }
    let mut builder = QueryBuilder::new("INSERT INTO order_line_items (order_id, product_number, price, position) ");
    builder.push_values(items, |mut row, item| {
        row.push_bind(order_id)
            .push_bind(item.product_number.to_string())
            .push_bind(item.price)
            .push_bind(item.position);
    });
    builder.push(" RETURNING *");
    trace!("📝️ Executing query: {}", builder.sql());
    let mut inserted = builder.build_query_as::<OrderLineItem>().fetch_all(conn).await?;
    inserted.sort_by_key(|item| item.position);
    Ok(inserted)
}

pub async fn fetch_line_items(order_id: i64, conn: &mut SqliteConnection) -> Result<Vec<OrderLineItem>, sqlx::Error> {
    let items = sqlx::query_as("SELECT * FROM order_line_items WHERE order_id = $1 ORDER BY position ASC")
        .bind(order_id)
        .fetch_all(conn)
        .await?;
    Ok(items)
}

/// Fetches the order with the given id, together with its line items.
pub async fn fetch_order(id: i64, conn: &mut SqliteConnection) -> Result<Option<Order>, sqlx::Error> {
    let orders: Vec<Order> =
        sqlx::query_as("SELECT * FROM orders WHERE id = $1").bind(id).fetch_all(&mut *conn).await?;
    match orders.into_iter().next() {
        Some(mut order) => {
            order.line_items = fetch_line_items(order.id, conn).await?;
            Ok(Some(order))
        },
        None => Ok(None),
    }
}
