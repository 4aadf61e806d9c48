use log::{debug, trace};
use sqlx::{QueryBuilder, SqliteConnection};

use crate::db_types::{ProductNumber, Stock};

pub async fn fetch_stocks_by_numbers(
    numbers: &[ProductNumber],
    conn: &mut SqliteConnection,
) -> Result<Vec<Stock>, sqlx::Error> {
    if numbers.is_empty() {
        return Ok(vec![]);
    }
    let mut builder = QueryBuilder::new("SELECT * FROM stocks WHERE product_number IN (");
    let mut in_clause = builder.separated(", ");
    for number in numbers {
        in_clause.push_bind(number.to_string());
    }
    builder.push(")");
    let stocks = builder.build_query_as::<Stock>().fetch_all(conn).await?;
    Ok(stocks)
}

/// Removes `quantity` units from the ledger row for `number`, if and only if at least that many are on hand.
///
/// The check and the decrement are a single statement, so concurrent deductions can never take the quantity below
/// zero. Returns `None` if there is no ledger row, or not enough stock. Nothing is changed in that case.
pub async fn deduct(
    number: &ProductNumber,
    quantity: i64,
    conn: &mut SqliteConnection,
) -> Result<Option<Stock>, sqlx::Error> {
    let updated: Vec<Stock> = sqlx::query_as(
        r#"
            UPDATE stocks SET quantity = quantity - $1
            WHERE product_number = $2 AND quantity >= $3
            RETURNING *;
        "#,
    )
    .bind(quantity)
    .bind(number.as_str())
    .bind(quantity)
    .fetch_all(conn)
    .await?;
    let stock = updated.into_iter().next();
    match &stock {
        Some(s) => trace!("📦️ Deducted {quantity} from stock for {number}. {} left", s.quantity),
        None => debug!("📦️ Could not deduct {quantity} from stock for {number}"),
    }
    Ok(stock)
}

/// Creates the ledger row for `number`, or replaces its quantity if the row already exists.
pub async fn upsert(number: &ProductNumber, quantity: i64, conn: &mut SqliteConnection) -> Result<Stock, sqlx::Error> {
    let upserted: Vec<Stock> = sqlx::query_as(
        r#"
            INSERT INTO stocks (product_number, quantity) VALUES ($1, $2)
            ON CONFLICT (product_number) DO UPDATE SET quantity = excluded.quantity
            RETURNING *;
        "#,
    )
    .bind(number.as_str())
    .bind(quantity)
    .fetch_all(conn)
    .await?;
    let stock = upserted.into_iter().next().ok_or(sqlx::Error::RowNotFound)?;
    debug!("📦️ Stock for {number} set to {}", stock.quantity);
    Ok(stock)
}
