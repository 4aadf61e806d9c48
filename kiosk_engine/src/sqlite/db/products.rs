use log::{debug, trace};
use sqlx::{QueryBuilder, SqliteConnection};

use crate::db_types::{NewProduct, Product, ProductNumber, SellingStatus};

/// Fetches every product whose number is in `numbers`. Numbers that are not in the catalog are silently skipped, and
/// the result is in no particular order.
pub async fn fetch_products_by_numbers(
    numbers: &[ProductNumber],
    conn: &mut SqliteConnection,
) -> Result<Vec<Product>, sqlx::Error> {
    if numbers.is_empty() {
        return Ok(vec![]);
    }
    let mut builder = QueryBuilder::new("SELECT * FROM products WHERE product_number IN (");
    let mut in_clause = builder.separated(", ");
    for number in numbers {
        in_clause.push_bind(number.to_string());
    }
    builder.push(")");
    trace!("📦️ Executing query: {}", builder.sql());
    let products = builder.build_query_as::<Product>().fetch_all(conn).await?;
    trace!("📦️ {} of {} product numbers resolved", products.len(), numbers.len());
    Ok(products)
}

/// The highest product number in the catalog. Product numbers are fixed-width, so the textual maximum is also the
/// numeric one.
pub async fn fetch_latest_product_number(conn: &mut SqliteConnection) -> Result<Option<ProductNumber>, sqlx::Error> {
    let latest: Vec<String> =
        sqlx::query_scalar("SELECT product_number FROM products ORDER BY product_number DESC LIMIT 1")
            .fetch_all(conn)
            .await?;
    Ok(latest.into_iter().next().map(ProductNumber::from))
}

pub async fn fetch_products_by_status(
    statuses: &[SellingStatus],
    conn: &mut SqliteConnection,
) -> Result<Vec<Product>, sqlx::Error> {
    if statuses.is_empty() {
        return Ok(vec![]);
    }
    let mut builder = QueryBuilder::new("SELECT * FROM products WHERE selling_status IN (");
    let mut in_clause = builder.separated(", ");
    for status in statuses {
        in_clause.push_bind(status.to_string());
    }
    builder.push(") ORDER BY product_number ASC");
    let products = builder.build_query_as::<Product>().fetch_all(conn).await?;
    Ok(products)
}

/// Inserts a product under the given number. This is not atomic with respect to choosing the number. Wrap the call
/// in a transaction together with [`fetch_latest_product_number`], and pass `&mut tx` as the connection argument.
///
/// A duplicate number is rejected by the `UNIQUE` constraint on `product_number`.
pub async fn insert_product(
    number: &ProductNumber,
    product: NewProduct,
    conn: &mut SqliteConnection,
) -> Result<Product, sqlx::Error> {
    let inserted: Vec<Product> = sqlx::query_as(
        r#"
            INSERT INTO products (
                product_number,
                product_type,
                selling_status,
                name,
                price
            ) VALUES ($1, $2, $3, $4, $5)
            RETURNING *;
        "#,
    )
    .bind(number.as_str())
    .bind(product.product_type.to_string())
    .bind(product.selling_status.to_string())
    .bind(product.name)
    .bind(product.price)
    .fetch_all(conn)
    .await?;
    let product = inserted.into_iter().next().ok_or(sqlx::Error::RowNotFound)?;
    debug!("📦️ Product {} ({}) added to the catalog with id {}", product.product_number, product.name, product.id);
    Ok(product)
}
