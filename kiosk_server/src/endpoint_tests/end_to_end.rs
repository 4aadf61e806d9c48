//! Drives the HTTP surface against a real, migrated SQLite database.
use actix_web::{http::StatusCode, web, web::ServiceConfig};
use kiosk_engine::{
    db_types::{Price, ProductNumber},
    test_utils::prepare_env::{prepare_test_env, random_db_path},
    traits::LogMailSendClient,
    OrderApi,
    ProductApi,
    SqliteDatabase,
};

use super::helpers::{get_request, post_request};
use crate::{
    config::MailConfig,
    data_objects::{ApiResponse, OrderResponse, ProductResponse},
    notifier::OrderNotifier,
    routes::{CreateOrderRoute, CreateProductRoute, OrderByIdRoute, SellingProductsRoute},
};

async fn kiosk_db() -> SqliteDatabase {
    let url = random_db_path();
    prepare_test_env(&url).await;
    SqliteDatabase::new_with_url(&url, 5).await.expect("Error creating connection to database")
}

fn configure(db: SqliteDatabase, mail: MailConfig) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg: &mut ServiceConfig| {
        let scope = web::scope("/api/v1")
            .service(CreateProductRoute::<SqliteDatabase>::new())
            .service(SellingProductsRoute::<SqliteDatabase>::new())
            .service(CreateOrderRoute::<SqliteDatabase, SqliteDatabase>::new())
            .service(OrderByIdRoute::<SqliteDatabase>::new());
        cfg.app_data(web::Data::new(ProductApi::new(db.clone())))
            .app_data(web::Data::new(OrderApi::new(db.clone())))
            .app_data(web::Data::new(OrderNotifier::new(LogMailSendClient, db, mail)))
            .service(scope);
    }
}

fn manager_mail() -> MailConfig {
    MailConfig { from: "kiosk@cafekiosk.local".into(), to: Some("manager@cafekiosk.local".into()) }
}

async fn register(db: &SqliteDatabase, product_type: &str, name: &str, price: i64) -> anyhow::Result<ProductResponse> {
    let body = format!(r#"{{"type":"{product_type}","sellingStatus":"SELLING","name":"{name}","price":{price}}}"#);
    let (status, body) = post_request("/api/v1/products/new", &body, configure(db.clone(), MailConfig::default())).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    let response: ApiResponse<ProductResponse> = serde_json::from_str(&body)?;
    response.data.ok_or_else(|| anyhow::anyhow!("No product in response"))
}

#[actix_web::test]
async fn register_products_and_place_an_order() -> anyhow::Result<()> {
    let db = kiosk_db().await;
    let americano = register(&db, "HANDMADE", "아메리카노", 1000).await?;
    let latte = register(&db, "HANDMADE", "카페라떼", 3000).await?;
    let tea = register(&db, "HANDMADE", "허브티", 5000).await?;
    assert_eq!(americano.product_number, "001");
    assert_eq!(latte.product_number, "002");
    assert_eq!(tea.product_number, "003");

    let (status, body) = get_request("/api/v1/products/selling", configure(db.clone(), MailConfig::default())).await;
    assert_eq!(status, StatusCode::OK);
    let selling: ApiResponse<Vec<ProductResponse>> = serde_json::from_str(&body)?;
    assert_eq!(selling.data.map(|p| p.len()), Some(3));

    let body = r#"{"productNumbers":["001","001"]}"#;
    let (status, body) = post_request("/api/v1/orders/new", body, configure(db.clone(), manager_mail())).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    let placed: ApiResponse<OrderResponse> = serde_json::from_str(&body)?;
    let placed = placed.data.ok_or_else(|| anyhow::anyhow!("No order in response"))?;
    assert_eq!(placed.total_price, Price::from_won(2000));
    assert_eq!(placed.line_items.len(), 2);

    let path = format!("/api/v1/orders/{}", placed.id);
    let (status, body) = get_request(&path, configure(db.clone(), MailConfig::default())).await;
    assert_eq!(status, StatusCode::OK);
    let fetched: ApiResponse<OrderResponse> = serde_json::from_str(&body)?;
    assert_eq!(fetched.data, Some(placed));

    let mails = db.fetch_mail_histories().await?;
    assert_eq!(mails.len(), 1);
    assert_eq!(mails[0].to_email, "manager@cafekiosk.local");
    Ok(())
}

#[actix_web::test]
async fn ordering_beyond_stock_is_rejected() -> anyhow::Result<()> {
    let db = kiosk_db().await;
    let water = register(&db, "BOTTLE", "생수", 1000).await?;
    ProductApi::new(db.clone()).provision_stock(&ProductNumber::from(water.product_number.as_str()), 1).await?;

    let body = r#"{"productNumbers":["001","001"]}"#;
    let (status, body) = post_request("/api/v1/orders/new", body, configure(db.clone(), manager_mail())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("재고가 부족한 상품이 있습니다."));

    let body = r#"{"productNumbers":["001"]}"#;
    let (status, _) = post_request("/api/v1/orders/new", body, configure(db.clone(), MailConfig::default())).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = post_request("/api/v1/orders/new", body, configure(db.clone(), MailConfig::default())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(db.fetch_mail_histories().await?.is_empty());
    Ok(())
}
