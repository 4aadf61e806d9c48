use actix_web::{http::StatusCode, web, web::ServiceConfig};
use kiosk_engine::{
    db_types::{Price, ProductNumberError, ProductType, SellingStatus},
    traits::KioskError,
    ProductApi,
};
use super::{
    helpers::{get_request, post_request, product},
    mocks::MockKioskBackend,
};
use crate::{
    data_objects::ApiResponse,
    routes::{CreateProductRoute, SellingProductsRoute},
};

fn configure(backend: MockKioskBackend) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg: &mut ServiceConfig| {
        cfg.service(CreateProductRoute::<MockKioskBackend>::new())
            .service(SellingProductsRoute::<MockKioskBackend>::new())
            .app_data(web::Data::new(ProductApi::new(backend)));
    }
}

#[actix_web::test]
async fn create_product() {
    let mut backend = MockKioskBackend::new();
    backend.expect_insert_product().times(1).returning(|p| {
        assert_eq!(p.name, "아메리카노");
        assert_eq!(p.selling_status, SellingStatus::Selling);
        assert_eq!(p.price, Price::from_won(4000));
        Ok(product(1, p.product_type, p.selling_status, &p.name, 4000))
    });
    let body = r#"{"type":"HANDMADE","sellingStatus":"SELLING","name":"아메리카노","price":4000}"#;
    let (status, body) = post_request("/products/new", body, configure(backend)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, CREATED_PRODUCT_JSON);
}

#[actix_web::test]
async fn create_product_with_blank_name() {
    let mut backend = MockKioskBackend::new();
    backend.expect_insert_product().never();
    let body = r#"{"type":"HANDMADE","sellingStatus":"SELLING","name":"","price":4000}"#;
    let (status, body) = post_request("/products/new", body, configure(backend)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, r#"{"code":400,"status":"BAD_REQUEST","message":"상품 이름은 필수입니다."}"#);
}

#[actix_web::test]
async fn create_product_with_non_positive_price() {
    let mut backend = MockKioskBackend::new();
    backend.expect_insert_product().never();
    let body = r#"{"type":"BAKERY","sellingStatus":"SELLING","name":"크루아상","price":0}"#;
    let (status, body) = post_request("/products/new", body, configure(backend)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, r#"{"code":400,"status":"BAD_REQUEST","message":"상품 가격은 양수여야 합니다."}"#);
}

#[actix_web::test]
async fn create_product_with_unknown_type() {
    let mut backend = MockKioskBackend::new();
    backend.expect_insert_product().never();
    let body = r#"{"type":"SMOOTHIE","sellingStatus":"SELLING","name":"딸기 스무디","price":4000}"#;
    let (status, body) = post_request("/products/new", body, configure(backend)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let response: ApiResponse<serde_json::Value> = serde_json::from_str(&body).unwrap();
    assert_eq!(response.code, 400);
    assert_eq!(response.status, "BAD_REQUEST");
    assert!(response.data.is_none());
}

#[actix_web::test]
async fn create_product_when_catalog_is_full() {
    let mut backend = MockKioskBackend::new();
    backend.expect_insert_product().returning(|_| Err(KioskError::InvalidProductNumber(ProductNumberError::Exhausted)));
    let body = r#"{"type":"HANDMADE","sellingStatus":"SELLING","name":"아메리카노","price":4000}"#;
    let (status, _) = post_request("/products/new", body, configure(backend)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[actix_web::test]
async fn selling_products() {
    let mut backend = MockKioskBackend::new();
    backend
        .expect_fetch_products_by_status()
        .withf(|statuses| statuses.iter().eq(SellingStatus::for_display().iter()))
        .times(1)
        .returning(|_| {
            Ok(vec![
                product(1, ProductType::Handmade, SellingStatus::Selling, "아메리카노", 4000),
                product(2, ProductType::Bakery, SellingStatus::Hold, "크루아상", 3500),
            ])
        });
    let (status, body) = get_request("/products/selling", configure(backend)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, SELLING_PRODUCTS_JSON);
}

const CREATED_PRODUCT_JSON: &str = r#"{"code":200,"status":"OK","message":"OK","data":{"id":1,"productNumber":"001","type":"HANDMADE","sellingStatus":"SELLING","name":"아메리카노","price":4000}}"#;

const SELLING_PRODUCTS_JSON: &str = r#"{"code":200,"status":"OK","message":"OK","data":[{"id":1,"productNumber":"001","type":"HANDMADE","sellingStatus":"SELLING","name":"아메리카노","price":4000},{"id":2,"productNumber":"002","type":"BAKERY","sellingStatus":"HOLD","name":"크루아상","price":3500}]}"#;
