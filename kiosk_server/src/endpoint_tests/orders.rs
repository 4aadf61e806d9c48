use actix_web::{http::StatusCode, web, web::ServiceConfig};
use chrono::{FixedOffset, NaiveTime, Timelike, Utc};
use kiosk_engine::{
    db_types::{OrderStatus, Price},
    order_objects::OpeningHours,
    traits::{KioskError, LogMailSendClient},
    OrderApi,
};

use super::{
    helpers::{get_request, order, post_request, saved_mail},
    mocks::{MockKioskBackend, MockMailHistory},
};
use crate::{
    config::MailConfig,
    data_objects::{ApiResponse, OrderResponse},
    notifier::OrderNotifier,
    routes::{CreateOrderRoute, OrderByIdRoute},
};

fn configure(
    backend: MockKioskBackend,
    history: MockMailHistory,
    mail: MailConfig,
) -> impl FnOnce(&mut ServiceConfig) {
    configure_api(OrderApi::new(backend), history, mail)
}

fn configure_api(
    api: OrderApi<MockKioskBackend>,
    history: MockMailHistory,
    mail: MailConfig,
) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg: &mut ServiceConfig| {
        cfg.service(CreateOrderRoute::<MockKioskBackend, MockMailHistory>::new())
            .service(OrderByIdRoute::<MockKioskBackend>::new())
            .app_data(web::Data::new(api))
            .app_data(web::Data::new(OrderNotifier::new(LogMailSendClient, history, mail)));
    }
}

/// A ten-hour window, in UTC, that does not contain the current time.
fn closed_now() -> OpeningHours {
    let (open, close) = if Utc::now().hour() < 12 { (13, 23) } else { (1, 11) };
    let time = |hour| NaiveTime::from_hms_opt(hour, 0, 0).unwrap();
    OpeningHours::new(time(open), time(close), FixedOffset::east_opt(0).unwrap())
}

fn no_mail() -> MockMailHistory {
    let mut history = MockMailHistory::new();
    history.expect_insert_mail_history().never();
    history
}

fn mail_to_manager() -> MailConfig {
    MailConfig { from: "kiosk@cafekiosk.local".into(), to: Some("manager@cafekiosk.local".into()) }
}

#[actix_web::test]
async fn create_order() {
    let mut backend = MockKioskBackend::new();
    backend
        .expect_place_order()
        .withf(|request, _| request.product_numbers.iter().map(|n| n.as_str()).eq(["001", "002"]))
        .times(1)
        .returning(|_, _| Ok(order(1, &[("001", 4000), ("002", 4500)])));
    let body = r#"{"productNumbers":["001","002"]}"#;
    let (status, body) = post_request("/orders/new", body, configure(backend, no_mail(), MailConfig::default())).await;
    assert_eq!(status, StatusCode::OK);
    let response: ApiResponse<OrderResponse> = serde_json::from_str(&body).unwrap();
    assert_eq!(response.code, 200);
    assert_eq!(response.status, "OK");
    let order = response.data.unwrap();
    assert_eq!(order.id, 1);
    assert_eq!(order.status, OrderStatus::Init);
    assert_eq!(order.total_price, Price::from_won(8500));
    let numbers = order.line_items.iter().map(|item| item.product_number.as_str()).collect::<Vec<_>>();
    assert_eq!(numbers, vec!["001", "002"]);
}

#[actix_web::test]
async fn create_order_sends_notification() {
    let mut backend = MockKioskBackend::new();
    backend.expect_place_order().returning(|_, _| Ok(order(7, &[("003", 5000)])));
    let mut history = MockMailHistory::new();
    history
        .expect_insert_mail_history()
        .withf(|mail| mail.to_email == "manager@cafekiosk.local" && mail.subject == "[주문 접수] 주문 #7")
        .times(1)
        .returning(|mail| Ok(saved_mail(mail)));
    let body = r#"{"productNumbers":["003"]}"#;
    let (status, _) = post_request("/orders/new", body, configure(backend, history, mail_to_manager())).await;
    assert_eq!(status, StatusCode::OK);
}

#[actix_web::test]
async fn failed_notification_does_not_fail_the_order() {
    let mut backend = MockKioskBackend::new();
    backend.expect_place_order().returning(|_, _| Ok(order(2, &[("003", 5000)])));
    let mut history = MockMailHistory::new();
    history.expect_insert_mail_history().times(1).returning(|_| Err(KioskError::DatabaseError("disk full".into())));
    let body = r#"{"productNumbers":["003"]}"#;
    let (status, _) = post_request("/orders/new", body, configure(backend, history, mail_to_manager())).await;
    assert_eq!(status, StatusCode::OK);
}

#[actix_web::test]
async fn create_order_with_insufficient_stock() {
    let mut backend = MockKioskBackend::new();
    backend.expect_place_order().times(1).returning(|_, _| Err(KioskError::InsufficientStock));
    let body = r#"{"productNumbers":["001","001"]}"#;
    let (status, body) = post_request("/orders/new", body, configure(backend, no_mail(), mail_to_manager())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, r#"{"code":400,"status":"BAD_REQUEST","message":"재고가 부족한 상품이 있습니다."}"#);
}

#[actix_web::test]
async fn create_order_with_unknown_products() {
    let mut backend = MockKioskBackend::new();
    backend.expect_place_order().returning(|_, _| Err(KioskError::UnresolvedProduct(vec!["404".into()])));
    let body = r#"{"productNumbers":["001","404"]}"#;
    let (status, body) = post_request("/orders/new", body, configure(backend, no_mail(), mail_to_manager())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let response: ApiResponse<()> = serde_json::from_str(&body).unwrap();
    assert_eq!(response.message, "The following product numbers are not in the catalog: 404");
}

#[actix_web::test]
async fn create_order_without_products() {
    let mut backend = MockKioskBackend::new();
    backend.expect_place_order().never();
    let body = r#"{"productNumbers":[]}"#;
    let (status, body) = post_request("/orders/new", body, configure(backend, no_mail(), MailConfig::default())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, r#"{"code":400,"status":"BAD_REQUEST","message":"상품 번호 리스트는 필수입니다."}"#);
}

#[actix_web::test]
async fn create_order_outside_opening_hours() {
    let mut backend = MockKioskBackend::new();
    backend.expect_place_order().never();
    let api = OrderApi::new(backend).with_opening_hours(closed_now());
    let body = r#"{"productNumbers":["001"]}"#;
    let (status, body) = post_request("/orders/new", body, configure_api(api, no_mail(), mail_to_manager())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, r#"{"code":400,"status":"BAD_REQUEST","message":"주문 시간이 아닙니다. 관리자에게 문의하세요."}"#);
}

#[actix_web::test]
async fn create_order_when_backend_is_down() {
    let mut backend = MockKioskBackend::new();
    backend.expect_place_order().returning(|_, _| Err(KioskError::DatabaseError("connection refused".into())));
    let body = r#"{"productNumbers":["001"]}"#;
    let (status, _) = post_request("/orders/new", body, configure(backend, no_mail(), MailConfig::default())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[actix_web::test]
async fn fetch_order_by_id() {
    let mut backend = MockKioskBackend::new();
    backend.expect_fetch_order().withf(|id| *id == 3).returning(|_| Ok(Some(order(3, &[("001", 1000), ("001", 1000)]))));
    let (status, body) = get_request("/orders/3", configure(backend, no_mail(), MailConfig::default())).await;
    assert_eq!(status, StatusCode::OK);
    let response: ApiResponse<OrderResponse> = serde_json::from_str(&body).unwrap();
    let order = response.data.unwrap();
    assert_eq!(order.id, 3);
    assert_eq!(order.total_price, Price::from_won(2000));
    assert_eq!(order.line_items.len(), 2);
}

#[actix_web::test]
async fn fetch_missing_order() {
    let mut backend = MockKioskBackend::new();
    backend.expect_fetch_order().returning(|_| Ok(None));
    let (status, body) = get_request("/orders/99", configure(backend, no_mail(), MailConfig::default())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, r#"{"code":404,"status":"NOT_FOUND","message":"The data was not found. Order #99"}"#);
}
