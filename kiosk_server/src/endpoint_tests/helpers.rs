use actix_web::{http::StatusCode, test, test::TestRequest, web::ServiceConfig, App};
use chrono::{DateTime, TimeZone, Utc};
use kiosk_engine::db_types::{
    MailSendHistory,
    NewMailSendHistory,
    Order,
    OrderLineItem,
    OrderStatus,
    Price,
    Product,
    ProductNumber,
    ProductType,
    SellingStatus,
};
use log::debug;

use crate::server::json_config;

pub async fn get_request<F>(path: &str, configure: F) -> (StatusCode, String)
where F: FnOnce(&mut ServiceConfig) {
    send(TestRequest::get().uri(path), configure).await
}

pub async fn post_request<F>(path: &str, body: &str, configure: F) -> (StatusCode, String)
where F: FnOnce(&mut ServiceConfig) {
    let req =
        TestRequest::post().uri(path).insert_header(("Content-Type", "application/json")).set_payload(body.to_string());
    send(req, configure).await
}

async fn send<F>(req: TestRequest, configure: F) -> (StatusCode, String)
where F: FnOnce(&mut ServiceConfig) {
    let _ = env_logger::try_init();
    let app = App::new().app_data(json_config()).configure(configure);
    let service = test::init_service(app).await;
    debug!("Making request");
    let res = test::call_service(&service, req.to_request()).await;
    let status = res.status();
    let body = String::from_utf8_lossy(&test::read_body(res).await).into_owned();
    (status, body)
}

pub fn timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 8, 10, 0, 0).unwrap()
}

pub fn product(id: i64, product_type: ProductType, status: SellingStatus, name: &str, price: i64) -> Product {
    Product {
        id,
        product_number: ProductNumber(format!("{id:03}")),
        product_type,
        selling_status: status,
        name: name.to_string(),
        price: Price::from_won(price),
        created_at: timestamp(),
        updated_at: timestamp(),
    }
}

pub fn order(id: i64, items: &[(&str, i64)]) -> Order {
    let line_items = items
        .iter()
        .zip(0i64..)
        .map(|((number, price), position)| OrderLineItem {
            id: position + 1,
            order_id: id,
            product_number: ProductNumber::from(*number),
            price: Price::from_won(*price),
            position,
        })
        .collect::<Vec<_>>();
    Order {
        id,
        status: OrderStatus::Init,
        total_price: Price::checked_sum(line_items.iter().map(|item| item.price)).unwrap(),
        registered_at: timestamp(),
        line_items,
    }
}

pub fn saved_mail(history: NewMailSendHistory) -> MailSendHistory {
    MailSendHistory {
        id: 1,
        from_email: history.from_email,
        to_email: history.to_email,
        subject: history.subject,
        content: history.content,
        created_at: timestamp(),
    }
}
