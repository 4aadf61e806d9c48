use actix_web::http::StatusCode;
use chrono::{DateTime, Utc};
use kiosk_engine::{
    db_types::{NewProduct, Order, OrderLineItem, OrderStatus, Price, Product, ProductType, SellingStatus, MAX_PRICE},
    order_objects::OrderCreateRequest,
};
use serde::{Deserialize, Serialize};

use crate::errors::ServerError;

//--------------------------------------      ApiResponse      ---------------------------------------------------------
/// The envelope for every response body. `data` is left out entirely when there is none, as in error responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiResponse<T> {
    pub code: u16,
    /// The name of the HTTP status, e.g. `OK` or `BAD_REQUEST`
    pub status: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn of(status: StatusCode, data: T) -> Self {
        let name = status_name(status);
        Self { code: status.as_u16(), status: name.clone(), message: name, data: Some(data) }
    }

    pub fn ok(data: T) -> Self {
        Self::of(StatusCode::OK, data)
    }

    pub fn error<S: Into<String>>(status: StatusCode, message: S) -> Self {
        Self { code: status.as_u16(), status: status_name(status), message: message.into(), data: None }
    }
}

fn status_name(status: StatusCode) -> String {
    status.canonical_reason().unwrap_or("UNKNOWN").to_uppercase().replace([' ', '-'], "_")
}

//--------------------------------------   Product requests    ---------------------------------------------------------
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreateRequest {
    #[serde(rename = "type")]
    pub product_type: ProductType,
    pub selling_status: SellingStatus,
    #[serde(default)]
    pub name: String,
    pub price: i64,
}

impl ProductCreateRequest {
    pub fn into_new_product(self) -> Result<NewProduct, ServerError> {
        if self.name.trim().is_empty() {
            return Err(ServerError::ValidationError("상품 이름은 필수입니다.".into()));
        }
        if self.price <= 0 {
            return Err(ServerError::ValidationError("상품 가격은 양수여야 합니다.".into()));
        }
        if self.price > MAX_PRICE {
            return Err(ServerError::ValidationError(format!("상품 가격은 {MAX_PRICE}원 이하여야 합니다.")));
        }
        let price = Price::try_from(self.price).map_err(|e| ServerError::ValidationError(e.to_string()))?;
        Ok(NewProduct::new(self.product_type, self.name.trim(), price).with_selling_status(self.selling_status))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: i64,
    pub product_number: String,
    #[serde(rename = "type")]
    pub product_type: ProductType,
    pub selling_status: SellingStatus,
    pub name: String,
    pub price: Price,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            product_number: product.product_number.0,
            product_type: product.product_type,
            selling_status: product.selling_status,
            name: product.name,
            price: product.price,
        }
    }
}

//--------------------------------------    Order requests     ---------------------------------------------------------
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreateParams {
    #[serde(default)]
    pub product_numbers: Vec<String>,
}

impl OrderCreateParams {
    pub fn into_request(self) -> Result<OrderCreateRequest, ServerError> {
        if self.product_numbers.is_empty() {
            return Err(ServerError::ValidationError("상품 번호 리스트는 필수입니다.".into()));
        }
        Ok(OrderCreateRequest::new(self.product_numbers))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineItemResponse {
    pub product_number: String,
    pub price: Price,
}

impl From<OrderLineItem> for OrderLineItemResponse {
    fn from(item: OrderLineItem) -> Self {
        Self { product_number: item.product_number.0, price: item.price }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: i64,
    pub status: OrderStatus,
    pub total_price: Price,
    pub registered_at: DateTime<Utc>,
    pub line_items: Vec<OrderLineItemResponse>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            status: order.status,
            total_price: order.total_price,
            registered_at: order.registered_at,
            line_items: order.line_items.into_iter().map(OrderLineItemResponse::from).collect(),
        }
    }
}
