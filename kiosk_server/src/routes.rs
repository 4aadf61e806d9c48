//! Request handler definitions
//!
//! Define each route and it handler here.
//! Handlers that are more than a line or two MUST go into a separate module. Keep this module neat and tidy 🙏
//!
//! A note about performance:
//! Since each worker thread processes its requests sequentially, handlers which block the current thread will cause the
//! current worker to stop processing new requests. Every database call in the handlers below is async, so workers
//! stay free to serve other requests while an order is being placed.
use actix_web::{get, web, HttpResponse, Responder};
use chrono::Utc;
use kiosk_engine::{
    traits::{KioskDatabase, MailHistoryManagement},
    OrderApi,
    ProductApi,
};
use log::*;

use crate::{
    data_objects::{ApiResponse, OrderCreateParams, OrderResponse, ProductCreateRequest, ProductResponse},
    errors::ServerError,
    notifier::OrderNotifier,
};

// Web-actix cannot handle generics in handlers, so it's implemented manually using the `route!` macro
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+) => {
        paste::paste! { pub struct [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ >( $( core::marker::PhantomData<fn() -> [< T $bounds:camel> ] >,)+ );}
        paste::paste! { impl< $( [< T $bounds:camel> ],)+ > [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ > {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self($( core::marker::PhantomData::<fn() -> [< T $bounds:camel> ] >,)+)
            }
        }}
        paste::paste! { impl<$( [< T $bounds:camel >] , )+> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<$([<T $bounds:camel>],)+>
        where
            $([<T $bounds:camel>]: $bounds + 'static,)+
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::< $( [< T $bounds:camel >], )+>);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

//----------------------------------------------   Products  ----------------------------------------------------
route!(create_product => Post "/products/new" impl KioskDatabase);
/// Registers a new product. The catalog assigns the product number.
pub async fn create_product<B: KioskDatabase>(
    body: web::Json<ProductCreateRequest>,
    api: web::Data<ProductApi<B>>,
) -> Result<HttpResponse, ServerError> {
    trace!("💻️ Received new product request: {body:?}");
    let new_product = body.into_inner().into_new_product()?;
    let product = api.create_product(new_product).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(ProductResponse::from(product))))
}

route!(selling_products => Get "/products/selling" impl KioskDatabase);
pub async fn selling_products<B: KioskDatabase>(api: web::Data<ProductApi<B>>) -> Result<HttpResponse, ServerError> {
    trace!("💻️ Received selling products request");
    let products = api.selling_products().await?;
    let products = products.into_iter().map(ProductResponse::from).collect::<Vec<_>>();
    Ok(HttpResponse::Ok().json(ApiResponse::ok(products)))
}

//----------------------------------------------   Orders  ----------------------------------------------------
route!(create_order => Post "/orders/new" impl KioskDatabase, MailHistoryManagement);
/// Places an order, registered at the current server time. If a notification recipient is configured, a mail about
/// the order is sent once it is stored.
pub async fn create_order<B, M>(
    body: web::Json<OrderCreateParams>,
    api: web::Data<OrderApi<B>>,
    notifier: web::Data<OrderNotifier<M>>,
) -> Result<HttpResponse, ServerError>
where
    B: KioskDatabase,
    M: MailHistoryManagement,
{
    trace!("💻️ Received new order request: {body:?}");
    let request = body.into_inner().into_request()?;
    let order = api.create_order(request, Utc::now()).await?;
    notifier.order_placed(&order).await;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(OrderResponse::from(order))))
}

route!(order_by_id => Get "/orders/{id}" impl KioskDatabase);
pub async fn order_by_id<B: KioskDatabase>(
    path: web::Path<i64>,
    api: web::Data<OrderApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let id = path.into_inner();
    trace!("💻️ Received order request for #{id}");
    let order = api.order_by_id(id).await?.ok_or_else(|| ServerError::NoRecordFound(format!("Order #{id}")))?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(OrderResponse::from(order))))
}
