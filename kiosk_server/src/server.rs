use std::time::Duration;

use actix_web::{dev::Server, error::JsonPayloadError, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use kiosk_engine::{traits::LogMailSendClient, OrderApi, ProductApi, SqliteDatabase};
use log::*;

use crate::{
    config::ServerConfig,
    errors::ServerError,
    notifier::OrderNotifier,
    routes::{health, CreateOrderRoute, CreateProductRoute, OrderByIdRoute, SellingProductsRoute},
};

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let db = SqliteDatabase::new_with_url(&config.database_url, config.max_db_connections)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    info!("🗃️ Connected to database at {}", db.url());
    db.run_migrations().await.map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let srv = create_server_instance(config, db)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

pub fn create_server_instance(config: ServerConfig, db: SqliteDatabase) -> Result<Server, ServerError> {
    let retry_policy = config.retry_policy();
    let mail_config = config.mail.clone();
    let opening_hours = config.opening_hours;
    info!("💻️ Writes are retried up to {} times on conflict", retry_policy.max_retries);
    match &opening_hours {
        Some(hours) => info!("💻️ Taking orders within {hours}"),
        None => info!("💻️ Taking orders at any time"),
    }
    let srv = HttpServer::new(move || {
        let product_api = ProductApi::new(db.clone()).with_retry_policy(retry_policy);
        let order_api = OrderApi::new(db.clone()).with_retry_policy(retry_policy);
        let order_api = match opening_hours {
            Some(hours) => order_api.with_opening_hours(hours),
            None => order_api,
        };
        let notifier = OrderNotifier::new(LogMailSendClient, db.clone(), mail_config.clone());
        let api_scope = web::scope("/api/v1")
            .service(CreateProductRoute::<SqliteDatabase>::new())
            .service(SellingProductsRoute::<SqliteDatabase>::new())
            .service(CreateOrderRoute::<SqliteDatabase, SqliteDatabase>::new())
            .service(OrderByIdRoute::<SqliteDatabase>::new());
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("kiosk::access_log"))
            .app_data(json_config())
            .app_data(web::Data::new(product_api))
            .app_data(web::Data::new(order_api))
            .app_data(web::Data::new(notifier))
            .service(health)
            .service(api_scope)
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    Ok(srv)
}

/// Malformed JSON bodies get the same response envelope as every other error.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, _req| {
        debug!("💻️ Rejected request body. {err}");
        ServerError::InvalidRequestBody(err.to_string()).into()
    })
}
