//! Server configuration, read from `KIOSK_*` environment variables.
//!
//! Missing variables fall back to their defaults. Variables that are set, but cannot be parsed, are reported in the
//! error log and also fall back to their defaults.
use std::{env, fmt::Display, str::FromStr, time::Duration};

use chrono::{FixedOffset, NaiveTime};
use kiosk_engine::{db::db_url, order_objects::OpeningHours, RetryPolicy};
use log::*;

const DEFAULT_KIOSK_HOST: &str = "127.0.0.1";
const DEFAULT_KIOSK_PORT: u16 = 8080;
const DEFAULT_MAX_DB_CONNECTIONS: u32 = 25;
const DEFAULT_ORDER_RETRY_LIMIT: u32 = 5;
const DEFAULT_MAIL_FROM: &str = "kiosk@cafekiosk.local";
const DEFAULT_UTC_OFFSET_HOURS: i32 = 9;
const RETRY_BACKOFF: Duration = Duration::from_millis(25);

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub max_db_connections: u32,
    /// How many times a write that collides with a concurrent one is retried before giving up.
    pub order_retry_limit: u32,
    /// Orders registered outside these hours are refused. When `None`, orders are taken around the clock.
    pub opening_hours: Option<OpeningHours>,
    pub mail: MailConfig,
}

#[derive(Clone, Debug)]
pub struct MailConfig {
    pub from: String,
    /// The recipient for order notifications. When `None`, no notifications are sent.
    pub to: Option<String>,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self { from: DEFAULT_MAIL_FROM.to_string(), to: None }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_KIOSK_HOST.to_string(),
            port: DEFAULT_KIOSK_PORT,
            database_url: String::default(),
            max_db_connections: DEFAULT_MAX_DB_CONNECTIONS,
            order_retry_limit: DEFAULT_ORDER_RETRY_LIMIT,
            opening_hours: None,
            mail: MailConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("KIOSK_HOST").ok().unwrap_or_else(|| DEFAULT_KIOSK_HOST.into());
        let port = parse_or_default("KIOSK_PORT", env::var("KIOSK_PORT").ok(), DEFAULT_KIOSK_PORT);
        let database_url = db_url();
        let max_db_connections = parse_or_default(
            "KIOSK_MAX_DB_CONNECTIONS",
            env::var("KIOSK_MAX_DB_CONNECTIONS").ok(),
            DEFAULT_MAX_DB_CONNECTIONS,
        );
        let order_retry_limit = parse_or_default(
            "KIOSK_ORDER_RETRY_LIMIT",
            env::var("KIOSK_ORDER_RETRY_LIMIT").ok(),
            DEFAULT_ORDER_RETRY_LIMIT,
        );
        let utc_offset_hours = parse_or_default(
            "KIOSK_UTC_OFFSET_HOURS",
            env::var("KIOSK_UTC_OFFSET_HOURS").ok(),
            DEFAULT_UTC_OFFSET_HOURS,
        );
        let opening_hours = match env::var("KIOSK_OPENING_HOURS") {
            Ok(window) => match parse_opening_hours(&window, utc_offset_hours) {
                Ok(hours) => Some(hours),
                Err(e) => {
                    error!("🪛️ {window} is not a valid value for KIOSK_OPENING_HOURS. {e} Taking orders at any time.");
                    None
                },
            },
            Err(_) => None,
        };
        let from = env::var("KIOSK_MAIL_FROM").ok().unwrap_or_else(|| DEFAULT_MAIL_FROM.into());
        let to = env::var("KIOSK_MAIL_TO").ok().filter(|s| !s.trim().is_empty());
        if to.is_none() {
            info!("🪛️ KIOSK_MAIL_TO is not set. Order notifications are disabled.");
        }
        Self {
            host,
            port,
            database_url,
            max_db_connections,
            order_retry_limit,
            opening_hours,
            mail: MailConfig { from, to },
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.order_retry_limit, RETRY_BACKOFF)
    }
}

/// Parses an opening window such as `10:00-22:00`, in local time at `utc_offset_hours` from UTC.
fn parse_opening_hours(window: &str, utc_offset_hours: i32) -> Result<OpeningHours, String> {
    let (open, close) = window.split_once('-').ok_or("Expected a window like 10:00-22:00.")?;
    let parse_time = |s: &str| NaiveTime::parse_from_str(s.trim(), "%H:%M").map_err(|e| format!("{s}: {e}."));
    let (open, close) = (parse_time(open)?, parse_time(close)?);
    if open > close {
        return Err("The kiosk must open before it closes.".into());
    }
    let offset = FixedOffset::east_opt(utc_offset_hours * 3600)
        .ok_or_else(|| format!("{utc_offset_hours} hours is not a valid UTC offset."))?;
    Ok(OpeningHours::new(open, close, offset))
}

fn parse_or_default<T>(name: &str, value: Option<String>, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match value {
        Some(s) => s.trim().parse::<T>().unwrap_or_else(|e| {
            error!("🪛️ {s} is not a valid value for {name}. {e} Using the default, {default}, instead.");
            default
        }),
        None => default,
    }
}
