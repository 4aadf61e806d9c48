//! The server is configured entirely through the environment. Any command-line argument prints the help text and
//! the settings the server would start with.

use std::{env, fmt::Write};

const HELP: &str = include_str!("./cli-help.txt");

/// Every setting the server reads, with what it falls back to when unset.
const SETTINGS: [(&str, &str); 10] = [
    ("RUST_LOG", "error"),
    ("KIOSK_HOST", "127.0.0.1"),
    ("KIOSK_PORT", "8080"),
    ("KIOSK_DATABASE_URL", "sqlite://data/kiosk_store.db?mode=rwc"),
    ("KIOSK_MAX_DB_CONNECTIONS", "25"),
    ("KIOSK_ORDER_RETRY_LIMIT", "5"),
    ("KIOSK_OPENING_HOURS", "orders at any time"),
    ("KIOSK_UTC_OFFSET_HOURS", "9"),
    ("KIOSK_MAIL_FROM", "kiosk@cafekiosk.local"),
    ("KIOSK_MAIL_TO", "notifications disabled"),
];

/// Returns true if the help was printed, in which case the server should not start.
pub fn handle_command_line_args() -> bool {
    let has_cli_args = env::args().nth(1).is_some();
    if has_cli_args {
        println!("{}", usage(|name| env::var(name).ok()));
    }
    has_cli_args
}

fn usage<F>(lookup: F) -> String
where F: Fn(&str) -> Option<String> {
    let mut text = format!("\n{HELP}\nSettings in effect:\n");
    for (name, default) in SETTINGS {
        let value = lookup(name).unwrap_or_else(|| format!("(unset, {default})"));
        let _ = writeln!(text, "  {name:<26}{value}");
    }
    text
}
