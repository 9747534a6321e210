//! Helper functions shared by every layout and the views cloned from it.

use chrono::format::{Item, StrftimeItems};
use chrono::{Datelike, Utc};
use minijinja::{Environment, Error, ErrorKind};

const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

pub fn register(env: &mut Environment<'static>) {
    env.add_function("now", now);
    env.add_function("year", year);
    env.add_function("version", version);
}

/// Current UTC time, `strftime` formatted
fn now(format: Option<String>) -> Result<String, Error> {
    let format = format.unwrap_or_else(|| DEFAULT_DATE_FORMAT.to_string());
    let items: Vec<Item<'_>> = StrftimeItems::new(&format).collect();

    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(Error::new(
            ErrorKind::InvalidOperation,
            format!("invalid date format: {format}"),
        ));
    }

    Ok(Utc::now().format_with_items(items.iter()).to_string())
}

fn year() -> i32 {
    Utc::now().year()
}

fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
