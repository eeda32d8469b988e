//! Database module - SQLite with sqlx

mod films;
mod halls;
mod pool;
mod prices;
mod seances;
mod seats;
mod tickets;
mod tokens;
mod users;

pub use films::*;
pub use halls::*;
pub use pool::*;
pub use prices::*;
pub use seances::*;
pub use seats::*;
pub use tickets::*;
pub use tokens::*;
pub use users::*;

use chrono::{DateTime, NaiveDateTime, Utc};

/// Parse a stored timestamp, accepting both RFC 3339 (our inserts) and
/// SQLite's `datetime('now')` format (column defaults).
pub(crate) fn parse_timestamp(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").map(|naive| naive.and_utc())
        })
        .unwrap_or_else(|_| Utc::now())
}
