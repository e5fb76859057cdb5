//! Date formats used on the wire
//!
//! Two narrow formats, never a general date parser:
//! - DATE replies carry `yyyymmddhhmmss` in UTC
//! - overview records carry an RFC 822 date with a numeric zone offset
//!
//! NEWGROUPS and NEWNEWS take `yyyymmdd hhmmss GMT`.

use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};

use crate::error::{NntpError, Result};

/// Layout of the DATE reply
const SERVER_DATE_FORMAT: &str = "%Y%m%d%H%M%S";

/// Layout of the NEWGROUPS / NEWNEWS time argument (without the GMT token)
const SINCE_FORMAT: &str = "%Y%m%d %H%M%S";

/// Overview date layouts: with and without the leading day name
const OVERVIEW_DATE_FORMATS: [&str; 2] = ["%a, %d %b %Y %H:%M:%S %z", "%d %b %Y %H:%M:%S %z"];

/// Parse the message of a 111 reply
pub fn parse_server_date(message: &str) -> Result<DateTime<Utc>> {
    let token = message.split_whitespace().next().unwrap_or("");
    NaiveDateTime::parse_from_str(token, SERVER_DATE_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|_| NntpError::protocol(format!("invalid time: {}", message)))
}

/// Parse the date field of an overview record
///
/// Returns `None` when the field matches neither layout; the enclosing record
/// is still valid.
pub fn parse_overview_date(field: &str) -> Option<DateTime<FixedOffset>> {
    let field = field.trim();
    OVERVIEW_DATE_FORMATS
        .iter()
        .find_map(|layout| DateTime::parse_from_str(field, layout).ok())
}

/// Render the `since` argument of NEWGROUPS / NEWNEWS
pub fn format_since(since: &DateTime<Utc>) -> String {
    format!("{} GMT", since.format(SINCE_FORMAT))
}
