//! XOVER command and overview data parsing

use chrono::{DateTime, FixedOffset};
use tracing::warn;

use super::date::parse_overview_date;
use crate::error::{NntpError, Result};

/// Minimum number of tab-separated fields in an overview line
const OVERVIEW_FIELDS: usize = 8;

/// Build XOVER command for an inclusive article number range
pub fn xover(begin: u64, end: u64) -> String {
    format!("XOVER {}-{}", begin, end)
}

/// Summary of one article as returned by XOVER
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageOverview {
    /// Article number within the newsgroup
    pub number: u64,
    /// Subject header value, empty if missing
    pub subject: String,
    /// From header value, empty if missing
    pub from: String,
    /// Parsed Date header, `None` if missing or unparseable
    pub date: Option<DateTime<FixedOffset>>,
    /// Message-ID header value
    pub message_id: String,
    /// Message-IDs from the References header, in order
    pub references: Vec<String>,
    /// Article size in bytes (`:bytes`)
    pub bytes: u64,
    /// Article size in lines (`:lines`)
    pub lines: u64,
    /// Any further fields the server appended (Xref and friends)
    pub extra: Vec<String>,
}

/// Parse one overview line
///
/// Format: `number\tsubject\tfrom\tdate\tmessage-id\treferences\tbytes\tlines[\textra...]`
pub fn parse_overview_line(line: &str) -> Result<MessageOverview> {
    let fields: Vec<&str> = line.trim().split('\t').collect();
    if fields.len() < OVERVIEW_FIELDS {
        return Err(NntpError::protocol(format!(
            "short overview line ({} of {} fields): {}",
            fields.len(),
            OVERVIEW_FIELDS,
            line
        )));
    }

    let number = parse_count(fields[0], "message number", line)?;

    let date = parse_overview_date(fields[3]);
    if date.is_none() && !fields[3].is_empty() {
        warn!("Unparseable overview date '{}' for article {}", fields[3], number);
    }

    // Message-IDs never contain spaces, so splitting on them is safe
    let references = fields[5]
        .split(' ')
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect();

    Ok(MessageOverview {
        number,
        subject: fields[1].to_string(),
        from: fields[2].to_string(),
        date,
        message_id: fields[4].to_string(),
        references,
        bytes: parse_count(fields[6], "byte count", line)?,
        lines: parse_count(fields[7], "line count", line)?,
        extra: fields[OVERVIEW_FIELDS..]
            .iter()
            .map(|field| field.to_string())
            .collect(),
    })
}

/// Parse an overview block
///
/// A blank line ends the data early; the records before it are returned.
pub fn parse_overview(lines: &[String]) -> Result<Vec<MessageOverview>> {
    let mut entries = Vec::with_capacity(lines.len());
    for line in lines {
        if line.trim().is_empty() {
            break;
        }
        entries.push(parse_overview_line(line)?);
    }
    Ok(entries)
}

fn parse_count(field: &str, what: &str, line: &str) -> Result<u64> {
    field
        .parse()
        .map_err(|_| NntpError::protocol(format!("bad {} '{}' in line: {}", what, field, line)))
}
