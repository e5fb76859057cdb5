//! Group selection and newsgroup listing commands

use chrono::{DateTime, Utc};

use super::date::format_since;
use crate::error::{NntpError, Result};

/// Build GROUP command
pub fn group(newsgroup: &str) -> String {
    format!("GROUP {}", newsgroup)
}

/// Build NEWGROUPS command (RFC 3977 §7.3)
///
/// Format: `NEWGROUPS yyyymmdd hhmmss GMT`
pub fn newgroups(since: &DateTime<Utc>) -> String {
    format!("NEWGROUPS {}", format_since(since))
}

/// Build NEWNEWS command (RFC 3977 §7.4)
///
/// Format: `NEWNEWS wildmat yyyymmdd hhmmss GMT`
pub fn newnews(newsgroup: &str, since: &DateTime<Utc>) -> String {
    format!("NEWNEWS {} {}", newsgroup, format_since(since))
}

/// A snapshot of one newsgroup
///
/// Built from a GROUP reply (`count` set, `status` empty) or from a
/// NEWGROUPS / LIST ACTIVE line (`count` zero, `status` set). No ordering
/// between `low` and `high` is enforced; servers report empty groups with
/// `high < low`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Group {
    /// Newsgroup name
    pub name: String,
    /// Lowest article number
    pub low: u64,
    /// Highest article number
    pub high: u64,
    /// Estimated number of articles (may disagree with `high - low + 1`)
    pub count: u64,
    /// Raw posting status token: usually "y", "n" or "m"
    pub status: String,
}

impl Group {
    /// Posting allowed according to the status token
    pub fn posting_allowed(&self) -> bool {
        self.status == "y"
    }

    /// Moderated according to the status token
    pub fn is_moderated(&self) -> bool {
        self.status == "m"
    }
}

fn parse_number(field: &str, what: &str, line: &str) -> Result<u64> {
    field
        .parse()
        .map_err(|_| NntpError::protocol(format!("bad {} '{}' in line: {}", what, field, line)))
}

/// Parse the message of a 211 GROUP reply: `"count low high name"`
///
/// Group names never contain whitespace, so the name is the fourth field.
/// Anything after it is free-form server text and is ignored.
pub fn parse_group_line(line: &str) -> Result<Group> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < 4 {
        return Err(NntpError::protocol(format!("short group info line: {}", line)));
    }

    let count = parse_number(parts[0], "count", line)?;
    let low = parse_number(parts[1], "low article number", line)?;
    let high = parse_number(parts[2], "high article number", line)?;

    Ok(Group {
        name: parts[3].to_string(),
        low,
        high,
        count,
        status: String::new(),
    })
}

/// Parse one NEWGROUPS / LIST ACTIVE line: `"name high low status"`
///
/// The high water mark comes before the low one here, the reverse of the
/// GROUP reply.
pub fn parse_active_line(line: &str) -> Result<Group> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < 4 {
        return Err(NntpError::protocol(format!("short group info line: {}", line)));
    }

    let high = parse_number(parts[1], "high article number", line)?;
    let low = parse_number(parts[2], "low article number", line)?;

    Ok(Group {
        name: parts[0].to_string(),
        low,
        high,
        count: 0,
        // Status can be multi-character (e.g., "=group.name" alias)
        status: parts[3].to_string(),
    })
}

/// Parse every line of a NEWGROUPS or LIST ACTIVE block
pub fn parse_active_lines(lines: &[String]) -> Result<Vec<Group>> {
    lines.iter().map(|line| parse_active_line(line)).collect()
}
