//! LIST command variants

use crate::error::{NntpError, Result};

/// Build LIST command (RFC 3977 §7.6.1)
///
/// `keyword` selects the list (ACTIVE, NEWSGROUPS, OVERVIEW.FMT, ...) and
/// `pattern` filters it with a wildmat. A pattern needs a keyword to sit
/// behind, so that combination is rejected here, before anything is sent.
pub fn list(keyword: Option<&str>, pattern: Option<&str>) -> Result<String> {
    match (keyword, pattern) {
        (None, None) => Ok("LIST".to_string()),
        (Some(keyword), None) => Ok(format!("LIST {}", keyword)),
        (Some(keyword), Some(pattern)) => Ok(format!("LIST {} {}", keyword, pattern)),
        (None, Some(pattern)) => Err(NntpError::protocol(format!(
            "LIST pattern '{}' given without a keyword",
            pattern
        ))),
    }
}

/// Build LIST ACTIVE command (RFC 3977 §7.6.3)
pub fn list_active(wildmat: Option<&str>) -> String {
    match wildmat {
        Some(wildmat) => format!("LIST ACTIVE {}", wildmat),
        None => "LIST ACTIVE".to_string(),
    }
}
