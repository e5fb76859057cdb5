//! Article retrieval and navigation commands

use super::maybe_id;
use crate::error::{NntpError, Result};

/// Build ARTICLE command; an empty id fetches the current article
pub fn article(id: &str) -> String {
    maybe_id("ARTICLE", id)
}

/// Build HEAD command; an empty id fetches the current article
pub fn head(id: &str) -> String {
    maybe_id("HEAD", id)
}

/// Build BODY command; an empty id fetches the current article
pub fn body(id: &str) -> String {
    maybe_id("BODY", id)
}

/// Build STAT command (RFC 3977 §6.2.4)
///
/// Can be used with article number, message-id, or nothing (current article).
pub fn stat(id: &str) -> String {
    maybe_id("STAT", id)
}

/// Build NEXT command (RFC 3977 §6.1.4)
pub fn next() -> &'static str {
    "NEXT"
}

/// Build LAST command (RFC 3977 §6.1.3)
pub fn last() -> &'static str {
    "LAST"
}

/// Article information returned by STAT, NEXT, and LAST commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleInfo {
    /// Article number (0 when the article is not in the selected group)
    pub number: u64,
    /// Message identifier (e.g., "<abc@example.com>")
    pub message_id: String,
}

/// Parse the message of a 223 reply: `"n message-id [comment]"`
///
/// `verb` only names the command in the error text.
pub fn parse_article_info(verb: &str, message: &str) -> Result<ArticleInfo> {
    let mut parts = message.splitn(3, ' ');
    let (Some(number), Some(message_id)) = (parts.next(), parts.next()) else {
        return Err(NntpError::protocol(format!(
            "bad response to {}: {}",
            verb, message
        )));
    };

    let number = number.parse().map_err(|_| {
        NntpError::protocol(format!(
            "bad article number '{}' in response to {}: {}",
            number, verb, message
        ))
    })?;

    Ok(ArticleInfo {
        number,
        message_id: message_id.to_string(),
    })
}
