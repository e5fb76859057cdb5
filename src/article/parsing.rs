//! Folded header and article parsing
//!
//! Works on lines already taken out of a dot-terminated block, so the end of
//! the slice is a legitimate end of headers (HEAD replies carry no blank line).

use crate::error::{NntpError, Result};

use super::types::{Article, Headers};

/// Canonical form of a header key: each hyphen-separated token capitalized
///
/// `message-id` and `MESSAGE-ID` both become `Message-Id`. Keys holding
/// whitespace or a colon are not header tokens and come back unchanged.
pub fn canonical_header_key(key: &str) -> String {
    if key.chars().any(|c| c.is_whitespace() || c == ':') {
        return key.to_string();
    }

    let mut canonical = String::with_capacity(key.len());
    let mut upper = true;
    for c in key.chars() {
        if upper {
            canonical.push(c.to_ascii_uppercase());
        } else {
            canonical.push(c.to_ascii_lowercase());
        }
        upper = c == '-';
    }
    canonical
}

fn malformed(line: &str) -> NntpError {
    NntpError::protocol(format!("malformed header line: {}", line))
}

/// Parse headers from the start of `lines`
///
/// Stops at the first empty line or at the end of the slice. Lines starting
/// with a space or tab continue the previous value, joined by one space, even
/// when they hold nothing but whitespace.
/// Returns the headers and the number of lines consumed, the blank separator
/// included.
pub fn parse_headers(lines: &[String]) -> Result<(Headers, usize)> {
    let mut headers = Headers::new();
    let mut current: Option<(String, String)> = None;

    for (index, raw) in lines.iter().enumerate() {
        let line = raw.trim_end();

        if raw.starts_with([' ', '\t']) {
            let Some((_, value)) = current.as_mut() else {
                return Err(malformed(line));
            };
            let rest = line.trim_start_matches([' ', '\t']);
            if !rest.is_empty() {
                value.push(' ');
                value.push_str(rest);
            }
            continue;
        }

        if line.is_empty() {
            if let Some((key, value)) = current.take() {
                headers.append(&key, value);
            }
            return Ok((headers, index + 1));
        }

        if let Some((key, value)) = current.take() {
            headers.append(&key, value);
        }

        let Some((key, value)) = line.split_once(':') else {
            return Err(malformed(line));
        };
        if key.is_empty() || key.contains([' ', '\t']) {
            return Err(malformed(line));
        }

        current = Some((
            key.to_string(),
            value.trim_start_matches([' ', '\t']).to_string(),
        ));
    }

    if let Some((key, value)) = current.take() {
        headers.append(&key, value);
    }
    Ok((headers, lines.len()))
}

/// Split an ARTICLE block into headers and body
pub fn parse_article(lines: &[String]) -> Result<Article> {
    let (headers, consumed) = parse_headers(lines)?;
    Ok(Article {
        headers,
        body: lines[consumed..].to_vec(),
    })
}
