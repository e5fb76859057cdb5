//! Status line parsing

use crate::error::{NntpError, Result};

/// Parse an NNTP status line into code and message
///
/// Accepts `"<3 digits> <message>"`. The message may be empty, and a missing
/// separator space is tolerated (`"200message"`); a fourth digit is not.
pub fn parse_response_line(line: &str) -> Result<(u16, String)> {
    // Strip UTF-8 BOM if present (some broken servers/proxies add it)
    let line = line.trim_start_matches('\u{FEFF}');

    let bytes = line.as_bytes();
    if bytes.len() < 3 || !bytes[..3].iter().all(u8::is_ascii_digit) {
        return Err(malformed_status(line));
    }

    // "99999 message" must not be read as code 999
    if bytes.len() > 3 && bytes[3].is_ascii_digit() {
        return Err(malformed_status(line));
    }

    let code = line[0..3].parse::<u16>().map_err(|_| malformed_status(line))?;

    let message = match bytes.get(3) {
        Some(b' ') => line[4..].to_string(),
        Some(_) => line[3..].to_string(),
        None => String::new(),
    };

    Ok((code, message))
}

fn malformed_status(line: &str) -> NntpError {
    NntpError::protocol(format!(
        "malformed status line: {}",
        line.chars().take(100).collect::<String>()
    ))
}
