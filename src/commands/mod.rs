//! NNTP command builders and response parsers
//!
//! Builders return the bare command line; the dispatcher appends CRLF.

// Module declarations
pub mod article;
pub mod date;
pub mod group;
pub mod list;
pub mod over;
pub mod response;

pub use article::*;
pub use date::*;
pub use group::*;
pub use list::*;
pub use over::*;
pub use response::*;

/// Append `id` to `verb` when present
///
/// An empty id addresses the currently selected article, so the argument is
/// omitted entirely rather than sent as a trailing space.
pub fn maybe_id(verb: &str, id: &str) -> String {
    if id.is_empty() {
        verb.to_string()
    } else {
        format!("{} {}", verb, id)
    }
}

// Authentication and connection management commands

/// Build AUTHINFO USER command
pub fn authinfo_user(username: &str) -> String {
    format!("AUTHINFO USER {}", username)
}

/// Build AUTHINFO PASS command
pub fn authinfo_pass(password: &str) -> String {
    format!("AUTHINFO PASS {}", password)
}

/// Build XFEATURE COMPRESS GZIP command
///
/// After a 290 reply the server sends overview blocks as a zlib stream.
pub fn xfeature_compress_gzip() -> &'static str {
    "XFEATURE COMPRESS GZIP"
}

/// Build MODE READER command (RFC 3977 §5.3)
pub fn mode_reader() -> &'static str {
    "MODE READER"
}

/// Build QUIT command
pub fn quit() -> &'static str {
    "QUIT"
}

/// Build CAPABILITIES command (RFC 3977 §5.2)
///
/// Response is multi-line, starting with 101.
pub fn capabilities() -> &'static str {
    "CAPABILITIES"
}

/// Build HELP command (RFC 3977 §7.2)
///
/// Response is multi-line, starting with 100.
pub fn help() -> &'static str {
    "HELP"
}

/// Build DATE command (RFC 3977 §7.1)
///
/// Response: 111 yyyymmddhhmmss
pub fn date() -> &'static str {
    "DATE"
}

/// Build POST command (RFC 3977 §6.3.1)
pub fn post() -> &'static str {
    "POST"
}
