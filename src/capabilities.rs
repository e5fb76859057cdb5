//! NNTP capabilities list (RFC 3977 Section 5.2)
//!
//! The CAPABILITIES reply is kept exactly as the server sent it; the lookup
//! helpers read it case-insensitively.

/// Capability lines advertised by an NNTP server
///
/// ```
/// use nntp_session::Capabilities;
///
/// let caps = Capabilities::parse(&["VERSION 2".to_string(), "reader".to_string()]);
/// assert!(caps.has("READER"));
/// assert_eq!(caps.args("version"), Some(vec!["2"]));
/// assert_eq!(caps.lines(), ["VERSION 2", "reader"]);
/// ```
#[must_use]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Capabilities {
    lines: Vec<String>,
}

impl Capabilities {
    /// Create an empty Capabilities instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap the lines of a CAPABILITIES block
    pub fn parse(lines: &[String]) -> Self {
        Self {
            lines: lines.to_vec(),
        }
    }

    /// Raw lines in server order
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Consume into the raw lines
    #[must_use]
    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    /// Check if a capability is advertised
    #[must_use]
    pub fn has(&self, capability: &str) -> bool {
        self.find(capability).is_some()
    }

    /// Arguments following a capability label
    ///
    /// Returns None if the capability is not advertised
    #[must_use]
    pub fn args(&self, capability: &str) -> Option<Vec<&str>> {
        self.find(capability)
            .map(|line| line.split_whitespace().skip(1).collect())
    }

    /// Check if a capability carries a specific argument
    #[must_use]
    pub fn has_arg(&self, capability: &str, arg: &str) -> bool {
        self.args(capability)
            .is_some_and(|args| args.iter().any(|a| a.eq_ignore_ascii_case(arg)))
    }

    fn find(&self, capability: &str) -> Option<&str> {
        self.lines.iter().map(String::as_str).find(|line| {
            line.split_whitespace()
                .next()
                .is_some_and(|label| label.eq_ignore_ascii_case(capability))
        })
    }
}
