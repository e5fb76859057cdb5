//! NNTP error types

use thiserror::Error;

/// NNTP session and transport errors
///
/// The two protocol-level kinds never overlap: [`NntpError::Server`] carries a
/// status line the server sent on purpose, [`NntpError::Protocol`] means the
/// bytes on the wire did not follow the expected grammar.
#[derive(Error, Debug)]
pub enum NntpError {
    /// IO error during network operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TLS error while establishing a secure connection
    #[error("TLS error: {0}")]
    Tls(String),

    /// Dialing the server took too long
    #[error("Connection timeout")]
    Timeout,

    /// Status code that did not satisfy the command's expectation
    #[error("NNTP error {code}: {message}")]
    Server {
        /// NNTP response code (e.g., 411, 423, 430)
        code: u16,
        /// Status text exactly as received
        message: String,
    },

    /// Malformed data despite a successful status (short lines, bad integers,
    /// broken headers, truncated blocks) or a command rejected before sending
    #[error("{0}")]
    Protocol(String),

    /// Connection closed by the peer, or the session already ended with QUIT
    #[error("Connection closed")]
    ConnectionClosed,
}

impl NntpError {
    /// Build a protocol error from anything printable
    pub(crate) fn protocol(msg: impl Into<String>) -> Self {
        NntpError::Protocol(msg.into())
    }

    /// Status code of a server-reported error
    #[must_use]
    pub fn code(&self) -> Option<u16> {
        match self {
            NntpError::Server { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// True when the server answered with an unexpected status
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(self, NntpError::Server { .. })
    }

    /// True when the server's data violated the wire grammar
    #[must_use]
    pub fn is_protocol_error(&self) -> bool {
        matches!(self, NntpError::Protocol(_))
    }
}

/// Result type alias using NntpError
pub type Result<T> = std::result::Result<T, NntpError>;
