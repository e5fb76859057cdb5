//! NNTP client session
//!
//! One [`NntpClient`] owns one connection. Every method takes `&mut self`, so
//! at most one command is ever in flight and each reply (status line plus any
//! multiline block) is drained before the next command is written.

mod articles;
mod auth;
mod compression;
mod connection;
mod group_ops;
mod io;
mod listing;
mod metadata;
mod posting;

pub use connection::NntpIo;

use tokio::io::{AsyncWriteExt, BufReader};
use tracing::debug;

use crate::commands;
use crate::error::{NntpError, Result};
use crate::response::Expect;

/// Async NNTP reader session
///
/// # Example
///
/// ```no_run
/// use nntp_session::{NntpClient, ServerConfig};
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ServerConfig::tls("news.example.com").with_credentials("user", "pass");
/// let mut client = NntpClient::connect(Arc::new(config)).await?;
///
/// client.enable_compression().await?;
///
/// let group = client.group("alt.test").await?;
/// for entry in client.overview(group.low, group.high).await? {
///     println!("{} {}", entry.number, entry.subject);
/// }
/// client.quit().await?;
/// # Ok(())
/// # }
/// ```
#[must_use]
pub struct NntpClient {
    /// Connection (both reader and writer)
    stream: BufReader<Box<dyn NntpIo>>,
    /// Greeting text from the server, without the status code
    banner: String,
    /// Set once XFEATURE COMPRESS GZIP succeeded; never cleared
    compression_enabled: bool,
    /// Total compressed bytes received (only when compression enabled)
    bytes_compressed: u64,
    /// Total decompressed bytes (original size)
    bytes_decompressed: u64,
    /// Whether this connection is broken (I/O failure or desynchronized block)
    is_broken: bool,
    /// Set by QUIT
    closed: bool,
}

impl NntpClient {
    /// Greeting text captured when the session was created
    #[must_use]
    pub fn banner(&self) -> &str {
        &self.banner
    }

    /// Check if this connection is broken and should be discarded
    ///
    /// The session keeps accepting commands; whether to carry on after a
    /// failure is the caller's call.
    #[must_use]
    pub fn is_broken(&self) -> bool {
        self.is_broken
    }

    /// Check if QUIT has been sent on this session
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Mark this connection as broken
    fn mark_broken(&mut self) {
        self.is_broken = true;
    }

    /// Close the session (RFC 3977 Section 5.4)
    ///
    /// Any reply code is accepted. The write side is shut down afterwards and
    /// later commands fail with [`NntpError::ConnectionClosed`].
    pub async fn quit(&mut self) -> Result<()> {
        debug!("Closing NNTP connection");

        let result = self.command(commands::quit(), Expect::Any).await;
        self.closed = true;
        let (code, message) = result?;
        debug!("Server said goodbye: {} {}", code, message);

        if let Err(e) = self.stream.get_mut().shutdown().await {
            debug!("Shutdown after QUIT failed: {}", e);
        }
        Ok(())
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed {
            return Err(NntpError::ConnectionClosed);
        }
        Ok(())
    }
}

impl Drop for NntpClient {
    fn drop(&mut self) {
        debug!("NntpClient dropped");
    }
}
