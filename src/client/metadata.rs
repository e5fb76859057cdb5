//! Overview retrieval (XOVER)

use super::NntpClient;
use crate::commands::{self, MessageOverview};
use crate::error::Result;
use crate::response::{Expect, codes};
use tracing::{debug, warn};

/// Marker the server puts on status lines of compressed replies
const COMPRESS_MARKER: &str = "[COMPRESS=GZIP]";

impl NntpClient {
    /// Fetch overview records for articles `begin..=end` (XOVER, expects 224)
    ///
    /// After [`enable_compression`](Self::enable_compression) the block is
    /// inflated on the fly; the records are the same either way.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use nntp_session::NntpClient;
    /// # async fn example(client: &mut NntpClient) -> nntp_session::Result<()> {
    /// let group = client.group("comp.lang.rust").await?;
    /// for entry in client.overview(group.high.saturating_sub(50), group.high).await? {
    ///     println!("{}: {} ({} refs)", entry.number, entry.subject, entry.references.len());
    /// }
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// - [`NntpError::Server`](crate::NntpError::Server) - no group selected
    ///   (412) or empty range (423)
    /// - [`NntpError::Protocol`](crate::NntpError::Protocol) - short records,
    ///   bad numbers, or a truncated or corrupt block
    pub async fn overview(&mut self, begin: u64, end: u64) -> Result<Vec<MessageOverview>> {
        let (_, message) = self
            .command(
                &commands::xover(begin, end),
                Expect::Code(codes::OVERVIEW_INFO_FOLLOWS),
            )
            .await?;

        let lines = if self.compression_enabled {
            if !message.contains(COMPRESS_MARKER) {
                warn!("Compressed overview reply lacks {}: {}", COMPRESS_MARKER, message);
            }
            self.read_compressed_block().await?
        } else {
            self.read_block().await?
        };

        let entries = commands::parse_overview(&lines)?;
        debug!("Parsed {} overview records for {}-{}", entries.len(), begin, end);
        Ok(entries)
    }
}
