//! Newsgroup selection (GROUP)

use super::NntpClient;
use crate::commands::{self, Group};
use crate::error::Result;
use crate::response::{Expect, codes};
use tracing::debug;

impl NntpClient {
    /// Select a newsgroup (GROUP, expects 211)
    ///
    /// The returned [`Group`] is a snapshot of the reply; the session keeps no
    /// record of which group is selected.
    ///
    /// # Errors
    ///
    /// - [`NntpError::Server`](crate::NntpError::Server) - no such group (411)
    /// - [`NntpError::Protocol`](crate::NntpError::Protocol) - short or
    ///   non-numeric reply fields
    pub async fn group(&mut self, newsgroup: &str) -> Result<Group> {
        debug!("Selecting newsgroup: {}", newsgroup);

        let (_, message) = self
            .command(&commands::group(newsgroup), Expect::Code(codes::GROUP_SELECTED))
            .await?;
        let group = commands::parse_group_line(&message)?;

        debug!(
            "Group {} selected: {} articles ({}-{})",
            group.name, group.count, group.low, group.high
        );
        Ok(group)
    }
}
