//! Server information and group listings
//!
//! CAPABILITIES, HELP, DATE, LIST, NEWGROUPS and NEWNEWS.

use chrono::{DateTime, Utc};
use tracing::debug;

use super::NntpClient;
use crate::capabilities::Capabilities;
use crate::commands::{self, Group};
use crate::error::Result;
use crate::response::{Expect, codes};

impl NntpClient {
    /// Query server capabilities (RFC 3977 Section 5.2, expects 101)
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use nntp_session::NntpClient;
    /// # async fn example(client: &mut NntpClient) -> nntp_session::Result<()> {
    /// let caps = client.capabilities().await?;
    /// if caps.has("XFEATURE-COMPRESS") {
    ///     client.enable_compression().await?;
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn capabilities(&mut self) -> Result<Capabilities> {
        let response = self
            .multiline_command(commands::capabilities(), Expect::Code(codes::CAPABILITY_LIST))
            .await?;
        Ok(Capabilities::parse(&response.lines))
    }

    /// Fetch the server's help text (HELP, expects 100)
    pub async fn help(&mut self) -> Result<Vec<String>> {
        let response = self
            .multiline_command(commands::help(), Expect::Code(codes::HELP_TEXT_FOLLOWS))
            .await?;
        Ok(response.lines)
    }

    /// Query the server clock (DATE, expects 111)
    ///
    /// # Errors
    ///
    /// - [`NntpError::Protocol`](crate::NntpError::Protocol) - reply is not a
    ///   `YYYYMMDDhhmmss` timestamp
    pub async fn date(&mut self) -> Result<DateTime<Utc>> {
        let (_, message) = self
            .command(commands::date(), Expect::Code(codes::SERVER_DATE))
            .await?;
        commands::parse_server_date(&message)
    }

    /// List information about the server (LIST, expects 215)
    ///
    /// `keyword` picks the list (`ACTIVE`, `NEWSGROUPS`, `OVERVIEW.FMT`, ...)
    /// and `pattern` narrows it with a wildmat. Lines come back unparsed.
    ///
    /// # Errors
    ///
    /// - [`NntpError::Protocol`](crate::NntpError::Protocol) - a pattern was
    ///   given without a keyword; nothing is sent
    pub async fn list(
        &mut self,
        keyword: Option<&str>,
        pattern: Option<&str>,
    ) -> Result<Vec<String>> {
        let line = commands::list(keyword, pattern)?;
        let response = self
            .multiline_command(&line, Expect::Code(codes::LIST_INFORMATION_FOLLOWS))
            .await?;
        Ok(response.lines)
    }

    /// List active newsgroups (LIST ACTIVE, expects 215)
    ///
    /// Each line reads `name high low status`; `count` is left at zero.
    pub async fn list_active(&mut self, pattern: Option<&str>) -> Result<Vec<Group>> {
        let response = self
            .multiline_command(
                &commands::list_active(pattern),
                Expect::Code(codes::LIST_INFORMATION_FOLLOWS),
            )
            .await?;
        let groups = commands::parse_active_lines(&response.lines)?;
        debug!("Retrieved {} active groups", groups.len());
        Ok(groups)
    }

    /// List newsgroups created since `since` (NEWGROUPS, expects 231)
    ///
    /// The time is sent in UTC with the `GMT` marker.
    pub async fn new_groups(&mut self, since: &DateTime<Utc>) -> Result<Vec<Group>> {
        debug!("Requesting newsgroups created since {}", since);
        let response = self
            .multiline_command(
                &commands::newgroups(since),
                Expect::Code(codes::NEW_NEWSGROUPS_FOLLOW),
            )
            .await?;
        let groups = commands::parse_active_lines(&response.lines)?;
        debug!("Retrieved {} new newsgroups", groups.len());
        Ok(groups)
    }

    /// Message-IDs posted to `group` since `since` (NEWNEWS, expects 230)
    ///
    /// `group` may be a wildmat. The IDs come back sorted with duplicates
    /// removed.
    pub async fn new_news(&mut self, group: &str, since: &DateTime<Utc>) -> Result<Vec<String>> {
        debug!("Requesting articles since {} in {}", since, group);
        let response = self
            .multiline_command(
                &commands::newnews(group, since),
                Expect::Code(codes::NEW_ARTICLE_LIST_FOLLOWS),
            )
            .await?;

        let mut message_ids = response.lines;
        message_ids.sort();
        message_ids.dedup();
        debug!("Retrieved {} message-IDs", message_ids.len());
        Ok(message_ids)
    }
}
