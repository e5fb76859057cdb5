//! Article posting (POST)

use tokio::io::AsyncBufRead;
use tracing::debug;

use super::NntpClient;
use super::io::write_dot_block;
use crate::commands;
use crate::error::Result;
use crate::response::{Expect, codes};

impl NntpClient {
    /// Post an article read from `article` (RFC 3977 Section 6.3.1)
    ///
    /// # Two-Phase Protocol
    ///
    /// 1. Client sends POST; any 3xx (normally 340) means go ahead
    /// 2. Client sends the article as a dot-stuffed block: line endings become
    ///    CRLF, a final unterminated line is sent as is, `.` ends the block
    /// 3. Server answers 240 when the article was accepted
    ///
    /// `article` holds headers, a blank line, and the body, exactly as the
    /// article should appear; it is not validated.
    ///
    /// # Errors
    ///
    /// - [`NntpError::Server`](crate::NntpError::Server) - posting not
    ///   permitted (440) or the article was rejected (441)
    /// - [`NntpError::Io`](crate::NntpError::Io) - reading `article` or
    ///   writing the block failed; the session is then marked broken
    pub async fn post<R>(&mut self, mut article: R) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        debug!("Posting article");
        let (code, _) = self.command(commands::post(), Expect::Class(3)).await?;
        if code != codes::SEND_ARTICLE {
            debug!("POST continued with {} instead of {}", code, codes::SEND_ARTICLE);
        }

        let sent = write_dot_block(&mut article, self.stream.get_mut()).await;
        let lines = match sent {
            Ok(lines) => lines,
            Err(e) => {
                self.mark_broken();
                return Err(e);
            }
        };

        let (_, message) = self.read_status(Expect::Code(codes::ARTICLE_POSTED)).await?;
        debug!("Posted {} lines: {}", lines, message);
        Ok(())
    }

    /// Post an article held in memory
    ///
    /// ```no_run
    /// # use nntp_session::NntpClient;
    /// # async fn example(client: &mut NntpClient) -> nntp_session::Result<()> {
    /// client
    ///     .post_text("From: me@example.com\nNewsgroups: misc.test\nSubject: hi\n\nHello.\n")
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn post_text(&mut self, article: &str) -> Result<()> {
        self.post(article.as_bytes()).await
    }
}
