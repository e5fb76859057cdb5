//! Article retrieval and navigation
//!
//! Every `id` argument is a message-id (`<a@b.c>`), an article number in the
//! selected group, or empty for the current article. Which article is current
//! lives on the server; nothing is cached here.

use super::NntpClient;
use crate::article::{self, Article};
use crate::commands::{self, ArticleInfo};
use crate::error::Result;
use crate::response::{Expect, codes};
use tracing::trace;

impl NntpClient {
    /// Fetch and parse a full article (ARTICLE, expects 220)
    ///
    /// # Errors
    ///
    /// - [`NntpError::Server`](crate::NntpError::Server) - no such article
    ///   (423/430) or no group selected (412)
    /// - [`NntpError::Protocol`](crate::NntpError::Protocol) - malformed headers
    pub async fn article(&mut self, id: &str) -> Result<Article> {
        let lines = self.article_lines(id).await?;
        article::parse_article(&lines)
    }

    /// Fetch an article as raw lines, dot-stuffing removed
    pub async fn article_lines(&mut self, id: &str) -> Result<Vec<String>> {
        trace!("Fetching article: {}", id);
        let response = self
            .multiline_command(&commands::article(id), Expect::Code(codes::ARTICLE_FOLLOWS))
            .await?;
        Ok(response.lines)
    }

    /// Fetch and parse article headers (HEAD, expects 221)
    ///
    /// The returned [`Article`] has an empty body.
    pub async fn head(&mut self, id: &str) -> Result<Article> {
        let lines = self.head_lines(id).await?;
        let (headers, _) = article::parse_headers(&lines)?;
        Ok(Article {
            headers,
            body: Vec::new(),
        })
    }

    /// Fetch article headers as raw lines
    pub async fn head_lines(&mut self, id: &str) -> Result<Vec<String>> {
        trace!("Fetching head: {}", id);
        let response = self
            .multiline_command(&commands::head(id), Expect::Code(codes::HEAD_FOLLOWS))
            .await?;
        Ok(response.lines)
    }

    /// Fetch an article body (BODY, expects 222)
    pub async fn body(&mut self, id: &str) -> Result<Vec<String>> {
        trace!("Fetching body: {}", id);
        let response = self
            .multiline_command(&commands::body(id), Expect::Code(codes::BODY_FOLLOWS))
            .await?;
        Ok(response.lines)
    }

    /// Check an article exists without transferring it (STAT, expects 223)
    ///
    /// With a number or an empty id this also moves the server's current
    /// article pointer.
    pub async fn stat(&mut self, id: &str) -> Result<ArticleInfo> {
        let (_, message) = self
            .command(&commands::stat(id), Expect::Code(codes::ARTICLE_STAT))
            .await?;
        commands::parse_article_info("STAT", &message)
    }

    /// Advance to the next article in the group (NEXT, expects 223)
    pub async fn next(&mut self) -> Result<ArticleInfo> {
        let (_, message) = self
            .command(commands::next(), Expect::Code(codes::ARTICLE_STAT))
            .await?;
        commands::parse_article_info("NEXT", &message)
    }

    /// Step back to the previous article in the group (LAST, expects 223)
    pub async fn last(&mut self) -> Result<ArticleInfo> {
        let (_, message) = self
            .command(commands::last(), Expect::Code(codes::ARTICLE_STAT))
            .await?;
        commands::parse_article_info("LAST", &message)
    }
}
