//! AUTHINFO USER/PASS and MODE READER

use super::NntpClient;
use crate::commands;
use crate::error::{NntpError, Result};
use crate::response::{Expect, codes};
use tracing::debug;

impl NntpClient {
    /// Authenticate with username and password (RFC 4643 AUTHINFO USER/PASS)
    ///
    /// AUTHINFO USER is sent first. A 281 reply ends the exchange right
    /// there; a 3xx reply asks for the password, which must then earn 281.
    /// [`connect`](Self::connect) calls this itself when the configuration
    /// carries credentials.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use nntp_session::{NntpClient, ServerConfig};
    /// # use std::sync::Arc;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = ServerConfig::tls("news.example.com");
    /// let mut client = NntpClient::connect(Arc::new(config)).await?;
    /// client.authenticate("user", "pass").await?;
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// - [`NntpError::Server`] - credentials rejected (typically 481 or 482)
    pub async fn authenticate(&mut self, username: &str, password: &str) -> Result<()> {
        debug!("Authenticating as {}", username);

        let (code, message) = self
            .command(&commands::authinfo_user(username), Expect::Any)
            .await?;

        match code {
            codes::AUTH_ACCEPTED => {
                debug!("Authenticated without password");
                return Ok(());
            }
            codes::AUTH_CONTINUE => {}
            c if c / 100 == 3 => debug!("AUTHINFO USER continued with {}", c),
            _ => return Err(NntpError::Server { code, message }),
        }

        self.command(
            &commands::authinfo_pass(password),
            Expect::Code(codes::AUTH_ACCEPTED),
        )
        .await?;
        debug!("Authentication successful");
        Ok(())
    }

    /// Switch a mode-switching server to reader mode (RFC 3977 Section 5.3)
    ///
    /// Accepts 200 (posting allowed) and 201 (no posting).
    pub async fn mode_reader(&mut self) -> Result<()> {
        let (code, _) = self
            .command(commands::mode_reader(), Expect::Class(2))
            .await?;
        debug!(
            "Reader mode active, posting {}",
            if code == codes::READY_POSTING_ALLOWED {
                "allowed"
            } else {
                "not allowed"
            }
        );
        Ok(())
    }
}
