//! NNTP server configuration

use std::time::Duration;

/// Default time allowed for TCP connect plus TLS handshake
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(60);

/// NNTP server configuration
///
/// Everything [`NntpClient::connect`](crate::NntpClient::connect) needs to
/// reach a server. Credentials are optional; when present the session
/// authenticates right after the greeting.
///
/// # Example
///
/// ```
/// use nntp_session::ServerConfig;
/// use std::time::Duration;
///
/// let config = ServerConfig::tls("news.example.com")
///     .with_credentials("user", "pass")
///     .with_connect_timeout(Duration::from_secs(10));
/// assert_eq!(config.port, 563);
/// ```
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ServerConfig {
    /// Server hostname (e.g., "news.example.com")
    pub host: String,

    /// Server port (typically 119 for plain, 563 for TLS)
    pub port: u16,

    /// Wrap the connection in TLS
    #[cfg_attr(feature = "serde", serde(default))]
    pub tls: bool,

    /// Accept any server certificate
    ///
    /// **Security Warning:** disables certificate validation, leaving the
    /// connection open to man-in-the-middle attacks. Only for test servers
    /// with self-signed certificates.
    #[cfg_attr(feature = "serde", serde(default))]
    pub allow_insecure_tls: bool,

    /// Username for AUTHINFO USER
    #[cfg_attr(feature = "serde", serde(default))]
    pub username: Option<String>,

    /// Password for AUTHINFO PASS
    #[cfg_attr(feature = "serde", serde(default))]
    pub password: Option<String>,

    /// Deadline for TCP connect and TLS handshake, each
    #[cfg_attr(
        feature = "serde",
        serde(default = "default_connect_timeout", with = "duration_secs")
    )]
    pub connect_timeout: Duration,
}

#[cfg(feature = "serde")]
fn default_connect_timeout() -> Duration {
    DEFAULT_CONNECT_TIMEOUT
}

#[cfg(feature = "serde")]
mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}

impl ServerConfig {
    /// Create a new server configuration without credentials
    pub fn new(host: impl Into<String>, port: u16, tls: bool) -> Self {
        Self {
            host: host.into(),
            port,
            tls,
            allow_insecure_tls: false,
            username: None,
            password: None,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }

    /// Plain connection on the standard port (119)
    ///
    /// **Warning:** credentials travel in clear text.
    pub fn plain(host: impl Into<String>) -> Self {
        Self::new(host, 119, false)
    }

    /// TLS connection on the standard secure port (563)
    pub fn tls(host: impl Into<String>) -> Self {
        Self::new(host, 563, true)
    }

    /// TLS connection that accepts self-signed certificates
    ///
    /// **Security Warning:** see [`allow_insecure_tls`](Self::allow_insecure_tls).
    pub fn tls_insecure(host: impl Into<String>) -> Self {
        let mut config = Self::tls(host);
        config.allow_insecure_tls = true;
        config
    }

    /// Authenticate with these credentials after connecting
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Override the dial deadline
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Username and password, if both are configured
    #[must_use]
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some((user.as_str(), pass.as_str())),
            _ => None,
        }
    }
}
