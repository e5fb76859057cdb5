//! Connection establishment for NNTP client
//!
//! This module handles TCP/TLS dialing, socket tuning, and server greeting
//! validation. The session itself only needs a duplex byte stream, so any
//! [`NntpIo`] (an in-memory pipe in tests, a proxy tunnel) can be handed to
//! [`NntpClient::from_stream`] instead.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use socket2::{Domain, Protocol, Socket, Type};
use tokio::io::{AsyncRead, AsyncWrite, BufReader};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_rustls::TlsConnector;
use tokio_rustls::client::TlsStream;
use tokio_rustls::rustls::client::danger::{
    HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier,
};
use tokio_rustls::rustls::pki_types::{CertificateDer, ServerName, UnixTime};
use tokio_rustls::rustls::{ClientConfig, DigitallySignedStruct, RootCertStore, SignatureScheme};
use tracing::{debug, warn};

use super::NntpClient;
use crate::config::ServerConfig;
use crate::error::{NntpError, Result};
use crate::response::Expect;

/// BufReader capacity for the session stream (64KB)
const BUFREADER_CAPACITY: usize = 64 * 1024;

/// Duplex byte stream a session can run over
pub trait NntpIo: AsyncRead + AsyncWrite + Send + Unpin {}

impl<T> NntpIo for T where T: AsyncRead + AsyncWrite + Send + Unpin {}

/// Certificate verifier that accepts all certificates
///
/// **Security Warning:** only installed when
/// [`ServerConfig::allow_insecure_tls`] is set.
#[derive(Debug)]
pub(super) struct DangerousAcceptAnyCertificate;

impl ServerCertVerifier for DangerousAcceptAnyCertificate {
    fn verify_server_cert(
        &self,
        _end_entity: &CertificateDer<'_>,
        _intermediates: &[CertificateDer<'_>],
        _server_name: &ServerName<'_>,
        _ocsp_response: &[u8],
        _now: UnixTime,
    ) -> std::result::Result<ServerCertVerified, tokio_rustls::rustls::Error> {
        Ok(ServerCertVerified::assertion())
    }

    fn verify_tls12_signature(
        &self,
        _message: &[u8],
        _cert: &CertificateDer<'_>,
        _dss: &DigitallySignedStruct,
    ) -> std::result::Result<HandshakeSignatureValid, tokio_rustls::rustls::Error> {
        Ok(HandshakeSignatureValid::assertion())
    }

    fn verify_tls13_signature(
        &self,
        _message: &[u8],
        _cert: &CertificateDer<'_>,
        _dss: &DigitallySignedStruct,
    ) -> std::result::Result<HandshakeSignatureValid, tokio_rustls::rustls::Error> {
        Ok(HandshakeSignatureValid::assertion())
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        vec![
            SignatureScheme::RSA_PKCS1_SHA256,
            SignatureScheme::RSA_PKCS1_SHA384,
            SignatureScheme::RSA_PKCS1_SHA512,
            SignatureScheme::ECDSA_NISTP256_SHA256,
            SignatureScheme::ECDSA_NISTP384_SHA384,
            SignatureScheme::ECDSA_NISTP521_SHA512,
            SignatureScheme::RSA_PSS_SHA256,
            SignatureScheme::RSA_PSS_SHA384,
            SignatureScheme::RSA_PSS_SHA512,
            SignatureScheme::ED25519,
            SignatureScheme::ED448,
        ]
    }
}

async fn resolve(config: &ServerConfig) -> Result<SocketAddr> {
    tokio::net::lookup_host((config.host.as_str(), config.port))
        .await
        .map_err(|e| {
            NntpError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("Failed to resolve {}: {}", config.host, e),
            ))
        })?
        .next()
        .ok_or_else(|| {
            NntpError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("No address resolved for {}", config.host),
            ))
        })
}

/// Open a TCP connection with TCP_NODELAY set, bounded by `limit`
async fn open_tcp(addr: SocketAddr, limit: Duration) -> Result<TcpStream> {
    let domain = if addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };
    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;

    // One small command per round trip; Nagle would only add latency
    socket.set_nodelay(true)?;
    if let Err(e) = socket.set_keepalive(true) {
        warn!("Failed to enable TCP keepalive: {}", e);
    }

    // socket2 connect blocks, so it runs off the async workers
    let tcp_stream = timeout(
        limit,
        tokio::task::spawn_blocking(move || -> std::io::Result<std::net::TcpStream> {
            socket.connect(&addr.into())?;
            socket.set_nonblocking(true)?;
            Ok(socket.into())
        }),
    )
    .await
    .map_err(|_| NntpError::Timeout)?
    .map_err(|e| NntpError::Io(std::io::Error::other(format!("Task join error: {}", e))))??;

    Ok(TcpStream::from_std(tcp_stream)?)
}

fn tls_config(config: &ServerConfig) -> ClientConfig {
    use tokio_rustls::rustls::crypto::{CryptoProvider, ring};
    // Already installed by an earlier connect or by the application
    let _ = CryptoProvider::install_default(ring::default_provider());

    if config.allow_insecure_tls {
        warn!("TLS certificate validation disabled - connection vulnerable to MITM attacks");
        ClientConfig::builder()
            .dangerous()
            .with_custom_certificate_verifier(Arc::new(DangerousAcceptAnyCertificate))
            .with_no_client_auth()
    } else {
        let mut root_store = RootCertStore::empty();
        root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
        ClientConfig::builder()
            .with_root_certificates(root_store)
            .with_no_client_auth()
    }
}

async fn tls_handshake(config: &ServerConfig, tcp_stream: TcpStream) -> Result<TlsStream<TcpStream>> {
    let connector = TlsConnector::from(Arc::new(tls_config(config)));
    let server_name = ServerName::try_from(config.host.as_str())
        .map_err(|e| NntpError::Tls(format!("Invalid domain: {}", e)))?
        .to_owned();

    timeout(
        config.connect_timeout,
        connector.connect(server_name, tcp_stream),
    )
    .await
    .map_err(|_| NntpError::Timeout)?
    .map_err(|e| NntpError::Tls(format!("TLS handshake failed: {}", e)))
}

impl NntpClient {
    /// Start a session over an already established stream
    ///
    /// Reads the server greeting, which must be 200 (posting allowed) or 201
    /// (no posting). The greeting text becomes [`banner`](Self::banner).
    ///
    /// # Errors
    ///
    /// - [`NntpError::Server`] - the greeting was not a 2xx code
    /// - [`NntpError::ConnectionClosed`] - the stream ended before a greeting
    pub async fn from_stream<S>(stream: S) -> Result<Self>
    where
        S: NntpIo + 'static,
    {
        let stream: Box<dyn NntpIo> = Box::new(stream);
        let mut client = Self {
            stream: BufReader::with_capacity(BUFREADER_CAPACITY, stream),
            banner: String::new(),
            compression_enabled: false,
            bytes_compressed: 0,
            bytes_decompressed: 0,
            is_broken: false,
            closed: false,
        };

        let (code, message) = client.read_status(Expect::Class(2)).await?;
        debug!("Server greeting: {} {}", code, message);
        client.banner = message;
        Ok(client)
    }

    /// Connect to the NNTP server described by `config`
    ///
    /// Opens a TCP connection (TLS on top when `config.tls` is set), reads the
    /// greeting, and authenticates when credentials are configured.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - [`NntpError::Io`] - TCP connection fails (DNS resolution, network unreachable, etc.)
    /// - [`NntpError::Tls`] - TLS handshake fails (invalid certificate, protocol error)
    /// - [`NntpError::Timeout`] - connect or handshake exceeded `config.connect_timeout`
    /// - [`NntpError::Server`] - greeting or authentication rejected
    pub async fn connect(config: Arc<ServerConfig>) -> Result<Self> {
        debug!("Connecting to NNTP server {}:{}", config.host, config.port);

        let addr = resolve(&config).await?;
        let tcp_stream = open_tcp(addr, config.connect_timeout).await?;

        let mut client = if config.tls {
            let tls_stream = tls_handshake(&config, tcp_stream).await?;
            Self::from_stream(tls_stream).await?
        } else {
            Self::from_stream(tcp_stream).await?
        };

        if let Some((username, password)) = config.credentials() {
            client.authenticate(username, password).await?;
        }
        Ok(client)
    }
}
