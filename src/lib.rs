#![doc = include_str!("../README.md")]

/// Article headers, bodies, and folded header parsing
pub mod article;
mod capabilities;
mod client;
/// NNTP command builders and response parsers
pub mod commands;
mod config;
mod error;
mod response;

pub use article::{Article, Headers, canonical_header_key, parse_article, parse_headers};
pub use capabilities::Capabilities;
pub use client::{NntpClient, NntpIo};
pub use commands::{ArticleInfo, Group, MessageOverview};
pub use config::{DEFAULT_CONNECT_TIMEOUT, ServerConfig};
pub use error::{NntpError, Result};
pub use response::{Expect, NntpResponse, codes};
