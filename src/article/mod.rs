//! Article headers and bodies
//!
//! This module is organized into:
//! - `types`: [`Article`] and the multi-valued [`Headers`] map
//! - `parsing`: folded header parsing and ARTICLE block splitting

mod parsing;
mod types;

pub use self::parsing::{canonical_header_key, parse_article, parse_headers};
pub use self::types::{Article, Headers};
