//! Basic NNTP session example
//!
//! Run with: cargo run --example basic

use nntp_session::{NntpClient, ServerConfig};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (RUST_LOG=nntp_session=trace shows the wire)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let host = std::env::var("NNTP_HOST").unwrap_or_else(|_| "news.example.com".to_string());
    let port = std::env::var("NNTP_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(563);
    let mut config = ServerConfig::new(host, port, port == 563);
    if let (Ok(user), Ok(pass)) = (std::env::var("NNTP_USER"), std::env::var("NNTP_PASS")) {
        config = config.with_credentials(user, pass);
    }

    println!("Connecting to {}:{}...", config.host, config.port);
    let mut client = NntpClient::connect(Arc::new(config)).await?;
    println!("Connected: {}", client.banner());

    let caps = client.capabilities().await?;
    let compression = caps.has("XFEATURE-COMPRESS") && client.enable_compression().await.is_ok();
    println!(
        "Compression: {}",
        if compression { "enabled" } else { "not available" }
    );

    let group_name = std::env::var("NNTP_GROUP").unwrap_or_else(|_| "alt.test".to_string());
    let group = client.group(&group_name).await?;
    println!(
        "Selected group '{}': {} articles ({}-{})",
        group.name, group.count, group.low, group.high
    );

    if group.count > 0 {
        let start = group.high.saturating_sub(10).max(group.low);
        println!("\nFetching XOVER {}-{}...", start, group.high);

        let entries = client.overview(start, group.high).await?;
        println!("Got {} entries:\n", entries.len());
        for entry in entries.iter().take(5) {
            println!(
                "  #{}: {} (by {}, {} bytes)",
                entry.number, entry.subject, entry.from, entry.bytes
            );
        }
        if entries.len() > 5 {
            println!("  ... and {} more", entries.len() - 5);
        }

        if let Some(latest) = entries.last() {
            let head = client.head(&latest.message_id).await?;
            println!("\nHeaders of {}:", latest.message_id);
            for (key, values) in head.headers.iter() {
                println!("  {}: {}", key, values.join(", "));
            }
        }
    }

    if compression {
        let (compressed, decompressed) = client.bandwidth_stats();
        if decompressed > 0 {
            let ratio = (1.0 - (compressed as f64 / decompressed as f64)) * 100.0;
            println!(
                "\nBandwidth: {} bytes compressed, {} bytes original ({:.1}% savings)",
                compressed, decompressed, ratio
            );
        }
    }

    client.quit().await?;
    println!("\nConnection closed.");
    Ok(())
}
