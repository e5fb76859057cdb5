//! XFEATURE COMPRESS GZIP overview blocks

use std::io::Write;

use flate2::Compression;
use flate2::write::ZlibEncoder;
use nntp_session::codes;

use crate::mock::{MockServer, crlf};

const RECORDS: &str = "10\tSubject10\tAuthor <author@server>\tSat, 18 Oct 2003 18:00:00 +0030\t<d@e.f>\t\t1000\t9\r\n\
11\tSubject11\t\t18 Oct 2003 19:00:00 +0030\t<e@f.g>\t<d@e.f> <a@b.c>\t2000\t18\tExtra stuff\r\n";

fn zlib(data: &[u8]) -> Vec<u8> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

fn compressed_reply(status: &str, payload: &[u8], trailer: &[u8]) -> Vec<u8> {
    let mut reply = crlf(&format!("{}\n", status));
    reply.extend(zlib(payload));
    reply.extend_from_slice(trailer);
    reply
}

#[tokio::test]
async fn test_compressed_and_plain_overview_identical() {
    let plain_reply = format!("224 follows\n{}.\n", RECORDS.replace("\r\n", "\n"));
    let (mut client, server) = MockServer::new()
        .reply(&plain_reply)
        .reply("290 feature enabled\n")
        .reply_bytes(compressed_reply(
            "224 xover information follows [COMPRESS=GZIP]",
            RECORDS.as_bytes(),
            b".\r\n",
        ))
        .reply("211 2 10 11 misc.test\n")
        .start()
        .await;

    assert!(!client.is_compression_enabled());
    let plain = client.overview(10, 11).await.unwrap();
    assert_eq!(client.bandwidth_stats(), (0, 0));

    client.enable_compression().await.unwrap();
    let compressed = client.overview(10, 11).await.unwrap();
    assert_eq!(plain, compressed);

    let (wire, inflated) = client.bandwidth_stats();
    assert_eq!(inflated, RECORDS.len() as u64);
    assert!(wire > 0);

    // The connection reads plain status lines again after the block
    let group = client.group("misc.test").await.unwrap();
    assert_eq!(group.count, 2);

    assert_eq!(
        server.await.unwrap(),
        [
            "XOVER 10-11",
            "XFEATURE COMPRESS GZIP",
            "XOVER 10-11",
            "GROUP misc.test"
        ]
    );
}

#[tokio::test]
async fn test_terminator_inside_compressed_stream() {
    let payload = format!("{}.\r\n", RECORDS);
    let (mut client, _server) = MockServer::new()
        .reply("290 feature enabled\n")
        .reply_bytes(compressed_reply(
            "224 xover information follows [COMPRESS=GZIP]",
            payload.as_bytes(),
            b"",
        ))
        .reply("111 20240101000000\n")
        .start()
        .await;

    client.enable_compression().await.unwrap();
    let entries = client.overview(10, 11).await.unwrap();
    assert_eq!(entries.len(), 2);
    client.date().await.unwrap();
}

#[tokio::test]
async fn test_missing_marker_still_inflated() {
    let (mut client, _server) = MockServer::new()
        .reply("290 feature enabled\n")
        .reply_bytes(compressed_reply(
            "224 overview follows",
            RECORDS.as_bytes(),
            b".\r\n",
        ))
        .start()
        .await;

    client.enable_compression().await.unwrap();
    assert_eq!(client.overview(10, 11).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_compression_refused() {
    let (mut client, _server) = MockServer::new()
        .reply("500 What?\n")
        .start()
        .await;

    let err = client.enable_compression().await.unwrap_err();
    assert_eq!(err.code(), Some(codes::COMMAND_NOT_RECOGNIZED));
    assert!(!client.is_compression_enabled());
}

#[tokio::test]
async fn test_truncated_compressed_block() {
    let full = zlib(RECORDS.as_bytes());
    let mut reply = crlf("224 xover information follows [COMPRESS=GZIP]\n");
    reply.extend_from_slice(&full[..full.len() / 2]);

    let (mut client, _server) = MockServer::new()
        .reply("290 feature enabled\n")
        .reply_bytes(reply)
        .start()
        .await;

    client.enable_compression().await.unwrap();
    let err = client.overview(10, 11).await.unwrap_err();
    assert!(err.is_protocol_error(), "got {}", err);
    assert!(client.is_broken());
}

#[tokio::test]
async fn test_uncompressed_data_after_negotiation_rejected() {
    let (mut client, _server) = MockServer::new()
        .reply("290 feature enabled\n")
        .reply(&format!("224 follows\n{}.\n", RECORDS.replace("\r\n", "\n")))
        .start()
        .await;

    client.enable_compression().await.unwrap();
    let err = client.overview(10, 11).await.unwrap_err();
    assert!(err.is_protocol_error(), "got {}", err);
    assert!(client.is_broken());
}
