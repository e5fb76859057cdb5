//! RFC 3977 Section 6.3.1 - POST

use nntp_session::codes;
use tokio::io::BufReader;

use crate::mock::MockServer;

#[tokio::test]
async fn test_post_dot_stuffs_and_terminates() {
    let (mut client, server) = MockServer::new()
        .reply("340 send article to be posted\n")
        .reply_after_block("240 article received ok\n")
        .start()
        .await;

    client
        .post_text("Newsgroups: misc.test\nSubject: dots\n\n.A single leading .\n.\nlast line")
        .await
        .unwrap();

    assert_eq!(
        server.await.unwrap(),
        [
            "POST",
            "Newsgroups: misc.test",
            "Subject: dots",
            "",
            "..A single leading .",
            "..",
            "last line",
            "."
        ]
    );
}

#[tokio::test]
async fn test_post_from_reader_normalizes_line_endings() {
    let (mut client, server) = MockServer::new()
        .reply("340 go ahead\n")
        .reply_after_block("240 ok\n")
        .start()
        .await;

    let article: &[u8] = b"Subject: mixed\r\n\r\nline one\nline two\r\n";
    client.post(BufReader::new(article)).await.unwrap();

    assert_eq!(
        server.await.unwrap(),
        ["POST", "Subject: mixed", "", "line one", "line two", "."]
    );
}

#[tokio::test]
async fn test_post_accepts_any_continuation_code() {
    let (mut client, server) = MockServer::new()
        .reply("350 go on\n")
        .reply_after_block("240 ok\n")
        .start()
        .await;

    client.post_text("Subject: x\n\nbody\n").await.unwrap();
    assert_eq!(server.await.unwrap(), ["POST", "Subject: x", "", "body", "."]);
}

#[tokio::test]
async fn test_post_not_permitted_sends_nothing_more() {
    let (mut client, server) = MockServer::new()
        .reply("440 posting not permitted\n")
        .reply("111 20240101000000\n")
        .start()
        .await;

    let err = client.post_text("Subject: x\n\nbody\n").await.unwrap_err();
    assert_eq!(err.code(), Some(codes::POSTING_NOT_PERMITTED));

    client.date().await.unwrap();
    assert_eq!(server.await.unwrap(), ["POST", "DATE"]);
}

#[tokio::test]
async fn test_post_rejected_after_block() {
    let (mut client, _server) = MockServer::new()
        .reply("340 send it\n")
        .reply_after_block("441 posting failed\n")
        .start()
        .await;

    let err = client.post_text("Subject: x\n\nbody\n").await.unwrap_err();
    assert!(err.is_server_error());
    assert_eq!(err.code(), Some(codes::POSTING_FAILED));
    assert!(!client.is_broken());
}
