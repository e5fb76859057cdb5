//! RFC 3977 Section 3.1.1 - Multi-line blocks and dot-stuffing on a live session

use nntp_session::{Expect, codes};

use crate::mock::MockServer;

#[tokio::test]
async fn test_help_lines_returned_in_order() {
    let (mut client, server) = MockServer::new()
        .reply("100 Help text follows\nARTICLE [message-id|number]\nBODY [message-id|number]\n.\n")
        .start()
        .await;

    let help = client.help().await.unwrap();
    assert_eq!(help, ["ARTICLE [message-id|number]", "BODY [message-id|number]"]);
    assert_eq!(server.await.unwrap(), ["HELP"]);
}

#[tokio::test]
async fn test_dot_stuffed_lines_unescaped() {
    let (mut client, _server) = MockServer::new()
        .reply("222 0 <x@y> body\n..\n...\n..Hello\nmid.dle\n.\n")
        .start()
        .await;

    let body = client.body("<x@y>").await.unwrap();
    assert_eq!(body, [".", "..", ".Hello", "mid.dle"]);
}

#[tokio::test]
async fn test_empty_lines_preserved() {
    let (mut client, _server) = MockServer::new()
        .reply("222 0 <x@y> body\nfirst\n\n\nlast\n.\n")
        .start()
        .await;

    let body = client.body("").await.unwrap();
    assert_eq!(body, ["first", "", "", "last"]);
}

#[tokio::test]
async fn test_bare_lf_line_endings_accepted() {
    let (mut client, _server) = MockServer::new()
        .reply_bytes(b"215 list follows\nmisc.test 3000234 3002322 y\n.\n".to_vec())
        .start()
        .await;

    let lines = client.list(Some("ACTIVE"), None).await.unwrap();
    assert_eq!(lines, ["misc.test 3000234 3002322 y"]);
}

#[tokio::test]
async fn test_next_command_reads_after_block() {
    let (mut client, server) = MockServer::new()
        .reply("101 Capability list:\nVERSION 2\nREADER\nLIST ACTIVE NEWSGROUPS\n.\n")
        .reply("111 20240102030405\n")
        .start()
        .await;

    let caps = client.capabilities().await.unwrap();
    assert!(caps.has("reader"));
    assert_eq!(caps.args("LIST"), Some(vec!["ACTIVE", "NEWSGROUPS"]));
    client.date().await.unwrap();

    assert_eq!(server.await.unwrap(), ["CAPABILITIES", "DATE"]);
}

#[tokio::test]
async fn test_multiline_command_generic() {
    let (mut client, _server) = MockServer::new()
        .reply("215 Order of fields in overview database.\nSubject:\nFrom:\n.\n")
        .start()
        .await;

    let response = client
        .multiline_command("LIST OVERVIEW.FMT", Expect::Code(codes::LIST_INFORMATION_FOLLOWS))
        .await
        .unwrap();
    assert_eq!(response.code, 215);
    assert_eq!(response.message, "Order of fields in overview database.");
    assert_eq!(response.lines, ["Subject:", "From:"]);
}

#[tokio::test]
async fn test_error_reply_carries_no_block() {
    let (mut client, server) = MockServer::new()
        .reply("430 no such article\n")
        .reply("223 5 <z@y> status\n")
        .start()
        .await;

    let err = client.article_lines("<gone@x>").await.unwrap_err();
    assert_eq!(err.code(), Some(codes::NO_SUCH_ARTICLE_ID));

    let info = client.stat("5").await.unwrap();
    assert_eq!(info.number, 5);
    assert_eq!(server.await.unwrap(), ["ARTICLE <gone@x>", "STAT 5"]);
}

#[tokio::test]
async fn test_truncated_block_is_protocol_error_and_breaks_session() {
    let (mut client, _server) = MockServer::new()
        .reply("222 1 <a@b> body\nline one\nline two\n")
        .start()
        .await;

    let err = client.body("1").await.unwrap_err();
    assert!(err.is_protocol_error(), "got {}", err);
    assert!(client.is_broken());
    assert!(!client.is_closed());
}

#[tokio::test]
async fn test_raw_article_lines() {
    let (mut client, _server) = MockServer::new()
        .reply("220 3 <c@d> article\nSubject: raw\n\n..dotted\n.\n")
        .reply("221 3 <c@d> head\nSubject: raw\n  folded\n.\n")
        .start()
        .await;

    let lines = client.article_lines("3").await.unwrap();
    assert_eq!(lines, ["Subject: raw", "", ".dotted"]);

    let lines = client.head_lines("3").await.unwrap();
    assert_eq!(lines, ["Subject: raw", "  folded"]);
}
