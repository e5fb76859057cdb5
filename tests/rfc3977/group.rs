//! RFC 3977 Sections 6.1.1, 7.3 and 7.6.3 - GROUP, NEWGROUPS and LIST ACTIVE

use chrono::{TimeZone, Utc};
use nntp_session::codes;
use nntp_session::commands::{parse_active_line, parse_group_line};

use crate::mock::MockServer;

#[test]
fn test_group_fields_recovered() {
    for (count, low, high, name) in [
        (0u64, 0u64, 0u64, "empty.group"),
        (1000, 500, 1000, "gmane.comp.lang.go.general"),
        (3, 1, 18_446_744_073_709_551_615, "huge.numbers"),
    ] {
        let line = format!("{} {} {} {}", count, low, high, name);
        let group = parse_group_line(&line).unwrap();
        assert_eq!((group.count, group.low, group.high), (count, low, high));
        assert_eq!(group.name, name);
    }
}

#[test]
fn test_group_low_above_high_not_rejected() {
    let group = parse_group_line("0 4000 3999 alt.empty").unwrap();
    assert!(group.low > group.high);
}

#[test]
fn test_group_short_line() {
    let err = parse_group_line("3 1 5").unwrap_err();
    assert!(err.is_protocol_error());
}

#[test]
fn test_group_bad_number_names_field() {
    let err = parse_group_line("3 one 5 misc.test").unwrap_err();
    let text = err.to_string();
    assert!(text.contains("low article number"), "{}", text);
    assert!(text.contains("3 one 5 misc.test"), "{}", text);
}

#[test]
fn test_active_line_high_before_low() {
    let group = parse_active_line("tx.natives.recovery 89 56 y").unwrap();
    assert_eq!(group.high, 89);
    assert_eq!(group.low, 56);
    assert_eq!(group.count, 0);
    assert!(group.posting_allowed());
}

#[test]
fn test_active_line_status_kept_raw() {
    let group = parse_active_line("comp.moderated 10 1 m").unwrap();
    assert!(group.is_moderated());
    let group = parse_active_line("old.name 10 1 =new.name").unwrap();
    assert_eq!(group.status, "=new.name");
}

#[tokio::test]
async fn test_group_selection() {
    let (mut client, server) = MockServer::new()
        .reply("211 1234 3000234 3002322 misc.test\n")
        .start()
        .await;

    let group = client.group("misc.test").await.unwrap();
    assert_eq!(group.count, 1234);
    assert_eq!(group.low, 3_000_234);
    assert_eq!(group.high, 3_002_322);
    assert_eq!(server.await.unwrap(), ["GROUP misc.test"]);
}

#[tokio::test]
async fn test_group_reply_too_short() {
    let (mut client, _server) = MockServer::new()
        .reply("211 1234 3000234\n")
        .start()
        .await;

    let err = client.group("misc.test").await.unwrap_err();
    assert!(err.is_protocol_error());
}

#[tokio::test]
async fn test_list_active_typed() {
    let (mut client, server) = MockServer::new()
        .reply("215 list of newsgroups follows\nmisc.test 3002322 3000234 y\ncomp.risks 442001 441099 m\n.\n")
        .reply("215 list of newsgroups follows\n.\n")
        .start()
        .await;

    let groups = client.list_active(Some("*")).await.unwrap();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].name, "misc.test");
    assert_eq!(groups[0].high, 3_002_322);
    assert!(groups[1].is_moderated());

    assert!(client.list_active(None).await.unwrap().is_empty());
    assert_eq!(server.await.unwrap(), ["LIST ACTIVE *", "LIST ACTIVE"]);
}

#[tokio::test]
async fn test_new_groups_time_rendered_in_utc() {
    let (mut client, server) = MockServer::new()
        .reply("231 list of new newsgroups follows\nalt.new 10 1 y\n.\n")
        .start()
        .await;

    let since = Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 58).unwrap();
    let groups = client.new_groups(&since).await.unwrap();
    assert_eq!(groups[0].name, "alt.new");
    assert_eq!(server.await.unwrap(), ["NEWGROUPS 20241231 235958 GMT"]);
}

#[tokio::test]
async fn test_new_news_sorted_and_deduplicated() {
    let (mut client, server) = MockServer::new()
        .reply("230 list follows\n<c@x>\n<a@x>\n<c@x>\n<b@x>\n.\n")
        .start()
        .await;

    let since = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
    let ids = client.new_news("comp.lang.*", &since).await.unwrap();
    assert_eq!(ids, ["<a@x>", "<b@x>", "<c@x>"]);
    assert_eq!(
        server.await.unwrap(),
        ["NEWNEWS comp.lang.* 20240102 030405 GMT"]
    );
}

#[tokio::test]
async fn test_navigation_failures() {
    let (mut client, _server) = MockServer::new()
        .reply("412 no newsgroup selected\n")
        .reply("421 no next article\n")
        .reply("422 no previous article\n")
        .start()
        .await;

    assert_eq!(client.stat("").await.unwrap_err().code(), Some(codes::NO_GROUP_SELECTED));
    assert_eq!(client.next().await.unwrap_err().code(), Some(codes::NO_NEXT_ARTICLE));
    assert_eq!(client.last().await.unwrap_err().code(), Some(codes::NO_PREV_ARTICLE));
}
