// File: tests/datamuse_test.rs
//! Free-mode word service against a local mock server

use mockito::{Matcher, Server};
use poet_core::config::ServiceConfig;
use poet_core::core::source::WordSource;
use poet_core::core::types::Candidate;
use poet_core::datamuse::DatamuseSource;
use poet_core::PoetError;
use pretty_assertions::assert_eq;

fn service_config(base_url: String) -> ServiceConfig {
    ServiceConfig {
        base_url,
        seed_topic: "ocean".to_string(),
        max_results: 5,
        timeout_secs: 5,
    }
}

#[test]
fn test_starting_words_query_the_seed_topic() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/words")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("ml".into(), "ocean".into()),
            Matcher::UrlEncoded("max".into(), "5".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"word": "sea", "score": 900}, {"word": "salt water", "score": 800}, {"word": "tide"}]"#)
        .expect(1)
        .create();

    // trailing slash on the base url must not double up
    let mut source = DatamuseSource::new(&service_config(format!("{}/", server.url()))).unwrap();
    let words = source.starting_words().unwrap();

    mock.assert();
    assert_eq!(words, vec![Candidate::new("sea", 900), Candidate::new("tide", 1)]);
}

#[test]
fn test_next_words_ask_for_frequent_followers() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/words")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("rel_bga".into(), "wreak".into()),
            Matcher::UrlEncoded("max".into(), "5".into()),
        ]))
        .with_status(200)
        .with_body(r#"[{"word": "havoc", "score": 1200}]"#)
        .expect(1)
        .create();

    let mut source = DatamuseSource::new(&service_config(server.url())).unwrap();
    let words = source.next_words("wreak").unwrap();

    mock.assert();
    assert_eq!(words, vec![Candidate::new("havoc", 1200)]);
}

#[test]
fn test_server_error_is_a_service_error() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/words")
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body("boom")
        .create();

    let mut source = DatamuseSource::new(&service_config(server.url())).unwrap();
    let err = source.next_words("night").unwrap_err();

    mock.assert();
    match err {
        PoetError::Service(message) => assert!(message.contains("500"), "{message}"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_malformed_body_is_a_service_error() {
    let mut server = Server::new();
    let _mock = server
        .mock("GET", "/words")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("not json")
        .create();

    let mut source = DatamuseSource::new(&service_config(server.url())).unwrap();
    assert!(matches!(
        source.starting_words(),
        Err(PoetError::Service(_))
    ));
}

#[test]
fn test_unreachable_service_is_an_http_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let mut source = DatamuseSource::new(&service_config(format!("http://127.0.0.1:{port}"))).unwrap();
    assert!(matches!(source.starting_words(), Err(PoetError::Http(_))));
}
