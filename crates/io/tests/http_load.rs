// HTTP load scenarios against a local mock server.
// Run with: cargo test -p scriptview-io --test http_load

use std::time::Duration;

use httpmock::prelude::*;
use scriptview_core::{LineKind, ScriptLine};
use scriptview_io::{BackgroundLoader, LoadError, ScriptLoader, ScriptSource};

fn source(server: &MockServer, path: &str) -> ScriptSource {
    ScriptSource::parse(&server.url(path)).unwrap()
}

#[test]
fn loads_script_over_http() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/TK8.json");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(serde_json::json!([
                { "person": "Ala", "text": "Dzień dobry!" },
                { "type": "technical", "text": "Wchodzi Ola" },
                { "type": "music", "text": "Motyw przewodni" },
            ]));
    });

    let script = ScriptLoader::new().unwrap().load(&source(&server, "/TK8.json")).unwrap();

    mock.assert();
    assert_eq!(script.len(), 3);
    assert_eq!(script.get(0), Some(&ScriptLine::dialogue("Ala", "Dzień dobry!")));
    assert_eq!(script.get(1).unwrap().kind(), LineKind::Technical);
    assert_eq!(script.get(2).unwrap().kind(), LineKind::Music);
}

#[test]
fn not_found_is_http_error_after_one_request() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/TK8.json");
        then.status(404).body("not found");
    });

    let err = ScriptLoader::new().unwrap().load(&source(&server, "/TK8.json")).unwrap_err();

    // No retry: exactly one request reached the server
    mock.assert();
    assert_eq!(err, LoadError::Http(404, "not found".into()));
}

#[test]
fn server_error_keeps_status() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/TK8.json");
        then.status(503);
    });

    let err = ScriptLoader::new().unwrap().load(&source(&server, "/TK8.json")).unwrap_err();
    assert!(matches!(err, LoadError::Http(503, _)), "{:?}", err);
}

#[test]
fn html_body_is_parse_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/TK8.json");
        then.status(200)
            .header("content-type", "text/html")
            .body("<!doctype html><title>app</title>");
    });

    let err = ScriptLoader::new().unwrap().load(&source(&server, "/TK8.json")).unwrap_err();
    assert!(matches!(err, LoadError::Parse(_)), "{:?}", err);
}

#[test]
fn bare_text_record_is_dialogue() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/TK8.json");
        then.status(200).body(r#"[{"text":"ok"}]"#);
    });

    let script = ScriptLoader::new().unwrap().load(&source(&server, "/TK8.json")).unwrap();
    let line = script.get(0).unwrap();
    assert_eq!(line.kind(), LineKind::Dialogue);
    assert_eq!(line.speaker(), None);
    assert_eq!(line.text(), "ok");
}

#[test]
fn connection_refused_is_network_error() {
    // Bind then drop a listener to get a port nothing is serving on
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let src = ScriptSource::parse(&format!("http://127.0.0.1:{}/TK8.json", port)).unwrap();
    let err = ScriptLoader::new().unwrap().load(&src).unwrap_err();
    assert!(matches!(err, LoadError::Network(_)), "{:?}", err);
}

#[test]
fn background_load_over_http() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/TK8.json");
        then.status(404);
    });

    let mut bg = BackgroundLoader::new(ScriptLoader::new().unwrap());
    bg.spawn(source(&server, "/TK8.json"));
    let outcome = bg.wait(Duration::from_secs(10)).expect("load finished");

    mock.assert();
    assert!(matches!(outcome.result, Err(LoadError::Http(404, _))));
    // Signaled exactly once
    assert!(bg.wait(Duration::from_millis(100)).is_none());
}
