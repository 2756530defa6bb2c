use std::io::Write;
use std::time::Duration;

use console_engine::{
    ClientSettings, ConsoleApi, DirectoryEntry, FailureKind, ReqwestConsoleApi, StatusReport,
};
use pretty_assertions::assert_eq;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_for(server: &MockServer) -> ReqwestConsoleApi {
    let settings = ClientSettings::parse(&server.uri()).expect("server uri");
    ReqwestConsoleApi::new(settings).expect("client")
}

#[tokio::test]
async fn browse_sends_path_and_decodes_listing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/browse"))
        .and(query_param("path", "/home/user/My Docs"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"current":"/home/user/My Docs","folders":[
                {"Name":"..","Path":"/home/user"},
                {"Name":"Scans & Photos","Path":"/home/user/My Docs/Scans & Photos"}
            ]}"#,
            "application/json",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let listing = api_for(&server)
        .browse("/home/user/My Docs")
        .await
        .expect("browse ok");

    assert_eq!(listing.current, "/home/user/My Docs");
    assert_eq!(
        listing.folders,
        vec![
            DirectoryEntry {
                name: "..".to_string(),
                path: "/home/user".to_string(),
            },
            DirectoryEntry {
                name: "Scans & Photos".to_string(),
                path: "/home/user/My Docs/Scans & Photos".to_string(),
            },
        ]
    );
}

#[tokio::test]
async fn browse_empty_path_is_sent_as_empty_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/browse"))
        .and(query_param("path", ""))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"current":"/root","folders":null}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let listing = api_for(&server).browse("").await.expect("browse ok");
    assert_eq!(listing.current, "/root");
    assert!(listing.folders.is_empty());
}

#[tokio::test]
async fn browse_error_carries_body_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/browse"))
        .respond_with(
            ResponseTemplate::new(500).set_body_string("open /root/secret: permission denied\n"),
        )
        .mount(&server)
        .await;

    let err = api_for(&server).browse("/root/secret").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(500));
    assert_eq!(err.detail(), "open /root/secret: permission denied");
}

#[tokio::test]
async fn status_decodes_report() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"Running":true,"Percent":40,"Message":"Chunk 4/10"}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let report = api_for(&server).status().await.expect("status ok");
    assert_eq!(
        report,
        StatusReport {
            message: "Chunk 4/10".to_string(),
            percent: 40.0,
            running: true,
        }
    );
}

#[tokio::test]
async fn status_rejects_non_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<html>busy</html>", "text/html"))
        .mount(&server)
        .await;

    let err = api_for(&server).status().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Decode);
}

#[tokio::test]
async fn status_times_out_on_slow_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_string("{}"),
        )
        .mount(&server)
        .await;

    let settings = ClientSettings {
        request_timeout: Duration::from_millis(50),
        ..ClientSettings::parse(&server.uri()).unwrap()
    };
    let err = ReqwestConsoleApi::new(settings)
        .unwrap()
        .status()
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn unreachable_server_is_a_network_error() {
    let uri = {
        let server = MockServer::start().await;
        server.uri()
    };
    let settings = ClientSettings::parse(&uri).unwrap();
    let err = ReqwestConsoleApi::new(settings)
        .unwrap()
        .status()
        .await
        .unwrap_err();
    assert!(
        matches!(err.kind, FailureKind::Network | FailureKind::Timeout),
        "unexpected {err:?}"
    );
}

#[tokio::test]
async fn upload_posts_multipart_and_accepts_redirect() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(303).insert_header("Location", "/"))
        .expect(1)
        .mount(&server)
        .await;

    let mut file = tempfile::Builder::new()
        .suffix(".torrent")
        .tempfile()
        .unwrap();
    file.write_all(b"d8:announce3:urle").unwrap();

    api_for(&server)
        .upload(file.path(), "/srv/media")
        .await
        .expect("upload accepted");

    let requests = server.received_requests().await.expect("recording enabled");
    let body = String::from_utf8_lossy(&requests[0].body).into_owned();
    assert!(body.contains("name=\"torrent\""));
    assert!(body.contains("d8:announce3:urle"));
    assert!(body.contains("name=\"destination\""));
    assert!(body.contains("/srv/media"));
}

#[tokio::test]
async fn upload_failure_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(413).set_body_string("too large"))
        .mount(&server)
        .await;

    let file = tempfile::NamedTempFile::new().unwrap();
    let err = api_for(&server)
        .upload(file.path(), "")
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(413));
    assert_eq!(err.detail(), "too large");
}

#[tokio::test]
async fn upload_of_missing_file_fails_before_request() {
    let server = MockServer::start().await;
    let dir = tempfile::TempDir::new().unwrap();
    let missing = dir.path().join("gone.torrent");

    let err = api_for(&server).upload(&missing, "").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Io);
    assert!(server.received_requests().await.unwrap().is_empty());
}
