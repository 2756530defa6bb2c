use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use console_engine::{
    ApiError, ClientSettings, ConsoleApi, DirectoryListing, EngineEvent, EngineHandle,
    FailureKind, PollPolicy, PollSettings, StatusReport,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Answers browse requests after a delay encoded in the path, e.g. `/slow`.
struct FakeApi;

#[async_trait::async_trait]
impl ConsoleApi for FakeApi {
    async fn browse(&self, path: &str) -> Result<DirectoryListing, ApiError> {
        if path == "/slow" {
            tokio::time::sleep(Duration::from_millis(200)).await;
        }
        if path == "/denied" {
            return Err(ApiError::new(FailureKind::HttpStatus(500), "permission denied"));
        }
        Ok(DirectoryListing {
            current: path.to_string(),
            folders: Vec::new(),
        })
    }

    async fn status(&self) -> Result<StatusReport, ApiError> {
        Ok(StatusReport {
            message: "idle".to_string(),
            percent: 0.0,
            running: false,
        })
    }

    async fn upload(&self, file: &Path, _destination: &str) -> Result<(), ApiError> {
        if file.exists() {
            Ok(())
        } else {
            Err(ApiError::new(FailureKind::Io, file.display().to_string()))
        }
    }
}

fn fake_engine() -> EngineHandle {
    EngineHandle::with_api(Arc::new(FakeApi)).expect("engine")
}

fn next_event(engine: &EngineHandle) -> EngineEvent {
    engine
        .recv_timeout(Duration::from_secs(2))
        .expect("engine event")
}

#[test]
fn browse_results_carry_their_request_token() {
    let engine = fake_engine();
    engine.browse(1, "/slow");
    engine.browse(2, "/fast");

    let first = next_event(&engine);
    let second = next_event(&engine);
    let completed: Vec<_> = [first, second]
        .into_iter()
        .map(|event| match event {
            EngineEvent::BrowseCompleted { token, result } => (token, result.unwrap().current),
            other => panic!("unexpected event {other:?}"),
        })
        .collect();

    // The slow request resolves last; tokens let the console tell them apart.
    assert_eq!(
        completed,
        vec![(2, "/fast".to_string()), (1, "/slow".to_string())]
    );
}

#[test]
fn browse_failure_is_delivered_as_event() {
    let engine = fake_engine();
    engine.browse(7, "/denied");
    match next_event(&engine) {
        EngineEvent::BrowseCompleted { token, result } => {
            assert_eq!(token, 7);
            assert_eq!(result.unwrap_err().detail(), "permission denied");
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn scheduled_delay_fires_after_its_duration() {
    let engine = fake_engine();
    let started = Instant::now();
    engine.schedule(3, Duration::from_millis(100));

    assert_eq!(next_event(&engine), EngineEvent::DelayElapsed { generation: 3 });
    assert!(started.elapsed() >= Duration::from_millis(100));
}

#[test]
fn upload_result_is_delivered() {
    let engine = fake_engine();
    let file = tempfile::NamedTempFile::new().unwrap();
    engine.upload(file.path().to_path_buf(), "/srv");
    assert_eq!(
        next_event(&engine),
        EngineEvent::UploadCompleted { result: Ok(()) }
    );
}

#[test]
fn polling_runs_until_guard_is_dropped() {
    let engine = fake_engine();
    let guard = engine.start_polling(PollSettings {
        interval: Duration::from_millis(10),
        policy: PollPolicy::SingleFlight,
    });
    assert!(matches!(
        next_event(&engine),
        EngineEvent::StatusPolled { seq: 1, result: Ok(_) }
    ));
    drop(guard);

    std::thread::sleep(Duration::from_millis(50));
    while engine.try_recv().is_some() {}
    std::thread::sleep(Duration::from_millis(50));
    assert!(engine.try_recv().is_none());
}

#[test]
fn engine_talks_to_real_server() {
    let server_runtime = tokio::runtime::Runtime::new().unwrap();
    let server = server_runtime.block_on(async {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/browse"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                r#"{"current":"/data","folders":[{"Name":"films","Path":"/data/films"}]}"#,
                "application/json",
            ))
            .mount(&server)
            .await;
        server
    });

    let engine = EngineHandle::new(ClientSettings::parse(&server.uri()).unwrap()).unwrap();
    engine.browse(1, "/data");
    match next_event(&engine) {
        EngineEvent::BrowseCompleted { token: 1, result } => {
            let listing = result.expect("listing");
            assert_eq!(listing.folders[0].path, "/data/films");
        }
        other => panic!("unexpected event {other:?}"),
    }
    drop(engine);
    drop(server);
}
