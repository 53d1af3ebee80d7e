//! Integration tests for the HTTP client against a local stub server.

use std::sync::{Arc, Mutex};

use rescue_events::fixtures;
use rescue_sync::{
    AdvanceOutcome, ClientError, GridLayout, HttpSimServer, MemoryScene, Prefab, ResetOutcome,
    SceneDiffApplier, ServerConfig, SimServer, StepDriver,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Serves canned responses, one connection per response, and records
/// each request line.
async fn stub_server(responses: Vec<(u16, String)>) -> (String, Arc<Mutex<Vec<String>>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&requests);

    tokio::spawn(async move {
        for (status, body) in responses {
            let Ok((mut socket, _)) = listener.accept().await else {
                return;
            };

            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];
            while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut chunk).await.unwrap_or(0);
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
            }
            let request = String::from_utf8_lossy(&buf);
            let line = request.lines().next().unwrap_or_default().to_string();
            seen.lock().unwrap().push(line);

            let response = format!(
                concat!(
                    "HTTP/1.1 {} Stub\r\n",
                    "Content-Type: application/json\r\n",
                    "Content-Length: {}\r\n",
                    "Connection: close\r\n\r\n{}"
                ),
                status,
                body.len(),
                body
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });

    (format!("http://{}", addr), requests)
}

fn server_for(base: &str) -> HttpSimServer {
    HttpSimServer::new(&ServerConfig {
        step_url: format!("{}/step", base),
        reset_url: format!("{}/reset", base),
        timeout_ms: Some(5000),
    })
    .unwrap()
}

#[tokio::test]
async fn test_fetch_step_body() {
    let (base, requests) = stub_server(vec![(200, fixtures::SAMPLE_STEP_JSON.to_string())]).await;
    let server = server_for(&base);

    let body = server.fetch_step().await.unwrap();

    assert_eq!(body, fixtures::SAMPLE_STEP_JSON);
    assert_eq!(requests.lock().unwrap()[0], "GET /step HTTP/1.1");
}

#[tokio::test]
async fn test_reset_posts() {
    let (base, requests) = stub_server(vec![(200, r#"{"gameStatus":"reset"}"#.to_string())]).await;
    let server = server_for(&base);

    server.reset().await.unwrap();

    assert_eq!(requests.lock().unwrap()[0], "POST /reset HTTP/1.1");
}

#[tokio::test]
async fn test_error_status_is_reported() {
    let (base, _) = stub_server(vec![(500, "{}".to_string())]).await;
    let server = server_for(&base);

    let err = server.fetch_step().await.unwrap_err();

    assert!(matches!(err, ClientError::Status { status: 500, .. }));
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    // Bind then drop to get a port nothing listens on
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let server = server_for(&format!("http://{}", addr));

    let err = server.fetch_step().await.unwrap_err();

    assert!(matches!(err, ClientError::Network(_)));
}

#[tokio::test]
async fn test_reset_then_step_through_driver() {
    let (base, requests) = stub_server(vec![
        (200, r#"{"gameStatus":"reset"}"#.to_string()),
        (200, fixtures::SAMPLE_STEP_JSON.to_string()),
    ])
    .await;
    let server = server_for(&base);
    let mut scene = MemoryScene::new();
    let mut applier = SceneDiffApplier::<u64>::new(GridLayout::default(), 6);
    let mut driver = StepDriver::new();

    let (reset, advance) = driver.reset(&server, &mut applier, &mut scene).await;

    assert!(matches!(reset, ResetOutcome::Restored));
    assert!(matches!(advance, Some(AdvanceOutcome::Rendered(_))));
    assert_eq!(driver.step(), 1);
    assert_eq!(scene.count(Prefab::Fire), 5);
    assert_eq!(requests.lock().unwrap().len(), 2);
}
