//! End-to-end probe tests against a local canned-response HTTP listener.

use model_probe::config::ProbeConfig;
use model_probe::genai::GenaiClient;
use model_probe::prober::{probe_all, ERROR_PREVIEW_LEN};
use model_probe::report::summarize;
use std::net::SocketAddr;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

fn test_config(base_url: String, models: &[&str]) -> ProbeConfig {
    ProbeConfig {
        api_key: "test-key".to_string(),
        base_url,
        api_version: "v1".to_string(),
        models: models.iter().map(|m| m.to_string()).collect(),
        prompt: "Create a simple red circle".to_string(),
    }
}

async fn read_request_head(socket: &mut TcpStream) -> String {
    let mut data = Vec::new();
    let mut buf = [0u8; 1024];
    loop {
        match socket.read(&mut buf).await {
            Ok(0) => break,
            Ok(n) => {
                data.extend_from_slice(&buf[..n]);
                if data.windows(4).any(|window| window == b"\r\n\r\n") {
                    break;
                }
            }
            Err(_) => break,
        }
    }
    String::from_utf8_lossy(&data).to_string()
}

async fn write_response(socket: &mut TcpStream, status: &str, body: &str) {
    let response = format!(
        "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );
    let _ = socket.write_all(response.as_bytes()).await;
    let _ = socket.shutdown().await;
}

/// Serve canned generate-content responses, routed by the model id in the
/// request path, until the test ends.
async fn spawn_probe_endpoint() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            tokio::spawn(async move {
                let head = read_request_head(&mut socket).await;
                let (status, body) = if head.contains("m-ok") {
                    (
                        "200 OK",
                        r#"{"candidates":[{"content":{"parts":[{"text":"a red circle"}],"role":"model"},"finishReason":"STOP"}]}"#,
                    )
                } else if head.contains("m-image") {
                    (
                        "200 OK",
                        r#"{"candidates":[{"content":{"parts":[{"inlineData":{"mimeType":"image/png","data":"aGVsbG8="}}],"role":"model"}}]}"#,
                    )
                } else if head.contains("m-empty") {
                    ("200 OK", r#"{"candidates":[]}"#)
                } else {
                    (
                        "404 Not Found",
                        r#"{"error":{"code":404,"message":"model not found"}}"#,
                    )
                };
                write_response(&mut socket, status, body).await;
            });
        }
    });

    addr
}

/// An address nothing listens on, so connects are refused.
async fn unused_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

#[tokio::test]
async fn probe_all_classifies_mixed_models_in_order() {
    let addr = spawn_probe_endpoint().await;
    let config = test_config(
        format!("http://{}", addr),
        &["m-ok", "m-image", "m-empty", "m-missing"],
    );
    let client = GenaiClient::new(&config).unwrap();

    let results = probe_all(&client, &config.models, &config.prompt).await;

    assert_eq!(results.len(), 4);
    let models: Vec<_> = results.iter().map(|r| r.model.as_str()).collect();
    assert_eq!(models, ["m-ok", "m-image", "m-empty", "m-missing"]);

    assert!(results[0].success);
    assert!(results[0].has_text);
    assert!(!results[0].has_image);
    assert!(results[0].error.is_none());

    assert!(results[1].success);
    assert!(!results[1].has_text);
    assert!(results[1].has_image);

    assert!(!results[2].success);
    assert_eq!(results[2].error.as_deref(), Some("empty response"));

    assert!(!results[3].success);
    let error = results[3].error.as_ref().unwrap();
    assert!(error.contains("404"), "error was: {error}");
    assert!(error.contains("model not found"), "error was: {error}");
}

#[tokio::test]
async fn summarize_partitions_probe_results() {
    let addr = spawn_probe_endpoint().await;
    let config = test_config(format!("http://{}", addr), &["m-ok", "m-empty", "m-missing"]);
    let client = GenaiClient::new(&config).unwrap();

    let results = probe_all(&client, &config.models, &config.prompt).await;
    let report = summarize(&results);

    let available: Vec<_> = report.available.iter().map(|r| r.model.as_str()).collect();
    let unavailable: Vec<_> = report
        .unavailable
        .iter()
        .map(|r| r.model.as_str())
        .collect();
    assert_eq!(available, ["m-ok"]);
    assert_eq!(unavailable, ["m-empty", "m-missing"]);
    assert_eq!(report.total(), results.len());
}

#[tokio::test]
async fn probe_all_survives_unreachable_endpoint() {
    let addr = unused_addr().await;
    let config = test_config(format!("http://{}", addr), &["m-a", "m-b", "m-c"]);
    let client = GenaiClient::new(&config).unwrap();

    let results = probe_all(&client, &config.models, &config.prompt).await;

    assert_eq!(results.len(), 3);
    let models: Vec<_> = results.iter().map(|r| r.model.as_str()).collect();
    assert_eq!(models, ["m-a", "m-b", "m-c"]);
    for result in &results {
        assert!(!result.success);
        assert!(!result.has_text);
        assert!(!result.has_image);
        let error = result.error.as_ref().expect("failure must carry an error");
        assert!(!error.is_empty());
        assert!(error.len() <= ERROR_PREVIEW_LEN);
    }
}
