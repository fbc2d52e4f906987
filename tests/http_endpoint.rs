use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde_json::json;

use tool_time_server::config::ServerConfig;
use tool_time_server::tools::ToolRegistry;
use tool_time_server::types::ToolResponse;
use tool_time_server::{app, bind};

async fn spawn_server() -> String {
    let listener = bind(&ServerConfig { port: 0 }).await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, app(ToolRegistry::with_builtin_tools()))
            .await
            .unwrap();
    });
    format!("http://127.0.0.1:{port}/http")
}

#[tokio::test]
async fn serves_system_time_over_tcp() {
    let url = spawn_server().await;
    let client = reqwest::Client::new();

    let response = client
        .post(&url)
        .body(r#"{"tool":"get_system_time"}"#)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[reqwest::header::CONTENT_TYPE],
        "application/json"
    );
    let body: ToolResponse = response.json().await.unwrap();
    let time = DateTime::parse_from_rfc3339(&body.result).unwrap().with_timezone(&Utc);
    assert!(body.result.ends_with('Z'));
    assert!((Utc::now() - time).num_seconds().abs() <= 5);
}

#[tokio::test]
async fn error_statuses_over_tcp() {
    let url = spawn_server().await;
    let client = reqwest::Client::new();

    let response = client
        .post(&url)
        .json(&json!({"tool": "unknown_tool", "args": {}}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response.text().await.unwrap(), "Tool not found: unknown_tool");

    let response = client.post(&url).body("not json").send().await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.text().await.unwrap(), "Cannot unmarshal JSON");

    let response = client.get(&url).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.text().await.unwrap(), "Cannot unmarshal JSON");
}

#[tokio::test]
async fn large_bodies_are_accepted() {
    let url = spawn_server().await;
    let padding = "x".repeat(4 * 1024 * 1024);
    let request = json!({"tool": "get_system_time", "args": {"padding": padding}});

    let response = reqwest::Client::new()
        .post(&url)
        .json(&request)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn concurrent_requests_are_independent() {
    let url = spawn_server().await;
    let client = reqwest::Client::new();

    let mut handles = Vec::new();
    for i in 0..32 {
        let client = client.clone();
        let url = url.clone();
        handles.push(tokio::spawn(async move {
            let tool = if i % 2 == 0 { "get_system_time".to_string() } else { format!("tool_{i}") };
            let response = client
                .post(&url)
                .json(&json!({ "tool": tool }))
                .send()
                .await
                .unwrap();
            (tool, response.status(), response.text().await.unwrap())
        }));
    }

    for handle in handles {
        let (tool, status, body) = handle.await.unwrap();
        if tool == "get_system_time" {
            assert_eq!(status, StatusCode::OK);
            let body: ToolResponse = serde_json::from_str(&body).unwrap();
            assert!(body.result.ends_with('Z'));
        } else {
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(body, format!("Tool not found: {tool}"));
        }
    }
}

#[tokio::test]
async fn bind_failure_is_reported() {
    let listener = bind(&ServerConfig { port: 0 }).await.unwrap();
    let port = listener.local_addr().unwrap().port();

    let err = bind(&ServerConfig { port }).await.unwrap_err();
    assert!(err.to_string().contains(&format!("0.0.0.0:{port}")));
}
