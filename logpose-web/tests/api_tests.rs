//! Integration tests for logpose-web API endpoints
//!
//! Each test builds a throwaway content root in a temp directory and drives
//! the router directly with `oneshot`.

use std::fs;
use std::path::Path;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use logpose_common::config::Config;
use logpose_web::{build_router, AppState};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::util::ServiceExt; // for `oneshot` method

/// Test helper: write a file, creating parent directories
fn write(path: &Path, body: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, body).unwrap();
}

/// Test helper: content root with episodes, overrides, journey and progress
fn setup_root() -> TempDir {
    let root = tempfile::tempdir().unwrap();
    let episodes = root.path().join("public/episode");

    write(&episodes.join("1.yaml"), "id: 1\ntitle: Romance Dawn\ndescription: Luffy sets out\n");
    write(
        &episodes.join("2.yaml"),
        "id: 2\ntitle: The Great Swordsman Appears\n",
    );
    write(&episodes.join("5.yaml"), "id: 5\ntitle: Top-level five\n");
    write(&episodes.join("9.yaml"), "id: 9\ntitle: The Honorable Liar\n");
    write(&episodes.join("broken.yaml"), "id: [oops\n");
    write(
        &episodes.join("kill/5.yaml"),
        "episode: 5\ntitle: Override five\nfocal_points: Captain Buggy\n",
    );
    write(
        &episodes.join("kill/2-analysis.md"),
        r#"# Episode 2 analysis

```yaml
episode: 2
title: Enter the Great Swordsman
synopsis:
  - Zoro is tied to a post
focal_points: Roronoa Zoro, Monkey D. Luffy
pivotal_beats:
  - title: The rice ball
    what_was_said: It tastes awful.
    why_this_matters: Shows Zoro's honor.
    subtext: Kindness repaid.
```
"#,
    );

    write(
        &root.path().join("data/journey.yaml"),
        r#"- type: Episode
  title: Started watching
  description: Episode 1
  date: 2024-01-01
  mood: hyped
- type: Manga
  title: Volume 1
  description: ""
  date: 2024-03-15
- type: Note
  title: Break
  description: Busy week
  date: 2024-01-10
"#,
    );

    write(
        &root.path().join("data/progress.yaml"),
        r#"watched: [1, 2, 3]
summaries:
  - start: 4
    end: 10
read:
  - start: 8
    end: 12
"#,
    );

    root
}

/// Test helper: router over the given content root
fn setup_app(root: &Path) -> axum::Router {
    let mut config = Config::with_root(root);
    config.total_episodes = 20;
    build_router(AppState::new(config))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Test helper: Extract JSON body from response
async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

fn record_number(record: &Value) -> u64 {
    record["episode"]
        .as_u64()
        .or_else(|| record["id"].as_u64())
        .expect("record has a number")
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let root = setup_root();
    let response = setup_app(root.path()).oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "logpose-web");
    assert_eq!(body["episodes_available"], true);
}

#[tokio::test]
async fn test_health_degraded_without_episodes() {
    let root = tempfile::tempdir().unwrap();
    let response = setup_app(root.path()).oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "degraded");
}

#[tokio::test]
async fn test_build_info() {
    let root = setup_root();
    let response = setup_app(root.path())
        .oneshot(get("/api/buildinfo"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert!(body["version"].is_string());
    assert!(body["git_hash"].is_string());
}

// =============================================================================
// Episodes
// =============================================================================

#[tokio::test]
async fn test_episodes_sorted_and_unique() {
    let root = setup_root();
    let response = setup_app(root.path())
        .oneshot(get("/api/episodes"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    let numbers: Vec<u64> = body.as_array().unwrap().iter().map(record_number).collect();

    // broken.yaml is skipped; 2 and 5 appear once despite overrides
    assert_eq!(numbers, vec![1, 2, 5, 9]);
}

#[tokio::test]
async fn test_episodes_override_precedence() {
    let root = setup_root();
    let response = setup_app(root.path())
        .oneshot(get("/api/episodes"))
        .await
        .unwrap();

    let body = extract_json(response.into_body()).await;
    let episodes = body.as_array().unwrap();

    let five = episodes.iter().find(|e| record_number(e) == 5).unwrap();
    assert_eq!(five["title"], "Override five");

    let two = episodes.iter().find(|e| record_number(e) == 2).unwrap();
    assert_eq!(two["title"], "Enter the Great Swordsman");
    assert_eq!(two["pivotal_beats"][0]["title"], "The rice ball");
}

#[tokio::test]
async fn test_episodes_missing_directory_is_500() {
    let root = tempfile::tempdir().unwrap();
    let response = setup_app(root.path())
        .oneshot(get("/api/episodes"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"], "Failed to load episodes");
}

#[tokio::test]
async fn test_episode_analysis_returns_requested_id() {
    let root = setup_root();
    for id in [1u64, 2, 5, 9] {
        let response = setup_app(root.path())
            .oneshot(get(&format!("/api/episode-analysis/{}", id)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = extract_json(response.into_body()).await;
        assert_eq!(record_number(&body), id);
    }
}

#[tokio::test]
async fn test_episode_analysis_keeps_extra_fields() {
    let root = setup_root();
    let response = setup_app(root.path())
        .oneshot(get("/api/episode-analysis/1"))
        .await
        .unwrap();

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["description"], "Luffy sets out");
}

#[tokio::test]
async fn test_episode_analysis_missing_is_404() {
    let root = setup_root();
    for uri in ["/api/episode-analysis/404", "/api/episode-analysis/not-a-number"] {
        let response = setup_app(root.path()).oneshot(get(uri)).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = extract_json(response.into_body()).await;
        assert!(!body["error"].as_str().unwrap().is_empty());
    }
}

#[tokio::test]
async fn test_episode_search() {
    let root = setup_root();
    let response = setup_app(root.path())
        .oneshot(get("/api/episodes/search?q=swordsman"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["query"], "swordsman");
    assert_eq!(body["episodes"], json!([2]));

    let response = setup_app(root.path())
        .oneshot(get("/api/episodes/search?q=kindness"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["episodes"], json!([2]));
}

// =============================================================================
// Journey & progress
// =============================================================================

#[tokio::test]
async fn test_journey_as_stored() {
    let root = setup_root();
    let response = setup_app(root.path())
        .oneshot(get("/api/journey"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0]["type"], "Episode");
    assert_eq!(entries[1]["title"], "Volume 1");
    assert_eq!(entries[0]["mood"], "hyped");
    assert!(entries.iter().all(|e| e["type"] != "Gap"));
}

#[tokio::test]
async fn test_journey_timeline_inserts_gap() {
    let root = setup_root();
    let response = setup_app(root.path())
        .oneshot(get("/api/journey/timeline"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    let types: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["type"].as_str().unwrap())
        .collect();
    assert_eq!(types, vec!["Episode", "Note", "Gap", "Manga"]);
    assert_eq!(body[2]["days"], 65);
    assert_eq!(body[0]["mood"], "hyped");
}

#[tokio::test]
async fn test_journey_missing_file_is_500() {
    let root = tempfile::tempdir().unwrap();
    let response = setup_app(root.path())
        .oneshot(get("/api/journey"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"], "Failed to load journey data");
}

#[tokio::test]
async fn test_journey_entry_without_date_is_500() {
    let root = tempfile::tempdir().unwrap();
    write(
        &root.path().join("data/journey.yaml"),
        "- type: Note\n  title: Undated\n",
    );
    let response = setup_app(root.path())
        .oneshot(get("/api/journey"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"], "Failed to load journey data");
}

#[tokio::test]
async fn test_progress_record() {
    let root = setup_root();
    let response = setup_app(root.path())
        .oneshot(get("/api/progress"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["watched"], json!([1, 2, 3]));
    assert_eq!(body["summaries"][0], json!({"start": 4, "end": 10}));
}

#[tokio::test]
async fn test_progress_grid() {
    let root = setup_root();
    let response = setup_app(root.path())
        .oneshot(get("/api/progress/grid"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["total"], 20);
    assert_eq!(
        body["counts"],
        json!({"watched": 3, "read": 5, "summary": 4, "unwatched": 8})
    );
    assert_eq!(body["statuses"][0], "watched");
    assert_eq!(body["statuses"][7], "read");
    assert_eq!(body["statuses"][3], "summary");
    assert_eq!(body["statuses"][19], "unwatched");
}

// =============================================================================
// Mega prompt
// =============================================================================

#[tokio::test]
async fn test_mega_prompt_episode_one() {
    let root = setup_root();
    let response = setup_app(root.path())
        .oneshot(post_json(
            "/api/mega-prompt",
            json!({"prompt": "Analyze deeply", "input": "ACTION: episode 1"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    let output = body["output"].as_str().unwrap();

    assert!(output.contains("### Episode 1 –"));
    assert!(output.contains("\"Romance Dawn\""));
    assert!(output.contains("1. **Luffy's Introduction**"));
    assert!(output.contains("2. **Devil Fruit Powers Revealed**"));
    assert!(output.contains("3. **First Battle Display**"));
    assert!(!output.contains("4. **"));
    assert!(output.contains("**Focal Points:** Monkey D. Luffy\n"));
}

#[tokio::test]
async fn test_mega_prompt_malformed_input_is_400() {
    let root = setup_root();
    let response = setup_app(root.path())
        .oneshot(post_json(
            "/api/mega-prompt",
            json!({"prompt": "", "input": "ACTION: episode 1.5"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = extract_json(response.into_body()).await;
    assert!(body["error"].as_str().unwrap().contains("ACTION: episode <N>"));
}

#[tokio::test]
async fn test_mega_prompt_missing_input_is_400() {
    let root = setup_root();
    let response = setup_app(root.path())
        .oneshot(post_json("/api/mega-prompt", json!({"prompt": "hi"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = extract_json(response.into_body()).await;
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_mega_prompt_missing_episode_is_404() {
    let root = setup_root();
    let response = setup_app(root.path())
        .oneshot(post_json(
            "/api/mega-prompt",
            json!({"input": "ACTION: episode 77"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"], "Episode 77 not found");
}

// =============================================================================
// Static files
// =============================================================================

#[tokio::test]
async fn test_static_fallback_serves_public() {
    let root = setup_root();
    write(&root.path().join("public/index.html"), "<h1>Log Pose</h1>");

    let response = setup_app(root.path())
        .oneshot(get("/index.html"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"<h1>Log Pose</h1>");
}
