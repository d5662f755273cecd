use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use lan_file_share::config::AppConfig;
use lan_file_share::infrastructure::storage::setup_storage;
use lan_file_share::{AppState, create_app};
use serde_json::Value;
use tower::ServiceExt;

async fn setup() -> (tempfile::TempDir, AppConfig, Router) {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig {
        storage_dir: dir.path().join("uploads"),
        public_dir: dir.path().join("public"),
        styling_dir: dir.path().join("styling"),
        ..AppConfig::development()
    };
    let storage = setup_storage(&config).await.unwrap();
    let app = create_app(AppState::new(storage, config.clone()));
    (dir, config, app)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, body.to_vec())
}

#[tokio::test]
async fn test_listing_classifies_reference_directory() {
    let (_dir, config, app) = setup().await;
    for name in ["report.pdf", "photo.png", "notes.docx", "deck.pptx", "archive.zip"] {
        tokio::fs::write(config.storage_dir.join(name), b"data")
            .await
            .unwrap();
    }

    let (status, body) = get(&app, "/api/files").await;
    assert_eq!(status, StatusCode::OK);

    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(
        json["stats"],
        serde_json::json!({
            "total": 5, "images": 1, "pdf": 1, "word": 1, "ppt": 1, "others": 1
        })
    );

    let files = json["files"].as_array().unwrap();
    let category = |name: &str| {
        files
            .iter()
            .find(|f| f["name"] == name)
            .map(|f| f["category"].as_str().unwrap().to_string())
            .unwrap()
    };
    assert_eq!(category("report.pdf"), "pdf");
    assert_eq!(category("photo.png"), "image");
    assert_eq!(category("notes.docx"), "document");
    assert_eq!(category("deck.pptx"), "presentation");
    assert_eq!(category("archive.zip"), "zip");

    let (status, body) = get(&app, "/files").await;
    assert_eq!(status, StatusCode::OK);
    let html = String::from_utf8(body).unwrap();
    // Card badges are <p> elements; sidebar rows reuse some labels inside <span>
    let badges = [
        ("PDF", "bg-red-500"),
        ("Image", "bg-blue-500"),
        ("Document", "bg-blue-500"),
        ("PPT", "bg-teal-500"),
        ("ZIP", "bg-yellow-500"),
    ];
    for (label, color) in badges {
        let badge = format!("<p class=\"text-white font-bold\">{}</p>", label);
        assert_eq!(html.matches(&badge).count(), 1, "missing badge {}", label);
        assert!(
            html.contains(&format!("p-1 {} flex items-center", color)),
            "missing badge color {}",
            color
        );
    }
    assert_eq!(
        html.matches("<p class=\"text-white font-bold\">").count(),
        badges.len()
    );
    assert!(html.contains("conic-gradient("));
}

#[tokio::test]
async fn test_listing_ignores_staging_and_subdirectories() {
    let (_dir, config, app) = setup().await;
    tokio::fs::create_dir(config.storage_dir.join("folder"))
        .await
        .unwrap();
    tokio::fs::write(config.storage_dir.join("main.cpp"), b"int main() {}")
        .await
        .unwrap();

    let (_, body) = get(&app, "/api/files").await;
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["stats"]["total"], 1);
    assert_eq!(json["files"][0]["name"], "main.cpp");
    assert_eq!(json["files"][0]["size_bytes"], 13);
}

#[tokio::test]
async fn test_unreadable_storage_returns_plain_text_500() {
    let (_dir, config, app) = setup().await;
    tokio::fs::remove_dir_all(&config.storage_dir).await.unwrap();

    let (status, body) = get(&app, "/files").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(String::from_utf8(body)
        .unwrap()
        .starts_with("Unable to scan directory"));

    let (status, _) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_download_serves_stored_bytes() {
    let (_dir, config, app) = setup().await;
    tokio::fs::write(config.storage_dir.join("my notes.txt"), b"hello there")
        .await
        .unwrap();

    let (status, body) = get(&app, "/uploads/my%20notes.txt").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"hello there");

    let (status, _) = get(&app, "/uploads/missing.txt").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = get(&app, "/uploads/.staging").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_static_assets_served_from_document_root() {
    let (_dir, config, app) = setup().await;
    tokio::fs::create_dir_all(&config.public_dir).await.unwrap();
    tokio::fs::create_dir_all(&config.styling_dir).await.unwrap();
    tokio::fs::write(config.public_dir.join("index.html"), b"<h1>upload</h1>")
        .await
        .unwrap();
    tokio::fs::write(config.styling_dir.join("style.css"), b"body {}")
        .await
        .unwrap();

    let (status, body) = get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"<h1>upload</h1>");

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/style.css")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .get(header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("text/css"));
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let (_dir, _config, app) = setup().await;
    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .header("x-request-id", "trace-me")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.headers().get("x-request-id").unwrap(), "trace-me");
}
