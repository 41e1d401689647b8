use std::{fs, path::PathBuf};

use actix_web::{
    body::to_bytes,
    http::StatusCode,
    test,
    web::{self, Data},
    App, HttpResponse, HttpServer,
};
use folio_render::{core::settings::Settings, server::configure};
use serde_json::Value;

const PROJECTS: &str = r##"[
    {"title": "A", "live": "https://a.io"},
    {"title": "B"},
    {"title": "<b>Bold</b>", "image": "#", "code": "github.com/me/bold"}
]"##;

const ACHIEVEMENTS: &str = r#"[
    {"title": "Hackathon", "type": "Award", "links": "https://hack.example.com"},
    {"title": "Certificate", "category": "Course"}
]"#;

fn scratch_dir() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("folio-render-{}", uuid::Uuid::new_v4()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn settings_for(data_root: &str) -> Settings {
    let mut settings = Settings::new();
    settings.data_root.value = data_root.to_string();
    settings
}

async fn get_body(settings: Settings, path: &str) -> (StatusCode, String) {
    let app = test::init_service(App::new().app_data(Data::new(settings)).configure(configure)).await;
    let req = test::TestRequest::get().uri(path).to_request();
    let resp = test::call_service(&app, req).await;
    let status = resp.status();
    let body = to_bytes(resp.into_body()).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[actix_web::test]
async fn projects_page_renders_cards_in_order() {
    let dir = scratch_dir();
    fs::write(dir.join("projects.json"), PROJECTS).unwrap();

    let (status, body) = get_body(settings_for(dir.to_str().unwrap()), "/pages/projects.html").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"<div id="projects-container" class="row g-4">"#));

    let a = body.find(r#"<h5 class="card-title">A</h5>"#).unwrap();
    let b = body.find(r#"<h5 class="card-title">B</h5>"#).unwrap();
    let bold = body.find(r#"<h5 class="card-title">&lt;b&gt;Bold&lt;/b&gt;</h5>"#).unwrap();
    assert!(a < b && b < bold);
    assert!(body.contains(r#"href="https://a.io" target="_blank" rel="noopener noreferrer">Live</a>"#));
    assert!(body.contains(r#"<button class="btn btn-sm btn-primary" disabled="disabled">Details</button>"#));
    assert!(body.contains(r#"href="https://github.com/me/bold""#));
    assert!(!body.contains("<img"));
    assert!(!body.contains("<b>"));

    fs::remove_dir_all(dir).unwrap();
}

#[actix_web::test]
async fn achievements_page_wraps_linked_cards() {
    let dir = scratch_dir();
    fs::write(dir.join("achievements.json"), ACHIEVEMENTS).unwrap();

    let (status, body) = get_body(settings_for(dir.to_str().unwrap()), "/achievements").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"<div id="achievements-container" class="row g-4">"#));
    assert!(body.contains(r#"href="https://hack.example.com""#));
    assert!(body.contains(r#"<span class="badge bg-secondary ms-2">Award</span>"#));
    assert!(body.contains(r#"<span class="badge bg-secondary ms-2">Course</span>"#));
    assert_eq!(body.matches("No link").count(), 1);

    fs::remove_dir_all(dir).unwrap();
}

#[actix_web::test]
async fn missing_data_file_renders_single_diagnostic() {
    let dir = scratch_dir();

    let (status, body) = get_body(settings_for(dir.to_str().unwrap()), "/projects").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.matches("Could not load data.").count(), 1);
    assert!(!body.contains("card-title"));

    fs::remove_dir_all(dir).unwrap();
}

#[actix_web::test]
async fn non_array_root_renders_single_diagnostic() {
    let dir = scratch_dir();
    fs::write(dir.join("projects.json"), r#"{"title": "A"}"#).unwrap();

    let (_, body) = get_body(settings_for(dir.to_str().unwrap()), "/projects").await;
    assert_eq!(body.matches("Could not load data.").count(), 1);
    assert!(!body.contains("card-title"));

    fs::remove_dir_all(dir).unwrap();
}

#[actix_web::test]
async fn unknown_pages_are_not_found() {
    let (status, body) = get_body(Settings::new(), "/pages/about.html").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "Not a projects or achievements page.");
}

#[actix_web::test]
async fn status_endpoint_reports_running() {
    let (status, body) = get_body(Settings::new(), "/v1/folio").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "folio is running");
}

#[actix_web::test]
async fn records_endpoint_returns_normalized_fields() {
    let dir = scratch_dir();
    fs::write(dir.join("projects.json"), PROJECTS).unwrap();

    let (status, body) = get_body(settings_for(dir.to_str().unwrap()), "/v1/records/projects").await;
    assert_eq!(status, StatusCode::OK);
    let records: Value = serde_json::from_str(&body).unwrap();
    let records = records.as_array().unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0]["title"], "A");
    assert_eq!(records[0]["primaryLink"], "https://a.io");
    assert_eq!(records[1]["secondaryLink"], Value::Null);
    assert_eq!(records[2]["image"], Value::Null);
    assert_eq!(records[2]["secondaryLink"], "https://github.com/me/bold");

    let (status, _) = get_body(settings_for(dir.to_str().unwrap()), "/v1/records/blog").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = get_body(settings_for(dir.to_str().unwrap()), "/v1/records/achievements").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);

    fs::remove_dir_all(dir).unwrap();
}

#[actix_web::test]
async fn remote_data_root_is_fetched_over_http() {
    let cdn = HttpServer::new(|| {
        App::new().route(
            "/data/projects.json",
            web::get().to(|| async {
                HttpResponse::Ok()
                    .content_type("application/json")
                    .body(PROJECTS)
            }),
        )
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .unwrap();
    let addr = cdn.addrs()[0];
    let cdn = cdn.run();
    let handle = cdn.handle();
    actix_web::rt::spawn(cdn);

    let root = format!("http://{}/data", addr);

    let (status, body) = get_body(settings_for(&root), "/projects").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.matches(r#"<article class="card h-100 shadow-sm">"#).count(), 3);

    // achievements.json is not served, so the CDN answers 404.
    let (status, body) = get_body(settings_for(&root), "/achievements").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.matches("Could not load data.").count(), 1);
    assert!(!body.contains("<article"));

    handle.stop(true).await;
}

#[actix_web::test]
async fn asset_requests_never_render_a_page() {
    let dir = scratch_dir();

    let (status, body) = get_body(
        settings_for(dir.to_str().unwrap()),
        "/assets/img/projects/banner.png",
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(!body.contains("<!DOCTYPE html>"));
    assert!(!body.contains("Could not load data."));

    let (status, body) = get_body(settings_for(dir.to_str().unwrap()), "/projects/logo.png").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "Not a projects or achievements page.");

    fs::remove_dir_all(dir).unwrap();
}

#[actix_web::test]
async fn linked_stylesheet_and_sample_image_are_served() {
    let (status, body) = get_body(Settings::new(), "/assets/css/site.css").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(".card"));

    let (status, body) = get_body(Settings::new(), "/assets/img/snake.svg").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<svg"));
}
