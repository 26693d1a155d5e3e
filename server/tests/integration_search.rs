use axum::body::{Body, Bytes};
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use search_core::corpus::load_corpus;
use search_core::SearchEngine;
use search_server::{router, AppState};
use serde_json::Value;
use std::fs;
use tempfile::tempdir;
use tower::ServiceExt;

const CORPUS: &str = r#"{"id": 0, "text": "белый кот и модный ошейник", "ratings": [8, -3]}
{"id": 1, "text": "пушистый кот пушистый хвост", "ratings": [7, 2, 7]}
{"id": 2, "text": "ухоженный пёс выразительные глаза", "ratings": [5, -12, 2, 1]}
{"id": 3, "text": "ухоженный скворец евгений", "status": "banned", "ratings": [9]}
"#;

fn sample_app() -> Router {
    let dir = tempdir().unwrap();
    let file = dir.path().join("corpus.jsonl");
    fs::write(&file, CORPUS).unwrap();
    let mut engine = SearchEngine::new();
    engine.set_stop_words("и в на");
    engine.ingest(load_corpus(&file).unwrap()).unwrap();
    router(AppState::new(engine, Some("secret".into())))
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, Bytes) {
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let body = resp.into_body().collect().await.unwrap().to_bytes();
    (status, body)
}

async fn get(app: Router, uri: &str) -> (StatusCode, Bytes) {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

fn result_ids(body: &Bytes) -> Vec<u64> {
    let json: Value = serde_json::from_slice(body).unwrap();
    json["results"].as_array().unwrap().iter().map(|d| d["id"].as_u64().unwrap()).collect()
}

fn post_document(token: &str, body: &str) -> Request<Body> {
    Request::post("/documents")
        .header("content-type", "application/json")
        .header("X-ADMIN-TOKEN", token)
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn search_returns_ranked_results() {
    let (status, body) = get(sample_app(), "/search?q=%D0%BF%D1%83%D1%88%D0%B8%D1%81%D1%82%D1%8B%D0%B9%20%D1%83%D1%85%D0%BE%D0%B6%D0%B5%D0%BD%D0%BD%D1%8B%D0%B9%20%D0%BA%D0%BE%D1%82").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result_ids(&body), vec![1, 0, 2]);
}

#[tokio::test]
async fn search_filters_by_status_and_rating() {
    let q = "%D1%83%D1%85%D0%BE%D0%B6%D0%B5%D0%BD%D0%BD%D1%8B%D0%B9"; // ухоженный
    let (_, body) = get(sample_app(), &format!("/search?q={q}&status=banned")).await;
    assert_eq!(result_ids(&body), vec![3]);
    let (_, body) = get(sample_app(), &format!("/search?q={q}&min_rating=0")).await;
    assert!(result_ids(&body).is_empty());
    let (_, body) = get(sample_app(), &format!("/search?q={q}&min_rating=-5")).await;
    assert_eq!(result_ids(&body), vec![2]);
}

#[tokio::test]
async fn match_reports_words_and_missing_documents() {
    let q = "%D0%BA%D0%BE%D1%82%20%D1%85%D0%B2%D0%BE%D1%81%D1%82"; // кот хвост
    let (status, body) = get(sample_app(), &format!("/match/1?q={q}")).await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["words"], serde_json::json!(["кот", "хвост"]));
    assert_eq!(json["status"], "actual");

    let (status, _) = get(sample_app(), &format!("/match/9?q={q}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn adding_documents_requires_token_and_unique_id() {
    let app = sample_app();
    let doc = r#"{"id": 7, "text": "рыжий кот", "ratings": [4]}"#;

    let (status, _) = send(app.clone(), post_document("wrong", doc)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(app.clone(), post_document("secret", doc)).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(app.clone(), post_document("secret", doc)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, body) = get(app, "/stats").await;
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["document_count"], 5);
}

#[tokio::test]
async fn stats_report_count_and_result_limit() {
    let (status, body) = get(sample_app(), "/stats").await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["document_count"], 4);
    assert_eq!(json["max_results"], 5);
}

#[tokio::test]
async fn ingestion_needs_configured_token_and_header() {
    let doc = r#"{"id": 8, "text": "кот"}"#;
    let req = Request::post("/documents").header("content-type", "application/json").body(Body::from(doc)).unwrap();
    let (status, _) = send(sample_app(), req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let disabled = router(AppState::new(SearchEngine::new(), None));
    let (status, _) = send(disabled, post_document("secret", doc)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

fn with_origin(origin: &str) -> Request<Body> {
    Request::get("/health").header("origin", origin).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn cors_allows_configured_origins_only() {
    let state = AppState::new(SearchEngine::new(), None).with_cors_origins("https://a.example, https://b.example,");
    let app = router(state);

    let resp = app.clone().oneshot(with_origin("https://b.example")).await.unwrap();
    assert_eq!(resp.headers()["access-control-allow-origin"], "https://b.example");

    let resp = app.oneshot(with_origin("https://evil.example")).await.unwrap();
    assert!(resp.headers().get("access-control-allow-origin").is_none());

    let open = router(AppState::new(SearchEngine::new(), None));
    let resp = open.oneshot(with_origin("https://evil.example")).await.unwrap();
    assert_eq!(resp.headers()["access-control-allow-origin"], "*");
}
