use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, HeaderValue, StatusCode},
    routing::{get, post},
    Json, Router,
};
use parking_lot::RwLock;
use search_core::corpus::InputDoc;
use search_core::{DocId, Document, DocumentStatus, SearchEngine, SearchError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: String,
    pub status: Option<DocumentStatus>,
    pub min_rating: Option<i32>,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub took_s: f64,
    pub results: Vec<Document>,
}

#[derive(Deserialize)]
pub struct MatchParams {
    pub q: String,
}

#[derive(Serialize)]
pub struct MatchResponse {
    pub doc_id: DocId,
    pub words: Vec<String>,
    pub status: DocumentStatus,
}

#[derive(Serialize)]
pub struct StatsResponse {
    pub document_count: usize,
    pub max_results: usize,
}

const ADMIN_TOKEN_HEADER: &str = "X-ADMIN-TOKEN";

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<RwLock<SearchEngine>>,
    /// Required in `X-ADMIN-TOKEN` to add documents. `None` disables ingestion.
    pub admin_token: Option<String>,
    /// Origins allowed by CORS; empty allows any.
    pub cors_origins: Vec<HeaderValue>,
}

type ApiError = (StatusCode, String);

impl AppState {
    pub fn new(engine: SearchEngine, admin_token: Option<String>) -> Self {
        Self { engine: Arc::new(RwLock::new(engine)), admin_token, cors_origins: Vec::new() }
    }

    /// Restrict CORS to a comma-separated origin list. Blank entries and ones
    /// that are not valid header values are skipped.
    pub fn with_cors_origins(mut self, list: &str) -> Self {
        self.cors_origins = list.split(',').map(str::trim).filter(|s| !s.is_empty()).filter_map(|s| s.parse().ok()).collect();
        self
    }
}

/// Router over `engine`, configured from `ADMIN_TOKEN` and `CORS_ALLOW_ORIGIN`.
pub fn build_app(engine: SearchEngine) -> Router {
    let mut state = AppState::new(engine, std::env::var("ADMIN_TOKEN").ok());
    if let Ok(origins) = std::env::var("CORS_ALLOW_ORIGIN") {
        state = state.with_cors_origins(&origins);
    }
    router(state)
}

pub fn router(state: AppState) -> Router {
    let origins = if state.cors_origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(state.cors_origins.clone())
    };
    let cors = CorsLayer::new().allow_origin(origins).allow_methods(Any).allow_headers(Any);

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/stats", get(stats_handler))
        .route("/search", get(search_handler))
        .route("/match/:doc_id", get(match_handler))
        .route("/documents", post(add_document_handler))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub async fn search_handler(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Json<SearchResponse> {
    let start = std::time::Instant::now();
    let engine = state.engine.read();
    let results = match (params.status, params.min_rating) {
        (None, None) => engine.find_top_documents(&params.q),
        (Some(status), None) => engine.find_top_documents_by_status(&params.q, status),
        (status, Some(min)) => {
            let wanted = status.unwrap_or_default();
            engine.find_top_documents_with(&params.q, |_, s, rating| s == wanted && rating >= min)
        }
    };
    drop(engine);
    let elapsed = start.elapsed();
    tracing::debug!(query = %params.q, hits = results.len(), "search");
    Json(SearchResponse { query: params.q, took_s: elapsed.as_secs_f64(), results })
}

pub async fn match_handler(
    State(state): State<AppState>,
    Path(doc_id): Path<DocId>,
    Query(params): Query<MatchParams>,
) -> Result<Json<MatchResponse>, ApiError> {
    let (words, status) = state.engine.read().match_document(&params.q, doc_id).map_err(api_error)?;
    Ok(Json(MatchResponse { doc_id, words, status }))
}

pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let engine = state.engine.read();
    Json(StatsResponse { document_count: engine.document_count(), max_results: engine.config().max_results })
}

async fn add_document_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(doc): Json<InputDoc>,
) -> Result<StatusCode, ApiError> {
    authorize(&state, &headers)?;
    state
        .engine
        .write()
        .add_document(doc.id, &doc.text, doc.status, &doc.ratings)
        .map_err(api_error)?;
    tracing::info!(id = doc.id, "document added");
    Ok(StatusCode::CREATED)
}

fn api_error(err: SearchError) -> ApiError {
    let status = match err {
        SearchError::DocumentNotFound(_) => StatusCode::NOT_FOUND,
        SearchError::DuplicateDocument(_) => StatusCode::CONFLICT,
        SearchError::UnknownStatus(_) => StatusCode::BAD_REQUEST,
    };
    (status, err.to_string())
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), ApiError> {
    let Some(required) = state.admin_token.as_deref() else {
        return Err((StatusCode::FORBIDDEN, "document ingestion is disabled".into()));
    };
    match headers.get(ADMIN_TOKEN_HEADER) {
        Some(provided) if provided.as_bytes() == required.as_bytes() => Ok(()),
        Some(_) => Err((StatusCode::UNAUTHORIZED, "invalid admin token".into())),
        None => Err((StatusCode::UNAUTHORIZED, format!("missing {ADMIN_TOKEN_HEADER} header"))),
    }
}
