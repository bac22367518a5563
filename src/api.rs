use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::CorsLayer;

use crate::engine;
use crate::error::{ProviderError, ScoreError};
use crate::history::{History, HistoryEntry};
use crate::profiles::{registry, CategoryId};
use crate::provider::{extract_video_id, VideoProvider};
use crate::result::ScoreResult;
use crate::video::VideoRecord;

#[derive(Clone)]
pub struct AppState {
    history: Arc<History>,
    provider: Option<Arc<dyn VideoProvider + Send + Sync>>,
}

impl AppState {
    pub fn new(provider: Option<Arc<dyn VideoProvider + Send + Sync>>) -> Self {
        Self {
            history: Arc::new(History::with_capacity(2000)),
            provider,
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/analyze", post(analyze))
        .route("/analyze/url", post(analyze_url))
        .route("/categories", get(categories))
        .route("/debug/history", get(debug_history))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(serde::Deserialize)]
struct AnalyzeReq {
    category: String,
    video: VideoRecord,
}

#[derive(serde::Deserialize)]
struct AnalyzeUrlReq {
    category: String,
    url: String,
}

#[derive(serde::Serialize)]
struct CategoryInfo {
    id: &'static str,
    #[serde(rename = "displayName")]
    display_name: String,
}

type ApiError = (StatusCode, String);

async fn analyze(
    State(state): State<AppState>,
    Json(body): Json<AnalyzeReq>,
) -> Result<Json<ScoreResult>, ApiError> {
    let result = engine::analyze_for(&body.video, &body.category).map_err(bad_category)?;

    let id: CategoryId = body.category.parse().expect("validated above");
    state
        .history
        .push(&body.video.video_id, &body.video.title, id, &result);
    Ok(Json(result))
}

async fn analyze_url(
    State(state): State<AppState>,
    Json(body): Json<AnalyzeUrlReq>,
) -> Result<Json<ScoreResult>, ApiError> {
    // Validate the category before spending a provider call.
    let id: CategoryId = body.category.parse().map_err(bad_category)?;

    let provider = state.provider.as_ref().ok_or((
        StatusCode::SERVICE_UNAVAILABLE,
        "no video provider configured (set YOUTUBE_API_KEY)".to_string(),
    ))?;

    let video_id = extract_video_id(&body.url).ok_or((
        StatusCode::BAD_REQUEST,
        format!("`{}` is not a video URL or id", body.url),
    ))?;

    let video = provider
        .fetch_video(&video_id)
        .await
        .map_err(provider_status)?;

    let result = engine::analyze(&video, id);
    state.history.push(&video.video_id, &video.title, id, &result);
    Ok(Json(result))
}

async fn categories() -> Json<Vec<CategoryInfo>> {
    let reg = registry();
    Json(
        CategoryId::ALL
            .iter()
            .map(|id| CategoryInfo {
                id: id.as_str(),
                display_name: reg.profile(*id).display_name.clone(),
            })
            .collect(),
    )
}

#[derive(serde::Deserialize)]
struct HistoryQuery {
    #[serde(default = "default_history_n")]
    n: usize,
}

fn default_history_n() -> usize {
    20
}

async fn debug_history(
    State(state): State<AppState>,
    Query(q): Query<HistoryQuery>,
) -> Json<Vec<HistoryEntry>> {
    Json(state.history.snapshot_last_n(q.n.min(200)))
}

fn bad_category(e: ScoreError) -> ApiError {
    (StatusCode::BAD_REQUEST, e.to_string())
}

fn provider_status(e: ProviderError) -> ApiError {
    let status = match &e {
        ProviderError::NotFound(_) => StatusCode::NOT_FOUND,
        ProviderError::Auth => StatusCode::UNAUTHORIZED,
        ProviderError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
        ProviderError::Transient(_) => StatusCode::BAD_GATEWAY,
    };
    (status, e.to_string())
}
