//! Axum-based JSON gateway over riasec-core. Config-driven via CoreConfig.

mod handlers;

use axum::{
    extract::{Json, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use riasec_core::{
    AnswerError, CoreConfig, Inference, KnowledgeBase, KnowledgeCache, KnowledgeError,
    Orchestrator,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("[riasec-gateway] .env not loaded: {} (using system environment)", e);
    }

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Arc::new(CoreConfig::load().expect("load CoreConfig"));
    let knowledge = Arc::new(KnowledgeCache::new(
        Arc::new(config.directory_source()),
        config.duplicate_majors,
    ));

    // Refuse to start on tables that do not load.
    match knowledge.snapshot() {
        Ok(kb) => tracing::info!(
            target: "riasec::gateway",
            data_dir = %config.data_dir,
            questions = kb.questions().len(),
            majors = kb.majors().len(),
            "knowledge base ready"
        ),
        Err(e) => {
            tracing::error!(target: "riasec::gateway", error = %e, "knowledge base failed to load");
            std::process::exit(1);
        }
    }

    let orchestrator = Arc::new(Orchestrator::with_policy(config.match_policy()));
    let app = build_app(AppState {
        config: Arc::clone(&config),
        knowledge,
        orchestrator,
    });

    let addr = std::net::SocketAddr::from(([127, 0, 0, 1], config.port));
    tracing::info!("{} listening on {}", config.app_name, addr);
    axum::serve(
        tokio::net::TcpListener::bind(addr).await.expect("bind gateway port"),
        app,
    )
    .await
    .expect("serve gateway");
}

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) config: Arc<CoreConfig>,
    pub(crate) knowledge: Arc<KnowledgeCache>,
    pub(crate) orchestrator: Arc<Orchestrator>,
}

impl AppState {
    /// Current knowledge snapshot, rebuilt if the tables changed on disk. Table reads run
    /// on the blocking pool.
    pub(crate) async fn snapshot(&self) -> Result<Arc<KnowledgeBase>, ApiError> {
        let knowledge = Arc::clone(&self.knowledge);
        tokio::task::spawn_blocking(move || knowledge.snapshot())
            .await
            .map_err(|e| {
                ApiError::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("knowledge snapshot task failed: {e}"),
                )
            })?
            .map_err(ApiError::from)
    }
}

/// JSON error body with an HTTP status.
#[derive(Debug)]
pub(crate) struct ApiError {
    status: StatusCode,
    body: serde_json::Value,
}

impl ApiError {
    pub(crate) fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            body: serde_json::json!({ "status": "error", "error": message.into() }),
        }
    }

    pub(crate) fn with_detail(mut self, key: &str, value: serde_json::Value) -> Self {
        self.body[key] = value;
        self
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<KnowledgeError> for ApiError {
    fn from(e: KnowledgeError) -> Self {
        tracing::error!(target: "riasec::gateway", error = %e, "knowledge snapshot unavailable");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    }
}

impl From<AnswerError> for ApiError {
    fn from(e: AnswerError) -> Self {
        let message = e.to_string();
        match e {
            AnswerError::Incomplete { missing, total } => {
                Self::new(StatusCode::UNPROCESSABLE_ENTITY, message)
                    .with_detail("missing", serde_json::json!(missing))
                    .with_detail("total", serde_json::json!(total))
            }
        }
    }
}

fn build_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .route("/v1/status", get(status))
        .route("/v1/questions", get(questions))
        .route("/v1/dashboard", get(dashboard))
        .route("/v1/recommend", post(handlers::recommend))
        .route("/v1/infer", post(infer))
        .layer(cors)
        .with_state(state)
}

async fn status(State(state): State<AppState>) -> Result<Json<serde_json::Value>, ApiError> {
    let kb = state.snapshot().await?;
    Ok(Json(serde_json::json!({
        "app_name": state.config.app_name,
        "content_hash": kb.content_hash(),
        "questions": kb.questions().len(),
        "rules": kb.rules().len(),
        "majors": kb.majors().len(),
        "top_n": state.config.top_n,
    })))
}

async fn questions(State(state): State<AppState>) -> Result<Json<serde_json::Value>, ApiError> {
    let kb = state.snapshot().await?;
    Ok(Json(serde_json::json!({ "questions": kb.questions() })))
}

/// Chart data: how many majors are dominated by each dimension.
async fn dashboard(State(state): State<AppState>) -> Result<Json<serde_json::Value>, ApiError> {
    let kb = state.snapshot().await?;
    Ok(Json(serde_json::json!({ "chart_data": kb.dominant_distribution() })))
}

#[derive(serde::Deserialize)]
struct InferRequest {
    codes: Vec<String>,
}

/// Raw engine boundary: answer codes in, full ranking out.
async fn infer(
    State(state): State<AppState>,
    Json(req): Json<InferRequest>,
) -> Result<Json<Inference>, ApiError> {
    let kb = state.snapshot().await?;
    Ok(Json(state.orchestrator.infer(&kb, &req.codes)))
}
