//! Recommendation handler: turns a filled-in questionnaire into the top-N majors.
//!
//! The questionnaire arrives as question id -> chosen option value. The sheet must cover
//! every question; gaps are answered with 422 and the list of unanswered ids. Selection
//! of the top `top_n` results happens here, not in the engine.

use axum::extract::{Json, State};
use riasec_core::collect_answer_codes;
use std::collections::HashMap;
use uuid::Uuid;

use crate::{ApiError, AppState};

#[derive(Debug, serde::Deserialize)]
pub(crate) struct RecommendRequest {
    answers: HashMap<String, String>,
}

pub(crate) async fn recommend(
    State(state): State<AppState>,
    Json(req): Json<RecommendRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let kb = state.snapshot().await?;
    let codes = collect_answer_codes(kb.questions(), &req.answers)?;

    let request_id = Uuid::new_v4().to_string();
    let inference = state.orchestrator.infer(&kb, &codes);
    let top = inference.top(state.config.top_n);

    tracing::info!(
        target: "riasec::gateway",
        request_id = %request_id,
        profile = %inference.student_profile,
        best = top.first().map(|r| r.major.as_str()).unwrap_or("-"),
        "recommendation served"
    );

    Ok(Json(serde_json::json!({
        "request_id": request_id,
        "student_profile": inference.student_profile,
        "student_scores": inference.scores,
        "top": top,
    })))
}
