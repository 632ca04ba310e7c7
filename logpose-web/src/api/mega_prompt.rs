//! Mega-prompt endpoint

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use logpose_common::mega_prompt::{self, AnalysisDepth};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{ApiError, ApiResult};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct MegaPromptRequest {
    /// Prompt text from the client; the generator does not use it
    #[serde(default)]
    pub prompt: Option<String>,
    /// `ACTION: episode <N>`
    pub input: String,
}

#[derive(Debug, Serialize)]
pub struct MegaPromptResponse {
    pub output: String,
}

/// POST /api/mega-prompt
pub async fn run_mega_prompt(
    State(state): State<AppState>,
    body: Result<Json<MegaPromptRequest>, JsonRejection>,
) -> ApiResult<Json<MegaPromptResponse>> {
    let Json(request) = body.map_err(|rejection| {
        ApiError::BadRequest(format!("Invalid request body: {}", rejection.body_text()))
    })?;

    debug!(
        "Mega prompt request ({} prompt chars)",
        request.prompt.as_deref().map_or(0, str::len)
    );

    let number = mega_prompt::parse_action(&request.input)
        .map_err(|e| ApiError::from_common(e, "Failed to process mega prompt"))?;

    let output = mega_prompt::generate_for(&state.store, number, AnalysisDepth::Standard)
        .await
        .map_err(|e| ApiError::from_common(e, "Failed to process mega prompt"))?;

    info!("Generated mega prompt analysis for episode {}", number);
    Ok(Json(MegaPromptResponse { output }))
}
