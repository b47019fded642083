//! Voice Handlers

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::ListVoices;
use crate::infrastructure::http::dto::{ApiResponse, VoiceListResponseDto};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 当前平台音色列表（含默认音色与所选音色）
pub async fn list_voices(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<VoiceListResponseDto>>, ApiError> {
    let list = state.list_voices_handler.handle(ListVoices).await?;
    Ok(Json(ApiResponse::success(VoiceListResponseDto::from(list))))
}
