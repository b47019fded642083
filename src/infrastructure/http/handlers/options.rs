//! Options Handler

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::GetOptions;
use crate::infrastructure::http::dto::{ApiResponse, OptionsResponseDto};
use crate::infrastructure::http::state::AppState;

/// 选择器选项（语速，扩展面板另含音量与音调）
pub async fn get_options(State(state): State<Arc<AppState>>) -> Json<ApiResponse<OptionsResponseDto>> {
    let options = state.get_options_handler.handle(GetOptions);
    Json(ApiResponse::success(OptionsResponseDto::from(options)))
}
