//! Ping Handler

use axum::{extract::State, Json};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;

use crate::infrastructure::http::dto::ApiResponse;
use crate::infrastructure::http::state::AppState;

/// Ping 响应
#[derive(Debug, Serialize)]
pub struct PingResponse {
    pub service: &'static str,
    pub version: &'static str,
    pub uptime_secs: i64,
}

/// 健康检查，附带服务运行时长
pub async fn ping(State(state): State<Arc<AppState>>) -> Json<ApiResponse<PingResponse>> {
    let uptime_secs = (Utc::now() - state.started_at).num_seconds().max(0);
    Json(ApiResponse::success(PingResponse {
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        uptime_secs,
    }))
}
