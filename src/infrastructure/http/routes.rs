//! HTTP Routes
//!
//! API Endpoints:
//! - /api/ping              GET   健康检查
//! - /api/options           GET   选择器选项（语速/音量/音调）
//! - /api/session           GET   会话快照
//! - /api/session/text      POST  设置朗读文本
//! - /api/session/rate      POST  设置语速
//! - /api/session/volume    POST  设置音量（扩展面板）
//! - /api/session/pitch     POST  设置音调（扩展面板）
//! - /api/session/voice     POST  按名称选择音色
//! - /api/session/speak     POST  开始朗读
//! - /api/session/stop      POST  停止朗读
//! - /api/voice/list        GET   列出平台音色
//! - /ws/events             WS    朗读事件推送

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .nest("/api", api_routes())
        .route("/ws/events", get(handlers::events_websocket_handler))
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .route("/options", get(handlers::get_options))
        .nest("/session", session_routes())
        .nest("/voice", voice_routes())
}

/// Session 路由
fn session_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::get_session))
        .route("/text", post(handlers::set_text))
        .route("/rate", post(handlers::set_rate))
        .route("/volume", post(handlers::set_volume))
        .route("/pitch", post(handlers::set_pitch))
        .route("/voice", post(handlers::select_voice))
        .route("/speak", post(handlers::speak))
        .route("/stop", post(handlers::stop))
}

/// Voice 路由
fn voice_routes() -> Router<Arc<AppState>> {
    Router::new().route("/list", get(handlers::list_voices))
}
