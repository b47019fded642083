//! Session Handlers

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::{ConfigureSessionCommand, GetSession, SpeakCommand, StopCommand};
use crate::infrastructure::http::dto::{
    ApiResponse, SelectVoiceRequest, SessionResponse, SetPitchRequest, SetRateRequest,
    SetTextRequest, SetVolumeRequest,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

type SessionResult = Result<Json<ApiResponse<SessionResponse>>, ApiError>;

async fn configure(state: &AppState, cmd: ConfigureSessionCommand) -> SessionResult {
    let snapshot = state.configure_session_handler.handle(cmd).await?;
    Ok(Json(ApiResponse::success(SessionResponse::from(snapshot))))
}

// ============================================================================
// Snapshot
// ============================================================================

pub async fn get_session(State(state): State<Arc<AppState>>) -> SessionResult {
    let snapshot = state.get_session_handler.handle(GetSession).await?;
    Ok(Json(ApiResponse::success(SessionResponse::from(snapshot))))
}

// ============================================================================
// Configuration
// ============================================================================

pub async fn set_text(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SetTextRequest>,
) -> SessionResult {
    configure(&state, ConfigureSessionCommand::SetText { text: req.text }).await
}

pub async fn set_rate(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SetRateRequest>,
) -> SessionResult {
    configure(&state, ConfigureSessionCommand::SetRate { rate: req.rate }).await
}

pub async fn set_volume(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SetVolumeRequest>,
) -> SessionResult {
    configure(&state, ConfigureSessionCommand::SetVolume { volume: req.volume }).await
}

pub async fn set_pitch(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SetPitchRequest>,
) -> SessionResult {
    configure(&state, ConfigureSessionCommand::SetPitch { pitch: req.pitch }).await
}

pub async fn select_voice(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SelectVoiceRequest>,
) -> SessionResult {
    configure(&state, ConfigureSessionCommand::SelectVoice { name: req.name }).await
}

// ============================================================================
// Playback
// ============================================================================

pub async fn speak(State(state): State<Arc<AppState>>) -> SessionResult {
    let snapshot = state.speak_handler.handle(SpeakCommand).await?;
    Ok(Json(ApiResponse::success(SessionResponse::from(snapshot))))
}

pub async fn stop(State(state): State<Arc<AppState>>) -> SessionResult {
    let snapshot = state.stop_handler.handle(StopCommand).await?;
    Ok(Json(ApiResponse::success(SessionResponse::from(snapshot))))
}
