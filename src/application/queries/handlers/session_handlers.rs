//! Session Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{SessionControlPort, SessionRequest, SessionSnapshot};
use crate::application::queries::{GetOptions, GetSession, ListVoices};
use crate::domain::speech::{
    ControlVariant, ParameterOption, SpeechPitch, SpeechRate, SpeechVolume,
};
use crate::domain::voice::VoiceDescriptor;

// ============================================================================
// Response DTOs
// ============================================================================

/// 音色列表响应
#[derive(Debug, Clone)]
pub struct VoiceListResponse {
    pub voices: Vec<VoiceDescriptor>,
    pub default_voice: Option<String>,
    pub selected_voice: Option<String>,
}

impl From<SessionSnapshot> for VoiceListResponse {
    fn from(snapshot: SessionSnapshot) -> Self {
        Self {
            default_voice: snapshot.default_voice.map(|v| v.name().to_string()),
            selected_voice: snapshot
                .configuration
                .voice
                .map(|v| v.name().to_string()),
            voices: snapshot.voices,
        }
    }
}

/// 参数选项响应
#[derive(Debug, Clone)]
pub struct OptionsResponse {
    pub variant: ControlVariant,
    pub rate: &'static [ParameterOption],
    pub volume: Option<&'static [ParameterOption]>,
    pub pitch: Option<&'static [ParameterOption]>,
}

// ============================================================================
// Handlers
// ============================================================================

/// GetSession Handler
pub struct GetSessionHandler {
    session: Arc<dyn SessionControlPort>,
}

impl GetSessionHandler {
    pub fn new(session: Arc<dyn SessionControlPort>) -> Self {
        Self { session }
    }

    pub async fn handle(&self, _query: GetSession) -> Result<SessionSnapshot, ApplicationError> {
        Ok(self.session.dispatch(SessionRequest::Snapshot).await?)
    }
}

/// ListVoices Handler
pub struct ListVoicesHandler {
    session: Arc<dyn SessionControlPort>,
}

impl ListVoicesHandler {
    pub fn new(session: Arc<dyn SessionControlPort>) -> Self {
        Self { session }
    }

    pub async fn handle(&self, _query: ListVoices) -> Result<VoiceListResponse, ApplicationError> {
        let snapshot = self.session.dispatch(SessionRequest::Snapshot).await?;
        Ok(VoiceListResponse::from(snapshot))
    }
}

/// GetOptions Handler - 渲染层选择器的固定选项
pub struct GetOptionsHandler {
    variant: ControlVariant,
}

impl GetOptionsHandler {
    pub fn new(variant: ControlVariant) -> Self {
        Self { variant }
    }

    pub fn handle(&self, _query: GetOptions) -> OptionsResponse {
        OptionsResponse {
            variant: self.variant,
            rate: SpeechRate::OPTIONS,
            volume: self.variant.supports_volume().then_some(SpeechVolume::OPTIONS),
            pitch: self.variant.supports_pitch().then_some(SpeechPitch::OPTIONS),
        }
    }
}
