//! Data Transfer Objects

use serde::{Deserialize, Serialize};

use crate::application::{OptionsResponse, SessionSnapshot, VoiceListResponse};
use crate::domain::speech::{ParameterOption, SpeechConfiguration};
use crate::domain::voice::VoiceDescriptor;

// ============================================================================
// 统一响应结构
// ============================================================================

/// 统一 API 响应格式
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub errno: i32,
    pub error: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 成功响应
    pub fn success(data: T) -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(data),
        }
    }
}

// ============================================================================
// Session DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SetTextRequest {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct SetRateRequest {
    pub rate: f32,
}

#[derive(Debug, Deserialize)]
pub struct SetVolumeRequest {
    pub volume: f32,
}

#[derive(Debug, Deserialize)]
pub struct SetPitchRequest {
    pub pitch: f32,
}

#[derive(Debug, Deserialize)]
pub struct SelectVoiceRequest {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct ConfigurationResponse {
    pub text: String,
    pub rate: f32,
    pub volume: f32,
    pub pitch: f32,
    pub voice: Option<String>,
}

impl From<SpeechConfiguration> for ConfigurationResponse {
    fn from(config: SpeechConfiguration) -> Self {
        Self {
            text: config.text,
            rate: config.rate.value(),
            volume: config.volume.value(),
            pitch: config.pitch.value(),
            voice: config.voice.map(|v| v.name().to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub state: &'static str,
    pub utterance_id: Option<String>,
    pub engine_available: bool,
    pub variant: &'static str,
    pub configuration: ConfigurationResponse,
    pub voices: Vec<VoiceResponse>,
    pub default_voice: Option<String>,
    pub captured_at: String,
}

impl From<SessionSnapshot> for SessionResponse {
    fn from(snapshot: SessionSnapshot) -> Self {
        Self {
            state: snapshot.state.as_str(),
            utterance_id: snapshot.utterance_id.map(|id| id.to_string()),
            engine_available: snapshot.engine_available,
            variant: snapshot.variant.as_str(),
            configuration: ConfigurationResponse::from(snapshot.configuration),
            voices: snapshot.voices.into_iter().map(VoiceResponse::from).collect(),
            default_voice: snapshot.default_voice.map(|v| v.name().to_string()),
            captured_at: snapshot.captured_at.to_rfc3339(),
        }
    }
}

// ============================================================================
// Voice DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct VoiceResponse {
    pub name: String,
    pub lang: String,
    pub local_service: bool,
    pub is_default: bool,
}

impl From<VoiceDescriptor> for VoiceResponse {
    fn from(voice: VoiceDescriptor) -> Self {
        Self {
            name: voice.name().to_string(),
            lang: voice.lang().to_string(),
            local_service: voice.local_service(),
            is_default: voice.is_platform_default(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct VoiceListResponseDto {
    pub voices: Vec<VoiceResponse>,
    pub default_voice: Option<String>,
    pub selected_voice: Option<String>,
}

impl From<VoiceListResponse> for VoiceListResponseDto {
    fn from(list: VoiceListResponse) -> Self {
        Self {
            voices: list.voices.into_iter().map(VoiceResponse::from).collect(),
            default_voice: list.default_voice,
            selected_voice: list.selected_voice,
        }
    }
}

// ============================================================================
// Options DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct OptionsResponseDto {
    pub variant: &'static str,
    pub rate: Vec<ParameterOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<Vec<ParameterOption>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pitch: Option<Vec<ParameterOption>>,
}

impl From<OptionsResponse> for OptionsResponseDto {
    fn from(options: OptionsResponse) -> Self {
        Self {
            variant: options.variant.as_str(),
            rate: options.rate.to_vec(),
            volume: options.volume.map(<[ParameterOption]>::to_vec),
            pitch: options.pitch.map(<[ParameterOption]>::to_vec),
        }
    }
}
