//! Session Control Port - 朗读会话访问
//!
//! 会话与音色目录由单一执行流持有，所有读写都经由此端口串行化，
//! 具体实现在 infrastructure/worker 层

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::speech::{
    ControlVariant, SessionState, SpeechConfiguration, SpeechPitch, SpeechRate, SpeechVolume,
    UtteranceId,
};
use crate::domain::voice::VoiceDescriptor;

/// Session Control 错误
#[derive(Debug, Error)]
pub enum SessionControlError {
    #[error("Session worker is not running")]
    WorkerStopped,

    #[error("Speech engine unavailable: {0}")]
    EngineUnavailable(String),

    #[error("Speech engine error: {0}")]
    Engine(String),
}

/// 会话请求
///
/// 参数已经过取值约束，worker 不再校验
#[derive(Debug, Clone)]
pub enum SessionRequest {
    Snapshot,
    SetText(String),
    SetRate(SpeechRate),
    SetVolume(SpeechVolume),
    SetPitch(SpeechPitch),
    /// 按名称选择音色，未命中时保留原选择
    SelectVoice(String),
    Speak,
    Stop,
}

impl SessionRequest {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Snapshot => "snapshot",
            Self::SetText(_) => "set_text",
            Self::SetRate(_) => "set_rate",
            Self::SetVolume(_) => "set_volume",
            Self::SetPitch(_) => "set_pitch",
            Self::SelectVoice(_) => "select_voice",
            Self::Speak => "speak",
            Self::Stop => "stop",
        }
    }
}

/// 会话快照
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub state: SessionState,
    pub utterance_id: Option<UtteranceId>,
    /// 平台语音能力是否可用，渲染层据此禁用控件
    pub engine_available: bool,
    pub variant: ControlVariant,
    pub configuration: SpeechConfiguration,
    pub voices: Vec<VoiceDescriptor>,
    pub default_voice: Option<VoiceDescriptor>,
    pub captured_at: DateTime<Utc>,
}

/// Session Control Port
#[async_trait]
pub trait SessionControlPort: Send + Sync {
    /// 提交请求并等待处理后的会话快照
    async fn dispatch(&self, request: SessionRequest) -> Result<SessionSnapshot, SessionControlError>;
}
