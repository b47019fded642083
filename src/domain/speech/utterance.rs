//! Speech Context - Utterance

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{SpeechPitch, SpeechRate, SpeechVolume};
use crate::domain::voice::VoiceDescriptor;

/// 单次朗读请求的唯一标识
///
/// 每次 speak 新建一个，随完成回调一起传回，用于识别过期的完成信号
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UtteranceId(Uuid);

impl UtteranceId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UtteranceId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for UtteranceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 提交给引擎的朗读请求
///
/// 创建时对配置做快照，之后的配置修改不影响正在朗读的内容。
/// volume / pitch 为 None 表示当前面板不支持该参数，由引擎使用自身默认值。
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    id: UtteranceId,
    text: String,
    rate: SpeechRate,
    volume: Option<SpeechVolume>,
    pitch: Option<SpeechPitch>,
    voice: Option<VoiceDescriptor>,
}

impl Utterance {
    pub fn new(
        text: impl Into<String>,
        rate: SpeechRate,
        volume: Option<SpeechVolume>,
        pitch: Option<SpeechPitch>,
        voice: Option<VoiceDescriptor>,
    ) -> Self {
        Self {
            id: UtteranceId::new(),
            text: text.into(),
            rate,
            volume,
            pitch,
            voice,
        }
    }

    pub fn id(&self) -> &UtteranceId {
        &self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn rate(&self) -> SpeechRate {
        self.rate
    }

    pub fn volume(&self) -> Option<SpeechVolume> {
        self.volume
    }

    pub fn pitch(&self) -> Option<SpeechPitch> {
        self.pitch
    }

    pub fn voice(&self) -> Option<&VoiceDescriptor> {
        self.voice.as_ref()
    }

    /// 按空白切分的词数，用于估算朗读时长
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}
