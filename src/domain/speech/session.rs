//! Speech Context - Speech Session
//!
//! 单个朗读会话的状态机:
//!
//! ```text
//! Idle --speak()--> Speaking
//! Speaking --finish(id)--> Idle   (id 必须是当前 utterance)
//! Speaking --stop()--> Idle       (同步，不等待完成回调)
//! ```
//!
//! 本模块不接触引擎，speak / stop 只返回调用方需要执行的动作

use serde::{Deserialize, Serialize};

use super::{ControlVariant, SpeechPitch, SpeechRate, SpeechVolume, Utterance, UtteranceId};
use crate::domain::voice::{VoiceCatalog, VoiceDescriptor};

/// 播放状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    Idle,
    Speaking,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Speaking => "speaking",
        }
    }
}

/// 朗读配置
///
/// 任意状态下都可修改，只影响下一次 speak
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SpeechConfiguration {
    pub text: String,
    pub rate: SpeechRate,
    pub volume: SpeechVolume,
    pub pitch: SpeechPitch,
    pub voice: Option<VoiceDescriptor>,
}

/// 朗读会话
///
/// 不变量:
/// - 同一时刻最多一个 in-flight utterance
/// - 处于 Speaking 当且仅当存在 in-flight utterance
#[derive(Debug, Clone, Default)]
pub struct SpeechSession {
    variant: ControlVariant,
    configuration: SpeechConfiguration,
    in_flight: Option<UtteranceId>,
}

impl SpeechSession {
    pub fn new(variant: ControlVariant) -> Self {
        Self {
            variant,
            configuration: SpeechConfiguration::default(),
            in_flight: None,
        }
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.configuration.text = text.into();
    }

    pub fn set_rate(&mut self, rate: SpeechRate) {
        self.configuration.rate = rate;
    }

    pub fn set_volume(&mut self, volume: SpeechVolume) {
        self.configuration.volume = volume;
    }

    pub fn set_pitch(&mut self, pitch: SpeechPitch) {
        self.configuration.pitch = pitch;
    }

    pub fn set_voice(&mut self, voice: Option<VoiceDescriptor>) {
        self.configuration.voice = voice;
    }

    /// 开始朗读
    ///
    /// 已在朗读时返回 None（不叠加朗读）；否则按当前配置生成 utterance 并进入 Speaking，
    /// 调用方负责把返回的 utterance 提交给引擎。
    pub fn speak(&mut self) -> Option<Utterance> {
        if self.in_flight.is_some() {
            return None;
        }

        let config = &self.configuration;
        let utterance = Utterance::new(
            config.text.clone(),
            config.rate,
            self.variant.supports_volume().then_some(config.volume),
            self.variant.supports_pitch().then_some(config.pitch),
            config.voice.clone(),
        );

        self.in_flight = Some(utterance.id().clone());
        Some(utterance)
    }

    /// 停止朗读
    ///
    /// Idle 时返回 None；否则立即回到 Idle，并返回需要取消的 utterance
    pub fn stop(&mut self) -> Option<UtteranceId> {
        self.in_flight.take()
    }

    /// 处理 utterance 结束信号
    ///
    /// 只有与当前 in-flight utterance 一致时才回到 Idle，返回是否发生了状态转换。
    /// 已被 stop 或被新的 speak 取代的 utterance 的信号会被忽略。
    pub fn finish(&mut self, id: &UtteranceId) -> bool {
        if self.in_flight.as_ref() == Some(id) {
            self.in_flight = None;
            true
        } else {
            false
        }
    }

    /// 目录刷新后校正所选音色
    ///
    /// 所选音色仍在目录中时换成目录里的新描述符，否则改用目录默认音色。
    /// 返回所选音色是否变化。
    pub fn reconcile_voice(&mut self, catalog: &VoiceCatalog) -> bool {
        let next = self
            .configuration
            .voice
            .as_ref()
            .and_then(|voice| catalog.select(voice.name()))
            .or_else(|| catalog.default_voice())
            .cloned();
        let changed = next != self.configuration.voice;
        self.configuration.voice = next;
        changed
    }

    pub fn state(&self) -> SessionState {
        if self.in_flight.is_some() {
            SessionState::Speaking
        } else {
            SessionState::Idle
        }
    }

    pub fn is_speaking(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn current_utterance(&self) -> Option<&UtteranceId> {
        self.in_flight.as_ref()
    }

    pub fn configuration(&self) -> &SpeechConfiguration {
        &self.configuration
    }

    pub fn variant(&self) -> ControlVariant {
        self.variant
    }
}
