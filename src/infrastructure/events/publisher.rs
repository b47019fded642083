//! Event Publisher Implementation
//!
//! WebSocket 事件推送实现

use serde::Serialize;
use std::sync::Arc;
use tokio::sync::broadcast;

use crate::domain::speech::{SpeechConfiguration, Utterance, UtteranceId};
use crate::domain::voice::VoiceCatalog;

/// 朗读结束原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EndReason {
    /// 平台完成播放
    Completed,
    /// 用户停止
    Stopped,
    /// 平台异常终止或提交失败
    Failed,
}

/// WebSocket 事件类型
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", content = "data")]
pub enum WsEvent {
    /// 开始朗读
    SpeakingStarted {
        utterance_id: UtteranceId,
        text_len: usize,
        rate: f32,
        #[serde(skip_serializing_if = "Option::is_none")]
        voice: Option<String>,
    },
    /// 朗读结束，会话回到 idle
    SpeakingEnded {
        utterance_id: UtteranceId,
        reason: EndReason,
        #[serde(skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
    /// 朗读配置变更
    ConfigurationChanged {
        configuration: SpeechConfiguration,
    },
    /// 平台音色目录变更
    VoicesChanged {
        voices: Vec<String>,
        default_voice: Option<String>,
    },
}

/// 事件发布器
pub struct EventPublisher {
    channel: broadcast::Sender<WsEvent>,
}

impl EventPublisher {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(100);
        Self { channel: tx }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// 订阅会话事件
    pub fn subscribe(&self) -> broadcast::Receiver<WsEvent> {
        self.channel.subscribe()
    }

    /// 当前订阅者数量
    pub fn subscriber_count(&self) -> usize {
        self.channel.receiver_count()
    }

    /// 发布开始朗读事件
    pub fn publish_speaking_started(&self, utterance: &Utterance) {
        self.publish(WsEvent::SpeakingStarted {
            utterance_id: utterance.id().clone(),
            text_len: utterance.text().chars().count(),
            rate: utterance.rate().value(),
            voice: utterance.voice().map(|v| v.name().to_string()),
        });
    }

    /// 发布朗读结束事件
    pub fn publish_speaking_ended(
        &self,
        utterance_id: &UtteranceId,
        reason: EndReason,
        error: Option<&str>,
    ) {
        self.publish(WsEvent::SpeakingEnded {
            utterance_id: utterance_id.clone(),
            reason,
            error: error.map(str::to_string),
        });
    }

    /// 发布配置变更事件
    pub fn publish_configuration_changed(&self, configuration: &SpeechConfiguration) {
        self.publish(WsEvent::ConfigurationChanged {
            configuration: configuration.clone(),
        });
    }

    /// 发布音色目录变更事件
    pub fn publish_voices_changed(&self, catalog: &VoiceCatalog) {
        self.publish(WsEvent::VoicesChanged {
            voices: catalog.voices().iter().map(|v| v.name().to_string()).collect(),
            default_voice: catalog.default_voice().map(|v| v.name().to_string()),
        });
    }

    fn publish(&self, event: WsEvent) {
        if let Err(e) = self.channel.send(event) {
            tracing::debug!(error = %e, "Failed to publish event (no receivers)");
        }
    }
}

impl Default for EventPublisher {
    fn default() -> Self {
        Self::new()
    }
}
