//! Speech Engine Port - 平台语音合成能力抽象
//!
//! 定义平台语音引擎的抽象接口，具体实现在 infrastructure/adapters 层

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::speech::Utterance;
use crate::domain::voice::VoiceDescriptor;

/// 引擎错误
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Speech engine unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to start utterance: {0}")]
    SpawnFailed(String),

    #[error("Failed to list voices: {0}")]
    VoiceListing(String),
}

/// utterance 结束方式
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UtteranceOutcome {
    /// 正常播放完毕
    Finished,
    /// 被 cancel 中断
    Cancelled,
    /// 平台侧异常终止
    Failed(String),
}

impl UtteranceOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Finished => "finished",
            Self::Cancelled => "cancelled",
            Self::Failed(_) => "failed",
        }
    }
}

/// 完成回调，每个 utterance 至多调用一次
///
/// 部分平台对被 cancel 的 utterance 仍会回调，部分平台不会
pub type CompletionHandler = Box<dyn FnOnce(UtteranceOutcome) + Send + 'static>;

/// 音色列表变化通知
pub type VoicesChangedHandler = Arc<dyn Fn() + Send + Sync + 'static>;

/// Speech Engine Port
///
/// 宿主平台的语音合成能力。speak / cancel 立即返回，结果通过回调异步送达。
#[async_trait]
pub trait SpeechEnginePort: Send + Sync {
    /// 引擎名称（用于日志）
    fn name(&self) -> &str;

    /// 检查宿主平台是否具备语音合成能力
    async fn is_available(&self) -> bool {
        true // 默认实现
    }

    /// 获取平台当前的全部音色（可能为空，音色可能稍后才出现）
    async fn voices(&self) -> Result<Vec<VoiceDescriptor>, EngineError>;

    /// 提交 utterance
    ///
    /// 返回 Ok 后 `on_end` 会在 utterance 结束时被调用；返回 Err 时不会调用
    fn speak(&self, utterance: Utterance, on_end: CompletionHandler) -> Result<(), EngineError>;

    /// 取消当前 utterance（fire-and-forget）
    fn cancel(&self);

    /// 设置或清除音色变化通知
    fn set_voices_changed_handler(&self, handler: Option<VoicesChangedHandler>);
}
