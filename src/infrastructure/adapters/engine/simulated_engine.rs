//! Simulated Speech Engine - 不发声的模拟引擎
//!
//! 按文本词数与语速估算朗读时长，到时回调完成；音色列表在注册通知后延迟出现，
//! 用于测试、演示以及宿主没有语音能力的环境

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;

use crate::application::ports::{
    CompletionHandler, EngineError, SpeechEnginePort, UtteranceOutcome, VoicesChangedHandler,
};
use crate::domain::speech::Utterance;
use crate::domain::voice::VoiceDescriptor;

/// 单个 utterance 的最短模拟时长
const MIN_UTTERANCE_MS: u64 = 10;

/// Simulated Engine 配置
#[derive(Debug, Clone)]
pub struct SimulatedSpeechEngineConfig {
    /// 平台"发现"的音色
    pub voices: Vec<VoiceDescriptor>,
    /// 注册通知后多久出现音色列表（毫秒）
    pub voices_delay_ms: u64,
    /// 1x 语速下每分钟词数
    pub words_per_minute: u32,
    /// 被 cancel 的 utterance 是否仍回调完成
    pub complete_on_cancel: bool,
}

impl Default for SimulatedSpeechEngineConfig {
    fn default() -> Self {
        Self {
            voices: vec![
                VoiceDescriptor::new("Simulated Alto", "sim-alto", "en-US").with_platform_default(true),
                VoiceDescriptor::new("Simulated Baritone", "sim-baritone", "en-GB"),
            ],
            voices_delay_ms: 250,
            words_per_minute: 180,
            complete_on_cancel: true,
        }
    }
}

/// Simulated Speech Engine
pub struct SimulatedSpeechEngine {
    config: SimulatedSpeechEngineConfig,
    /// None 表示音色尚未出现
    voices: Arc<Mutex<Option<Vec<VoiceDescriptor>>>>,
    loading: AtomicBool,
    handler: Arc<Mutex<Option<VoicesChangedHandler>>>,
    current: Mutex<Option<CancellationToken>>,
}

impl SimulatedSpeechEngine {
    pub fn new(config: SimulatedSpeechEngineConfig) -> Self {
        tracing::info!(
            voices = config.voices.len(),
            voices_delay_ms = config.voices_delay_ms,
            words_per_minute = config.words_per_minute,
            "SimulatedSpeechEngine initialized"
        );
        Self {
            config,
            voices: Arc::new(Mutex::new(None)),
            loading: AtomicBool::new(false),
            handler: Arc::new(Mutex::new(None)),
            current: Mutex::new(None),
        }
    }

    /// 替换音色列表并发出变化通知
    pub fn replace_voices(&self, voices: Vec<VoiceDescriptor>) {
        publish_voices(&self.voices, &self.handler, voices);
    }

    /// 估算朗读时长
    pub fn estimate_duration(&self, utterance: &Utterance) -> Duration {
        let words = utterance.word_count().max(1) as f64;
        let per_minute = f64::from(self.config.words_per_minute.max(1))
            * f64::from(utterance.rate().value());
        let ms = (words * 60_000.0 / per_minute).round() as u64;
        Duration::from_millis(ms.max(MIN_UTTERANCE_MS))
    }
}

fn publish_voices(
    slot: &Mutex<Option<Vec<VoiceDescriptor>>>,
    handler: &Mutex<Option<VoicesChangedHandler>>,
    voices: Vec<VoiceDescriptor>,
) {
    if let Ok(mut slot) = slot.lock() {
        *slot = Some(voices);
    }
    let handler = handler.lock().ok().and_then(|h| h.clone());
    if let Some(handler) = handler {
        handler();
    }
}

#[async_trait]
impl SpeechEnginePort for SimulatedSpeechEngine {
    fn name(&self) -> &str {
        "simulated"
    }

    async fn voices(&self) -> Result<Vec<VoiceDescriptor>, EngineError> {
        let voices = self
            .voices
            .lock()
            .map_err(|e| EngineError::VoiceListing(e.to_string()))?;
        Ok(voices.clone().unwrap_or_default())
    }

    fn speak(&self, utterance: Utterance, on_end: CompletionHandler) -> Result<(), EngineError> {
        let runtime = Handle::try_current().map_err(|e| EngineError::Unavailable(e.to_string()))?;
        let duration = self.estimate_duration(&utterance);
        let token = CancellationToken::new();

        if let Ok(mut current) = self.current.lock() {
            if let Some(previous) = current.replace(token.clone()) {
                previous.cancel();
            }
        }

        tracing::debug!(
            utterance_id = %utterance.id(),
            duration_ms = duration.as_millis() as u64,
            "SimulatedSpeechEngine: speaking"
        );

        let complete_on_cancel = self.config.complete_on_cancel;
        runtime.spawn(async move {
            tokio::select! {
                _ = tokio::time::sleep(duration) => on_end(UtteranceOutcome::Finished),
                _ = token.cancelled() => {
                    if complete_on_cancel {
                        on_end(UtteranceOutcome::Cancelled);
                    }
                }
            }
        });

        Ok(())
    }

    fn cancel(&self) {
        if let Some(token) = self.current.lock().ok().and_then(|mut c| c.take()) {
            token.cancel();
        }
    }

    fn set_voices_changed_handler(&self, handler: Option<VoicesChangedHandler>) {
        let attaching = handler.is_some();
        if let Ok(mut slot) = self.handler.lock() {
            *slot = handler;
        }

        if !attaching || self.loading.swap(true, Ordering::SeqCst) {
            return;
        }

        // 首次注册时模拟平台异步加载音色
        let voices = self.config.voices.clone();
        match Handle::try_current() {
            Ok(runtime) => {
                let slot = self.voices.clone();
                let handler = self.handler.clone();
                let delay = Duration::from_millis(self.config.voices_delay_ms);
                runtime.spawn(async move {
                    tokio::time::sleep(delay).await;
                    publish_voices(&slot, &handler, voices);
                });
            }
            Err(_) => publish_voices(&self.voices, &self.handler, voices),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::speech::SpeechRate;
    use tokio::sync::{mpsc, oneshot};

    fn fast_config(complete_on_cancel: bool) -> SimulatedSpeechEngineConfig {
        SimulatedSpeechEngineConfig {
            voices: vec![VoiceDescriptor::named("A"), VoiceDescriptor::named("B")],
            voices_delay_ms: 5,
            words_per_minute: 60_000,
            complete_on_cancel,
        }
    }

    fn utterance(text: &str, rate: f32) -> Utterance {
        Utterance::new(text, SpeechRate::try_from(rate).unwrap(), None, None, None)
    }

    fn completion() -> (CompletionHandler, oneshot::Receiver<UtteranceOutcome>) {
        let (tx, rx) = oneshot::channel();
        let handler: CompletionHandler = Box::new(move |outcome| {
            let _ = tx.send(outcome);
        });
        (handler, rx)
    }

    #[test]
    fn test_duration_scales_with_rate() {
        let engine = SimulatedSpeechEngine::new(SimulatedSpeechEngineConfig {
            words_per_minute: 120,
            ..Default::default()
        });
        let normal = engine.estimate_duration(&utterance("one two three four", 1.0));
        let fast = engine.estimate_duration(&utterance("one two three four", 2.0));

        assert_eq!(normal, Duration::from_millis(2000));
        assert_eq!(fast, Duration::from_millis(1000));
    }

    #[tokio::test]
    async fn test_utterance_finishes() {
        let engine = SimulatedSpeechEngine::new(fast_config(true));
        let (on_end, rx) = completion();

        engine.speak(utterance("hello", 1.0), on_end).unwrap();
        assert_eq!(rx.await.unwrap(), UtteranceOutcome::Finished);
    }

    #[tokio::test]
    async fn test_cancel_reports_cancelled() {
        let engine = SimulatedSpeechEngine::new(SimulatedSpeechEngineConfig {
            words_per_minute: 1,
            ..fast_config(true)
        });
        let (on_end, rx) = completion();

        engine.speak(utterance("a long text", 1.0), on_end).unwrap();
        engine.cancel();
        assert_eq!(rx.await.unwrap(), UtteranceOutcome::Cancelled);
    }

    #[tokio::test]
    async fn test_cancel_can_be_silent() {
        let engine = SimulatedSpeechEngine::new(SimulatedSpeechEngineConfig {
            words_per_minute: 1,
            ..fast_config(false)
        });
        let (on_end, rx) = completion();

        engine.speak(utterance("a long text", 1.0), on_end).unwrap();
        engine.cancel();

        // 回调被丢弃而未调用，发送端随之关闭
        assert!(rx.await.is_err());
    }

    #[tokio::test]
    async fn test_voices_appear_after_attach() {
        let engine = SimulatedSpeechEngine::new(fast_config(true));
        assert!(engine.voices().await.unwrap().is_empty());

        let (tx, mut rx) = mpsc::unbounded_channel();
        engine.set_voices_changed_handler(Some(Arc::new(move || {
            let _ = tx.send(());
        })));

        rx.recv().await.unwrap();
        let names: Vec<String> = engine
            .voices()
            .await
            .unwrap()
            .iter()
            .map(|v| v.name().to_string())
            .collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[tokio::test]
    async fn test_replace_voices_notifies_attached_handler_only() {
        let engine = SimulatedSpeechEngine::new(fast_config(true));
        let (tx, mut rx) = mpsc::unbounded_channel();
        engine.set_voices_changed_handler(Some(Arc::new(move || {
            let _ = tx.send(());
        })));
        rx.recv().await.unwrap();

        engine.replace_voices(vec![VoiceDescriptor::named("C")]);
        rx.recv().await.unwrap();
        assert_eq!(engine.voices().await.unwrap()[0].name(), "C");

        engine.set_voices_changed_handler(None);
        engine.replace_voices(vec![VoiceDescriptor::named("D")]);
        assert!(rx.recv().await.is_none());
    }
}
