//! Speech Worker - 朗读会话的单一执行流
//!
//! 会话与音色目录只由 worker 任务持有。用户请求与平台信号都以消息形式进入，
//! 按顺序处理，因此不存在对会话状态的并发修改。

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{mpsc, oneshot};
use tokio_util::sync::CancellationToken;

use super::subscription::CatalogSubscription;
use crate::application::ports::{
    CompletionHandler, SessionControlError, SessionControlPort, SessionRequest, SessionSnapshot,
    SpeechEnginePort, UtteranceOutcome, VoicesChangedHandler,
};
use crate::domain::speech::{ControlVariant, SpeechSession, UtteranceId};
use crate::domain::voice::VoiceCatalog;
use crate::infrastructure::events::{EndReason, EventPublisher};

/// Worker 配置
#[derive(Debug, Clone)]
pub struct SpeechWorkerConfig {
    /// 面板变体
    pub variant: ControlVariant,
    /// 请求队列容量
    pub queue_capacity: usize,
}

impl Default for SpeechWorkerConfig {
    fn default() -> Self {
        Self {
            variant: ControlVariant::Extended,
            queue_capacity: 64,
        }
    }
}

/// 带回复通道的用户请求
struct Envelope {
    request: SessionRequest,
    reply: oneshot::Sender<Result<SessionSnapshot, SessionControlError>>,
}

/// 平台回调产生的信号
#[derive(Debug)]
enum PlatformSignal {
    UtteranceEnded {
        id: UtteranceId,
        outcome: UtteranceOutcome,
    },
    VoicesChanged,
}

/// Worker 句柄，实现 SessionControlPort
#[derive(Clone)]
pub struct SpeechWorkerHandle {
    requests: mpsc::Sender<Envelope>,
}

#[async_trait]
impl SessionControlPort for SpeechWorkerHandle {
    async fn dispatch(
        &self,
        request: SessionRequest,
    ) -> Result<SessionSnapshot, SessionControlError> {
        let (reply, response) = oneshot::channel();
        self.requests
            .send(Envelope { request, reply })
            .await
            .map_err(|_| SessionControlError::WorkerStopped)?;
        response
            .await
            .map_err(|_| SessionControlError::WorkerStopped)?
    }
}

/// 朗读 Worker
pub struct SpeechWorker {
    requests: mpsc::Receiver<Envelope>,
    signal_tx: mpsc::UnboundedSender<PlatformSignal>,
    signals: mpsc::UnboundedReceiver<PlatformSignal>,
    engine: Arc<dyn SpeechEnginePort>,
    event_publisher: Arc<EventPublisher>,
    shutdown: CancellationToken,
    session: SpeechSession,
    catalog: VoiceCatalog,
    engine_available: bool,
}

impl SpeechWorker {
    pub fn new(
        config: SpeechWorkerConfig,
        engine: Arc<dyn SpeechEnginePort>,
        event_publisher: Arc<EventPublisher>,
        shutdown: CancellationToken,
    ) -> (Self, SpeechWorkerHandle) {
        let (request_tx, requests) = mpsc::channel(config.queue_capacity.max(1));
        let (signal_tx, signals) = mpsc::unbounded_channel();

        let worker = Self {
            requests,
            signal_tx,
            signals,
            engine,
            event_publisher,
            shutdown,
            session: SpeechSession::new(config.variant),
            catalog: VoiceCatalog::new(),
            engine_available: false,
        };

        (worker, SpeechWorkerHandle { requests: request_tx })
    }

    /// 启动 Worker
    ///
    /// 所有句柄被 drop 或收到 shutdown 信号时退出，退出前取消 in-flight utterance 并解除音色订阅
    pub async fn run(mut self) {
        self.engine_available = self.engine.is_available().await;
        tracing::info!(
            engine = self.engine.name(),
            available = self.engine_available,
            variant = self.session.variant().as_str(),
            "SpeechWorker started"
        );

        let subscription = if self.engine_available {
            let signal_tx = self.signal_tx.clone();
            let on_change: VoicesChangedHandler = Arc::new(move || {
                let _ = signal_tx.send(PlatformSignal::VoicesChanged);
            });
            let subscription = CatalogSubscription::attach(self.engine.clone(), on_change);

            // 平台可能早已加载好音色而不再发出通知，先主动刷新一次
            self.refresh_catalog().await;
            Some(subscription)
        } else {
            tracing::warn!(
                engine = self.engine.name(),
                "Speech engine unavailable, speak requests will be rejected"
            );
            None
        };

        loop {
            tokio::select! {
                biased;
                _ = self.shutdown.cancelled() => break,
                Some(signal) = self.signals.recv() => self.handle_signal(signal).await,
                envelope = self.requests.recv() => match envelope {
                    Some(Envelope { request, reply }) => {
                        let result = self.handle_request(request);
                        let _ = reply.send(result);
                    }
                    None => break,
                },
            }
        }

        if let Some(id) = self.session.stop() {
            self.engine.cancel();
            self.event_publisher
                .publish_speaking_ended(&id, EndReason::Stopped, None);
        }
        drop(subscription);

        tracing::info!("SpeechWorker stopped");
    }

    fn handle_request(
        &mut self,
        request: SessionRequest,
    ) -> Result<SessionSnapshot, SessionControlError> {
        match request {
            SessionRequest::Snapshot => {}
            SessionRequest::SetText(text) => {
                self.session.set_text(text);
                self.configuration_changed();
            }
            SessionRequest::SetRate(rate) => {
                self.session.set_rate(rate);
                self.configuration_changed();
            }
            SessionRequest::SetVolume(volume) => {
                self.session.set_volume(volume);
                self.configuration_changed();
            }
            SessionRequest::SetPitch(pitch) => {
                self.session.set_pitch(pitch);
                self.configuration_changed();
            }
            SessionRequest::SelectVoice(name) => match self.catalog.select(&name).cloned() {
                Some(voice) => {
                    self.session.set_voice(Some(voice));
                    self.configuration_changed();
                }
                None => {
                    tracing::debug!(voice = %name, "Voice not in catalog, keeping selection");
                }
            },
            SessionRequest::Speak => self.speak()?,
            SessionRequest::Stop => self.stop(),
        }

        Ok(self.snapshot())
    }

    fn speak(&mut self) -> Result<(), SessionControlError> {
        if !self.engine_available {
            return Err(SessionControlError::EngineUnavailable(
                self.engine.name().to_string(),
            ));
        }

        let Some(utterance) = self.session.speak() else {
            tracing::debug!("Already speaking, speak ignored");
            return Ok(());
        };

        let id = utterance.id().clone();
        let signal_tx = self.signal_tx.clone();
        let completion_id = id.clone();
        let on_end: CompletionHandler = Box::new(move |outcome| {
            let _ = signal_tx.send(PlatformSignal::UtteranceEnded {
                id: completion_id,
                outcome,
            });
        });

        match self.engine.speak(utterance.clone(), on_end) {
            Ok(()) => {
                tracing::info!(
                    utterance_id = %id,
                    text_len = utterance.text().len(),
                    rate = utterance.rate().value(),
                    voice = utterance.voice().map(|v| v.name()).unwrap_or("-"),
                    "Utterance submitted"
                );
                self.event_publisher.publish_speaking_started(&utterance);
                Ok(())
            }
            Err(e) => {
                self.session.finish(&id);
                let error = e.to_string();
                tracing::error!(utterance_id = %id, error = %error, "Failed to submit utterance");
                self.event_publisher.publish_speaking_ended(
                    &id,
                    EndReason::Failed,
                    Some(error.as_str()),
                );
                Err(SessionControlError::Engine(error))
            }
        }
    }

    fn stop(&mut self) {
        match self.session.stop() {
            Some(id) => {
                self.engine.cancel();
                tracing::info!(utterance_id = %id, "Utterance stopped");
                self.event_publisher
                    .publish_speaking_ended(&id, EndReason::Stopped, None);
            }
            None => tracing::debug!("Not speaking, stop ignored"),
        }
    }

    async fn handle_signal(&mut self, signal: PlatformSignal) {
        match signal {
            PlatformSignal::UtteranceEnded { id, outcome } => {
                if !self.session.finish(&id) {
                    tracing::debug!(
                        utterance_id = %id,
                        outcome = outcome.as_str(),
                        "Ignoring completion of superseded utterance"
                    );
                    return;
                }

                tracing::info!(utterance_id = %id, outcome = outcome.as_str(), "Utterance ended");
                match outcome {
                    UtteranceOutcome::Finished => self.event_publisher.publish_speaking_ended(
                        &id,
                        EndReason::Completed,
                        None,
                    ),
                    UtteranceOutcome::Cancelled => self.event_publisher.publish_speaking_ended(
                        &id,
                        EndReason::Stopped,
                        None,
                    ),
                    UtteranceOutcome::Failed(error) => self.event_publisher.publish_speaking_ended(
                        &id,
                        EndReason::Failed,
                        Some(error.as_str()),
                    ),
                }
            }
            PlatformSignal::VoicesChanged => self.refresh_catalog().await,
        }
    }

    /// 从平台拉取完整音色列表并整体替换目录
    async fn refresh_catalog(&mut self) {
        let voices = match self.engine.voices().await {
            Ok(voices) => voices,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch voices, keeping previous catalog");
                return;
            }
        };

        let change = self.catalog.refresh(voices);
        let voice_changed = self.session.reconcile_voice(&self.catalog);

        if !change.is_unchanged() {
            tracing::info!(
                voices = self.catalog.voices().len(),
                default_voice = self.catalog.default_voice().map(|v| v.name()).unwrap_or("-"),
                "Voice catalog refreshed"
            );
            self.event_publisher.publish_voices_changed(&self.catalog);
        }
        if voice_changed {
            self.configuration_changed();
        }
    }

    fn configuration_changed(&self) {
        self.event_publisher
            .publish_configuration_changed(self.session.configuration());
    }

    fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            state: self.session.state(),
            utterance_id: self.session.current_utterance().cloned(),
            engine_available: self.engine_available,
            variant: self.session.variant(),
            configuration: self.session.configuration().clone(),
            voices: self.catalog.voices().to_vec(),
            default_voice: self.catalog.default_voice().cloned(),
            captured_at: Utc::now(),
        }
    }
}
