//! Session Command Handlers

use std::sync::Arc;

use crate::application::commands::session_commands::*;
use crate::application::error::ApplicationError;
use crate::application::ports::{SessionControlPort, SessionRequest, SessionSnapshot};
use crate::domain::speech::{ControlVariant, SpeechPitch, SpeechRate, SpeechVolume};

/// ConfigureSession Handler - 校验 UI 输入并更新朗读配置
pub struct ConfigureSessionHandler {
    session: Arc<dyn SessionControlPort>,
    variant: ControlVariant,
}

impl ConfigureSessionHandler {
    pub fn new(session: Arc<dyn SessionControlPort>, variant: ControlVariant) -> Self {
        Self { session, variant }
    }

    pub async fn handle(
        &self,
        cmd: ConfigureSessionCommand,
    ) -> Result<SessionSnapshot, ApplicationError> {
        let request = self.to_request(cmd)?;
        let name = request.name();
        let snapshot = self.session.dispatch(request).await?;

        tracing::debug!(request = name, state = snapshot.state.as_str(), "Session configured");

        Ok(snapshot)
    }

    fn to_request(&self, cmd: ConfigureSessionCommand) -> Result<SessionRequest, ApplicationError> {
        let request = match cmd {
            ConfigureSessionCommand::SetText { text } => SessionRequest::SetText(text),
            ConfigureSessionCommand::SetRate { rate } => {
                SessionRequest::SetRate(SpeechRate::try_from(rate)?)
            }
            ConfigureSessionCommand::SetVolume { volume } => {
                if !self.variant.supports_volume() {
                    return Err(ApplicationError::UnsupportedControl("volume"));
                }
                SessionRequest::SetVolume(SpeechVolume::try_from(volume)?)
            }
            ConfigureSessionCommand::SetPitch { pitch } => {
                if !self.variant.supports_pitch() {
                    return Err(ApplicationError::UnsupportedControl("pitch"));
                }
                SessionRequest::SetPitch(SpeechPitch::try_from(pitch)?)
            }
            ConfigureSessionCommand::SelectVoice { name } => {
                if name.is_empty() {
                    return Err(ApplicationError::validation("Voice name cannot be empty"));
                }
                SessionRequest::SelectVoice(name)
            }
        };
        Ok(request)
    }
}

/// Speak Handler - 开始朗读
pub struct SpeakHandler {
    session: Arc<dyn SessionControlPort>,
}

impl SpeakHandler {
    pub fn new(session: Arc<dyn SessionControlPort>) -> Self {
        Self { session }
    }

    pub async fn handle(&self, _cmd: SpeakCommand) -> Result<SessionSnapshot, ApplicationError> {
        let snapshot = self.session.dispatch(SessionRequest::Speak).await?;
        Ok(snapshot)
    }
}

/// Stop Handler - 停止朗读
pub struct StopHandler {
    session: Arc<dyn SessionControlPort>,
}

impl StopHandler {
    pub fn new(session: Arc<dyn SessionControlPort>) -> Self {
        Self { session }
    }

    pub async fn handle(&self, _cmd: StopCommand) -> Result<SessionSnapshot, ApplicationError> {
        let snapshot = self.session.dispatch(SessionRequest::Stop).await?;
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::SessionControlError;
    use crate::domain::speech::{SessionState, SpeechConfiguration};
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::Mutex;

    /// 记录收到的请求，始终返回空闲快照
    #[derive(Default)]
    struct RecordingSession {
        requests: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl SessionControlPort for RecordingSession {
        async fn dispatch(
            &self,
            request: SessionRequest,
        ) -> Result<SessionSnapshot, SessionControlError> {
            self.requests.lock().unwrap().push(request.name().to_string());
            Ok(SessionSnapshot {
                state: SessionState::Idle,
                utterance_id: None,
                engine_available: true,
                variant: ControlVariant::Extended,
                configuration: SpeechConfiguration::default(),
                voices: Vec::new(),
                default_voice: None,
                captured_at: Utc::now(),
            })
        }
    }

    fn handler(variant: ControlVariant) -> (Arc<RecordingSession>, ConfigureSessionHandler) {
        let session = Arc::new(RecordingSession::default());
        let handler = ConfigureSessionHandler::new(session.clone(), variant);
        (session, handler)
    }

    #[tokio::test]
    async fn test_valid_rate_is_forwarded() {
        let (session, handler) = handler(ControlVariant::Extended);
        let result = handler
            .handle(ConfigureSessionCommand::SetRate { rate: 1.5 })
            .await;

        assert!(result.is_ok());
        assert_eq!(*session.requests.lock().unwrap(), vec!["set_rate"]);
    }

    #[tokio::test]
    async fn test_out_of_domain_rate_is_rejected() {
        let (session, handler) = handler(ControlVariant::Extended);
        let result = handler
            .handle(ConfigureSessionCommand::SetRate { rate: 4.0 })
            .await;

        assert!(matches!(result, Err(ApplicationError::ValidationError(_))));
        assert!(session.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_basic_variant_rejects_volume_and_pitch() {
        let (session, handler) = handler(ControlVariant::Basic);

        let volume = handler
            .handle(ConfigureSessionCommand::SetVolume { volume: 0.4 })
            .await;
        let pitch = handler
            .handle(ConfigureSessionCommand::SetPitch { pitch: 1.25 })
            .await;

        assert!(matches!(volume, Err(ApplicationError::UnsupportedControl("volume"))));
        assert!(matches!(pitch, Err(ApplicationError::UnsupportedControl("pitch"))));
        assert!(session.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_voice_name_is_rejected() {
        let (_, handler) = handler(ControlVariant::Extended);
        let result = handler
            .handle(ConfigureSessionCommand::SelectVoice { name: String::new() })
            .await;

        assert!(matches!(result, Err(ApplicationError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_speak_and_stop_dispatch() {
        let session = Arc::new(RecordingSession::default());
        SpeakHandler::new(session.clone())
            .handle(SpeakCommand)
            .await
            .unwrap();
        StopHandler::new(session.clone())
            .handle(StopCommand)
            .await
            .unwrap();

        assert_eq!(*session.requests.lock().unwrap(), vec!["speak", "stop"]);
    }
}
