//! Application State
//!
//! 包含所有 Command/Query Handlers 的应用状态

use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::application::{
    // Command handlers
    ConfigureSessionHandler, SpeakHandler, StopHandler,
    // Query handlers
    GetOptionsHandler, GetSessionHandler, ListVoicesHandler,
    // Ports
    SessionControlPort,
};
use crate::domain::speech::ControlVariant;
use crate::infrastructure::events::EventPublisher;

/// 应用状态
///
/// 会话本身由 speech worker 持有，这里只保存访问端口
pub struct AppState {
    // ========== Ports ==========
    pub event_publisher: Arc<EventPublisher>,
    pub started_at: DateTime<Utc>,

    // ========== Command Handlers ==========
    pub configure_session_handler: ConfigureSessionHandler,
    pub speak_handler: SpeakHandler,
    pub stop_handler: StopHandler,

    // ========== Query Handlers ==========
    pub get_session_handler: GetSessionHandler,
    pub list_voices_handler: ListVoicesHandler,
    pub get_options_handler: GetOptionsHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        session: Arc<dyn SessionControlPort>,
        event_publisher: Arc<EventPublisher>,
        variant: ControlVariant,
    ) -> Self {
        Self {
            // Ports
            event_publisher,
            started_at: Utc::now(),

            // Command handlers
            configure_session_handler: ConfigureSessionHandler::new(session.clone(), variant),
            speak_handler: SpeakHandler::new(session.clone()),
            stop_handler: StopHandler::new(session.clone()),

            // Query handlers
            get_session_handler: GetSessionHandler::new(session.clone()),
            list_voices_handler: ListVoicesHandler::new(session),
            get_options_handler: GetOptionsHandler::new(variant),
        }
    }
}
