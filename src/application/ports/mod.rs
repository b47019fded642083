//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod session_control;
mod speech_engine;

pub use session_control::{
    SessionControlError, SessionControlPort, SessionRequest, SessionSnapshot,
};
pub use speech_engine::{
    CompletionHandler, EngineError, SpeechEnginePort, UtteranceOutcome, VoicesChangedHandler,
};
