//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（SpeechEngine、SessionControl）
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;

// Re-exports
pub use commands::{
    handlers::{ConfigureSessionHandler, SpeakHandler, StopHandler},
    ConfigureSessionCommand, SpeakCommand, StopCommand,
};

pub use error::ApplicationError;

pub use ports::{
    // Session control
    SessionControlError,
    SessionControlPort,
    SessionRequest,
    SessionSnapshot,
    // Speech engine
    CompletionHandler,
    EngineError,
    SpeechEnginePort,
    UtteranceOutcome,
    VoicesChangedHandler,
};

pub use queries::{
    handlers::{
        GetOptionsHandler, GetSessionHandler, ListVoicesHandler, OptionsResponse,
        VoiceListResponse,
    },
    GetOptions, GetSession, ListVoices,
};
