//! 应用层错误定义
//!
//! 统一的命令/查询错误类型

use thiserror::Error;

use crate::application::ports::SessionControlError;
use crate::domain::speech::SpeechError;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 验证错误
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 当前面板变体不提供该控件
    #[error("Unsupported control: {0}")]
    UnsupportedControl(&'static str),

    /// 平台语音能力不可用
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// 外部服务错误
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    /// 内部错误
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApplicationError {
    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }
}

impl From<SpeechError> for ApplicationError {
    fn from(err: SpeechError) -> Self {
        Self::ValidationError(err.to_string())
    }
}

impl From<SessionControlError> for ApplicationError {
    fn from(err: SessionControlError) -> Self {
        match err {
            SessionControlError::EngineUnavailable(msg) => Self::ServiceUnavailable(msg),
            SessionControlError::Engine(msg) => Self::ExternalServiceError(msg),
            SessionControlError::WorkerStopped => Self::InternalError(err.to_string()),
        }
    }
}
