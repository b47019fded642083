//! Speech Context - Errors

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SpeechError {
    #[error("无效的语速: {0}")]
    InvalidRate(f32),

    #[error("无效的音量: {0}")]
    InvalidVolume(f32),

    #[error("无效的音调: {0}")]
    InvalidPitch(f32),
}
