//! Speech Context - 朗读会话限界上下文
//!
//! 职责:
//! - 朗读参数（语速 / 音量 / 音调）取值约束
//! - 朗读配置与 Utterance 快照
//! - Idle / Speaking 状态机

mod errors;
mod session;
mod utterance;
mod value_objects;

pub use errors::SpeechError;
pub use session::{SessionState, SpeechConfiguration, SpeechSession};
pub use utterance::{Utterance, UtteranceId};
pub use value_objects::{
    ControlVariant, ParameterOption, SpeechPitch, SpeechRate, SpeechVolume,
};
