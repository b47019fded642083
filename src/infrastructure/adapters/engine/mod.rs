//! Speech Engine Adapters - 平台语音引擎实现

mod espeak_engine;
mod simulated_engine;

pub use espeak_engine::{build_args, parse_voice_list, EspeakSpeechEngine, EspeakSpeechEngineConfig};
pub use simulated_engine::{SimulatedSpeechEngine, SimulatedSpeechEngineConfig};
