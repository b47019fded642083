//! Worker Layer - 朗读会话执行流
//!
//! 实现 SpeechWorker，串行处理用户请求与平台回调

mod speech_worker;
mod subscription;

pub use speech_worker::{SpeechWorker, SpeechWorkerConfig, SpeechWorkerHandle};
pub use subscription::CatalogSubscription;
