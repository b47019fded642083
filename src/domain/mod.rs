//! Domain Layer - 领域层
//!
//! 包含两个限界上下文:
//! - Voice Context: 平台音色目录
//! - Speech Context: 朗读配置与会话状态机

pub mod speech;
pub mod voice;
