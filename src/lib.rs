//! Lector - 浏览器朗读控制面板服务
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Speech Context: 朗读会话（Idle/Speaking 状态机）与朗读参数
//! - Voice Context: 平台音色目录
//!
//! 应用层 (application/):
//! - Ports: 端口定义（SpeechEngine, SessionControl）
//! - Commands: CQRS 命令处理器
//! - Queries: CQRS 查询处理器
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API + WebSocket
//! - Worker: 持有会话与音色目录的单一执行流
//! - Adapters: 模拟引擎与 espeak-ng 引擎
//! - Events: WebSocket 事件发布

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
