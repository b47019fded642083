//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

use crate::domain::speech::ControlVariant;
use crate::domain::voice::VoiceDescriptor;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 语音引擎配置
    #[serde(default)]
    pub engine: EngineConfig,

    /// 朗读面板配置
    #[serde(default)]
    pub speech: SpeechConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// 静态文件服务配置
    #[serde(default)]
    pub static_files: StaticFilesConfig,
}

/// 静态文件服务配置
#[derive(Debug, Clone, Deserialize)]
pub struct StaticFilesConfig {
    /// 是否启用静态文件服务
    #[serde(default)]
    pub enabled: bool,

    /// 静态文件目录
    #[serde(default = "default_static_dir")]
    pub dir: PathBuf,

    /// URL 路径前缀（如 "/" 表示根路径托管）
    #[serde(default = "default_static_path")]
    pub path: String,
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("web")
}

fn default_static_path() -> String {
    "/".to_string()
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            dir: default_static_dir(),
            path: default_static_path(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5070
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_files: StaticFilesConfig::default(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 语音引擎类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    /// 不发声的模拟引擎
    #[default]
    Simulated,
    /// espeak-ng 子进程
    Espeak,
}

impl EngineKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Simulated => "simulated",
            Self::Espeak => "espeak",
        }
    }
}

/// 语音引擎配置
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub kind: EngineKind,

    /// espeak-ng 可执行文件
    #[serde(default = "default_espeak_binary")]
    pub espeak_binary: String,

    /// 模拟引擎配置
    #[serde(default)]
    pub simulated: SimulatedEngineConfig,
}

fn default_espeak_binary() -> String {
    "espeak-ng".to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            kind: EngineKind::default(),
            espeak_binary: default_espeak_binary(),
            simulated: SimulatedEngineConfig::default(),
        }
    }
}

/// 模拟引擎配置
#[derive(Debug, Clone, Deserialize)]
pub struct SimulatedEngineConfig {
    /// 模拟平台提供的音色
    #[serde(default = "default_simulated_voices")]
    pub voices: Vec<SimulatedVoiceConfig>,

    /// 注册通知后多久出现音色列表（毫秒）
    #[serde(default = "default_voices_delay_ms")]
    pub voices_delay_ms: u64,

    /// 1x 语速下每分钟词数
    #[serde(default = "default_words_per_minute")]
    pub words_per_minute: u32,

    /// 被取消的 utterance 是否仍回调完成
    #[serde(default = "default_complete_on_cancel")]
    pub complete_on_cancel: bool,
}

/// 模拟音色
#[derive(Debug, Clone, Deserialize)]
pub struct SimulatedVoiceConfig {
    pub name: String,

    /// 为空时使用 name
    #[serde(default)]
    pub uri: Option<String>,

    #[serde(default)]
    pub lang: String,

    /// 是否为平台默认音色
    #[serde(default)]
    pub default: bool,
}

impl SimulatedVoiceConfig {
    fn new(name: &str, uri: &str, lang: &str, default: bool) -> Self {
        Self {
            name: name.to_string(),
            uri: Some(uri.to_string()),
            lang: lang.to_string(),
            default,
        }
    }

    pub fn to_descriptor(&self) -> VoiceDescriptor {
        let uri = self.uri.as_deref().unwrap_or(&self.name);
        VoiceDescriptor::new(self.name.as_str(), uri, self.lang.as_str())
            .with_platform_default(self.default)
    }
}

fn default_simulated_voices() -> Vec<SimulatedVoiceConfig> {
    vec![
        SimulatedVoiceConfig::new("Simulated Alto", "sim-alto", "en-US", true),
        SimulatedVoiceConfig::new("Simulated Baritone", "sim-baritone", "en-GB", false),
    ]
}

fn default_voices_delay_ms() -> u64 {
    250
}

fn default_words_per_minute() -> u32 {
    180
}

fn default_complete_on_cancel() -> bool {
    true
}

impl Default for SimulatedEngineConfig {
    fn default() -> Self {
        Self {
            voices: default_simulated_voices(),
            voices_delay_ms: default_voices_delay_ms(),
            words_per_minute: default_words_per_minute(),
            complete_on_cancel: default_complete_on_cancel(),
        }
    }
}

/// 朗读面板配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpeechConfig {
    /// 面板变体：basic 只有语速，extended 另含音量与音调
    #[serde(default)]
    pub variant: ControlVariant,
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
