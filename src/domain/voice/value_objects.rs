//! Voice Context - Value Objects

use serde::{Deserialize, Serialize};

/// 平台提供的音色句柄
///
/// 以 `name` 唯一标识，其余字段仅作展示与回传给引擎使用。
/// 生命周期由平台掌控，这里只持有当前刷新周期内的快照。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceDescriptor {
    name: String,
    uri: String,
    lang: String,
    local_service: bool,
    is_default: bool,
}

impl VoiceDescriptor {
    pub fn new(name: impl Into<String>, uri: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            uri: uri.into(),
            lang: lang.into(),
            local_service: true,
            is_default: false,
        }
    }

    /// 仅有名称的音色（uri 与名称相同）
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::new(name.clone(), name, "")
    }

    pub fn with_local_service(mut self, local_service: bool) -> Self {
        self.local_service = local_service;
        self
    }

    pub fn with_platform_default(mut self, is_default: bool) -> Self {
        self.is_default = is_default;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// 引擎侧标识，speak 时原样回传
    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn lang(&self) -> &str {
        &self.lang
    }

    pub fn local_service(&self) -> bool {
        self.local_service
    }

    /// 平台自身标记的默认音色（仅供展示）
    pub fn is_platform_default(&self) -> bool {
        self.is_default
    }
}

impl std::fmt::Display for VoiceDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
