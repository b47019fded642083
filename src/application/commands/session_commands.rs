//! Session Commands - 朗读会话相关命令
//!
//! 数值参数保持 UI 传入的原始浮点值，由处理器转换为领域值对象

/// 修改朗读配置命令
#[derive(Debug, Clone)]
pub enum ConfigureSessionCommand {
    SetText { text: String },
    SetRate { rate: f32 },
    SetVolume { volume: f32 },
    SetPitch { pitch: f32 },
    /// 按名称选择音色
    SelectVoice { name: String },
}

/// 开始朗读命令（已在朗读时为 no-op）
#[derive(Debug, Clone, Default)]
pub struct SpeakCommand;

/// 停止朗读命令（空闲时为 no-op）
#[derive(Debug, Clone, Default)]
pub struct StopCommand;
