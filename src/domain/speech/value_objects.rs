//! Speech Context - Value Objects
//!
//! 语速 / 音量 / 音调均为离散取值，只能通过选项列表中的值构造

use serde::{Deserialize, Serialize};

use super::SpeechError;

/// 浮点比较容差（JSON 数值经 f64 -> f32 转换后仍应落在选项上）
const OPTION_EPSILON: f32 = 1e-3;

/// 选择器中的一个选项
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParameterOption {
    pub value: f32,
    pub label: &'static str,
}

const fn option(value: f32, label: &'static str) -> ParameterOption {
    ParameterOption { value, label }
}

fn canonical(value: f32, options: &[ParameterOption]) -> Option<f32> {
    options
        .iter()
        .find(|o| (o.value - value).abs() < OPTION_EPSILON)
        .map(|o| o.value)
}

/// 语速
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(into = "f32")]
pub struct SpeechRate(f32);

impl SpeechRate {
    pub const OPTIONS: &'static [ParameterOption] = &[
        option(0.1, "0.1x"),
        option(0.5, "0.5x"),
        option(1.0, "1x (Normal)"),
        option(1.5, "1.5x"),
        option(2.0, "2x"),
    ];

    pub fn value(&self) -> f32 {
        self.0
    }
}

impl Default for SpeechRate {
    fn default() -> Self {
        Self(1.0)
    }
}

impl TryFrom<f32> for SpeechRate {
    type Error = SpeechError;

    fn try_from(value: f32) -> Result<Self, Self::Error> {
        canonical(value, Self::OPTIONS)
            .map(Self)
            .ok_or(SpeechError::InvalidRate(value))
    }
}

impl From<SpeechRate> for f32 {
    fn from(rate: SpeechRate) -> Self {
        rate.0
    }
}

/// 音量（仅扩展面板）
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(into = "f32")]
pub struct SpeechVolume(f32);

impl SpeechVolume {
    pub const OPTIONS: &'static [ParameterOption] = &[
        option(0.0, "0%"),
        option(0.2, "20%"),
        option(0.4, "40%"),
        option(0.6, "60%"),
        option(0.8, "80%"),
        option(1.0, "100%"),
    ];

    pub fn value(&self) -> f32 {
        self.0
    }
}

impl Default for SpeechVolume {
    fn default() -> Self {
        Self(1.0)
    }
}

impl TryFrom<f32> for SpeechVolume {
    type Error = SpeechError;

    fn try_from(value: f32) -> Result<Self, Self::Error> {
        canonical(value, Self::OPTIONS)
            .map(Self)
            .ok_or(SpeechError::InvalidVolume(value))
    }
}

impl From<SpeechVolume> for f32 {
    fn from(volume: SpeechVolume) -> Self {
        volume.0
    }
}

/// 音调（仅扩展面板）
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(into = "f32")]
pub struct SpeechPitch(f32);

impl SpeechPitch {
    pub const OPTIONS: &'static [ParameterOption] = &[
        option(0.5, "0.5x"),
        option(0.75, "0.75x"),
        option(1.0, "1x (Normal)"),
        option(1.25, "1.25x"),
        option(1.5, "1.5x"),
    ];

    pub fn value(&self) -> f32 {
        self.0
    }
}

impl Default for SpeechPitch {
    fn default() -> Self {
        Self(1.0)
    }
}

impl TryFrom<f32> for SpeechPitch {
    type Error = SpeechError;

    fn try_from(value: f32) -> Result<Self, Self::Error> {
        canonical(value, Self::OPTIONS)
            .map(Self)
            .ok_or(SpeechError::InvalidPitch(value))
    }
}

impl From<SpeechPitch> for f32 {
    fn from(pitch: SpeechPitch) -> Self {
        pitch.0
    }
}

/// 面板变体
///
/// - Basic: 文本、语速、音色
/// - Extended: 额外提供音量与音调
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlVariant {
    Basic,
    #[default]
    Extended,
}

impl ControlVariant {
    pub fn supports_volume(&self) -> bool {
        matches!(self, Self::Extended)
    }

    pub fn supports_pitch(&self) -> bool {
        matches!(self, Self::Extended)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Extended => "extended",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_normal() {
        assert_eq!(SpeechRate::default().value(), 1.0);
        assert_eq!(SpeechVolume::default().value(), 1.0);
        assert_eq!(SpeechPitch::default().value(), 1.0);
    }

    #[test]
    fn test_rate_accepts_listed_options_only() {
        assert_eq!(SpeechRate::try_from(1.5).unwrap().value(), 1.5);
        assert_eq!(SpeechRate::try_from(0.1).unwrap().value(), 0.1);
        assert!(matches!(
            SpeechRate::try_from(3.0),
            Err(SpeechError::InvalidRate(_))
        ));
        assert!(SpeechRate::try_from(0.75).is_err());
    }

    #[test]
    fn test_value_from_f64_is_normalized() {
        let rate = SpeechRate::try_from(0.1_f64 as f32).unwrap();
        assert_eq!(rate.value(), 0.1_f32);

        let volume = SpeechVolume::try_from(0.6_f64 as f32).unwrap();
        assert_eq!(volume.value(), 0.6_f32);
    }

    #[test]
    fn test_volume_and_pitch_domains() {
        assert!(SpeechVolume::try_from(0.0).is_ok());
        assert!(SpeechVolume::try_from(0.5).is_err());
        assert!(SpeechPitch::try_from(1.25).is_ok());
        assert!(SpeechPitch::try_from(2.0).is_err());
    }

    #[test]
    fn test_rate_serializes_as_number() {
        let json = serde_json::to_string(&SpeechRate::try_from(2.0).unwrap()).unwrap();
        assert_eq!(json, "2.0");
    }

    #[test]
    fn test_variant_controls() {
        assert!(ControlVariant::Extended.supports_volume());
        assert!(!ControlVariant::Basic.supports_pitch());
        assert_eq!(ControlVariant::default(), ControlVariant::Extended);
    }
}
