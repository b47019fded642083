//! eSpeak NG Engine - 基于 espeak-ng 进程的宿主语音引擎
//!
//! 每个 utterance 启动一个 espeak-ng 子进程，进程退出即完成，cancel 时终止进程

use async_trait::async_trait;
use std::process::Stdio;
use std::sync::Mutex;
use tokio::process::Command;
use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;

use crate::application::ports::{
    CompletionHandler, EngineError, SpeechEnginePort, UtteranceOutcome, VoicesChangedHandler,
};
use crate::domain::speech::Utterance;
use crate::domain::voice::VoiceDescriptor;

/// espeak-ng 默认语速（词/分钟）
const BASE_WORDS_PER_MINUTE: f32 = 175.0;
const MIN_WORDS_PER_MINUTE: f32 = 80.0;
const MAX_WORDS_PER_MINUTE: f32 = 450.0;
/// espeak-ng 默认振幅 100，范围 0-200
const BASE_AMPLITUDE: f32 = 100.0;
const MAX_AMPLITUDE: f32 = 200.0;
/// espeak-ng 默认音高 50，范围 0-99
const BASE_PITCH: f32 = 50.0;
const MAX_PITCH: f32 = 99.0;

/// eSpeak NG 引擎配置
#[derive(Debug, Clone)]
pub struct EspeakSpeechEngineConfig {
    /// 可执行文件路径或名称
    pub binary: String,
}

impl Default for EspeakSpeechEngineConfig {
    fn default() -> Self {
        Self {
            binary: "espeak-ng".to_string(),
        }
    }
}

/// eSpeak NG Speech Engine
pub struct EspeakSpeechEngine {
    config: EspeakSpeechEngineConfig,
    current: Mutex<Option<CancellationToken>>,
}

impl EspeakSpeechEngine {
    pub fn new(config: EspeakSpeechEngineConfig) -> Self {
        tracing::info!(binary = %config.binary, "EspeakSpeechEngine initialized");
        Self {
            config,
            current: Mutex::new(None),
        }
    }
}

/// 将 utterance 转换为 espeak-ng 命令行参数
pub fn build_args(utterance: &Utterance) -> Vec<String> {
    let words_per_minute = (BASE_WORDS_PER_MINUTE * utterance.rate().value())
        .round()
        .clamp(MIN_WORDS_PER_MINUTE, MAX_WORDS_PER_MINUTE);

    let mut args = vec!["-s".to_string(), format!("{}", words_per_minute as u32)];

    if let Some(volume) = utterance.volume() {
        let amplitude = (BASE_AMPLITUDE * volume.value()).round().clamp(0.0, MAX_AMPLITUDE);
        args.push("-a".to_string());
        args.push(format!("{}", amplitude as u32));
    }
    if let Some(pitch) = utterance.pitch() {
        let pitch = (BASE_PITCH * pitch.value()).round().clamp(0.0, MAX_PITCH);
        args.push("-p".to_string());
        args.push(format!("{}", pitch as u32));
    }
    if let Some(voice) = utterance.voice() {
        args.push("-v".to_string());
        args.push(voice.uri().to_string());
    }

    args.push("--".to_string());
    args.push(utterance.text().to_string());
    args
}

/// 解析 `espeak-ng --voices` 输出
///
/// ```text
/// Pty Language       Age/Gender VoiceName          File                 Other Languages
///  5  af              --/M      Afrikaans          gmw/af
/// ```
pub fn parse_voice_list(output: &str) -> Vec<VoiceDescriptor> {
    output
        .lines()
        .skip(1)
        .filter_map(|line| {
            let columns: Vec<&str> = line.split_whitespace().collect();
            if columns.len() < 5 {
                return None;
            }
            // File 列唯一标识音色，`-v` 需要它而不是语言代码
            Some(VoiceDescriptor::new(columns[3], columns[4], columns[1]).with_local_service(true))
        })
        .collect()
}

#[async_trait]
impl SpeechEnginePort for EspeakSpeechEngine {
    fn name(&self) -> &str {
        "espeak-ng"
    }

    async fn is_available(&self) -> bool {
        match Command::new(&self.config.binary)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
        {
            Ok(status) => status.success(),
            Err(e) => {
                tracing::warn!(binary = %self.config.binary, error = %e, "espeak-ng not found");
                false
            }
        }
    }

    async fn voices(&self) -> Result<Vec<VoiceDescriptor>, EngineError> {
        let output = Command::new(&self.config.binary)
            .arg("--voices")
            .output()
            .await
            .map_err(|e| EngineError::VoiceListing(e.to_string()))?;

        if !output.status.success() {
            return Err(EngineError::VoiceListing(format!(
                "espeak-ng --voices exited with {}",
                output.status
            )));
        }

        Ok(parse_voice_list(&String::from_utf8_lossy(&output.stdout)))
    }

    fn speak(&self, utterance: Utterance, on_end: CompletionHandler) -> Result<(), EngineError> {
        let runtime = Handle::try_current().map_err(|e| EngineError::Unavailable(e.to_string()))?;

        // 进入 runtime 上下文后 tokio::process 才能注册子进程
        let _guard = runtime.enter();
        let mut child = Command::new(&self.config.binary)
            .args(build_args(&utterance))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| EngineError::SpawnFailed(e.to_string()))?;

        let token = CancellationToken::new();
        if let Ok(mut current) = self.current.lock() {
            if let Some(previous) = current.replace(token.clone()) {
                previous.cancel();
            }
        }

        tracing::debug!(
            utterance_id = %utterance.id(),
            pid = child.id().unwrap_or_default(),
            "espeak-ng started"
        );

        runtime.spawn(async move {
            let exited = tokio::select! {
                status = child.wait() => Some(status),
                _ = token.cancelled() => None,
            };

            let outcome = match exited {
                Some(Ok(status)) if status.success() => UtteranceOutcome::Finished,
                Some(Ok(status)) => {
                    UtteranceOutcome::Failed(format!("espeak-ng exited with {}", status))
                }
                Some(Err(e)) => UtteranceOutcome::Failed(e.to_string()),
                None => {
                    if let Err(e) = child.kill().await {
                        tracing::debug!(error = %e, "Failed to kill espeak-ng");
                    }
                    UtteranceOutcome::Cancelled
                }
            };
            on_end(outcome);
        });

        Ok(())
    }

    fn cancel(&self) {
        if let Some(token) = self.current.lock().ok().and_then(|mut c| c.take()) {
            token.cancel();
        }
    }

    fn set_voices_changed_handler(&self, _handler: Option<VoicesChangedHandler>) {
        // espeak-ng 的音色随安装固定，不会发出变化通知
    }
}
