//! Lector - 浏览器朗读控制面板服务
//!
//! - Domain: speech/, voice/
//! - Application: commands, queries, ports
//! - Infrastructure: http, worker, adapters, events

use std::sync::Arc;

use lector::application::SpeechEnginePort;
use lector::config::{load_config, print_config, AppConfig, EngineKind};
use lector::infrastructure::adapters::{
    EspeakSpeechEngine, EspeakSpeechEngineConfig, SimulatedSpeechEngine,
    SimulatedSpeechEngineConfig,
};
use lector::infrastructure::events::EventPublisher;
use lector::infrastructure::http::{AppState, HttpServer, ServerConfig};
use lector::infrastructure::worker::{SpeechWorker, SpeechWorkerConfig};
use tokio_util::sync::CancellationToken;

fn init_tracing(config: &AppConfig) {
    let log_filter = format!(
        "{},lector={},tower_http=debug",
        config.log.level, config.log.level
    );
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    if config.log.json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

fn build_engine(config: &AppConfig) -> Arc<dyn SpeechEnginePort> {
    match config.engine.kind {
        EngineKind::Simulated => {
            let simulated = &config.engine.simulated;
            Arc::new(SimulatedSpeechEngine::new(SimulatedSpeechEngineConfig {
                voices: simulated.voices.iter().map(|v| v.to_descriptor()).collect(),
                voices_delay_ms: simulated.voices_delay_ms,
                words_per_minute: simulated.words_per_minute,
                complete_on_cancel: simulated.complete_on_cancel,
            }))
        }
        EngineKind::Espeak => Arc::new(EspeakSpeechEngine::new(EspeakSpeechEngineConfig {
            binary: config.engine.espeak_binary.clone(),
        })),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    init_tracing(&config);

    tracing::info!("Lector - 朗读控制面板");
    print_config(&config);

    // 创建语音引擎
    let engine = build_engine(&config);

    // 创建事件发布器
    let event_publisher = EventPublisher::new().arc();

    // 创建并启动 SpeechWorker
    let shutdown = CancellationToken::new();
    let worker_config = SpeechWorkerConfig {
        variant: config.speech.variant,
        ..Default::default()
    };
    let (worker, session) = SpeechWorker::new(
        worker_config,
        engine,
        event_publisher.clone(),
        shutdown.clone(),
    );
    let worker_task = tokio::spawn(worker.run());

    // 创建 HTTP 服务器
    let mut server_config = ServerConfig::new(&config.server.host, config.server.port);
    if config.server.static_files.enabled {
        server_config = server_config.with_static_files(
            config.server.static_files.dir.clone(),
            config.server.static_files.path.clone(),
        );
    }
    let state = AppState::new(Arc::new(session), event_publisher, config.speech.variant);

    let server = HttpServer::new(server_config, state);

    tracing::info!("Starting HTTP server...");

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to listen for ctrl-c");
            tracing::info!("Received shutdown signal");
        })
        .await?;

    // 停止 worker，取消仍在朗读的 utterance
    shutdown.cancel();
    if let Err(e) = worker_task.await {
        tracing::error!(error = %e, "SpeechWorker task failed");
    }

    tracing::info!("Server shutdown complete");

    Ok(())
}
