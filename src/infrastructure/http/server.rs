//! HTTP Server
//!
//! Axum HTTP 服务器启动和配置

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use tracing::info;

use super::middleware::error_logging_middleware;
use super::routes::create_routes;
use super::state::AppState;

/// 请求体上限（朗读文本）
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// 静态文件托管（控制面板前端）
#[derive(Debug, Clone)]
pub struct StaticFiles {
    pub dir: PathBuf,
    /// URL 路径前缀，"/" 表示根路径托管
    pub path: String,
}

/// 服务器配置
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub static_files: Option<StaticFiles>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5070,
            static_files: None,
        }
    }
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            static_files: None,
        }
    }

    pub fn with_static_files(mut self, dir: impl Into<PathBuf>, path: impl Into<String>) -> Self {
        self.static_files = Some(StaticFiles {
            dir: dir.into(),
            path: path.into(),
        });
        self
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// HTTP 服务器
pub struct HttpServer {
    config: ServerConfig,
    state: Arc<AppState>,
}

impl HttpServer {
    /// 创建新的 HTTP 服务器
    pub fn new(config: ServerConfig, state: AppState) -> Self {
        Self {
            config,
            state: Arc::new(state),
        }
    }

    /// 构建 Router
    fn build_router(&self) -> Router {
        // CORS 配置 - 允许所有来源的跨域请求
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers([AUTHORIZATION, CONTENT_TYPE])
            .expose_headers(Any)
            .max_age(std::time::Duration::from_secs(3600));

        let mut router = create_routes();

        if let Some(static_files) = &self.config.static_files {
            info!(
                dir = %static_files.dir.display(),
                path = %static_files.path,
                "Serving static files"
            );
            let serve_dir = ServeDir::new(&static_files.dir);
            router = if static_files.path.is_empty() || static_files.path == "/" {
                router.fallback_service(serve_dir)
            } else {
                router.nest_service(&static_files.path, serve_dir)
            };
        }

        router
            .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
            .layer(middleware::from_fn(error_logging_middleware))
            .layer(TraceLayer::new_for_http())
            .layer(cors)
            .with_state(self.state.clone())
    }

    /// 启动服务器（带优雅关闭）
    pub async fn run_with_shutdown<F>(self, shutdown_signal: F) -> Result<(), std::io::Error>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let router = self.build_router();
        let addr = self.config.addr();

        info!("Starting HTTP server on {} (with graceful shutdown)", addr);

        let listener = TcpListener::bind(&addr).await?;
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use http::{Method, Request, StatusCode};
    use serde_json::{json, Value};
    use std::time::Duration;
    use tokio_util::sync::CancellationToken;
    use tower::util::ServiceExt;

    use crate::domain::speech::ControlVariant;
    use crate::domain::voice::VoiceDescriptor;
    use crate::infrastructure::adapters::{SimulatedSpeechEngine, SimulatedSpeechEngineConfig};
    use crate::infrastructure::events::EventPublisher;
    use crate::infrastructure::worker::{SpeechWorker, SpeechWorkerConfig};

    struct TestApp {
        router: Router,
        publisher: Arc<EventPublisher>,
        shutdown: CancellationToken,
    }

    impl Drop for TestApp {
        fn drop(&mut self) {
            self.shutdown.cancel();
        }
    }

    fn test_app(variant: ControlVariant, words_per_minute: u32, config: ServerConfig) -> TestApp {
        let engine = Arc::new(SimulatedSpeechEngine::new(SimulatedSpeechEngineConfig {
            voices: vec![
                VoiceDescriptor::named("A").with_platform_default(true),
                VoiceDescriptor::named("B"),
            ],
            voices_delay_ms: 1,
            words_per_minute,
            complete_on_cancel: true,
        }));
        let publisher = EventPublisher::new().arc();
        let shutdown = CancellationToken::new();
        let (worker, handle) = SpeechWorker::new(
            SpeechWorkerConfig {
                variant,
                ..Default::default()
            },
            engine,
            publisher.clone(),
            shutdown.clone(),
        );
        tokio::spawn(worker.run());

        let state = AppState::new(Arc::new(handle), publisher.clone(), variant);
        let server = HttpServer::new(config, state);
        TestApp {
            router: server.build_router(),
            publisher,
            shutdown,
        }
    }

    async fn call(app: &TestApp, method: Method, uri: &str, body: Option<Value>) -> Value {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => request
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => request.body(Body::empty()).unwrap(),
        };

        let response = app.router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn wait_for_session<F>(app: &TestApp, predicate: F) -> Value
    where
        F: Fn(&Value) -> bool,
    {
        for _ in 0..200 {
            let body = call(app, Method::GET, "/api/session", None).await;
            if predicate(&body["data"]) {
                return body["data"].clone();
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("session never reached expected state");
    }

    #[tokio::test]
    async fn test_ping() {
        let app = test_app(ControlVariant::Extended, 60_000, ServerConfig::default());
        let body = call(&app, Method::GET, "/api/ping", None).await;
        assert_eq!(body["errno"], 0);
        assert_eq!(body["data"]["service"], "lector");
        assert!(body["data"]["uptime_secs"].as_i64().unwrap() >= 0);
    }

    #[tokio::test]
    async fn test_speak_then_completion_returns_to_idle() {
        let app = test_app(ControlVariant::Extended, 60_000, ServerConfig::default());

        let body = call(&app, Method::POST, "/api/session/text", Some(json!({"text": "hello"}))).await;
        assert_eq!(body["errno"], 0);
        assert_eq!(body["data"]["state"], "idle");

        let body = call(&app, Method::POST, "/api/session/rate", Some(json!({"rate": 1.5}))).await;
        assert_eq!(body["data"]["configuration"]["rate"], 1.5);
        assert_eq!(body["data"]["state"], "idle");

        let body = call(&app, Method::POST, "/api/session/speak", None).await;
        assert_eq!(body["errno"], 0);
        assert_eq!(body["data"]["state"], "speaking");
        assert!(body["data"]["utterance_id"].is_string());

        let data = wait_for_session(&app, |data| data["state"] == "idle").await;
        assert!(data["utterance_id"].is_null());
    }

    #[tokio::test]
    async fn test_stop_while_speaking() {
        let app = test_app(ControlVariant::Extended, 1, ServerConfig::default());

        call(&app, Method::POST, "/api/session/text", Some(json!({"text": "a long text"}))).await;
        let body = call(&app, Method::POST, "/api/session/speak", None).await;
        assert_eq!(body["data"]["state"], "speaking");

        let body = call(&app, Method::POST, "/api/session/stop", None).await;
        assert_eq!(body["errno"], 0);
        assert_eq!(body["data"]["state"], "idle");

        // idle 时再次 stop 无副作用
        let body = call(&app, Method::POST, "/api/session/stop", None).await;
        assert_eq!(body["data"]["state"], "idle");
    }

    #[tokio::test]
    async fn test_out_of_domain_rate_is_rejected() {
        let app = test_app(ControlVariant::Extended, 60_000, ServerConfig::default());

        let body = call(&app, Method::POST, "/api/session/rate", Some(json!({"rate": 3.0}))).await;
        assert_eq!(body["errno"], 400);
        assert!(body["data"].is_null());

        let body = call(&app, Method::GET, "/api/session", None).await;
        assert_eq!(body["data"]["configuration"]["rate"], 1.0);
    }

    #[tokio::test]
    async fn test_basic_panel_rejects_volume_and_pitch() {
        let app = test_app(ControlVariant::Basic, 60_000, ServerConfig::default());

        let body = call(&app, Method::POST, "/api/session/volume", Some(json!({"volume": 0.5}))).await;
        assert_eq!(body["errno"], 400);
        let body = call(&app, Method::POST, "/api/session/pitch", Some(json!({"pitch": 1.5}))).await;
        assert_eq!(body["errno"], 400);

        let body = call(&app, Method::GET, "/api/options", None).await;
        assert_eq!(body["data"]["variant"], "basic");
        assert!(body["data"]["rate"].is_array());
        assert!(body["data"].get("volume").is_none());
        assert!(body["data"].get("pitch").is_none());
    }

    #[tokio::test]
    async fn test_extended_options_carry_labels() {
        let app = test_app(ControlVariant::Extended, 60_000, ServerConfig::default());

        let body = call(&app, Method::GET, "/api/options", None).await;
        let data = &body["data"];
        assert_eq!(data["variant"], "extended");
        assert!(data["rate"]
            .as_array()
            .unwrap()
            .iter()
            .any(|o| o["value"] == 1.0 && o["label"] == "1x (Normal)"));
        assert!(data["volume"].is_array());
        assert!(data["pitch"].is_array());
    }

    #[tokio::test]
    async fn test_voice_list_and_selection() {
        let app = test_app(ControlVariant::Extended, 60_000, ServerConfig::default());

        let data = wait_for_session(&app, |data| {
            data["voices"].as_array().map_or(false, |v| v.len() == 2)
        })
        .await;
        assert_eq!(data["default_voice"], "A");
        assert_eq!(data["configuration"]["voice"], "A");

        let body = call(&app, Method::POST, "/api/session/voice", Some(json!({"name": "B"}))).await;
        assert_eq!(body["data"]["configuration"]["voice"], "B");

        // 未命中的名称保留原选择
        let body = call(
            &app,
            Method::POST,
            "/api/session/voice",
            Some(json!({"name": "NonexistentVoice"})),
        )
        .await;
        assert_eq!(body["errno"], 0);
        assert_eq!(body["data"]["configuration"]["voice"], "B");

        let body = call(&app, Method::GET, "/api/voice/list", None).await;
        assert_eq!(body["data"]["voices"].as_array().unwrap().len(), 2);
        assert_eq!(body["data"]["default_voice"], "A");
        assert_eq!(body["data"]["selected_voice"], "B");
    }

    #[tokio::test]
    async fn test_serves_static_files_at_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<h1>panel</h1>").unwrap();

        let app = test_app(
            ControlVariant::Extended,
            60_000,
            ServerConfig::default().with_static_files(dir.path(), "/"),
        );

        let request = Request::builder().uri("/index.html").body(Body::empty()).unwrap();
        let response = app.router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"<h1>panel</h1>");

        // API 路由优先于静态文件
        let body = call(&app, Method::GET, "/api/ping", None).await;
        assert_eq!(body["errno"], 0);
    }

    #[tokio::test]
    async fn test_events_websocket_streams_speaking_lifecycle() {
        use futures_util::StreamExt;
        use tokio_tungstenite::tungstenite::Message as WsMessage;

        let app = test_app(ControlVariant::Extended, 60_000, ServerConfig::default());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let router = app.router.clone();
        tokio::spawn(async move { axum::serve(listener, router).await });

        let (mut socket, _) = tokio_tungstenite::connect_async(format!("ws://{}/ws/events", addr))
            .await
            .unwrap();

        // 订阅在升级回调中建立，等待其生效后再触发事件
        for _ in 0..200 {
            if app.publisher.subscriber_count() > 0 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        assert!(app.publisher.subscriber_count() > 0);

        call(&app, Method::POST, "/api/session/text", Some(json!({"text": "hello"}))).await;
        let body = call(&app, Method::POST, "/api/session/speak", None).await;
        let utterance_id = body["data"]["utterance_id"].clone();

        let mut lifecycle = Vec::new();
        let collect = async {
            while let Some(frame) = socket.next().await {
                let WsMessage::Text(text) = frame.unwrap() else {
                    continue;
                };
                let event: Value = serde_json::from_str(&text).unwrap();
                match event["event"].as_str() {
                    Some("SpeakingStarted") => lifecycle.push(event),
                    Some("SpeakingEnded") => {
                        lifecycle.push(event);
                        break;
                    }
                    _ => {}
                }
            }
        };
        tokio::time::timeout(Duration::from_secs(5), collect)
            .await
            .unwrap();

        assert_eq!(lifecycle.len(), 2);
        assert_eq!(lifecycle[0]["event"], "SpeakingStarted");
        assert_eq!(lifecycle[0]["data"]["utterance_id"], utterance_id);
        assert_eq!(lifecycle[1]["event"], "SpeakingEnded");
        assert_eq!(lifecycle[1]["data"]["utterance_id"], utterance_id);
        assert_eq!(lifecycle[1]["data"]["reason"], "completed");
    }
}
