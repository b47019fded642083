//! HTTP Middleware

use std::time::Instant;

use axum::{
    extract::Request,
    http::{HeaderValue, StatusCode},
    middleware::Next,
    response::Response,
};

/// 响应耗时头（毫秒）
pub const ELAPSED_HEADER: &str = "x-elapsed-ms";

/// 请求计时与协议层错误日志
///
/// 每个响应带上 `x-elapsed-ms`；状态码为 4xx/5xx 时记录日志（路由不存在、方法不符、
/// JSON 解析失败等）。业务错误以 HTTP 200 返回，由 ApiError::into_response() 记录
pub async fn error_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let mut response = next.run(request).await;
    let elapsed_ms = started.elapsed().as_millis() as u64;

    log_rejected(response.status(), method.as_str(), &path, elapsed_ms);
    response
        .headers_mut()
        .insert(ELAPSED_HEADER, HeaderValue::from(elapsed_ms));

    response
}

fn log_rejected(status: StatusCode, method: &str, path: &str, elapsed_ms: u64) {
    match status.as_u16() {
        500..=599 => tracing::error!(
            method,
            path,
            status = status.as_u16(),
            elapsed_ms,
            "HTTP request failed"
        ),
        400..=499 => tracing::warn!(
            method,
            path,
            status = status.as_u16(),
            elapsed_ms,
            "HTTP request rejected"
        ),
        _ => {}
    }
}
