//! Analytics ingestion stub
//!
//! Accepts any payload and always acknowledges it.

use actix_web::{HttpResponse, web};
use futures_util::StreamExt;
use tracing::debug;

use super::admin::{AnalyticsAck, success_response};

/// 只保留前 64 KiB 用于日志摘要，其余读取后丢弃
pub const MAX_ANALYTICS_BODY: usize = 64 * 1024;

pub struct AnalyticsService;

impl AnalyticsService {
    /// POST /analytics
    ///
    /// 直接读取原始 payload，超长 body 与流错误都不会影响应答。
    pub async fn ingest(mut payload: web::Payload) -> HttpResponse {
        let mut body = web::BytesMut::new();
        let mut received = 0usize;

        while let Some(chunk) = payload.next().await {
            match chunk {
                Ok(chunk) => {
                    received += chunk.len();
                    let room = MAX_ANALYTICS_BODY.saturating_sub(body.len());
                    body.extend_from_slice(&chunk[..chunk.len().min(room)]);
                }
                Err(e) => {
                    debug!("Analytics payload stream error ignored: {}", e);
                    break;
                }
            }
        }

        if received > MAX_ANALYTICS_BODY {
            debug!(
                "Analytics payload truncated: {} of {} bytes kept",
                body.len(),
                received
            );
        }

        match serde_json::from_slice::<serde_json::Value>(&body) {
            Ok(payload) => {
                let event = payload
                    .get("event")
                    .and_then(|v| v.as_str())
                    .unwrap_or("unknown");
                debug!("Analytics event received: {} ({} bytes)", event, received);
            }
            Err(e) => {
                debug!("Ignoring malformed analytics payload: {}", e);
            }
        }

        success_response(AnalyticsAck { success: true })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, test};

    #[actix_rt::test]
    async fn test_always_acknowledges() {
        let app = test::init_service(
            App::new().route("/analytics", web::post().to(AnalyticsService::ingest)),
        )
        .await;

        for payload in ["{\"event\":\"click\"}", "not json at all", ""] {
            let req = test::TestRequest::post()
                .uri("/analytics")
                .set_payload(payload)
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), 200);

            let body: serde_json::Value = test::read_body_json(resp).await;
            assert_eq!(body["data"]["success"], true);
        }
    }

    #[actix_rt::test]
    async fn test_oversized_body_still_acknowledged() {
        let app = test::init_service(
            App::new().route("/analytics", web::post().to(AnalyticsService::ingest)),
        )
        .await;

        // 超过默认 256 KiB PayloadConfig 上限
        let payload = format!("{{\"event\":\"{}\"}}", "x".repeat(300 * 1024));
        let req = test::TestRequest::post()
            .uri("/analytics")
            .insert_header(("Content-Type", "application/json"))
            .set_payload(payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["success"], true);
    }
}
