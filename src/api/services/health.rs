use std::sync::Arc;
use std::time::Instant;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, web};
use tracing::{error, trace};

use crate::storage::SeaOrmStorage;

use super::admin::{ErrorCode, HealthResponse, json_response};

/// Health Service
///
/// 直接调用 storage，不经过业务层。
pub struct HealthService;

impl HealthService {
    pub async fn health_check(storage: web::Data<Arc<SeaOrmStorage>>) -> impl Responder {
        let start_time = Instant::now();
        trace!("Received health check request");

        let storage_type = storage.get_backend_config().storage_type;
        let healthy = match storage.ping().await {
            Ok(()) => true,
            Err(e) => {
                error!("Storage health check failed: {}", e);
                false
            }
        };

        let (status, code, label) = if healthy {
            (StatusCode::OK, ErrorCode::Success, "healthy")
        } else {
            (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorCode::ServiceUnavailable,
                "unhealthy",
            )
        };

        trace!(
            "Health check finished in {}ms",
            start_time.elapsed().as_millis()
        );

        json_response(
            status,
            code,
            label,
            Some(HealthResponse {
                status: label.to_string(),
                storage_type,
                timestamp: chrono::Utc::now(),
            }),
        )
    }
}

/// Health 路由配置
pub fn health_routes() -> actix_web::Scope {
    web::scope("")
        .route("", web::get().to(HealthService::health_check))
        .route("", web::head().to(HealthService::health_check))
}
