use std::sync::Arc;

use actix_web::{HttpResponse, web};
use tracing::{debug, trace};

use crate::errors::LinkshelfError;
use crate::services::RedirectResolver;

use super::admin::error_from_linkshelf;

pub struct RedirectService;

fn redirect_response(target: String) -> HttpResponse {
    HttpResponse::TemporaryRedirect()
        .insert_header(("Location", target))
        .insert_header(("Cache-Control", "no-cache, no-store, must-revalidate"))
        .finish()
}

fn redirect_error(e: LinkshelfError) -> HttpResponse {
    if matches!(e, LinkshelfError::NotFound(_)) {
        debug!("{}", e.message());
    }
    error_from_linkshelf(&e)
}

impl RedirectService {
    /// GET /{code}
    ///
    /// 307 跳转到目标地址；找不到返回 404，参数为空返回 400。
    pub async fn handle_redirect(
        path: web::Path<String>,
        resolver: web::Data<Arc<RedirectResolver>>,
    ) -> HttpResponse {
        let captured_path = path.into_inner();
        trace!("Redirect request for: {:?}", captured_path);

        match resolver.resolve(&captured_path).await {
            Ok(target) => redirect_response(target),
            Err(e) => redirect_error(e),
        }
    }

    /// HEAD /{code}
    ///
    /// 与 GET 相同的响应，但不计入点击（链接预览等探测请求）。
    pub async fn handle_head(
        path: web::Path<String>,
        resolver: web::Data<Arc<RedirectResolver>>,
    ) -> HttpResponse {
        let captured_path = path.into_inner();
        trace!("HEAD redirect request for: {:?}", captured_path);

        match resolver.peek(&captured_path).await {
            Ok(target) => redirect_response(target),
            Err(e) => redirect_error(e),
        }
    }
}

pub fn redirect_routes() -> actix_web::Scope {
    web::scope("")
        .route("/{code:.*}", web::get().to(RedirectService::handle_redirect))
        .route("/{code:.*}", web::head().to(RedirectService::handle_head))
}
