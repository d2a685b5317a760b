//! 短链接 CRUD 端点

use std::sync::Arc;

use actix_web::{HttpResponse, web};
use tracing::debug;

use crate::errors::Result;
use crate::services::{AuthenticatedUser, UrlService};
use crate::storage::NewShortUrl;

use super::helpers::{created_response, success_response};
use super::types::{CreateUrlRequest, UrlResponse, ValidateOrdered};

/// POST /urls
pub async fn create_url(
    user: web::ReqData<AuthenticatedUser>,
    body: web::Json<CreateUrlRequest>,
    service: web::Data<Arc<UrlService>>,
) -> Result<HttpResponse> {
    let body = body.into_inner();
    body.validate_ordered()?;

    let created = service
        .create_url(NewShortUrl {
            short_code: body.short_code,
            target_url: body.target_url.trim().to_string(),
            category_ids: body.category_ids.unwrap_or_default(),
        })
        .await?;

    debug!("User {} created url {}", user.id, created.url.short_code);
    Ok(created_response(UrlResponse::from(created)))
}

/// GET /urls
pub async fn list_urls(service: web::Data<Arc<UrlService>>) -> Result<HttpResponse> {
    let urls: Vec<UrlResponse> = service
        .list_urls()
        .await?
        .into_iter()
        .map(UrlResponse::from)
        .collect();
    Ok(success_response(urls))
}

/// GET /urls/{id}
pub async fn get_url(
    path: web::Path<i64>,
    service: web::Data<Arc<UrlService>>,
) -> Result<HttpResponse> {
    let url = service.get_url(path.into_inner()).await?;
    Ok(success_response(UrlResponse::from(url)))
}
