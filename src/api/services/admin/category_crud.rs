//! 分类 CRUD 端点

use std::sync::Arc;

use actix_web::{HttpResponse, web};

use crate::errors::Result;
use crate::services::CategoryService;

use super::helpers::{created_response, success_response};
use super::types::{
    CategoryDetailResponse, CategoryListItem, CategoryResponse, CreateCategoryRequest,
    ValidateOrdered,
};

/// POST /categories
pub async fn create_category(
    body: web::Json<CreateCategoryRequest>,
    service: web::Data<Arc<CategoryService>>,
) -> Result<HttpResponse> {
    let body = body.into_inner();
    body.validate_ordered()?;

    let category = service.create_category(&body.name).await?;
    Ok(created_response(CategoryResponse::from(category)))
}

/// GET /categories（按名称字母序）
pub async fn list_categories(service: web::Data<Arc<CategoryService>>) -> Result<HttpResponse> {
    let categories: Vec<CategoryListItem> = service
        .list_categories()
        .await?
        .into_iter()
        .map(CategoryListItem::from)
        .collect();
    Ok(success_response(categories))
}

/// GET /categories/{id}
pub async fn get_category(
    path: web::Path<i64>,
    service: web::Data<Arc<CategoryService>>,
) -> Result<HttpResponse> {
    let category = service.get_category(path.into_inner()).await?;
    Ok(success_response(CategoryDetailResponse::from(category)))
}
