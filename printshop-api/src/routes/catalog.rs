/// Catalog category endpoints
///
/// - `GET /api/catalog/categories` - All categories in menu order
/// - `GET /api/catalog/categories/:slug` - One category

use crate::error::{ApiError, ApiResult};
use axum::{extract::Path, Json};
use printshop_shared::catalog::{self, Category, CategorySummary};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct CategoryListResponse {
    pub success: bool,
    pub message: String,
    pub categories: Vec<CategorySummary>,
}

#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    pub success: bool,
    pub message: String,
    pub category: CategorySummary,
}

pub async fn list_categories() -> Json<CategoryListResponse> {
    let categories = catalog::list_categories();

    Json(CategoryListResponse {
        success: true,
        message: format!("{} categories", categories.len()),
        categories,
    })
}

/// # Errors
///
/// - `404 Not Found`: no category with this slug
pub async fn get_category(Path(slug): Path<String>) -> ApiResult<Json<CategoryResponse>> {
    let category: Category = slug
        .parse()
        .map_err(|e: catalog::UnknownCategory| ApiError::NotFound(e.to_string()))?;

    Ok(Json(CategoryResponse {
        success: true,
        message: category.display_name().to_string(),
        category: category.into(),
    }))
}
