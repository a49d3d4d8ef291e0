//! Product HTTP handlers.
//!
//! ```text
//! GET    /api/products?offset=0&limit=3&sortby=price&sortdirection=desc
//! GET    /api/products/{id}
//! POST   /api/products {"title":"X","price":100,"category_id":201}
//! PUT    /api/products/{id}
//! DELETE /api/products/{id}
//! PUT    /api/products/category/{category_id} {"product_ids":[1,2]}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use pagination::Filter;

use crate::domain::Error;
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::{
    AssignCategoryRequest, CreatedResponse, ProductRequest, ProductResponse,
};
use crate::inbound::http::error::ErrorResponse;
use crate::inbound::http::state::HttpState;

/// List products.
#[utoipa::path(
    get,
    path = "/api/products",
    params(
        ("offset" = Option<i64>, Query, description = "Rows to skip"),
        ("limit" = Option<i64>, Query, description = "Rows to return; non-positive means 3"),
        ("sortby" = Option<String>, Query, description = "Sort field, default `id`"),
        ("sortdirection" = Option<String>, Query, description = "ASC or DESC"),
    ),
    responses(
        (status = 200, description = "Products", body = [ProductResponse]),
        (status = 400, description = "Invalid filter", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tags = ["products"],
    operation_id = "listProducts"
)]
#[get("/products")]
pub async fn list_products(
    state: web::Data<HttpState>,
    filter: web::Query<Filter>,
) -> ApiResult<web::Json<Vec<ProductResponse>>> {
    let products = state
        .products
        .list(filter.into_inner())
        .await
        .map_err(|err| Error::wrap("handlers.list_products", err))?;
    Ok(web::Json(products.into_iter().map(Into::into).collect()))
}

/// Fetch one product.
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(("id" = i64, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product", body = ProductResponse),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 404, description = "Not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tags = ["products"],
    operation_id = "getProduct"
)]
#[get("/products/{id}")]
pub async fn get_product(
    state: web::Data<HttpState>,
    id: web::Path<i64>,
) -> ApiResult<web::Json<ProductResponse>> {
    let product = state
        .products
        .get(id.into_inner())
        .await
        .map_err(|err| Error::wrap("handlers.get_product", err))?;
    Ok(web::Json(product.into()))
}

/// Create a product, checking its category when one is named.
#[utoipa::path(
    post,
    path = "/api/products",
    request_body = ProductRequest,
    responses(
        (status = 201, description = "Created", body = CreatedResponse),
        (status = 400, description = "Invalid request or category", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tags = ["products"],
    operation_id = "createProduct"
)]
#[post("/products")]
pub async fn create_product(
    state: web::Data<HttpState>,
    payload: web::Json<ProductRequest>,
) -> ApiResult<HttpResponse> {
    let id = state
        .products_command
        .create(payload.into_inner().into())
        .await
        .map_err(|err| Error::wrap("handlers.create_product", err))?;
    Ok(HttpResponse::Created().json(CreatedResponse { id }))
}

/// Replace a product's content.
#[utoipa::path(
    put,
    path = "/api/products/{id}",
    params(("id" = i64, Path, description = "Product id")),
    request_body = ProductRequest,
    responses(
        (status = 204, description = "Updated"),
        (status = 400, description = "Invalid request or category", body = ErrorResponse),
        (status = 404, description = "Not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tags = ["products"],
    operation_id = "updateProduct"
)]
#[put("/products/{id}")]
pub async fn update_product(
    state: web::Data<HttpState>,
    id: web::Path<i64>,
    payload: web::Json<ProductRequest>,
) -> ApiResult<HttpResponse> {
    state
        .products_command
        .update(id.into_inner(), payload.into_inner().into())
        .await
        .map_err(|err| Error::wrap("handlers.update_product", err))?;
    Ok(HttpResponse::NoContent().finish())
}

/// Delete a product.
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    params(("id" = i64, Path, description = "Product id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tags = ["products"],
    operation_id = "deleteProduct"
)]
#[delete("/products/{id}")]
pub async fn delete_product(
    state: web::Data<HttpState>,
    id: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    state
        .products_command
        .delete(id.into_inner())
        .await
        .map_err(|err| Error::wrap("handlers.delete_product", err))?;
    Ok(HttpResponse::NoContent().finish())
}

/// Move products into a category.
#[utoipa::path(
    put,
    path = "/api/products/category/{category_id}",
    params(("category_id" = i64, Path, description = "Target category id")),
    request_body = AssignCategoryRequest,
    responses(
        (status = 204, description = "Assigned"),
        (status = 400, description = "Invalid request or category", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tags = ["products"],
    operation_id = "assignProductsCategory"
)]
#[put("/products/category/{category_id}")]
pub async fn assign_category(
    state: web::Data<HttpState>,
    category_id: web::Path<i64>,
    payload: web::Json<AssignCategoryRequest>,
) -> ApiResult<HttpResponse> {
    state
        .products_command
        .assign_category(category_id.into_inner(), payload.into_inner().product_ids)
        .await
        .map_err(|err| Error::wrap("handlers.assign_category", err))?;
    Ok(HttpResponse::NoContent().finish())
}
