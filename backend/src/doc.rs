//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every catalog endpoint with its request, response
//! and error schemas. The document is served by Swagger UI in debug builds.

use utoipa::OpenApi;

use crate::domain::ErrorCode;
use crate::inbound::http::dto::{
    AssignCategoryRequest, CategoryRequest, CategoryResponse, CreatedResponse, ProductRequest,
    ProductResponse,
};
use crate::inbound::http::error::ErrorResponse;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Catalog API",
        description = "Products and categories with validated listings."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::home::home,
        crate::inbound::http::categories::list_categories,
        crate::inbound::http::categories::get_category,
        crate::inbound::http::categories::create_category,
        crate::inbound::http::categories::update_category,
        crate::inbound::http::categories::delete_category,
        crate::inbound::http::products::list_products,
        crate::inbound::http::products::get_product,
        crate::inbound::http::products::create_product,
        crate::inbound::http::products::update_product,
        crate::inbound::http::products::delete_product,
        crate::inbound::http::products::assign_category,
    ),
    components(schemas(
        CategoryRequest,
        CategoryResponse,
        ProductRequest,
        ProductResponse,
        CreatedResponse,
        AssignCategoryRequest,
        ErrorResponse,
        ErrorCode,
    )),
    tags(
        (name = "home", description = "Landing endpoint"),
        (name = "categories", description = "Category management"),
        (name = "products", description = "Product management")
    )
)]
pub struct ApiDoc;
