//! Category HTTP handlers.
//!
//! ```text
//! GET    /api/categories?offset=0&limit=3&sortby=sort&sortdirection=asc
//! GET    /api/categories/{id}
//! POST   /api/categories {"title":"Laptops","image_url":null,"sort":1}
//! PUT    /api/categories/{id}
//! DELETE /api/categories/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use pagination::Filter;

use crate::domain::Error;
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::{CategoryRequest, CategoryResponse, CreatedResponse};
use crate::inbound::http::error::ErrorResponse;
use crate::inbound::http::state::HttpState;

/// List categories.
#[utoipa::path(
    get,
    path = "/api/categories",
    params(
        ("offset" = Option<i64>, Query, description = "Rows to skip"),
        ("limit" = Option<i64>, Query, description = "Rows to return; non-positive means 3"),
        ("sortby" = Option<String>, Query, description = "Sort field, default `sort`"),
        ("sortdirection" = Option<String>, Query, description = "ASC or DESC"),
    ),
    responses(
        (status = 200, description = "Categories", body = [CategoryResponse]),
        (status = 400, description = "Invalid filter", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tags = ["categories"],
    operation_id = "listCategories"
)]
#[get("/categories")]
pub async fn list_categories(
    state: web::Data<HttpState>,
    filter: web::Query<Filter>,
) -> ApiResult<web::Json<Vec<CategoryResponse>>> {
    let categories = state
        .categories
        .list(filter.into_inner())
        .await
        .map_err(|err| Error::wrap("handlers.list_categories", err))?;
    Ok(web::Json(categories.into_iter().map(Into::into).collect()))
}

/// Fetch one category.
#[utoipa::path(
    get,
    path = "/api/categories/{id}",
    params(("id" = i64, Path, description = "Category id")),
    responses(
        (status = 200, description = "Category", body = CategoryResponse),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 404, description = "Not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tags = ["categories"],
    operation_id = "getCategory"
)]
#[get("/categories/{id}")]
pub async fn get_category(
    state: web::Data<HttpState>,
    id: web::Path<i64>,
) -> ApiResult<web::Json<CategoryResponse>> {
    let category = state
        .categories
        .get(id.into_inner())
        .await
        .map_err(|err| Error::wrap("handlers.get_category", err))?;
    Ok(web::Json(category.into()))
}

/// Create a category.
#[utoipa::path(
    post,
    path = "/api/categories",
    request_body = CategoryRequest,
    responses(
        (status = 201, description = "Created", body = CreatedResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tags = ["categories"],
    operation_id = "createCategory"
)]
#[post("/categories")]
pub async fn create_category(
    state: web::Data<HttpState>,
    payload: web::Json<CategoryRequest>,
) -> ApiResult<HttpResponse> {
    let id = state
        .categories_command
        .create(payload.into_inner().into())
        .await
        .map_err(|err| Error::wrap("handlers.create_category", err))?;
    Ok(HttpResponse::Created().json(CreatedResponse { id }))
}

/// Replace a category's content.
#[utoipa::path(
    put,
    path = "/api/categories/{id}",
    params(("id" = i64, Path, description = "Category id")),
    request_body = CategoryRequest,
    responses(
        (status = 204, description = "Updated"),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tags = ["categories"],
    operation_id = "updateCategory"
)]
#[put("/categories/{id}")]
pub async fn update_category(
    state: web::Data<HttpState>,
    id: web::Path<i64>,
    payload: web::Json<CategoryRequest>,
) -> ApiResult<HttpResponse> {
    state
        .categories_command
        .update(id.into_inner(), payload.into_inner().into())
        .await
        .map_err(|err| Error::wrap("handlers.update_category", err))?;
    Ok(HttpResponse::NoContent().finish())
}

/// Delete a category. Products keep their `category_id`.
#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    params(("id" = i64, Path, description = "Category id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tags = ["categories"],
    operation_id = "deleteCategory"
)]
#[delete("/categories/{id}")]
pub async fn delete_category(
    state: web::Data<HttpState>,
    id: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    state
        .categories_command
        .delete(id.into_inner())
        .await
        .map_err(|err| Error::wrap("handlers.delete_category", err))?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;
    use serde_json::Value;

    use crate::domain::ports::{
        MockCategoriesCommand, MockCategoriesQuery, MockProductsCommand, MockProductsQuery,
    };
    use crate::domain::Category;
    use crate::domain::ports::FIXTURE_CATEGORY_ID;
    use crate::inbound::http::extractors::{json_config, path_config, query_config};

    fn state(query: MockCategoriesQuery, command: MockCategoriesCommand) -> HttpState {
        HttpState::new(
            Arc::new(query),
            Arc::new(command),
            Arc::new(MockProductsQuery::new()),
            Arc::new(MockProductsCommand::new()),
        )
    }

    fn app(
        state: HttpState,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(state))
            .app_data(json_config())
            .app_data(path_config())
            .app_data(query_config())
            .service(
                web::scope("/api")
                    .service(list_categories)
                    .service(get_category)
                    .service(create_category)
                    .service(update_category)
                    .service(delete_category),
            )
    }

    fn monitors() -> Category {
        Category {
            id: FIXTURE_CATEGORY_ID,
            title: Some("Monitors".to_owned()),
            image_url: None,
            sort: Some(3),
            created_at: chrono::DateTime::UNIX_EPOCH,
            updated_at: chrono::DateTime::UNIX_EPOCH,
        }
    }

    #[rstest]
    #[actix_web::test]
    async fn list_decodes_filter_wire_names() {
        let mut query = MockCategoriesQuery::new();
        query
            .expect_list()
            .withf(|filter| {
                filter.offset == 2
                    && filter.limit == 5
                    && filter.sort_by == "title"
                    && filter.sort_direction == "desc"
            })
            .times(1)
            .return_once(|_| Ok(vec![monitors()]));
        let app = actix_test::init_service(app(state(query, MockCategoriesCommand::new()))).await;

        let request = actix_test::TestRequest::get()
            .uri("/api/categories?offset=2&limit=5&sortby=title&sortdirection=desc")
            .to_request();
        let body: Vec<Value> = actix_test::call_and_read_body_json(&app, request).await;
        assert_eq!(body.len(), 1);
        assert_eq!(body[0]["id"], 201);
        assert_eq!(body[0]["title"], "Monitors");
    }

    #[rstest]
    #[actix_web::test]
    async fn empty_numeric_query_values_mean_defaults() {
        let mut query = MockCategoriesQuery::new();
        query
            .expect_list()
            .withf(|filter| filter.offset == 0 && filter.limit == 0)
            .times(1)
            .return_once(|_| Ok(vec![monitors()]));
        let app = actix_test::init_service(app(state(query, MockCategoriesCommand::new()))).await;

        let request = actix_test::TestRequest::get()
            .uri("/api/categories?offset=&limit=&sortby=&sortdirection=")
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[rstest]
    #[actix_web::test]
    async fn create_returns_created_with_id() {
        let mut command = MockCategoriesCommand::new();
        command
            .expect_create()
            .withf(|draft| draft.title.as_deref() == Some("Laptops"))
            .times(1)
            .return_once(|_| Ok(FIXTURE_CATEGORY_ID));
        let app = actix_test::init_service(app(state(MockCategoriesQuery::new(), command))).await;

        let request = actix_test::TestRequest::post()
            .uri("/api/categories")
            .set_json(serde_json::json!({"title": "Laptops"}))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body, serde_json::json!({"id": 201}));
    }

    #[rstest]
    #[case::update(actix_test::TestRequest::put().set_json(serde_json::json!({"title": "T"})))]
    #[case::delete(actix_test::TestRequest::delete())]
    #[actix_web::test]
    async fn mutations_answer_no_content(#[case] request: actix_test::TestRequest) {
        let mut command = MockCategoriesCommand::new();
        command.expect_update().returning(|_, _| Ok(()));
        command.expect_delete().returning(|_| Ok(()));
        let app = actix_test::init_service(app(state(MockCategoriesQuery::new(), command))).await;

        let response =
            actix_test::call_service(&app, request.uri("/api/categories/201").to_request()).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[rstest]
    #[actix_web::test]
    async fn service_errors_keep_their_status() {
        let mut query = MockCategoriesQuery::new();
        query
            .expect_get()
            .return_once(|_| Err(Error::not_found("Category not found.")));
        let app = actix_test::init_service(app(state(query, MockCategoriesCommand::new()))).await;

        let request = actix_test::TestRequest::get()
            .uri("/api/categories/404")
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["message"], "Category not found.");
        assert_eq!(body["code"], "not_found");
    }

    #[rstest]
    #[case::path(
        actix_test::TestRequest::get().uri("/api/categories/abc"),
        "Invalid path parameter."
    )]
    #[case::body(
        actix_test::TestRequest::post()
            .uri("/api/categories")
            .insert_header(("content-type", "application/json"))
            .set_payload("{\"title\": "),
        "Data validation error."
    )]
    #[case::query(
        actix_test::TestRequest::get().uri("/api/categories?limit=many"),
        "Invalid query parameters."
    )]
    #[actix_web::test]
    async fn undecodable_input_is_invalid(
        #[case] request: actix_test::TestRequest,
        #[case] message: &str,
    ) {
        let app = actix_test::init_service(app(state(
            MockCategoriesQuery::new(),
            MockCategoriesCommand::new(),
        )))
        .await;

        let response = actix_test::call_service(&app, request.to_request()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["message"], message);
        assert_eq!(body["code"], "invalid");
    }
}
