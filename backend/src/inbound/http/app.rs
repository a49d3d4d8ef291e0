//! Application assembly shared by the server binary and integration tests.
//!
//! Middleware order, outermost first: [`Trace`], [`PanicGuard`],
//! [`AcceptJson`]. The [`ReadThroughCache`] only wraps the API scope.

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::middleware::Condition;
use actix_web::{App, web};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::Trace;
use crate::doc::ApiDoc;
use crate::inbound::http::accept::AcceptJson;
use crate::inbound::http::categories::{
    create_category, delete_category, get_category, list_categories, update_category,
};
use crate::inbound::http::extractors::{json_config, path_config, query_config};
use crate::inbound::http::home::home;
use crate::inbound::http::panic_guard::PanicGuard;
use crate::inbound::http::products::{
    assign_category, create_product, delete_product, get_product, list_products, update_product,
};
use crate::inbound::http::response_cache::ReadThroughCache;
use crate::inbound::http::state::HttpState;

/// Where the OpenAPI document is served; Swagger UI lives under `/docs/`.
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

/// Everything [`build_app`] needs; cheap to clone into each worker.
#[derive(Clone)]
pub struct AppDependencies {
    pub http_state: web::Data<HttpState>,
    pub response_cache: ReadThroughCache,
    pub cache_enabled: bool,
    /// Mount point of the API scope, e.g. `/api`.
    pub api_prefix: String,
}

/// Register the catalog endpoints on a scope or app.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(list_categories)
        .service(get_category)
        .service(create_category)
        .service(update_category)
        .service(delete_category)
        .service(assign_category)
        .service(list_products)
        .service(get_product)
        .service(create_product)
        .service(update_product)
        .service(delete_product);
}

/// Assemble the full application.
pub fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        http_state,
        response_cache,
        cache_enabled,
        api_prefix,
    } = deps;

    let api = web::scope(&api_prefix)
        .wrap(Condition::new(cache_enabled, response_cache))
        .configure(configure_api);

    App::new()
        .app_data(http_state)
        .app_data(json_config())
        .app_data(path_config())
        .app_data(query_config())
        .wrap(AcceptJson)
        .wrap(PanicGuard)
        .wrap(Trace)
        .service(api)
        .service(home)
        .service(SwaggerUi::new("/docs/{_:.*}").url(OPENAPI_PATH, ApiDoc::openapi()))
}
