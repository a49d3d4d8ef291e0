//! Landing endpoint.

use actix_web::{get, web};

/// Greeting served at the API root.
pub const WELCOME_MESSAGE: &str =
    "Welcome to the catalog API. Browse /docs/ for the OpenAPI description.";

/// Return a short welcome string pointing at the API documentation.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Welcome message", body = String)),
    tags = ["home"],
    operation_id = "home"
)]
#[get("/")]
pub async fn home() -> web::Json<&'static str> {
    web::Json(WELCOME_MESSAGE)
}
