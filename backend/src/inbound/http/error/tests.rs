//! Tests for HTTP error rendering.

use super::*;
use actix_web::body::to_bytes;
use rstest::rstest;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

async fn body_of(response: HttpResponse) -> ErrorResponse {
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    serde_json::from_slice(&bytes).expect("error body deserialises")
}

#[rstest]
#[case(ErrorCode::Conflict, StatusCode::CONFLICT)]
#[case(ErrorCode::Internal, StatusCode::INTERNAL_SERVER_ERROR)]
#[case(ErrorCode::Invalid, StatusCode::BAD_REQUEST)]
#[case(ErrorCode::NotFound, StatusCode::NOT_FOUND)]
#[case(ErrorCode::NotAccepted, StatusCode::NOT_ACCEPTABLE)]
fn codes_map_to_statuses(#[case] code: ErrorCode, #[case] expected: StatusCode) {
    assert_eq!(status_for(code), expected);
    assert_eq!(ResponseError::status_code(&Error::new(code, "x")), expected);
}

#[rstest]
fn wrapped_invalid_chain_is_a_bad_request() {
    let err = Error::wrap(
        "handlers.list_categories",
        Error::wrap("services.list_categories", Error::invalid("Invalid SortBy field: nope")),
    );
    assert_eq!(ResponseError::status_code(&err), StatusCode::BAD_REQUEST);
}

#[rstest]
#[actix_web::test]
async fn body_carries_first_message_and_status_names() {
    let err = Error::wrap("handlers.get_category", Error::not_found("Category not found."));
    let response = ResponseError::error_response(&err);
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(response.headers().get(TRACE_ID_HEADER).is_none());

    let body = body_of(response).await;
    assert_eq!(body.message, "Category not found.");
    assert_eq!(body.code, ErrorCode::NotFound);
    assert_eq!(body.http_status_code, 404);
    assert_eq!(body.http_status, "Not Found");
    assert_eq!(body.trace_id, None);
    assert!(chrono::DateTime::parse_from_rfc3339(&body.timestamp).is_ok());
}

#[rstest]
#[actix_web::test]
async fn store_error_text_never_reaches_the_body() {
    let store = std::io::Error::other("relation \"categories\" does not exist");
    let err = Error::wrap(
        "handlers.list_categories",
        Error::internal("Could not query Categories from DB").with_source(store),
    );
    let response = ResponseError::error_response(&err);
    let bytes = to_bytes(response.into_body()).await.expect("body");
    let text = String::from_utf8(bytes.to_vec()).expect("utf-8 body");
    assert!(text.contains("Could not query Categories from DB"));
    assert!(!text.contains("relation"));
}

#[rstest]
#[actix_web::test]
async fn scoped_trace_id_is_echoed() {
    let trace_id: TraceId = TRACE_ID.parse().expect("valid uuid");
    let response = TraceId::scope(trace_id, async {
        ResponseError::error_response(&Error::invalid("Title cannot be empty."))
    })
    .await;
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    assert_eq!(header.as_deref(), Some(TRACE_ID));
    assert_eq!(body_of(response).await.trace_id.as_deref(), Some(TRACE_ID));
}

#[rstest]
#[actix_web::test]
async fn traced_error_keeps_captured_id_outside_scope() {
    let trace_id: TraceId = TRACE_ID.parse().expect("valid uuid");
    let traced = TraceId::scope(trace_id, async {
        TracedError::capture(Error::internal("boom"))
    })
    .await;

    let response = traced.error_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_of(response).await.trace_id.as_deref(), Some(TRACE_ID));
}
