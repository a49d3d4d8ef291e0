//! Tests for error classification and chain traversal.

use std::cell::RefCell;

use super::*;
use rstest::{fixture, rstest};
use rstest_bdd_macros::{given, then, when};

#[derive(Debug, thiserror::Error)]
#[error("connection reset by peer")]
struct StoreFailure;

#[fixture]
fn invalid_title() -> Error {
    Error::invalid("Title cannot be empty.").with_op("categories.create")
}

#[rstest]
#[case(ErrorCode::Conflict, "conflict")]
#[case(ErrorCode::Internal, "internal")]
#[case(ErrorCode::Invalid, "invalid")]
#[case(ErrorCode::NotFound, "not_found")]
#[case(ErrorCode::NotAccepted, "not_accepted")]
fn codes_serialise_to_stable_names(#[case] code: ErrorCode, #[case] expected: &str) {
    assert_eq!(code.as_str(), expected);
    assert_eq!(
        serde_json::to_value(code).expect("serialises"),
        serde_json::Value::String(expected.to_owned())
    );
}

#[rstest]
fn code_survives_multiple_wraps(invalid_title: Error) {
    let wrapped = Error::wrap("handlers.outer", Error::wrap("services.inner", invalid_title));
    assert_eq!(wrapped.code(), ErrorCode::Invalid);
    assert_eq!(wrapped.own_code(), None);
    assert_eq!(wrapped.message(), "Title cannot be empty.");
}

#[rstest]
fn outermost_tag_wins_when_reclassified() {
    let lookup = Error::not_found("Category not found.");
    let folded = Error::invalid("Invalid Category.").with_cause(lookup);
    assert_eq!(folded.code(), ErrorCode::Invalid);
    assert_eq!(folded.message(), "Invalid Category.");
}

#[rstest]
fn untagged_chain_defaults_to_internal() {
    let err = Error::wrap("handlers.get", Error::default().with_source(StoreFailure));
    assert_eq!(err.code(), ErrorCode::Internal);
    assert_eq!(err.message(), GENERIC_ERROR_MESSAGE);
}

#[rstest]
fn empty_message_is_skipped_while_walking() {
    let inner = Error::not_found("Product not found.");
    let outer = Error::new(ErrorCode::NotFound, "").with_cause(inner);
    assert_eq!(outer.message(), "Product not found.");
}

#[rstest]
fn code_lookup_stops_at_external_cause() {
    let err = Error::default()
        .with_op("repository")
        .with_source(StoreFailure);
    assert_eq!(err.code(), ErrorCode::Internal);
}

#[rstest]
fn display_renders_ops_and_terminal_cause() {
    let err = Error::wrap(
        "handlers.get_category",
        Error::internal("Could not query Category from DB")
            .with_op("repository.get_category")
            .with_source(StoreFailure),
    );
    assert_eq!(
        err.to_string(),
        "handlers.get_category: repository.get_category: connection reset by peer"
    );
}

#[rstest]
fn display_renders_code_for_leaf_errors(invalid_title: Error) {
    assert_eq!(
        invalid_title.to_string(),
        "categories.create: <invalid> Title cannot be empty."
    );
}

#[rstest]
fn std_source_chain_is_walkable() {
    let err = Error::wrap(
        "outer",
        Error::internal("inner").with_source(StoreFailure),
    );
    let mut depth = 0;
    let mut current: Option<&(dyn StdError + 'static)> = Some(&err);
    while let Some(next) = current {
        depth += 1;
        current = next.source();
    }
    assert_eq!(depth, 3);
}

#[given("a validation failure raised by a service")]
fn a_validation_failure() -> RefCell<Error> {
    RefCell::new(Error::invalid("Price cannot be empty.").with_op("products.create"))
}

#[when("each calling layer wraps it")]
fn each_layer_wraps(chain: &RefCell<Error>) {
    let raised = chain.take();
    let wrapped = ["services.products", "handlers.create_product", "boundary"]
        .into_iter()
        .fold(raised, |inner, op| Error::wrap(op, inner));
    chain.replace(wrapped);
}

#[then("the boundary still sees the first classification")]
fn boundary_sees_original(chain: &RefCell<Error>) {
    let error = chain.borrow();
    assert_eq!(error.code(), ErrorCode::Invalid);
    assert_eq!(error.message(), "Price cannot be empty.");
    assert_eq!(error.op(), Some("boundary"));
}

#[rstest]
fn wrapping_preserves_classification() {
    let chain = a_validation_failure();
    each_layer_wraps(&chain);
    boundary_sees_original(&chain);
}
