use std::path::Path;

use lfig_core::errors::{codes, ErrorInfo, LfigError};

fn sample_info(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("id", "a1b2")
        .with_context("reason", "example")
}

#[test]
fn name_error_surface() {
    let err = LfigError::Name(sample_info(codes::MALFORMED_NAME, "missing prefix"));
    assert!(err.is(codes::MALFORMED_NAME));
    assert!(err.info().context.contains_key("id"));
}

#[test]
fn records_error_surface() {
    let err = LfigError::Records(sample_info(codes::NO_SUCCESSFUL_RECORDS, "no data"));
    assert_eq!(err.info().code, codes::NO_SUCCESSFUL_RECORDS);
    assert!(err.to_string().starts_with("records error: no data"));
}

#[test]
fn display_lists_context_and_hint() {
    let err = LfigError::Stats(
        ErrorInfo::new(codes::EMPTY_SERIES, "empty")
            .with_context("metric", "morans_i")
            .with_hint("check the results file"),
    );
    let text = err.to_string();
    assert!(text.contains("context: [metric=morans_i]"));
    assert!(text.contains("hint: check the results file"));
}

#[test]
fn missing_input_records_path() {
    let err = LfigError::missing_input("results file", Path::new("nope.json"));
    assert!(err.is(codes::MISSING_INPUT));
    assert_eq!(err.info().context.get("path").map(String::as_str), Some("nope.json"));
}

#[test]
fn errors_serialize_with_family_tag() {
    let err = LfigError::Render(ErrorInfo::new(codes::RENDER, "backend failed"));
    let json = serde_json::to_value(&err).expect("serialize");
    assert_eq!(json["family"], "Render");
    let decoded: LfigError = serde_json::from_value(json).expect("deserialize");
    assert_eq!(decoded, err);
}
