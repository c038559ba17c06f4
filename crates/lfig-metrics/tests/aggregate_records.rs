use lfig_core::codes;
use lfig_metrics::{aggregate, parse_records, RecordStatus};

const SECTION: &str = "spatial_metrics";

fn names() -> [&'static str; 3] {
    [
        "morans_i",
        "within_lineage_spread_alpha",
        "founder_separation_beta",
    ]
}

#[test]
fn only_successful_records_contribute() {
    let records = parse_records(
        r#"[
            {"status": "success", "spatial_metrics": {"morans_i": 0.3, "within_lineage_spread_alpha": 1.5, "founder_separation_beta": 0.05}},
            {"status": "failed", "spatial_metrics": {"morans_i": 0.9}},
            {"status": "success", "spatial_metrics": {"within_lineage_spread_alpha": 2.5}}
        ]"#,
    )
    .unwrap();
    let aggregation = aggregate(&records, SECTION, &names()).unwrap();
    assert_eq!(aggregation.total, 3);
    assert_eq!(aggregation.successful, 2);
    assert_eq!(aggregation.series("morans_i"), Some(&[0.3][..]));
    assert_eq!(
        aggregation.series("within_lineage_spread_alpha"),
        Some(&[1.5, 2.5][..])
    );
    assert_eq!(
        aggregation.series("founder_separation_beta"),
        Some(&[0.05][..])
    );
}

#[test]
fn series_keep_request_order() {
    let records = parse_records(r#"[{"status": "success", "spatial_metrics": {"b": 1, "a": 2}}]"#)
        .unwrap();
    let aggregation = aggregate(&records, SECTION, &["b", "a", "c"]).unwrap();
    let order: Vec<&str> = aggregation.series.keys().map(String::as_str).collect();
    assert_eq!(order, ["b", "a", "c"]);
    assert_eq!(aggregation.empty_series(), ["c"]);
}

#[test]
fn no_successful_records_is_an_error() {
    let records = parse_records(
        r#"[{"status": "failed"}, {"status": "skipped"}, {"spatial_metrics": {"morans_i": 1.0}}]"#,
    )
    .unwrap();
    let err = aggregate(&records, SECTION, &names()).unwrap_err();
    assert!(err.is(codes::NO_SUCCESSFUL_RECORDS));

    let empty = parse_records("[]").unwrap();
    assert!(aggregate(&empty, SECTION, &names())
        .unwrap_err()
        .is(codes::NO_SUCCESSFUL_RECORDS));
}

#[test]
fn null_and_non_numeric_values_are_absent() {
    let records = parse_records(
        r#"[
            {"status": "success", "spatial_metrics": {"morans_i": null, "within_lineage_spread_alpha": "n/a"}},
            {"status": "success", "spatial_metrics": {"morans_i": 0.25}},
            {"status": "success"}
        ]"#,
    )
    .unwrap();
    let aggregation = aggregate(&records, SECTION, &names()).unwrap();
    assert_eq!(aggregation.successful, 3);
    assert_eq!(aggregation.series("morans_i"), Some(&[0.25][..]));
    assert_eq!(aggregation.series("within_lineage_spread_alpha"), Some(&[] as &[f64]));
}

#[test]
fn empty_series_only_fails_when_required() {
    let records = parse_records(
        r#"[{"status": "success", "spatial_metrics": {"within_lineage_spread_alpha": 0.4}}]"#,
    )
    .unwrap();
    let aggregation = aggregate(&records, SECTION, &names()).unwrap();
    assert_eq!(
        aggregation.empty_series(),
        ["morans_i", "founder_separation_beta"]
    );
    assert_eq!(
        aggregation.require("within_lineage_spread_alpha").unwrap(),
        &[0.4]
    );

    let err = aggregation.require("morans_i").unwrap_err();
    assert!(err.is(codes::EMPTY_REQUIRED_SERIES));
    assert_eq!(err.info().context.get("metric").unwrap(), "morans_i");
    assert!(aggregation
        .require("not_requested")
        .unwrap_err()
        .is(codes::EMPTY_REQUIRED_SERIES));
}

#[test]
fn status_strings_map_to_kinds() {
    let records = parse_records(
        r#"[{"status": "success"}, {"status": "error"}, {"status": "pending"}, {}]"#,
    )
    .unwrap();
    let kinds: Vec<RecordStatus> = records.iter().map(|r| r.status()).collect();
    assert_eq!(
        kinds,
        [
            RecordStatus::Success,
            RecordStatus::Error,
            RecordStatus::Other("pending".to_string()),
            RecordStatus::Missing,
        ]
    );
}

#[test]
fn malformed_documents_report_parse_errors() {
    assert!(parse_records("{not json").unwrap_err().is(codes::PARSE));
    assert!(parse_records(r#"{"status": "success"}"#)
        .unwrap_err()
        .is(codes::PARSE));
}

#[test]
fn non_string_status_only_excludes_its_record() {
    let records = parse_records(
        r#"[
            {"status": "success", "spatial_metrics": {"within_lineage_spread_alpha": 0.8}},
            {"status": 3, "spatial_metrics": {"within_lineage_spread_alpha": 9.0}},
            {"status": null, "spatial_metrics": {"within_lineage_spread_alpha": 9.0}},
            {"status": {"code": "success"}}
        ]"#,
    )
    .unwrap();
    assert_eq!(records[1].status(), RecordStatus::Other("3".to_string()));
    assert_eq!(records[2].status(), RecordStatus::Missing);
    assert!(!records[3].is_success());

    let aggregation = aggregate(&records, SECTION, &names()).unwrap();
    assert_eq!(aggregation.total, 4);
    assert_eq!(aggregation.successful, 1);
    assert_eq!(
        aggregation.series("within_lineage_spread_alpha"),
        Some(&[0.8][..])
    );
}
