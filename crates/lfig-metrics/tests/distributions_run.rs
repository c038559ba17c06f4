use std::fs;

use lfig_core::{codes, DistributionConfig, LfigError};
use lfig_metrics::run_distributions;
use tempfile::tempdir;

#[test]
fn missing_results_file_is_reported() {
    let dir = tempdir().unwrap();
    let config = DistributionConfig::for_input(dir.path().join("results.json"));
    let err = run_distributions(&config).unwrap_err();
    assert!(matches!(err, LfigError::Io(_)));
    assert!(err.is(codes::MISSING_INPUT));
}

#[test]
fn failed_runs_leave_no_figure() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("results.json");
    fs::write(&input, r#"[{"status": "failed"}]"#).unwrap();
    let config = DistributionConfig::for_input(&input);
    let err = run_distributions(&config).unwrap_err();
    assert!(err.is(codes::NO_SUCCESSFUL_RECORDS));
    assert!(!config.output_path().exists());
}

#[test]
fn absent_alpha_stops_before_rendering() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("results.json");
    fs::write(
        &input,
        r#"[{"status": "success", "spatial_metrics": {"morans_i": 0.1, "founder_separation_beta": 0.3}}]"#,
    )
    .unwrap();
    let config = DistributionConfig::for_input(&input);
    let err = run_distributions(&config).unwrap_err();
    assert!(err.is(codes::EMPTY_REQUIRED_SERIES));
    assert!(!config.output_path().exists());
}

#[test]
fn unparseable_results_carry_the_path() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("results.json");
    fs::write(&input, "[{").unwrap();
    let err = run_distributions(&DistributionConfig::for_input(&input)).unwrap_err();
    assert!(err.is(codes::PARSE));
    assert_eq!(
        err.info().context.get("path").map(String::as_str),
        Some(input.display().to_string().as_str())
    );
}
