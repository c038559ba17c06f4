use indexmap::IndexMap;
use lfig_core::{codes, BoundPolicy};
use lfig_metrics::{
    aggregate, distribution_panels, format_counts, format_summary, histogram, parse_records,
    robust_bound, summarize, PanelPlan, FOUNDER_SEPARATION, MORANS_I, WITHIN_LINEAGE_SPREAD,
};

#[test]
fn histogram_spans_data_range() {
    let bins = histogram(&[0.0, 1.0, 2.0, 3.0, 4.0], 4);
    assert_eq!(bins.len(), 4);
    assert_eq!(bins[0].start, 0.0);
    assert_eq!(bins[3].end, 4.0);
    let counts: Vec<usize> = bins.iter().map(|bin| bin.count).collect();
    assert_eq!(counts, [1, 1, 1, 2]);
}

#[test]
fn single_valued_histogram_is_centred() {
    let bins = histogram(&[2.0, 2.0, 2.0], 10);
    assert_eq!(bins.len(), 10);
    assert_eq!(bins[0].start, 1.5);
    assert_eq!(bins[9].end, 2.5);
    assert_eq!(bins.iter().map(|bin| bin.count).sum::<usize>(), 3);
    assert!(histogram(&[], 10).is_empty());
}

#[test]
fn bound_narrows_axis_and_adds_note() {
    let mut series = vec![0.1; 99];
    series.push(0.5);
    let bound = robust_bound(&series, &BoundPolicy::default()).unwrap();
    let plan = PanelPlan::histogram("beta", "Founder Separation", &series, 50, (255, 0, 0))
        .with_center_markers(&summarize(&series).unwrap())
        .with_bound(&bound);
    assert_eq!(plan.x_range, (0.0, 0.2));
    assert_eq!(
        plan.note.as_deref(),
        Some("Note: 1 values >= 0.2 (max=0.500)")
    );
    let labels: Vec<&str> = plan.markers.iter().map(|m| m.label.as_str()).collect();
    assert_eq!(labels, ["Mean: 0.1040", "Median: 0.1000"]);
    assert_eq!(plan.bins.iter().map(|bin| bin.count).sum::<usize>(), 100);
}

#[test]
fn unclamped_bound_leaves_plan_untouched() {
    let series: Vec<f64> = (0..=100).map(|i| f64::from(i) / 100.0).collect();
    let bound = robust_bound(&series, &BoundPolicy::default()).unwrap();
    let plan = PanelPlan::histogram("beta", "x", &series, 50, (255, 0, 0));
    assert_eq!(plan.clone().with_bound(&bound), plan);
}

#[test]
fn panels_fill_in_missing_metrics() {
    let records = parse_records(
        r#"[{"status": "success", "spatial_metrics": {"within_lineage_spread_alpha": 1.0}}]"#,
    )
    .unwrap();
    let aggregation = aggregate(
        &records,
        "spatial_metrics",
        &[MORANS_I, WITHIN_LINEAGE_SPREAD, FOUNDER_SEPARATION],
    )
    .unwrap();
    let panels = distribution_panels(&aggregation, &BoundPolicy::default()).unwrap();
    assert_eq!(panels.len(), 3);
    assert_eq!(panels[0].bins.len(), 30);
    assert_eq!(panels[1], PanelPlan::blank());
    assert_eq!(
        panels[2].placeholder.as_deref(),
        Some("No Moran's I data available")
    );
}

#[test]
fn panels_require_within_lineage_spread() {
    let records =
        parse_records(r#"[{"status": "success", "spatial_metrics": {"morans_i": 0.2}}]"#).unwrap();
    let aggregation = aggregate(
        &records,
        "spatial_metrics",
        &[MORANS_I, WITHIN_LINEAGE_SPREAD, FOUNDER_SEPARATION],
    )
    .unwrap();
    let err = distribution_panels(&aggregation, &BoundPolicy::default()).unwrap_err();
    assert!(err.is(codes::EMPTY_REQUIRED_SERIES));
}

#[test]
fn summary_text_uses_display_labels() {
    let mut summaries = IndexMap::new();
    summaries.insert(
        WITHIN_LINEAGE_SPREAD.to_string(),
        summarize(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap(),
    );
    let text = format_summary(&summaries);
    assert!(text.starts_with("Summary Statistics:\n"));
    assert!(text.contains("Alpha:"));
    assert!(text.contains("Mean: 3.0000"));
    assert!(text.contains("Std Dev: 1.4142"));
    assert!(text.contains("Range: 1.0000 - 5.0000"));

    let mut counts = IndexMap::new();
    counts.insert(MORANS_I.to_string(), 0usize);
    counts.insert("custom".to_string(), 4usize);
    let text = format_counts(&counts);
    assert!(text.contains("Moran's I values: 0"));
    assert!(text.contains("custom values: 4"));
}
