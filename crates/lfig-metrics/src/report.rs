use std::fmt::Write as _;
use std::path::PathBuf;

use indexmap::IndexMap;
use lfig_core::{BoundPolicy, DistributionConfig, LfigError};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::aggregate::{aggregate, Aggregation};
use crate::figures::{render_panels, PanelPlan};
use crate::records::load_records;
use crate::stats::{robust_bound, summarize, RobustBound, Summary};

/// Moran's I spatial autocorrelation.
pub const MORANS_I: &str = "morans_i";
/// Within-lineage spread (alpha); the series the report cannot do without.
pub const WITHIN_LINEAGE_SPREAD: &str = "within_lineage_spread_alpha";
/// Founder separation (beta).
pub const FOUNDER_SEPARATION: &str = "founder_separation_beta";

/// Metrics in the order the statistics summary lists them.
pub const REPORTED_METRICS: [(&str, &str); 3] = [
    (MORANS_I, "Moran's I"),
    (WITHIN_LINEAGE_SPREAD, "Alpha"),
    (FOUNDER_SEPARATION, "Beta"),
];

/// Result of one distributions run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionReport {
    /// Path of the rendered figure.
    pub figure: PathBuf,
    /// Records in the results document.
    pub total_records: usize,
    /// Records with status `success`.
    pub successful: usize,
    /// Number of values gathered per metric, including empty series.
    pub counts: IndexMap<String, usize>,
    /// Statistics of every non-empty series, keyed by metric name.
    pub summaries: IndexMap<String, Summary>,
    /// Display bound of the founder separation series, when it has values.
    pub founder_bound: Option<RobustBound>,
}

/// Builds the alpha, beta and Moran's I panels.
///
/// Fails when the within-lineage spread series is empty.
pub fn distribution_panels(
    aggregation: &Aggregation,
    policy: &BoundPolicy,
) -> Result<Vec<PanelPlan>, LfigError> {
    let alpha = aggregation.require(WITHIN_LINEAGE_SPREAD)?;
    let alpha_panel = PanelPlan::histogram(
        "Distribution of Within-lineage Spread (α)",
        "Within-lineage Spread (α)",
        alpha,
        30,
        (0, 0, 255),
    );

    let beta = aggregation.series(FOUNDER_SEPARATION).unwrap_or_default();
    let beta_panel = if beta.is_empty() {
        PanelPlan::blank()
    } else {
        PanelPlan::histogram(
            "Distribution of Founder Separation (β)",
            "Founder Separation (β)",
            beta,
            50,
            (255, 0, 0),
        )
        .with_center_markers(&summarize(beta)?)
        .with_bound(&robust_bound(beta, policy)?)
    };

    let morans = aggregation.series(MORANS_I).unwrap_or_default();
    let morans_panel = if morans.is_empty() {
        PanelPlan::placeholder("Distribution of Moran's I", "No Moran's I data available")
    } else {
        PanelPlan::histogram(
            "Distribution of Moran's I",
            "Moran's I",
            morans,
            30,
            (128, 0, 128),
        )
    };

    Ok(vec![alpha_panel, beta_panel, morans_panel])
}

/// Regenerates the distribution figure from a results document.
pub fn run_distributions(config: &DistributionConfig) -> Result<DistributionReport, LfigError> {
    let records = load_records(&config.input)?;
    let names: Vec<&str> = REPORTED_METRICS.iter().map(|(name, _)| *name).collect();
    let aggregation = aggregate(&records, &config.metrics_key, &names)?;
    let panels = distribution_panels(&aggregation, &config.bound)?;

    let figure = config.output_path();
    info!(
        successful = aggregation.successful,
        figure = %figure.display(),
        "rendering distribution plots"
    );
    render_panels(&figure, &panels, config.figure)?;

    let mut summaries = IndexMap::new();
    for (name, values) in &aggregation.series {
        if !values.is_empty() {
            summaries.insert(name.clone(), summarize(values)?);
        }
    }
    let founder_bound = match aggregation.series(FOUNDER_SEPARATION) {
        Some(values) if !values.is_empty() => Some(robust_bound(values, &config.bound)?),
        _ => None,
    };

    Ok(DistributionReport {
        figure,
        total_records: aggregation.total,
        successful: aggregation.successful,
        counts: aggregation
            .series
            .iter()
            .map(|(name, values)| (name.clone(), values.len()))
            .collect(),
        summaries,
        founder_bound,
    })
}

fn label_for(name: &str) -> &str {
    REPORTED_METRICS
        .iter()
        .find(|(metric, _)| *metric == name)
        .map(|(_, label)| *label)
        .unwrap_or(name)
}

/// Text block listing the statistics of every summarised metric, four
/// decimals each.
pub fn format_summary(summaries: &IndexMap<String, Summary>) -> String {
    let mut text = String::from("Summary Statistics:\n");
    for (name, summary) in summaries {
        let _ = writeln!(text, "   {}:", label_for(name));
        let _ = writeln!(text, "     Mean: {:.4}", summary.mean);
        let _ = writeln!(text, "     Median: {:.4}", summary.median);
        let _ = writeln!(text, "     Std Dev: {:.4}", summary.std_dev);
        let _ = writeln!(text, "     Range: {:.4} - {:.4}", summary.min, summary.max);
    }
    text
}

/// Per-metric value counts, e.g. `Alpha values: 12`.
pub fn format_counts(counts: &IndexMap<String, usize>) -> String {
    let mut text = String::new();
    for (name, count) in counts {
        let _ = writeln!(text, "   {} values: {}", label_for(name), count);
    }
    text
}
