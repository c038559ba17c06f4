//! Metric aggregation, descriptive statistics and distribution figures for
//! spatial mapping results.

#![deny(missing_docs)]

/// Metric series gathered from successful records.
pub mod aggregate;
/// Histogram panels and their rendering.
pub mod figures;
/// Result records and their loading.
pub mod records;
/// The distributions job and its text summary.
pub mod report;
/// Descriptive statistics and display bounds.
pub mod stats;

pub use aggregate::{aggregate, Aggregation};
pub use figures::{histogram, render_panels, HistogramBin, Marker, PanelPlan};
pub use records::{load_records, parse_records, RecordStatus, ResultRecord};
pub use report::{
    distribution_panels, format_counts, format_summary, run_distributions, DistributionReport,
    FOUNDER_SEPARATION, MORANS_I, REPORTED_METRICS, WITHIN_LINEAGE_SPREAD,
};
pub use stats::{percentile, robust_bound, summarize, OutlierNote, RobustBound, Summary};
