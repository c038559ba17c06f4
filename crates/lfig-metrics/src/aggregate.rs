use indexmap::IndexMap;
use lfig_core::errors::{codes, ErrorInfo, LfigError};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::records::ResultRecord;

/// Metric series gathered from the successful records of a results document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aggregation {
    /// Number of records in the document.
    pub total: usize,
    /// Number of records with status `success`.
    pub successful: usize,
    /// One series per requested metric, in request order.
    pub series: IndexMap<String, Vec<f64>>,
}

impl Aggregation {
    /// Values gathered for `name`; `None` when the metric was not requested.
    pub fn series(&self, name: &str) -> Option<&[f64]> {
        self.series.get(name).map(Vec::as_slice)
    }

    /// Requested metrics that no successful record carried.
    pub fn empty_series(&self) -> Vec<&str> {
        self.series
            .iter()
            .filter(|(_, values)| values.is_empty())
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Values for a metric the caller cannot proceed without.
    pub fn require(&self, name: &str) -> Result<&[f64], LfigError> {
        match self.series(name) {
            Some(values) if !values.is_empty() => Ok(values),
            _ => Err(LfigError::Records(
                ErrorInfo::new(
                    codes::EMPTY_REQUIRED_SERIES,
                    format!("no {name} values found in results"),
                )
                .with_context("metric", name)
                .with_context("successful", self.successful.to_string()),
            )),
        }
    }
}

/// Collects the named metrics from the `section` mapping of every
/// successful record.
///
/// Records lacking a metric are skipped for that metric only, so series
/// lengths may differ. Fails when no record is successful.
pub fn aggregate<S: AsRef<str>>(
    records: &[ResultRecord],
    section: &str,
    names: &[S],
) -> Result<Aggregation, LfigError> {
    let successful: Vec<&ResultRecord> = records.iter().filter(|r| r.is_success()).collect();
    if successful.is_empty() {
        return Err(LfigError::Records(
            ErrorInfo::new(
                codes::NO_SUCCESSFUL_RECORDS,
                "no successful results found",
            )
            .with_context("records", records.len().to_string()),
        ));
    }

    let mut series = IndexMap::with_capacity(names.len());
    for name in names {
        let name = name.as_ref();
        let values: Vec<f64> = successful
            .iter()
            .filter_map(|record| record.metric(section, name))
            .collect();
        if values.is_empty() {
            warn!(metric = name, "metric absent from every successful record");
        }
        series.insert(name.to_string(), values);
    }

    Ok(Aggregation {
        total: records.len(),
        successful: successful.len(),
        series,
    })
}
