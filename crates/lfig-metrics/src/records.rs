use std::fs;
use std::path::Path;

use lfig_core::errors::{codes, ErrorInfo, LfigError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Outcome kind recorded for one subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordStatus {
    /// `success`; the only kind whose metrics are aggregated.
    Success,
    /// `failed`.
    Failed,
    /// `error`.
    Error,
    /// `skipped`.
    Skipped,
    /// Any other status, including non-string values rendered as JSON.
    Other(String),
    /// The record carries no status field.
    Missing,
}

impl RecordStatus {
    fn parse(raw: &str) -> Self {
        match raw {
            "success" => RecordStatus::Success,
            "failed" => RecordStatus::Failed,
            "error" => RecordStatus::Error,
            "skipped" => RecordStatus::Skipped,
            other => RecordStatus::Other(other.to_string()),
        }
    }
}

/// One entry of a spatial mapping results document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    /// Raw status value; any JSON type is accepted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Value>,
    /// Every other field, including the nested metric mapping.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl ResultRecord {
    /// Interprets the raw status; `null` reads as missing.
    pub fn status(&self) -> RecordStatus {
        match &self.status {
            None | Some(Value::Null) => RecordStatus::Missing,
            Some(Value::String(raw)) => RecordStatus::parse(raw),
            Some(other) => RecordStatus::Other(other.to_string()),
        }
    }

    /// Whether the record's metrics count towards aggregation.
    pub fn is_success(&self) -> bool {
        self.status() == RecordStatus::Success
    }

    /// Returns the numeric value of `name` inside the `section` mapping.
    ///
    /// Absent sections, absent fields and non-numeric values (including
    /// `null`) all read as `None`.
    pub fn metric(&self, section: &str, name: &str) -> Option<f64> {
        self.fields
            .get(section)?
            .as_object()?
            .get(name)?
            .as_f64()
    }
}

/// Reads a JSON array of result records.
pub fn load_records(path: &Path) -> Result<Vec<ResultRecord>, LfigError> {
    if !path.is_file() {
        return Err(LfigError::missing_input("results file", path));
    }
    let contents = fs::read_to_string(path).map_err(|err| LfigError::io(err, path))?;
    parse_records(&contents).map_err(|err| match err {
        LfigError::Config(info) => LfigError::Config(info.with_path(path)),
        other => other,
    })
}

/// Parses a JSON array of result records.
pub fn parse_records(json: &str) -> Result<Vec<ResultRecord>, LfigError> {
    serde_json::from_str(json).map_err(|err| {
        LfigError::Config(
            ErrorInfo::new(codes::PARSE, err.to_string())
                .with_hint("expected a JSON array of result records"),
        )
    })
}
