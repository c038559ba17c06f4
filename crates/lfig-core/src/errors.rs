//! Structured error types shared across lineage figure crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable error codes carried in [`ErrorInfo::code`].
pub mod codes {
    /// Filename does not carry the expected prefix or suffix.
    pub const MALFORMED_NAME: &str = "lfig.malformed_name";
    /// An input path supplied by the caller does not exist.
    pub const MISSING_INPUT: &str = "lfig.missing_input";
    /// An asset could not be read or decoded.
    pub const LOAD_FAILURE: &str = "lfig.load_failure";
    /// No record in the results document has status `success`.
    pub const NO_SUCCESSFUL_RECORDS: &str = "lfig.no_successful_records";
    /// A series required for reporting is empty.
    pub const EMPTY_REQUIRED_SERIES: &str = "lfig.empty_required_series";
    /// Statistics were requested over an empty series.
    pub const EMPTY_SERIES: &str = "lfig.empty_series";
    /// Percentile outside of `[0, 100]`.
    pub const INVALID_PERCENTILE: &str = "lfig.invalid_percentile";
    /// Figure drawing or encoding failed.
    pub const RENDER: &str = "lfig.render";
    /// Generic filesystem failure.
    pub const IO: &str = "lfig.io";
    /// Results document or configuration could not be parsed.
    pub const PARSE: &str = "lfig.parse";
    /// Glob pattern construction or traversal failed.
    pub const GLOB: &str = "lfig.glob";
}

/// Structured payload attached to every [`LfigError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (identifiers, paths, etc.).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Adds a `path` context entry.
    pub fn with_path(self, path: &Path) -> Self {
        self.with_context("path", path.display().to_string())
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for lineage figure tooling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum LfigError {
    /// Asset naming errors.
    #[error("name error: {0}")]
    Name(ErrorInfo),
    /// Asset discovery and decoding errors.
    #[error("asset error: {0}")]
    Asset(ErrorInfo),
    /// Result record selection errors.
    #[error("records error: {0}")]
    Records(ErrorInfo),
    /// Descriptive statistics errors.
    #[error("stats error: {0}")]
    Stats(ErrorInfo),
    /// Figure rendering errors.
    #[error("render error: {0}")]
    Render(ErrorInfo),
    /// Filesystem errors.
    #[error("io error: {0}")]
    Io(ErrorInfo),
    /// Configuration and document parsing errors.
    #[error("config error: {0}")]
    Config(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl LfigError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            LfigError::Name(info)
            | LfigError::Asset(info)
            | LfigError::Records(info)
            | LfigError::Stats(info)
            | LfigError::Render(info)
            | LfigError::Io(info)
            | LfigError::Config(info) => info,
        }
    }

    /// Returns whether the error carries the provided stable code.
    pub fn is(&self, code: &str) -> bool {
        self.info().code == code
    }

    /// Wraps a filesystem failure together with the offending path.
    pub fn io(err: impl Display, path: &Path) -> Self {
        LfigError::Io(ErrorInfo::new(codes::IO, err.to_string()).with_path(path))
    }

    /// Reports a caller supplied input path that does not exist.
    pub fn missing_input(what: &str, path: &Path) -> Self {
        LfigError::Io(
            ErrorInfo::new(codes::MISSING_INPUT, format!("{what} not found"))
                .with_path(path),
        )
    }
}
