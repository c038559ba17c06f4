//! Asset identifiers derived from filenames.

use std::fmt::{self, Display};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{codes, ErrorInfo, LfigError};

/// Canonical token naming one subject across asset collections and result
/// records, e.g. a patient UUID.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetId(String);

impl AssetId {
    /// Wraps an already extracted token.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the token as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for AssetId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn malformed(filename: &str, prefix: &str, suffix: &str, reason: &str) -> LfigError {
    LfigError::Name(
        ErrorInfo::new(codes::MALFORMED_NAME, reason.to_string())
            .with_context("filename", filename)
            .with_context("prefix", prefix)
            .with_context("suffix", suffix),
    )
}

/// Returns the substring of `filename` between `prefix` and `suffix`.
///
/// Names that lack either affix, or whose affixes overlap, are rejected
/// instead of being sliced.
pub fn extract_id(filename: &str, prefix: &str, suffix: &str) -> Result<AssetId, LfigError> {
    let rest = filename
        .strip_prefix(prefix)
        .ok_or_else(|| malformed(filename, prefix, suffix, "missing expected prefix"))?;
    let token = rest
        .strip_suffix(suffix)
        .ok_or_else(|| malformed(filename, prefix, suffix, "missing expected suffix"))?;
    if token.is_empty() {
        return Err(malformed(filename, prefix, suffix, "empty identifier"));
    }
    Ok(AssetId::new(token))
}

/// Extension of every figure written by the jobs, whatever the input suffix.
pub const FIGURE_SUFFIX: &str = ".png";

/// Builds the filename `prefix + id + suffix`.
pub fn compose_name(prefix: &str, id: &AssetId, suffix: &str) -> String {
    format!("{prefix}{id}{suffix}")
}

/// An identified file on disk.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AssetRef {
    /// Identifier extracted from the filename.
    pub id: AssetId,
    /// Location of the asset.
    pub path: PathBuf,
}

impl AssetRef {
    /// Identifies `path` by stripping `prefix` and `suffix` from its filename.
    pub fn from_path(path: &Path, prefix: &str, suffix: &str) -> Result<Self, LfigError> {
        let filename = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                LfigError::Name(
                    ErrorInfo::new(codes::MALFORMED_NAME, "path has no utf-8 filename")
                        .with_path(path),
                )
            })?;
        let id = extract_id(filename, prefix, suffix)?;
        Ok(Self {
            id,
            path: path.to_path_buf(),
        })
    }
}
