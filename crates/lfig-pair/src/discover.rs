use std::path::{Path, PathBuf};

use glob::{glob, Pattern};
use lfig_core::errors::{codes, ErrorInfo, LfigError};
use lfig_core::AssetRef;
use tracing::warn;

fn glob_error(err: impl std::fmt::Display, pattern: &Path) -> LfigError {
    LfigError::Asset(ErrorInfo::new(codes::GLOB, err.to_string()).with_path(pattern))
}

fn listing_pattern(dir: &Path, prefix: &str, suffix: &str) -> PathBuf {
    Path::new(&Pattern::escape(&dir.to_string_lossy())).join(format!(
        "{}*{}",
        Pattern::escape(prefix),
        Pattern::escape(suffix)
    ))
}

fn list_matching(dir: &Path, prefix: &str, suffix: &str) -> Result<Vec<PathBuf>, LfigError> {
    let pattern = listing_pattern(dir, prefix, suffix);
    let text = pattern.to_string_lossy();
    let mut paths = Vec::new();
    for entry in glob(&text).map_err(|err| glob_error(err, &pattern))? {
        let path = entry.map_err(|err| glob_error(err, &pattern))?;
        if path.is_file() {
            paths.push(path);
        }
    }
    Ok(paths)
}

/// Lists `dir/<prefix><id><suffix>` files as identified assets, sorted
/// lexicographically by filename.
///
/// A missing directory yields an empty listing. Names whose identifier is
/// empty are skipped with a warning.
pub fn discover_assets(dir: &Path, prefix: &str, suffix: &str) -> Result<Vec<AssetRef>, LfigError> {
    let mut assets = Vec::new();
    for path in list_matching(dir, prefix, suffix)? {
        match AssetRef::from_path(&path, prefix, suffix) {
            Ok(asset) => assets.push(asset),
            Err(err) => warn!(path = %path.display(), error = %err, "skipping unidentifiable asset"),
        }
    }
    assets.sort_by(|a, b| a.path.file_name().cmp(&b.path.file_name()));
    Ok(assets)
}

/// Counts files named `<prefix>*<suffix>` in `dir`.
pub fn count_matching(dir: &Path, prefix: &str, suffix: &str) -> Result<usize, LfigError> {
    Ok(list_matching(dir, prefix, suffix)?.len())
}
