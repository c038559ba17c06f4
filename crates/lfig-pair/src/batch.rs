use std::fs;
use std::path::PathBuf;

use lfig_core::{AssetId, CombineConfig, LfigError, FIGURE_SUFFIX};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::compose::{compose_side_by_side, load_image, write_png, ComposeOptions};
use crate::discover::{count_matching, discover_assets};
use crate::resolve::{resolve_pairs, DirectoryLocator, PairedAsset, Resolution};

/// Pair whose figure could not be produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedPair {
    /// Identifier of the pair.
    pub id: AssetId,
    /// Rendered error that stopped the pair.
    pub error: String,
}

/// Outcome of one combine run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombineSummary {
    /// Directory the figures were written to.
    pub output_dir: PathBuf,
    /// Number of primary images discovered.
    pub primaries: usize,
    /// Figures written during this run, in processing order.
    pub combined: Vec<PathBuf>,
    /// Primaries without a counterpart.
    pub unmatched: Vec<AssetId>,
    /// Pairs whose figure could not be produced.
    pub failed: Vec<FailedPair>,
    /// Combined figures present in the output directory after the run,
    /// including ones left by earlier runs.
    pub total_outputs: usize,
}

/// Loads, composes and writes the figure for one pair.
pub fn combine_pair(pair: &PairedAsset, options: &ComposeOptions) -> Result<(), LfigError> {
    let left = load_image(&pair.primary)?;
    let right = load_image(&pair.secondary)?;
    let figure = compose_side_by_side(&left, &right, options);
    write_png(&figure, &pair.output)
}

/// Combines every primary image that has a counterpart into one figure.
///
/// Missing counterparts and images that fail to load are logged and
/// recorded in the summary; they never abort the batch.
pub fn run_combine(config: &CombineConfig) -> Result<CombineSummary, LfigError> {
    if !config.input_dir.is_dir() {
        return Err(LfigError::missing_input("input directory", &config.input_dir));
    }
    let output_dir = config.resolved_output_dir();
    fs::create_dir_all(&output_dir).map_err(|err| LfigError::io(err, &output_dir))?;

    let primaries =
        discover_assets(&config.primary_dir(), &config.primary.prefix, &config.suffix)?;
    let mut summary = CombineSummary {
        output_dir: output_dir.clone(),
        primaries: primaries.len(),
        combined: Vec::new(),
        unmatched: Vec::new(),
        failed: Vec::new(),
        total_outputs: 0,
    };
    if primaries.is_empty() {
        warn!(dir = %config.primary_dir().display(), "no primary images found");
        return Ok(summary);
    }
    info!(count = primaries.len(), "discovered primary images");

    let locator = DirectoryLocator::new(
        config.secondary_dir(),
        config.secondary.prefix.clone(),
        config.suffix.clone(),
    );
    let resolutions = resolve_pairs(primaries, &locator, &output_dir)
        .with_output_prefix(config.output_prefix.clone());
    for resolution in resolutions {
        match resolution {
            Resolution::Missing(missing) => {
                warn!(id = %missing.id, "{}", missing.message);
                summary.unmatched.push(missing.id);
            }
            Resolution::Paired(pair) => {
                debug!(
                    id = %pair.id,
                    primary = %pair.primary.display(),
                    secondary = %pair.secondary.display(),
                    "combining"
                );
                let options = ComposeOptions {
                    title: Some(format!("{}{}", config.title_prefix, pair.id)),
                    title_height: config.title_height,
                    ..ComposeOptions::default()
                };
                match combine_pair(&pair, &options) {
                    Ok(()) => {
                        info!(
                            id = %pair.id,
                            output = %pair.output.display(),
                            "saved combined figure"
                        );
                        summary.combined.push(pair.output);
                    }
                    Err(err) => {
                        warn!(id = %pair.id, error = %err, "skipping pair");
                        summary.failed.push(FailedPair {
                            id: pair.id,
                            error: err.to_string(),
                        });
                    }
                }
            }
        }
    }

    summary.total_outputs = count_matching(&output_dir, &config.output_prefix, FIGURE_SUFFIX)?;
    Ok(summary)
}
