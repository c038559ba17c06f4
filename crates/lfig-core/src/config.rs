//! YAML-configurable parameters for the combine and distributions jobs.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::errors::{codes, ErrorInfo, LfigError};

/// Naming convention of one image collection inside the input directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionConfig {
    /// Subdirectory of the input directory holding the collection.
    pub subdir: String,
    /// Filename prefix preceding the identifier.
    pub prefix: String,
}

impl CollectionConfig {
    fn default_primary() -> Self {
        Self {
            subdir: "coalescent_trees".into(),
            prefix: "coalescent_tree_".into(),
        }
    }

    fn default_secondary() -> Self {
        Self {
            subdir: "spatial_mapping".into(),
            prefix: "spatial_mapping_".into(),
        }
    }
}

/// Parameters of the side-by-side combine job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombineConfig {
    /// Presentation directory containing both collections.
    #[serde(default)]
    pub input_dir: PathBuf,
    /// Explicit output directory; defaults to `input_dir/output_subdir`.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    /// Collection drawn on the left, driving the batch.
    #[serde(default = "CollectionConfig::default_primary")]
    pub primary: CollectionConfig,
    /// Collection drawn on the right, looked up per identifier.
    #[serde(default = "CollectionConfig::default_secondary")]
    pub secondary: CollectionConfig,
    /// Filename suffix shared by both collections.
    #[serde(default = "CombineConfig::default_suffix")]
    pub suffix: String,
    /// Output filename prefix preceding the identifier.
    #[serde(default = "CombineConfig::default_output_prefix")]
    pub output_prefix: String,
    /// Subdirectory used when no explicit output directory is given.
    #[serde(default = "CombineConfig::default_output_subdir")]
    pub output_subdir: String,
    /// Label written before the identifier in the title strip.
    #[serde(default = "CombineConfig::default_title_prefix")]
    pub title_prefix: String,
    /// Height in pixels of the title strip above both panels.
    #[serde(default = "CombineConfig::default_title_height")]
    pub title_height: u32,
}

impl CombineConfig {
    fn default_suffix() -> String {
        ".png".into()
    }

    fn default_output_prefix() -> String {
        "combined_".into()
    }

    fn default_output_subdir() -> String {
        "combined_figures".into()
    }

    fn default_title_prefix() -> String {
        "Patient: ".into()
    }

    const fn default_title_height() -> u32 {
        80
    }

    /// Creates a configuration for `input_dir` with every other field at its default.
    pub fn for_input(input_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            ..Self::default()
        }
    }

    /// Directory holding the primary collection.
    pub fn primary_dir(&self) -> PathBuf {
        self.input_dir.join(&self.primary.subdir)
    }

    /// Directory holding the secondary collection.
    pub fn secondary_dir(&self) -> PathBuf {
        self.input_dir.join(&self.secondary.subdir)
    }

    /// Output directory after applying the default.
    pub fn resolved_output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| self.input_dir.join(&self.output_subdir))
    }
}

impl Default for CombineConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::new(),
            output_dir: None,
            primary: CollectionConfig::default_primary(),
            secondary: CollectionConfig::default_secondary(),
            suffix: Self::default_suffix(),
            output_prefix: Self::default_output_prefix(),
            output_subdir: Self::default_output_subdir(),
            title_prefix: Self::default_title_prefix(),
            title_height: Self::default_title_height(),
        }
    }
}

/// Display-range policy for long-tailed metric series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundPolicy {
    /// Lower clamp applied to the upper display bound.
    #[serde(default = "BoundPolicy::default_floor")]
    pub floor: f64,
    /// Percentile used as the upper display bound.
    #[serde(default = "BoundPolicy::default_upper_percentile")]
    pub upper_percentile: f64,
    /// Percentile compared against the floor to decide whether the axis is narrowed.
    #[serde(default = "BoundPolicy::default_guard_percentile")]
    pub guard_percentile: f64,
}

impl BoundPolicy {
    const fn default_floor() -> f64 {
        0.2
    }

    const fn default_upper_percentile() -> f64 {
        99.0
    }

    const fn default_guard_percentile() -> f64 {
        95.0
    }
}

impl Default for BoundPolicy {
    fn default() -> Self {
        Self {
            floor: Self::default_floor(),
            upper_percentile: Self::default_upper_percentile(),
            guard_percentile: Self::default_guard_percentile(),
        }
    }
}

/// Pixel dimensions of a rendered figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FigureSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Default for FigureSize {
    fn default() -> Self {
        Self {
            width: 2700,
            height: 750,
        }
    }
}

/// Parameters of the distribution plot job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionConfig {
    /// Results document to read.
    #[serde(default)]
    pub input: PathBuf,
    /// Explicit output directory; defaults to the directory of `input`.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    /// Key of the nested metric mapping inside each record.
    #[serde(default = "DistributionConfig::default_metrics_key")]
    pub metrics_key: String,
    /// Name of the figure written into the output directory.
    #[serde(default = "DistributionConfig::default_output_name")]
    pub output_name: String,
    /// Display-range policy for the founder separation panel.
    #[serde(default)]
    pub bound: BoundPolicy,
    /// Size of the three-panel figure.
    #[serde(default)]
    pub figure: FigureSize,
}

impl DistributionConfig {
    fn default_metrics_key() -> String {
        "spatial_metrics".into()
    }

    fn default_output_name() -> String {
        "spatial_metrics_distributions.png".into()
    }

    /// Creates a configuration for `input` with every other field at its default.
    pub fn for_input(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            ..Self::default()
        }
    }

    /// Output directory after applying the default.
    pub fn resolved_output_dir(&self) -> PathBuf {
        if let Some(dir) = &self.output_dir {
            return dir.clone();
        }
        match self.input.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    /// Full path of the rendered figure.
    pub fn output_path(&self) -> PathBuf {
        self.resolved_output_dir().join(&self.output_name)
    }
}

impl Default for DistributionConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            output_dir: None,
            metrics_key: Self::default_metrics_key(),
            output_name: Self::default_output_name(),
            bound: BoundPolicy::default(),
            figure: FigureSize::default(),
        }
    }
}

/// Reads a YAML configuration file.
pub fn load_yaml<T: DeserializeOwned>(path: &Path) -> Result<T, LfigError> {
    let contents = fs::read_to_string(path).map_err(|err| LfigError::io(err, path))?;
    serde_yaml::from_str(&contents).map_err(|err| {
        LfigError::Config(ErrorInfo::new(codes::PARSE, err.to_string()).with_path(path))
    })
}
