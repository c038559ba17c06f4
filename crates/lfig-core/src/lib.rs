#![deny(missing_docs)]
#![doc = "Core error, identifier, and configuration types shared by the lineage figure jobs."]

pub mod config;
pub mod errors;
pub mod ident;

pub use config::{
    load_yaml, BoundPolicy, CollectionConfig, CombineConfig, DistributionConfig, FigureSize,
};
pub use errors::{codes, ErrorInfo, LfigError};
pub use ident::{compose_name, extract_id, AssetId, AssetRef, FIGURE_SUFFIX};
