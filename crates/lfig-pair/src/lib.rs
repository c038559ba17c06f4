//! Filename-keyed pairing of tree and spatial-mapping figures, and their
//! side-by-side composition.

#![deny(missing_docs)]

/// The combine job over a presentation directory.
pub mod batch;
/// Side-by-side image composition.
pub mod compose;
/// Directory listing of identified assets.
pub mod discover;
/// Pairing of primary assets with their counterparts.
pub mod resolve;

pub use batch::{combine_pair, run_combine, CombineSummary, FailedPair};
pub use compose::{compose_side_by_side, load_image, write_png, ComposeOptions};
pub use discover::{count_matching, discover_assets};
pub use resolve::{
    resolve_pairs, CounterpartLocator, DirectoryLocator, MissingCounterpart, PairResolver,
    PairedAsset, Resolution,
};
