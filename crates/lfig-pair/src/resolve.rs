use std::path::{Path, PathBuf};

use lfig_core::{compose_name, AssetId, AssetRef, FIGURE_SUFFIX};
use serde::{Deserialize, Serialize};

/// Lookup of the secondary asset belonging to an identifier.
pub trait CounterpartLocator {
    /// Returns the path of the counterpart for `id`, if one exists.
    fn locate(&self, id: &AssetId) -> Option<PathBuf>;
}

impl<F> CounterpartLocator for F
where
    F: Fn(&AssetId) -> Option<PathBuf>,
{
    fn locate(&self, id: &AssetId) -> Option<PathBuf> {
        self(id)
    }
}

/// Finds counterparts as `<dir>/<prefix><id><suffix>` files on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryLocator {
    dir: PathBuf,
    prefix: String,
    suffix: String,
}

impl DirectoryLocator {
    /// Creates a locator over `dir` using the given naming convention.
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }
}

impl CounterpartLocator for DirectoryLocator {
    fn locate(&self, id: &AssetId) -> Option<PathBuf> {
        let path = self.dir.join(compose_name(&self.prefix, id, &self.suffix));
        path.is_file().then_some(path)
    }
}

/// Primary and secondary assets sharing an identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairedAsset {
    /// Shared identifier.
    pub id: AssetId,
    /// Asset from the primary collection.
    pub primary: PathBuf,
    /// Matching asset from the secondary collection.
    pub secondary: PathBuf,
    /// Destination of the combined figure.
    pub output: PathBuf,
}

/// Primary asset whose counterpart could not be found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingCounterpart {
    /// Identifier with no counterpart.
    pub id: AssetId,
    /// Asset from the primary collection.
    pub primary: PathBuf,
    /// Diagnostic for the console.
    pub message: String,
}

/// Outcome of resolving one primary asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Both assets were found.
    Paired(PairedAsset),
    /// The counterpart is absent.
    Missing(MissingCounterpart),
}

impl Resolution {
    /// Identifier the resolution refers to.
    pub fn id(&self) -> &AssetId {
        match self {
            Resolution::Paired(pair) => &pair.id,
            Resolution::Missing(missing) => &missing.id,
        }
    }

    /// The pair, if one was found.
    pub fn into_paired(self) -> Option<PairedAsset> {
        match self {
            Resolution::Paired(pair) => Some(pair),
            Resolution::Missing(_) => None,
        }
    }
}

/// Lazily pairs primary assets with their counterparts, in primary order.
pub struct PairResolver<'a, I, L: ?Sized> {
    primaries: I,
    locator: &'a L,
    output_dir: PathBuf,
    output_prefix: String,
}

impl<'a, I, L> PairResolver<'a, I, L>
where
    I: Iterator<Item = AssetRef>,
    L: CounterpartLocator + ?Sized,
{
    /// Overrides the `combined_` output filename prefix.
    pub fn with_output_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.output_prefix = prefix.into();
        self
    }

    fn resolve(&self, primary: AssetRef) -> Resolution {
        match self.locator.locate(&primary.id) {
            Some(secondary) => {
                let output = self
                    .output_dir
                    .join(compose_name(&self.output_prefix, &primary.id, FIGURE_SUFFIX));
                Resolution::Paired(PairedAsset {
                    id: primary.id,
                    primary: primary.path,
                    secondary,
                    output,
                })
            }
            None => Resolution::Missing(MissingCounterpart {
                message: format!("no counterpart found for {}", primary.id),
                id: primary.id,
                primary: primary.path,
            }),
        }
    }
}

impl<I, L> Iterator for PairResolver<'_, I, L>
where
    I: Iterator<Item = AssetRef>,
    L: CounterpartLocator + ?Sized,
{
    type Item = Resolution;

    fn next(&mut self) -> Option<Self::Item> {
        let primary = self.primaries.next()?;
        Some(self.resolve(primary))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.primaries.size_hint()
    }
}

/// Pairs each primary asset with the counterpart reported by `locator`.
///
/// Output paths are `output_dir/combined_<id>.png`. Callers sort the
/// primaries beforehand; the resolver preserves their order.
pub fn resolve_pairs<'a, P, L>(
    primaries: P,
    locator: &'a L,
    output_dir: &Path,
) -> PairResolver<'a, P::IntoIter, L>
where
    P: IntoIterator<Item = AssetRef>,
    L: CounterpartLocator + ?Sized,
{
    PairResolver {
        primaries: primaries.into_iter(),
        locator,
        output_dir: output_dir.to_path_buf(),
        output_prefix: "combined_".into(),
    }
}
