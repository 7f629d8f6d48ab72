//! Build-output equivalence checks.
//!
//! `treecmp` compares a generated directory tree against a checked-in
//! expected tree: both must list the same files, and every text file must
//! have the same content once line endings are normalized.
//!
//! ```no_run
//! treecmp::compare("test_site", "expected", "_site", ["images/logo.png"])?;
//! # Ok::<(), treecmp::CompareError>(())
//! ```

#![allow(clippy::module_inception)]

use std::path::Path;

pub mod application;
pub mod cli;
pub mod comparator;
pub mod config;
pub mod diff;
pub mod ext;
pub mod filters;
pub mod tree;

pub use comparator::{
    CompareError, ComparisonSummary, FailureKind, IgnoredPaths, TreeComparator,
    TreeComparatorBuilder,
};
pub use filters::{BinaryDetector, HeuristicDetector, IgnoreSet};

/// Compares `<root>/<expected>` with `<root>/<actual>` using the default
/// blacklist and binary detection. `ignored` paths must exist in the actual
/// tree and are otherwise left out of the comparison.
pub fn compare<I, S>(
    root: impl AsRef<Path>,
    expected: impl AsRef<Path>,
    actual: impl AsRef<Path>,
    ignored: I,
) -> Result<ComparisonSummary, CompareError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    TreeComparator::<HeuristicDetector>::default().compare(
        root,
        expected,
        actual,
        &IgnoredPaths::new(ignored),
    )
}
