//! Expected-versus-generated tree comparison.
//!
//! A comparison walks both trees, verifies that every ignored path was
//! actually generated, drops the ignored paths, and then requires both trees
//! to list the same files in the same sorted order. Text files are diffed
//! after CRLF normalization; binary and blacklisted files are only checked
//! for presence.

mod comparator;
mod ignored_paths;
mod normalize;

pub use comparator::{
    CompareError, ComparisonSummary, DEFAULT_ACTUAL_DIR, DEFAULT_EXPECTED_DIR, FailureKind,
    TreeComparator, TreeComparatorBuilder,
};
pub use ignored_paths::IgnoredPaths;
pub use normalize::normalize_line_endings;
