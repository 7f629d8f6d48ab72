use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use snafu::{ResultExt, Snafu, ensure};
use tracing::{debug, info, warn};

use crate::comparator::IgnoredPaths;
use crate::comparator::normalize::{decode_lossy, normalize_line_endings};
use crate::diff::{ColorMode, DiffReporter};
use crate::ext::PathDisplayExt;
use crate::filters::{BinaryDetector, HeuristicDetector, IgnoreSet, IgnoreSetError};
use crate::tree::{FileTree, FileTreeError};

pub const DEFAULT_EXPECTED_DIR: &str = "expected";
pub const DEFAULT_ACTUAL_DIR: &str = "_site";

/// Counts gathered by a comparison that found no differences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ComparisonSummary {
    /// Files whose text content was diffed.
    pub compared: usize,
    /// Files present in both trees whose content was not diffed.
    pub skipped: usize,
    /// Ignored paths that were only checked for existence.
    pub ignored: usize,
}

/// Checks a generated tree against an expected tree.
///
/// Holds only immutable configuration, so one comparator can run any number
/// of comparisons.
#[derive(Debug, Clone)]
pub struct TreeComparator<D: BinaryDetector = HeuristicDetector> {
    blacklist: IgnoreSet,
    detector: D,
    color: ColorMode,
}

impl TreeComparator<HeuristicDetector> {
    pub fn builder() -> TreeComparatorBuilder<HeuristicDetector> {
        TreeComparatorBuilder::default()
    }
}

impl Default for TreeComparator<HeuristicDetector> {
    fn default() -> Self {
        Self {
            blacklist: IgnoreSet::default(),
            detector: HeuristicDetector::default(),
            color: ColorMode::default(),
        }
    }
}

impl<D: BinaryDetector> TreeComparator<D> {
    pub fn blacklist(&self) -> &IgnoreSet {
        &self.blacklist
    }

    /// Compares `<root>/expected` with `<root>/_site`.
    pub fn compare_default(
        &self,
        root: impl AsRef<Path>,
        ignored: &IgnoredPaths,
    ) -> Result<ComparisonSummary, CompareError> {
        self.compare(root, DEFAULT_EXPECTED_DIR, DEFAULT_ACTUAL_DIR, ignored)
    }

    /// Compares `<root>/<expected>` with `<root>/<actual>`, printing per-file
    /// diffs to stdout.
    pub fn compare(
        &self,
        root: impl AsRef<Path>,
        expected: impl AsRef<Path>,
        actual: impl AsRef<Path>,
        ignored: &IgnoredPaths,
    ) -> Result<ComparisonSummary, CompareError> {
        let mut reporter = DiffReporter::stdout(self.color);
        self.compare_with_reporter(root, expected, actual, ignored, &mut reporter)
    }

    /// Same as [`TreeComparator::compare`], with diffs written to `reporter`.
    ///
    /// Failures are checked in order: a missing ignored path, then unequal
    /// file counts, then the first differing path by sorted position, and
    /// finally content differences. Content differences do not stop the
    /// walk; every differing file is reported before the error is returned.
    pub fn compare_with_reporter<W: Write>(
        &self,
        root: impl AsRef<Path>,
        expected: impl AsRef<Path>,
        actual: impl AsRef<Path>,
        ignored: &IgnoredPaths,
        reporter: &mut DiffReporter<W>,
    ) -> Result<ComparisonSummary, CompareError> {
        let root = root.as_ref();
        let expected_root = root.join(expected);
        let actual_root = root.join(actual);

        let mut expected_tree = FileTree::walk(&expected_root).context(TreeWalkSnafu {
            root: expected_root.clone(),
        })?;
        let mut actual_tree = FileTree::walk(&actual_root).context(TreeWalkSnafu {
            root: actual_root.clone(),
        })?;

        let missing = ignored.missing_from(&actual_tree);
        ensure!(missing.is_empty(), MissingIgnoredPathSnafu { missing });

        expected_tree.remove_matching(|path| ignored.contains(path));
        actual_tree.remove_matching(|path| ignored.contains(path));

        ensure!(
            expected_tree.len() == actual_tree.len(),
            FileCountMismatchSnafu {
                expected: expected_tree.len(),
                actual: actual_tree.len(),
            }
        );

        let mut summary = ComparisonSummary {
            ignored: ignored.len(),
            ..ComparisonSummary::default()
        };
        let mut differing = Vec::new();

        for (expected_path, actual_path) in expected_tree.paths().iter().zip(actual_tree.paths()) {
            ensure!(
                expected_path == actual_path,
                FileIdentityMismatchSnafu {
                    expected: expected_path.as_str(),
                    actual: actual_path.as_str(),
                }
            );

            if self.detector.is_binary_path(expected_path) || self.blacklist.is_match(expected_path)
            {
                debug!("Skipping binary or blacklisted file {}", expected_path);
                summary.skipped += 1;
                continue;
            }

            let expected_bytes = Self::read(expected_tree.resolve(expected_path))?;
            let actual_bytes = Self::read(actual_tree.resolve(actual_path))?;
            let expected_text = decode_lossy(&expected_bytes);
            let actual_text = decode_lossy(&actual_bytes);
            let expected_text = normalize_line_endings(&expected_text);
            let actual_text = normalize_line_endings(&actual_text);

            if self.detector.is_binary_content(&expected_text) {
                warn!(
                    "Unrecognised file extension {} contains null characters, skipping",
                    expected_path
                );
                summary.skipped += 1;
                continue;
            }

            let file_diff = reporter
                .report(expected_path, &expected_text, &actual_text)
                .context(ReportSnafu {
                    path: expected_path.as_str(),
                })?;
            summary.compared += 1;
            if file_diff.has_changes() {
                differing.push(file_diff.path);
            }
        }

        ensure!(differing.is_empty(), ContentDiffSnafu { files: differing });

        info!(
            "Trees match: {} compared, {} skipped, {} ignored",
            summary.compared, summary.skipped, summary.ignored
        );
        Ok(summary)
    }

    fn read(path: PathBuf) -> Result<Vec<u8>, CompareError> {
        fs::read(&path).context(ReadSnafu { path })
    }
}

/// Builds a [`TreeComparator`]. Blacklist patterns are added on top of the
/// built-in ones unless [`TreeComparatorBuilder::without_default_blacklist`]
/// is called.
#[derive(Debug, Clone)]
pub struct TreeComparatorBuilder<D: BinaryDetector> {
    blacklist: Vec<String>,
    default_blacklist: bool,
    detector: D,
    color: ColorMode,
}

impl Default for TreeComparatorBuilder<HeuristicDetector> {
    fn default() -> Self {
        Self {
            blacklist: Vec::new(),
            default_blacklist: true,
            detector: HeuristicDetector::default(),
            color: ColorMode::default(),
        }
    }
}

impl<D: BinaryDetector> TreeComparatorBuilder<D> {
    pub fn blacklist<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.blacklist.extend(patterns.into_iter().map(Into::into));
        self
    }

    pub fn without_default_blacklist(mut self) -> Self {
        self.default_blacklist = false;
        self
    }

    pub fn color(mut self, color: ColorMode) -> Self {
        self.color = color;
        self
    }

    pub fn detector<E: BinaryDetector>(self, detector: E) -> TreeComparatorBuilder<E> {
        TreeComparatorBuilder {
            blacklist: self.blacklist,
            default_blacklist: self.default_blacklist,
            detector,
            color: self.color,
        }
    }

    pub fn build(self) -> Result<TreeComparator<D>, IgnoreSetError> {
        let blacklist = if self.default_blacklist {
            IgnoreSet::with_defaults(self.blacklist)?
        } else {
            IgnoreSet::new(self.blacklist)?
        };

        Ok(TreeComparator {
            blacklist,
            detector: self.detector,
            color: self.color,
        })
    }
}

/// Broad category of a comparison failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    MissingIgnoredPath,
    FileCountMismatch,
    FileIdentityMismatch,
    ContentDiff,
    Io,
}

#[derive(Debug, Snafu)]
pub enum CompareError {
    #[snafu(display("Ignored paths are not present in actual paths: {}", missing.join(", ")))]
    MissingIgnoredPath { missing: Vec<String> },
    #[snafu(display("Unequal number of files! Expected: {}, Actual: {}", expected, actual))]
    FileCountMismatch { expected: usize, actual: usize },
    #[snafu(display("Different files built! Expected: {}, Actual: {}", expected, actual))]
    FileIdentityMismatch { expected: String, actual: String },
    #[snafu(display("Diffs found in files: {}", files.join(", ")))]
    ContentDiff { files: Vec<String> },
    #[snafu(display("Failed to list files under {}", root.best_effort_path_display()))]
    TreeWalkError { root: PathBuf, source: FileTreeError },
    #[snafu(display("Failed to read {}", path.best_effort_path_display()))]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Failed to write the diff of {}", path))]
    ReportError {
        path: String,
        source: std::io::Error,
    },
}

impl CompareError {
    pub fn kind(&self) -> FailureKind {
        match self {
            CompareError::MissingIgnoredPath { .. } => FailureKind::MissingIgnoredPath,
            CompareError::FileCountMismatch { .. } => FailureKind::FileCountMismatch,
            CompareError::FileIdentityMismatch { .. } => FailureKind::FileIdentityMismatch,
            CompareError::ContentDiff { .. } => FailureKind::ContentDiff,
            CompareError::TreeWalkError { .. }
            | CompareError::ReadError { .. }
            | CompareError::ReportError { .. } => FailureKind::Io,
        }
    }
}
