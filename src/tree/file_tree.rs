use std::fs;
use std::path::{Path, PathBuf};

use snafu::{ResultExt, Snafu, ensure, location};
use tracing::{debug, error};
use walkdir::WalkDir;

use crate::ext::{PathDisplayExt, to_slash_path};

/// Files found under a directory, as sorted `/`-separated paths relative to
/// that directory. Directories themselves are never listed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTree {
    root: PathBuf,
    paths: Vec<String>,
}

impl FileTree {
    pub fn walk(root: impl Into<PathBuf>) -> Result<Self, FileTreeError> {
        let root = root.into();
        let metadata = fs::metadata(&root).context(RootSnafu { root: root.clone() })?;
        ensure!(metadata.is_dir(), NotADirectorySnafu { root });

        let mut paths = Vec::new();
        for entry in WalkDir::new(&root).min_depth(1).follow_links(true) {
            let entry = entry.context(WalkSnafu { root: root.clone() })?;
            if !entry.file_type().is_file() {
                continue;
            }

            let Ok(relative) = entry.path().strip_prefix(&root) else {
                error!(
                    "Assumption that walked entries live under the walk root failed {}",
                    location!()
                );
                continue;
            };

            match to_slash_path(relative) {
                Some(path) => paths.push(path),
                None => {
                    return NonUtf8PathSnafu {
                        path: entry.path().to_path_buf(),
                    }
                    .fail();
                }
            }
        }

        paths.sort();
        debug!(
            "Walked {} files under {}",
            paths.len(),
            root.best_effort_path_display()
        );

        Ok(Self { root, paths })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.binary_search_by(|p| p.as_str().cmp(path)).is_ok()
    }

    /// Absolute location of one of the tree's relative paths.
    pub fn resolve(&self, relative: &str) -> PathBuf {
        relative
            .split('/')
            .fold(self.root.clone(), |acc, part| acc.join(part))
    }

    /// Drops every path for which `predicate` returns true, keeping the order.
    pub fn remove_matching(&mut self, predicate: impl Fn(&str) -> bool) {
        self.paths.retain(|path| !predicate(path));
    }
}

#[derive(Debug, Snafu)]
pub enum FileTreeError {
    #[snafu(display("Failed to open tree root {}", root.best_effort_path_display()))]
    RootError {
        root: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Tree root {} is not a directory", root.best_effort_path_display()))]
    NotADirectory { root: PathBuf },
    #[snafu(display("Failed to walk {}", root.best_effort_path_display()))]
    WalkError {
        root: PathBuf,
        source: walkdir::Error,
    },
    #[snafu(display("Path {} is not valid UTF-8", path.display()))]
    NonUtf8Path { path: PathBuf },
}
