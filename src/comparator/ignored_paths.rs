use crate::tree::FileTree;

/// Paths that must exist in the actual tree but are excluded from comparison.
///
/// Entries are relative to each tree root and `/`-separated; backslashes and a
/// leading `./` are normalized away. Duplicates are collapsed, keeping the
/// first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoredPaths {
    paths: Vec<String>,
}

impl IgnoredPaths {
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for path in paths {
            let path = Self::normalize(path.into());
            if !path.is_empty() && !normalized.contains(&path) {
                normalized.push(path);
            }
        }
        Self { paths: normalized }
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.iter().any(|p| p == path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }

    /// Entries that are not present in `tree`, in declaration order.
    pub fn missing_from(&self, tree: &FileTree) -> Vec<String> {
        self.paths
            .iter()
            .filter(|path| !tree.contains(path))
            .cloned()
            .collect()
    }

    fn normalize(path: String) -> String {
        let path = path.trim().replace('\\', "/");
        let mut trimmed = path.as_str();
        while let Some(rest) = trimmed.strip_prefix("./") {
            trimmed = rest;
        }
        trimmed.to_string()
    }
}

impl<S: Into<String>> FromIterator<S> for IgnoredPaths {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}
