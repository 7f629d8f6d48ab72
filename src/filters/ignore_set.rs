use globset::{Glob, GlobBuilder, GlobSet, GlobSetBuilder};
use snafu::{ResultExt, Snafu, location};
use tracing::{debug, error};

/// Files whose content is never compared: logs, plus font formats the
/// extension-based binary check does not know about.
pub const DEFAULT_BLACKLIST: &[&str] = &["*.log", "*.woff", "*.woff2"];

/// Immutable set of gitignore-style patterns.
///
/// A pattern without a `/` matches the file name at any depth, so `*.log`
/// matches both `build.log` and `logs/site/build.log`. A pattern containing a
/// `/` is anchored at the tree root, and a trailing `/` matches everything
/// below a directory.
#[derive(Debug, Clone)]
pub struct IgnoreSet {
    patterns: Vec<String>,
    globs: GlobSet,
}

impl IgnoreSet {
    pub fn new<I, S>(patterns: I) -> Result<Self, IgnoreSetError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let patterns = patterns
            .into_iter()
            .map(Into::into)
            .filter(|pattern: &String| !pattern.trim().is_empty())
            .collect::<Vec<_>>();

        let mut builder = GlobSetBuilder::new();
        for pattern in &patterns {
            builder.add(Self::to_glob(pattern)?);
        }
        let globs = builder.build().context(BuildSnafu)?;
        debug!("Built ignore set from patterns {:?}", patterns);

        Ok(Self { patterns, globs })
    }

    /// The default blacklist extended with `extra` patterns.
    pub fn with_defaults<I, S>(extra: I) -> Result<Self, IgnoreSetError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            DEFAULT_BLACKLIST
                .iter()
                .map(|pattern| pattern.to_string())
                .chain(extra.into_iter().map(Into::into)),
        )
    }

    pub fn empty() -> Self {
        Self {
            patterns: Vec::new(),
            globs: GlobSet::empty(),
        }
    }

    pub fn is_match(&self, relative_path: &str) -> bool {
        self.globs.is_match(relative_path)
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    fn to_glob(pattern: &str) -> Result<Glob, IgnoreSetError> {
        let trimmed = pattern.trim();
        let (body, directory) = match trimmed.strip_suffix('/') {
            Some(body) => (body, true),
            None => (trimmed, false),
        };

        let mut expression = if body.contains('/') {
            body.trim_start_matches('/').to_string()
        } else {
            format!("**/{body}")
        };
        if directory {
            expression.push_str("/**");
        }

        GlobBuilder::new(&expression)
            .literal_separator(true)
            .build()
            .context(InvalidPatternSnafu { pattern })
    }
}

impl Default for IgnoreSet {
    fn default() -> Self {
        match Self::new(DEFAULT_BLACKLIST.iter().copied()) {
            Ok(set) => set,
            Err(e) => {
                error!(
                    "Assumption that the default blacklist is valid failed: {} {}",
                    e,
                    location!()
                );
                Self::empty()
            }
        }
    }
}

#[derive(Debug, Snafu)]
pub enum IgnoreSetError {
    #[snafu(display("Invalid blacklist pattern '{}'", pattern))]
    InvalidPattern {
        pattern: String,
        source: globset::Error,
    },
    #[snafu(display("Failed to build the blacklist"))]
    BuildError { source: globset::Error },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("build.log", true)]
    #[case("logs/nested/build.log", true)]
    #[case("fonts/icons.woff", true)]
    #[case("fonts/icons.woff2", true)]
    #[case("index.html", false)]
    #[case("build.log.html", false)]
    #[case("woff/readme.md", false)]
    fn default_blacklist(#[case] path: &str, #[case] expected: bool) {
        assert_eq!(IgnoreSet::default().is_match(path), expected);
    }

    #[rstest]
    #[case("sitemap.xml", "sitemap.xml", true)]
    #[case("sitemap.xml", "nested/sitemap.xml", true)]
    #[case("/sitemap.xml", "sitemap.xml", true)]
    #[case("/sitemap.xml", "nested/sitemap.xml", false)]
    #[case("assets/*.js", "assets/app.js", true)]
    #[case("assets/*.js", "assets/vendor/app.js", false)]
    #[case("assets/**/*.js", "assets/vendor/app.js", true)]
    #[case("generated/", "generated/a/b.html", true)]
    #[case("generated/", "other/generated.html", false)]
    fn pattern_semantics(#[case] pattern: &str, #[case] path: &str, #[case] expected: bool) {
        let set = IgnoreSet::new([pattern]).expect("Failed to build ignore set");

        assert_eq!(set.is_match(path), expected, "{pattern} vs {path}");
    }

    #[test]
    fn with_defaults_keeps_built_in_patterns() {
        let set = IgnoreSet::with_defaults(["*.map"]).expect("Failed to build ignore set");

        assert!(set.is_match("js/app.js.map"));
        assert!(set.is_match("debug.log"));
        assert_eq!(set.patterns().len(), DEFAULT_BLACKLIST.len() + 1);
    }

    #[test]
    fn blank_patterns_are_dropped() {
        let set = IgnoreSet::new(["", "   ", "*.tmp"]).expect("Failed to build ignore set");

        assert_eq!(set.patterns(), ["*.tmp"]);
    }

    #[test]
    fn empty_set_matches_nothing() {
        assert!(!IgnoreSet::empty().is_match("build.log"));
    }

    #[test]
    fn invalid_pattern_is_reported() {
        let result = IgnoreSet::new(["[unclosed"]);

        match result {
            Err(IgnoreSetError::InvalidPattern { pattern, .. }) => assert_eq!(pattern, "[unclosed"),
            other => panic!("Expected InvalidPattern, got {other:?}"),
        }
    }
}
