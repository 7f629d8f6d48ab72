use std::path::PathBuf;

use crate::cli::Cli;
use crate::comparator::{DEFAULT_ACTUAL_DIR, DEFAULT_EXPECTED_DIR};
use crate::config::Settings;
use crate::diff::ColorMode;

/// What a single run was asked to do, before the settings file is applied.
#[derive(Debug, Clone, Default)]
pub struct RuntimeConfig {
    pub root: PathBuf,
    pub expected: Option<String>,
    pub actual: Option<String>,
    pub ignored: Vec<String>,
    pub blacklist: Vec<String>,
    pub color: ColorMode,
}

impl RuntimeConfig {
    /// Expected tree: flag, then settings file, then `expected`.
    pub fn expected_dir(&self, settings: &Settings) -> String {
        self.expected
            .clone()
            .or_else(|| settings.expected.clone())
            .unwrap_or_else(|| DEFAULT_EXPECTED_DIR.to_string())
    }

    /// Actual tree: flag, then settings file, then `_site`.
    pub fn actual_dir(&self, settings: &Settings) -> String {
        self.actual
            .clone()
            .or_else(|| settings.actual.clone())
            .unwrap_or_else(|| DEFAULT_ACTUAL_DIR.to_string())
    }

    /// Settings-file patterns followed by command-line patterns.
    pub fn blacklist(&self, settings: &Settings) -> Vec<String> {
        settings
            .blacklist
            .iter()
            .chain(&self.blacklist)
            .cloned()
            .collect()
    }
}

impl From<Cli> for RuntimeConfig {
    fn from(cli: Cli) -> Self {
        Self {
            root: cli.root,
            expected: cli.expected,
            actual: cli.actual,
            ignored: cli.ignored,
            blacklist: cli.blacklist,
            color: cli.color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_win_over_settings() {
        let config = RuntimeConfig {
            expected: Some("golden".into()),
            ..RuntimeConfig::default()
        };
        let settings = Settings {
            expected: Some("reference".into()),
            actual: Some("public".into()),
            blacklist: vec!["*.map".into()],
        };

        assert_eq!(config.expected_dir(&settings), "golden");
        assert_eq!(config.actual_dir(&settings), "public");
    }

    #[test]
    fn built_in_directories_apply_last() {
        let config = RuntimeConfig::default();
        let settings = Settings::default();

        assert_eq!(config.expected_dir(&settings), DEFAULT_EXPECTED_DIR);
        assert_eq!(config.actual_dir(&settings), DEFAULT_ACTUAL_DIR);
    }

    #[test]
    fn blacklists_are_combined() {
        let config = RuntimeConfig {
            blacklist: vec!["*.tmp".into()],
            ..RuntimeConfig::default()
        };
        let settings = Settings {
            blacklist: vec!["*.map".into()],
            ..Settings::default()
        };

        assert_eq!(config.blacklist(&settings), ["*.map", "*.tmp"]);
    }
}
