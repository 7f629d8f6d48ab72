use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use hashlink::LinkedHashMap;
use saphyr::{LoadableYamlNode, Scalar, Yaml};
use snafu::prelude::*;
use tracing::{debug, warn};

use crate::ext::PathDisplayExt;

const SETTINGS_FILE_NAME: &str = "treecmp.yaml";

const EXPECTED_KEY: &str = "expected";
const ACTUAL_KEY: &str = "actual";
const BLACKLIST_KEY: &str = "blacklist";

fn get_settings_file_path(root: &Path) -> PathBuf {
    root.join(SETTINGS_FILE_NAME)
}

/// Defaults read from `treecmp.yaml` at the comparison root.
///
/// ```yaml
/// expected: expected
/// actual: _site
/// blacklist:
///   - "*.map"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub expected: Option<String>,
    pub actual: Option<String>,
    pub blacklist: Vec<String>,
}

impl Settings {
    /// Reads the settings file under `root`, or returns empty settings when
    /// there is none.
    pub fn read(root: &Path) -> Result<Self, SettingsLoadError> {
        let path = get_settings_file_path(root);
        if !path.is_file() {
            debug!(
                "No settings file at {}, using defaults",
                path.best_effort_path_display()
            );
            return Ok(Self::default());
        }
        Self::from_path(path)
    }

    pub fn from_path(path: PathBuf) -> Result<Self, SettingsLoadError> {
        debug!("Reading settings file: {}", path.best_effort_path_display());
        let contents = fs::read_to_string(&path).context(ReadSnafu {
            file_path: path.best_effort_path_display(),
        })?;
        debug!("Successfully read settings file: {} bytes", contents.len());
        contents.as_str().try_into()
    }

    fn get<'a, 'input>(
        top_level: &'a LinkedHashMap<Yaml<'input>, Yaml<'input>>,
        key: &'static str,
    ) -> Option<&'a Yaml<'input>> {
        top_level
            .get(&Yaml::Value(Scalar::String(Cow::Borrowed(key))))
            .filter(|value| !matches!(value, Yaml::Value(Scalar::Null)))
    }

    fn parse_string(
        top_level: &LinkedHashMap<Yaml, Yaml>,
        key: &'static str,
    ) -> Result<Option<String>, SettingsLoadError> {
        match Self::get(top_level, key) {
            None => Ok(None),
            Some(value) => value
                .as_str()
                .map(|s| Some(s.to_string()))
                .context(InvalidValueSnafu {
                    key,
                    expected: "a string",
                }),
        }
    }

    fn parse_blacklist(
        top_level: &LinkedHashMap<Yaml, Yaml>,
    ) -> Result<Vec<String>, SettingsLoadError> {
        let Some(value) = Self::get(top_level, BLACKLIST_KEY) else {
            return Ok(Vec::new());
        };

        value
            .as_sequence()
            .context(InvalidValueSnafu {
                key: BLACKLIST_KEY,
                expected: "a list of patterns",
            })?
            .iter()
            .map(|item| {
                item.as_str().map(str::to_string).context(InvalidValueSnafu {
                    key: BLACKLIST_KEY,
                    expected: "a list of patterns",
                })
            })
            .collect()
    }

    fn warn_unknown_keys(top_level: &LinkedHashMap<Yaml, Yaml>) {
        for key in top_level.keys() {
            match key.as_str() {
                Some(EXPECTED_KEY | ACTUAL_KEY | BLACKLIST_KEY) => {}
                other => warn!(
                    "Ignoring unknown settings key {:?}",
                    other.unwrap_or("<non-string>")
                ),
            }
        }
    }
}

impl TryFrom<&str> for Settings {
    type Error = SettingsLoadError;

    fn try_from(contents: &str) -> Result<Self, Self::Error> {
        let documents = Yaml::load_from_str(contents).context(ParseSnafu)?;
        let Some(document) = documents.first() else {
            return Ok(Self::default());
        };
        if matches!(document, Yaml::Value(Scalar::Null)) {
            return Ok(Self::default());
        }

        let top_level = document
            .as_mapping()
            .ok_or(SettingsLoadError::TopLevelNotMap)?;
        Self::warn_unknown_keys(top_level);

        Ok(Settings {
            expected: Self::parse_string(top_level, EXPECTED_KEY)?,
            actual: Self::parse_string(top_level, ACTUAL_KEY)?,
            blacklist: Self::parse_blacklist(top_level)?,
        })
    }
}

#[derive(Debug, Snafu)]
pub enum SettingsLoadError {
    #[snafu(display("Failed to read the settings file: {}", file_path))]
    ReadError {
        file_path: String,
        source: std::io::Error,
    },
    #[snafu(display("Failed to parse the settings file"))]
    ParseError { source: saphyr::ScanError },
    #[snafu(display("Top level of the settings file should be a map"))]
    TopLevelNotMap,
    #[snafu(display("Settings key '{}' should be {}", key, expected))]
    InvalidValue {
        key: &'static str,
        expected: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn settings_default_when_file_is_absent() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");

        let settings = Settings::read(temp_dir.path()).expect("Missing file should be fine");

        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn settings_are_read_from_root() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        fs::write(
            temp_dir.path().join(SETTINGS_FILE_NAME),
            "expected: reference\nactual: public\nblacklist:\n  - \"*.map\"\n",
        )
        .expect("Failed to write settings file");

        let settings = Settings::read(temp_dir.path()).expect("Failed to read settings");

        assert_eq!(settings.expected.as_deref(), Some("reference"));
        assert_eq!(settings.actual.as_deref(), Some("public"));
        assert_eq!(settings.blacklist, ["*.map"]);
    }

    #[test]
    fn settings_returns_error_on_nonexistent_file() {
        let result = Settings::from_path(PathBuf::from("nonexistent.yaml"));

        assert!(matches!(result, Err(SettingsLoadError::ReadError { .. })));
    }

    #[test]
    fn settings_returns_error_on_invalid_yaml() {
        let result: Result<Settings, _> = "invalid: yaml: content: [unclosed".try_into();

        assert!(matches!(result, Err(SettingsLoadError::ParseError { .. })));
    }

    #[test]
    fn settings_handle_empty_file() {
        let result: Result<Settings, _> = "".try_into();

        assert_eq!(result.expect("Empty file should be fine"), Settings::default());
    }

    #[test]
    fn settings_returns_error_when_top_level_is_not_map() {
        let result: Result<Settings, _> = "- item1\n- item2".try_into();

        assert!(matches!(result, Err(SettingsLoadError::TopLevelNotMap)));
    }

    #[test]
    fn settings_returns_error_when_directory_is_not_string() {
        let result: Result<Settings, _> = "expected:\n  - a\n  - b".try_into();

        assert!(matches!(
            result,
            Err(SettingsLoadError::InvalidValue {
                key: EXPECTED_KEY,
                ..
            })
        ));
    }

    #[test]
    fn settings_returns_error_when_blacklist_is_not_list() {
        let result: Result<Settings, _> = "blacklist: \"*.map\"".try_into();

        assert!(matches!(
            result,
            Err(SettingsLoadError::InvalidValue {
                key: BLACKLIST_KEY,
                ..
            })
        ));
    }

    #[test]
    fn settings_returns_error_when_blacklist_entry_is_not_string() {
        let result: Result<Settings, _> = "blacklist:\n  - \"*.map\"\n  - [nested]".try_into();

        assert!(matches!(result, Err(SettingsLoadError::InvalidValue { .. })));
    }

    #[test]
    fn settings_treat_null_values_as_absent() {
        let result: Result<Settings, _> = "expected: ~\nblacklist:\n".try_into();

        assert_eq!(result.expect("Null values should be fine"), Settings::default());
    }

    #[test]
    fn settings_skip_unknown_keys() {
        let result: Result<Settings, _> = "actual: out\nverbose: true".try_into();

        let settings = result.expect("Unknown keys should be skipped");
        assert_eq!(settings.actual.as_deref(), Some("out"));
    }
}
