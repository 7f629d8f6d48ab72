use snafu::Snafu;
use snafu::prelude::*;
use tracing::debug;
use tracing::info;

use crate::application::RuntimeConfig;
use crate::comparator::{CompareError, ComparisonSummary, IgnoredPaths, TreeComparator};
use crate::config::{Settings, SettingsLoadError};
use crate::ext::PathDisplayExt;
use crate::filters::IgnoreSetError;

pub struct Application;

impl Application {
    pub fn run(
        app_config: impl Into<RuntimeConfig>,
    ) -> Result<ComparisonSummary, ApplicationError> {
        let app_config: RuntimeConfig = app_config.into();
        let settings = Settings::read(&app_config.root).context(SettingsSnafu)?;
        debug!("Loaded settings: {:?}", settings);

        let expected = app_config.expected_dir(&settings);
        let actual = app_config.actual_dir(&settings);
        let ignored = IgnoredPaths::new(app_config.ignored.iter().cloned());

        let comparator = TreeComparator::builder()
            .blacklist(app_config.blacklist(&settings))
            .color(app_config.color)
            .build()
            .context(ComparatorCreationSnafu)?;
        debug!("Blacklist patterns: {:?}", comparator.blacklist().patterns());

        info!(
            "Comparing {} against {} under {}",
            actual,
            expected,
            app_config.root.best_effort_path_display()
        );
        let summary = comparator
            .compare(&app_config.root, &expected, &actual, &ignored)
            .context(ComparisonSnafu)?;

        Ok(summary)
    }
}

#[derive(Debug, Snafu)]
pub enum ApplicationError {
    #[snafu(display("Critical failure encountered while loading settings"))]
    SettingsError { source: SettingsLoadError },
    #[snafu(display("Critical failure encountered during comparator creation"))]
    ComparatorCreationError { source: IgnoreSetError },
    #[snafu(display("Generated tree does not match the expected tree"))]
    ComparisonError { source: CompareError },
}
