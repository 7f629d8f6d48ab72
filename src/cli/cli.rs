use std::path::PathBuf;

use clap::Parser;

use crate::application::data::LogLevel;
use crate::diff::ColorMode;

/// Compares a generated directory tree against an expected one.
#[derive(Parser, Debug, Clone)]
#[command(version)]
pub struct Cli {
    /// Directory holding both trees
    #[clap(long, short, default_value = ".")]
    pub root: PathBuf,

    /// Expected tree, relative to the root [default: expected]
    #[clap(long, short)]
    pub expected: Option<String>,

    /// Generated tree, relative to the root [default: _site]
    #[clap(long, short)]
    pub actual: Option<String>,

    /// Path that must be generated but is not compared (repeatable)
    #[clap(long = "ignore", short = 'i', value_name = "PATH")]
    pub ignored: Vec<String>,

    /// Additional glob of files never compared by content (repeatable)
    #[clap(long, short, value_name = "GLOB")]
    pub blacklist: Vec<String>,

    #[clap(long, default_value = "auto", value_enum)]
    pub color: ColorMode,

    #[clap(long, short, default_value = "warn", value_enum)]
    pub log_level: LogLevel,
}
