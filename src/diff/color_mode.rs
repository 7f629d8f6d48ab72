use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Whether diffs written to stdout should be coloured.
    pub fn enabled_for_stdout(&self) -> bool {
        match self {
            ColorMode::Auto => supports_color::on(supports_color::Stream::Stdout).is_some(),
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}
