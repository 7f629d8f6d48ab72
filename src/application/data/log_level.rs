use clap::ValueEnum;

/// Verbosity of the diagnostic log. Diffs are printed regardless of level.
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
    Silent,
}

impl LogLevel {
    pub fn to_tracing_level(self) -> Option<tracing::Level> {
        match self {
            LogLevel::Trace => Some(tracing::Level::TRACE),
            LogLevel::Debug => Some(tracing::Level::DEBUG),
            LogLevel::Info => Some(tracing::Level::INFO),
            LogLevel::Warn => Some(tracing::Level::WARN),
            LogLevel::Error => Some(tracing::Level::ERROR),
            LogLevel::Silent => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(LogLevel::Trace, Some(tracing::Level::TRACE))]
    #[case(LogLevel::Warn, Some(tracing::Level::WARN))]
    #[case(LogLevel::Silent, None)]
    fn tracing_level(#[case] level: LogLevel, #[case] expected: Option<tracing::Level>) {
        assert_eq!(level.to_tracing_level(), expected);
    }

    #[test]
    fn unrecognised_binary_warnings_are_visible_by_default() {
        assert_eq!(
            LogLevel::default().to_tracing_level(),
            Some(tracing::Level::WARN)
        );
    }
}
