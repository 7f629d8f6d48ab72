mod color_mode;
mod reporter;

pub use color_mode::ColorMode;
pub use reporter::{DiffReporter, FileDiff};
