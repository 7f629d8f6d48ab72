use std::io::{self, Stdout, Write};
use std::time::Duration;

use colored::Color;
use similar::{Algorithm, ChangeTag, DiffOp, TextDiff};
use tracing::debug;

use crate::diff::ColorMode;

/// Unchanged characters shown around each change.
const DEFAULT_CONTEXT_CHARS: usize = 40;
/// Upper bound on time spent diffing a single file. Past it the diff is
/// coarser but still marks the file as different.
const DIFF_TIMEOUT: Duration = Duration::from_secs(5);
/// SGR parameters for the text attributes of removed and added runs.
const STRIKETHROUGH: &str = "9";
const UNDERLINE: &str = "4";

/// Outcome of diffing one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDiff {
    pub path: String,
    pub inserted_chars: usize,
    pub deleted_chars: usize,
}

impl FileDiff {
    pub fn has_changes(&self) -> bool {
        self.inserted_chars > 0 || self.deleted_chars > 0
    }
}

/// Character-level differ that prints every file with changes to a writer.
///
/// Colour is decided once at construction. Escape sequences are written
/// as-is, so the writer receives them even when it is not a terminal.
pub struct DiffReporter<W: Write> {
    out: W,
    use_color: bool,
    context_chars: usize,
}

impl DiffReporter<Stdout> {
    pub fn stdout(color: ColorMode) -> Self {
        Self::new(io::stdout(), color.enabled_for_stdout())
    }
}

impl<W: Write> DiffReporter<W> {
    pub fn new(out: W, use_color: bool) -> Self {
        Self {
            out,
            use_color,
            context_chars: DEFAULT_CONTEXT_CHARS,
        }
    }

    pub fn with_context_chars(mut self, context_chars: usize) -> Self {
        self.context_chars = context_chars;
        self
    }

    /// Diffs `expected` against `actual`, writing a report for `path` only if
    /// they differ.
    pub fn report(&mut self, path: &str, expected: &str, actual: &str) -> io::Result<FileDiff> {
        let mut file_diff = FileDiff {
            path: path.to_string(),
            inserted_chars: 0,
            deleted_chars: 0,
        };
        if expected == actual {
            return Ok(file_diff);
        }

        let diff = TextDiff::configure()
            .algorithm(Algorithm::Myers)
            .timeout(DIFF_TIMEOUT)
            .diff_chars(expected, actual);

        for change in diff.iter_all_changes() {
            match change.tag() {
                ChangeTag::Insert => file_diff.inserted_chars += 1,
                ChangeTag::Delete => file_diff.deleted_chars += 1,
                ChangeTag::Equal => {}
            }
        }
        debug!(
            "Diffed {}: {} inserted, {} deleted",
            path, file_diff.inserted_chars, file_diff.deleted_chars
        );
        if !file_diff.has_changes() {
            return Ok(file_diff);
        }

        writeln!(
            self.out,
            "Diff in {}: {} inserted, {} deleted characters",
            path, file_diff.inserted_chars, file_diff.deleted_chars
        )?;
        for (index, group) in diff.grouped_ops(self.context_chars).iter().enumerate() {
            if index > 0 {
                writeln!(self.out, "...")?;
            }
            let rendered = self.render_group(&diff, group);
            writeln!(self.out, "{rendered}")?;
        }
        self.out.flush()?;

        Ok(file_diff)
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn render_group(&self, diff: &TextDiff<'_, '_, '_, str>, group: &[DiffOp]) -> String {
        let mut rendered = String::new();
        let mut run = String::new();
        let mut run_tag = None;

        for op in group {
            for change in diff.iter_changes(op) {
                if run_tag != Some(change.tag()) {
                    if let Some(tag) = run_tag {
                        rendered.push_str(&self.paint(tag, &run));
                    }
                    run.clear();
                    run_tag = Some(change.tag());
                }
                run.push_str(change.value());
            }
        }
        if let Some(tag) = run_tag {
            rendered.push_str(&self.paint(tag, &run));
        }

        rendered
    }

    fn paint(&self, tag: ChangeTag, text: &str) -> String {
        match (tag, self.use_color) {
            (ChangeTag::Equal, _) => text.to_string(),
            (ChangeTag::Delete, true) => Self::ansi(Color::Red, STRIKETHROUGH, text),
            (ChangeTag::Insert, true) => Self::ansi(Color::Green, UNDERLINE, text),
            (ChangeTag::Delete, false) => format!("[-{text}-]"),
            (ChangeTag::Insert, false) => format!("{{+{text}+}}"),
        }
    }

    fn ansi(color: Color, attribute: &str, text: &str) -> String {
        format!("\u{1b}[{};{attribute}m{text}\u{1b}[0m", color.to_fg_str())
    }
}
