use std::path::Path;

/// Extensions known to hold text. A text hit ends the lookup before any
/// binary extension further left in the file name is considered.
const TEXT_EXTENSIONS: &[&str] = &[
    "asp", "bat", "c", "cfg", "cjs", "conf", "cpp", "cs", "css", "csv", "go", "h", "hbs", "hpp",
    "htm", "html", "ini", "java", "js", "json", "jsx", "less", "map", "markdown", "md", "mjs",
    "njk", "php", "pl", "py", "rb", "rs", "rss", "sass", "scss", "sh", "sql", "svg", "toml",
    "ts", "tsx", "txt", "vue", "xhtml", "xml", "yaml", "yml",
];

/// Extensions known to hold binary content.
const BINARY_EXTENSIONS: &[&str] = &[
    "3g2", "3gp", "7z", "a", "aac", "aif", "aiff", "apk", "ar", "avi", "bin", "bmp", "bz2",
    "cab", "class", "cur", "dat", "deb", "dll", "dmg", "doc", "docx", "dylib", "eot", "epub",
    "exe", "flac", "flv", "gif", "gz", "icns", "ico", "iso", "jar", "jpeg", "jpg", "lz", "lzma",
    "m4a", "m4v", "mid", "midi", "mkv", "mov", "mp3", "mp4", "mpeg", "mpg", "o", "odp", "ods",
    "odt", "oga", "ogg", "ogv", "otf", "pdf", "png", "ppt", "pptx", "psd", "pyc", "rar", "rpm",
    "so", "swf", "tar", "tga", "tgz", "tif", "tiff", "ttc", "ttf", "wasm", "wav", "webm", "webp",
    "wma", "wmv", "xls", "xlsx", "xz", "z", "zip", "zst",
];

/// Decides whether a file should be treated as binary rather than diffed as
/// text.
pub trait BinaryDetector {
    /// Classification by path alone.
    fn is_binary_path(&self, relative_path: &str) -> bool;

    /// Classification of already decoded content.
    fn is_binary_content(&self, content: &str) -> bool;

    fn is_likely_binary(&self, relative_path: Option<&str>, content: Option<&str>) -> bool {
        relative_path.is_some_and(|path| self.is_binary_path(path))
            || content.is_some_and(|content| self.is_binary_content(content))
    }
}

/// Extension lookup plus a scan of the decoded text.
///
/// Every dot-separated segment of the file name is looked up from right to
/// left and the first known text or binary extension decides. Content is
/// binary if any character is the replacement character (the mark left by
/// lossy UTF-8 decoding) or a control character at or below U+0008.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicDetector;

impl HeuristicDetector {
    fn is_suspicious(c: char) -> bool {
        c == char::REPLACEMENT_CHARACTER || c <= '\u{8}'
    }
}

impl BinaryDetector for HeuristicDetector {
    fn is_binary_path(&self, relative_path: &str) -> bool {
        let Some(file_name) = Path::new(relative_path)
            .file_name()
            .and_then(|name| name.to_str())
        else {
            return false;
        };

        for segment in file_name.split('.').rev() {
            let segment = segment.to_ascii_lowercase();
            if TEXT_EXTENSIONS.contains(&segment.as_str()) {
                return false;
            }
            if BINARY_EXTENSIONS.contains(&segment.as_str()) {
                return true;
            }
        }
        false
    }

    fn is_binary_content(&self, content: &str) -> bool {
        content.chars().any(Self::is_suspicious)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("images/logo.png", true)]
    #[case("images/PHOTO.JPG", true)]
    #[case("downloads/archive.tar.gz", true)]
    #[case("fonts/icon.ttf", true)]
    #[case("index.html", false)]
    #[case("markbind/js/vue.min.js", false)]
    #[case("Makefile", false)]
    #[case("fonts/icons.woff2", false)]
    #[case("images/logo.png.bak", true)]
    #[case("assets/app.min.js.gz", true)]
    #[case("notes.png.txt", false)]
    #[case("blob", false)]
    fn binary_by_extension(#[case] path: &str, #[case] expected: bool) {
        assert_eq!(HeuristicDetector.is_binary_path(path), expected);
    }

    #[rstest]
    #[case("<html><body>plain text</body></html>", false)]
    #[case("", false)]
    #[case("unicode text: äöü 🚀", false)]
    #[case("tabs\tand\nnewlines\r\n", false)]
    #[case("\0\0\0binary", true)]
    #[case("bell \u{7} inside", true)]
    #[case("lossy \u{FFFD} decode", true)]
    fn binary_by_content(#[case] content: &str, #[case] expected: bool) {
        assert_eq!(HeuristicDetector.is_binary_content(content), expected);
    }

    #[rstest]
    #[case(0)]
    #[case(40)]
    #[case(199)]
    fn control_character_anywhere_is_detected(#[case] position: usize) {
        let mut content = "a".repeat(200);
        content.replace_range(position..position + 1, "\0");

        assert!(HeuristicDetector.is_binary_content(&content));
    }

    #[test]
    fn likely_binary_combines_both_checks() {
        let detector = HeuristicDetector;

        assert!(detector.is_likely_binary(Some("logo.png"), None));
        assert!(detector.is_likely_binary(None, Some("\0")));
        assert!(detector.is_likely_binary(Some("page.html"), Some("\0")));
        assert!(!detector.is_likely_binary(Some("page.html"), Some("text")));
        assert!(!detector.is_likely_binary(None, None));
    }
}
