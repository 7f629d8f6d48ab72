use std::borrow::Cow;

/// Collapses every CRLF pair into a single LF. Lone CRs are kept.
pub fn normalize_line_endings(text: &str) -> Cow<'_, str> {
    if text.contains("\r\n") {
        Cow::Owned(text.replace("\r\n", "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

/// Decodes file bytes as UTF-8, substituting U+FFFD for invalid sequences.
pub fn decode_lossy(bytes: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("a\r\nb\r\n", "a\nb\n")]
    #[case("a\nb\n", "a\nb\n")]
    #[case("lone\rcr", "lone\rcr")]
    #[case("\r\r\n", "\r\n")]
    #[case("", "")]
    fn crlf_is_collapsed(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize_line_endings(input), expected);
    }

    #[test]
    fn unchanged_text_is_borrowed() {
        assert!(matches!(normalize_line_endings("a\nb"), Cow::Borrowed(_)));
    }

    #[test]
    fn invalid_utf8_becomes_replacement_character() {
        assert_eq!(decode_lossy(b"ok\xff"), "ok\u{FFFD}");
    }
}
