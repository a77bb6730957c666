// ABOUTME: Whitespace trimming and collapsing over a narrow whitespace class.
// ABOUTME: Only space, tab, CR, and LF count; other Unicode spaces pass through untouched.

use std::borrow::Cow;

/// Returns true for the four characters these routines treat as whitespace:
/// space, tab, carriage return, and line feed.
///
/// This is narrower than [`char::is_whitespace`]. A no-break space or a
/// Unicode line separator is content, not whitespace.
pub fn is_whitespace_class(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

/// Removes leading and trailing whitespace runs.
///
/// The result always borrows from the input, so an untouched string comes
/// back as the same slice.
pub fn trim_whitespace(s: &str) -> &str {
    s.trim_matches(is_whitespace_class)
}

/// Trims the ends and rewrites every internal whitespace run as a single space.
///
/// Returns the trimmed input slice when no run needs rewriting.
pub fn collapse_whitespace(s: &str) -> Cow<'_, str> {
    let trimmed = trim_whitespace(s);
    if !needs_collapse(trimmed) {
        return Cow::Borrowed(trimmed);
    }

    let mut result = String::with_capacity(trimmed.len());
    let mut last_was_space = false;

    for c in trimmed.chars() {
        if is_whitespace_class(c) {
            if !last_was_space {
                result.push(' ');
                last_was_space = true;
            }
        } else {
            result.push(c);
            last_was_space = false;
        }
    }

    Cow::Owned(result)
}

/// True if the string holds a tab/CR/LF or two adjacent spaces.
/// Scans bytes: ASCII whitespace never occurs inside a multi-byte sequence.
fn needs_collapse(s: &str) -> bool {
    let mut prev_space = false;
    for b in s.bytes() {
        match b {
            b' ' if prev_space => return true,
            b' ' => prev_space = true,
            b'\t' | b'\r' | b'\n' => return true,
            _ => prev_space = false,
        }
    }
    false
}

/// A string of `count` tab characters.
pub fn tabs(count: usize) -> String {
    "\t".repeat(count)
}

/// Prepends `count` tabs, used when indenting serialized XML/OPML lines.
pub fn prepend_tabs(s: &str, count: usize) -> Cow<'_, str> {
    if count == 0 {
        return Cow::Borrowed(s);
    }
    let mut result = tabs(count);
    result.push_str(s);
    Cow::Owned(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_whitespace() {
        assert_eq!(trim_whitespace("\tfoo\n\n\t\r\t"), "foo");
        assert_eq!(trim_whitespace("\t\n\n\t\r\t"), "");
        assert_eq!(trim_whitespace("\t"), "");
        assert_eq!(trim_whitespace(""), "");
        assert_eq!(trim_whitespace("\nfoo"), "foo");
        assert_eq!(trim_whitespace("foo\n"), "foo");
        assert_eq!(trim_whitespace("fo\n\n\n\n\n\no\n"), "fo\n\n\n\n\n\no");
    }

    #[test]
    fn test_trim_keeps_internal_whitespace() {
        let s = "   lots\t\tof   random\n\nwhitespace\r\n";
        assert_eq!(trim_whitespace(s), "lots\t\tof   random\n\nwhitespace");
    }

    #[test]
    fn test_trim_returns_same_slice() {
        let s = "already clean";
        assert!(std::ptr::eq(trim_whitespace(s), s));
    }

    #[test]
    fn test_trim_ignores_other_unicode_spaces() {
        assert_eq!(trim_whitespace("\u{00A0}x\u{2028}"), "\u{00A0}x\u{2028}");
        assert_eq!(trim_whitespace("\u{000B}x\u{000C}"), "\u{000B}x\u{000C}");
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  a   b\tc\n"), "a b c");
        assert_eq!(
            collapse_whitespace("   lots\t\tof   random\n\nwhitespace\r\n"),
            "lots of random whitespace"
        );
    }

    #[test]
    fn test_collapse_empty_and_blank() {
        assert_eq!(collapse_whitespace(""), "");
        assert_eq!(collapse_whitespace(" \t\r\n "), "");
    }

    #[test]
    fn test_collapse_borrows_when_clean() {
        assert!(matches!(collapse_whitespace("a b c"), Cow::Borrowed("a b c")));
        assert!(matches!(collapse_whitespace("  a b  "), Cow::Borrowed("a b")));
        assert!(matches!(collapse_whitespace("a  b"), Cow::Owned(_)));
    }

    #[test]
    fn test_collapse_is_idempotent() {
        for s in ["", "  x ", "a\t\t b\r\nc", "\u{00A0} a \u{00A0}", "日本  語\n"] {
            let once = collapse_whitespace(s).into_owned();
            assert_eq!(collapse_whitespace(&once), once);
        }
    }

    #[test]
    fn test_tabs() {
        assert_eq!(tabs(0), "");
        assert_eq!(tabs(3), "\t\t\t");
        assert_eq!(prepend_tabs("<outline/>", 2), "\t\t<outline/>");
        assert!(matches!(prepend_tabs("x", 0), Cow::Borrowed("x")));
    }
}
