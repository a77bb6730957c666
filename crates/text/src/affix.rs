// ABOUTME: Prefix/suffix stripping with optional case-insensitive comparison.
// ABOUTME: Also hosts case-insensitive substring search used by title matching.

/// Outcome of comparing an affix against one end of a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AffixMatch {
    /// The affix is empty or does not match; the text stays as is.
    NoMatch,
    /// The text is exactly the affix.
    ExactMatch,
    /// The affix matched and covers this many bytes of the text.
    PartialMatch(usize),
}

fn chars_eq(a: char, b: char, case_sensitive: bool) -> bool {
    a == b || (!case_sensitive && a.to_lowercase().eq(b.to_lowercase()))
}

/// Compares `prefix` against the start of `s`, one scalar at a time.
///
/// The matched length is measured in the text, so case-insensitive matches
/// whose two spellings differ in UTF-8 length still split on a char boundary.
pub fn match_prefix(s: &str, prefix: &str, case_sensitive: bool) -> AffixMatch {
    if prefix.is_empty() {
        return AffixMatch::NoMatch;
    }

    let mut text = s.char_indices();
    let mut end = 0;
    for p in prefix.chars() {
        match text.next() {
            Some((i, c)) if chars_eq(c, p, case_sensitive) => end = i + c.len_utf8(),
            _ => return AffixMatch::NoMatch,
        }
    }

    if end == s.len() {
        AffixMatch::ExactMatch
    } else {
        AffixMatch::PartialMatch(end)
    }
}

/// Compares `suffix` against the end of `s`. See [`match_prefix`].
pub fn match_suffix(s: &str, suffix: &str, case_sensitive: bool) -> AffixMatch {
    if suffix.is_empty() {
        return AffixMatch::NoMatch;
    }

    let mut text = s.char_indices().rev();
    let mut start = s.len();
    for p in suffix.chars().rev() {
        match text.next() {
            Some((i, c)) if chars_eq(c, p, case_sensitive) => start = i,
            _ => return AffixMatch::NoMatch,
        }
    }

    if start == 0 {
        AffixMatch::ExactMatch
    } else {
        AffixMatch::PartialMatch(s.len() - start)
    }
}

/// Removes `prefix` from the start of `s`.
///
/// Returns `s` itself when the prefix is empty or doesn't match, and `""` when
/// `s` is exactly the prefix. The result is always a slice of the input.
pub fn strip_prefix<'a>(s: &'a str, prefix: &str, case_sensitive: bool) -> &'a str {
    match match_prefix(s, prefix, case_sensitive) {
        AffixMatch::NoMatch => s,
        AffixMatch::ExactMatch => &s[s.len()..],
        AffixMatch::PartialMatch(len) => &s[len..],
    }
}

/// Removes `suffix` from the end of `s`. Same contract as [`strip_prefix`].
pub fn strip_suffix<'a>(s: &'a str, suffix: &str, case_sensitive: bool) -> &'a str {
    match match_suffix(s, suffix, case_sensitive) {
        AffixMatch::NoMatch => s,
        AffixMatch::ExactMatch => &s[..0],
        AffixMatch::PartialMatch(len) => &s[..s.len() - len],
    }
}

/// Case-insensitive substring test. An empty needle is always contained.
pub fn case_insensitive_contains(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    if haystack.is_ascii() && needle.is_ascii() {
        let needle = needle.as_bytes();
        return haystack
            .as_bytes()
            .windows(needle.len())
            .any(|w| w.eq_ignore_ascii_case(needle));
    }
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
