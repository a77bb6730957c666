// ABOUTME: Escaping of the five reserved XML characters for serialized output.
// ABOUTME: One-directional; existing entity references are escaped again.

use std::borrow::Cow;

fn entity_for(c: char) -> Option<&'static str> {
    match c {
        '&' => Some("&amp;"),
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        '"' => Some("&quot;"),
        '\'' => Some("&apos;"),
        _ => None,
    }
}

/// Replaces `&`, `<`, `>`, `"` and `'` with their named entity references.
/// Text without any of them is returned as is.
pub fn escape_xml(s: &str) -> Cow<'_, str> {
    let Some(first) = s.find(|c| entity_for(c).is_some()) else {
        return Cow::Borrowed(s);
    };

    let mut out = String::with_capacity(s.len() + 16);
    out.push_str(&s[..first]);
    for c in s[first..].chars() {
        match entity_for(c) {
            Some(entity) => out.push_str(entity),
            None => out.push(c),
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("A & B < C"), "A &amp; B &lt; C");
        assert_eq!(
            escape_xml(r#"<foo attr="value">bar&baz</foo>"#),
            "&lt;foo attr=&quot;value&quot;&gt;bar&amp;baz&lt;/foo&gt;"
        );
        assert_eq!(escape_xml("it's"), "it&apos;s");
    }

    #[test]
    fn test_escape_does_not_detect_existing_entities() {
        assert_eq!(escape_xml("&amp;"), "&amp;amp;");
    }

    #[test]
    fn test_escape_borrows_clean_text() {
        assert!(matches!(escape_xml("plain text ü"), Cow::Borrowed(_)));
        assert!(matches!(escape_xml(""), Cow::Borrowed("")));
    }

    #[test]
    fn test_escaped_output_has_no_raw_specials() {
        let out = escape_xml("<a href='x'>\"q\" & r</a>");
        assert!(!out.contains(['<', '>', '"', '\'']));
        for (i, _) in out.match_indices('&') {
            let rest = &out[i..];
            assert!(["&amp;", "&lt;", "&gt;", "&quot;", "&apos;"]
                .iter()
                .any(|e| rest.starts_with(e)));
        }
    }
}
