// ABOUTME: HTML utility functions for feed titles and summaries.
// ABOUTME: Provides tag stripping, entity decoding, plain-text rendering, and snippet builders.

use std::borrow::Cow;
use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::whitespace::collapse_whitespace;

/// Elements whose body can be dropped with the tags when the caller asks.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Tags that break a line when rendered; plain text gets a space in their place.
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt", "figcaption",
    "figure", "footer", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "main", "nav",
    "ol", "p", "pre", "section", "table", "td", "th", "tr", "ul",
];

/// Longest entity name we look for before giving up on a `&`.
const MAX_ENTITY_LEN: usize = 32;

/// Named entities decoded by [`decode_entities`], keyed without `&` and `;`.
static ENTITIES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        ("amp", "&"),
        ("lt", "<"),
        ("gt", ">"),
        ("quot", "\""),
        ("apos", "'"),
        ("nbsp", " "),
        ("ndash", "\u{2013}"),
        ("mdash", "\u{2014}"),
        ("lsquo", "\u{2018}"),
        ("rsquo", "\u{2019}"),
        ("sbquo", "\u{201A}"),
        ("ldquo", "\u{201C}"),
        ("rdquo", "\u{201D}"),
        ("bdquo", "\u{201E}"),
        ("laquo", "\u{00AB}"),
        ("raquo", "\u{00BB}"),
        ("hellip", "\u{2026}"),
        ("copy", "\u{00A9}"),
        ("reg", "\u{00AE}"),
        ("trade", "\u{2122}"),
        ("bull", "\u{2022}"),
        ("middot", "\u{00B7}"),
        ("deg", "\u{00B0}"),
        ("plusmn", "\u{00B1}"),
        ("times", "\u{00D7}"),
        ("divide", "\u{00F7}"),
        ("frac12", "\u{00BD}"),
        ("frac14", "\u{00BC}"),
        ("frac34", "\u{00BE}"),
        ("euro", "\u{20AC}"),
        ("pound", "\u{00A3}"),
        ("yen", "\u{00A5}"),
        ("cent", "\u{00A2}"),
        ("sect", "\u{00A7}"),
        ("para", "\u{00B6}"),
    ]
    .into_iter()
    .collect()
});

/// Knobs for [`plain_text_with`]. The default is what [`to_plain_text`] does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlainTextOptions {
    /// Maximum scalars in the result; 0 or negative means no limit.
    pub max_characters: i64,
    pub decode_entities: bool,
    pub collapse_whitespace: bool,
    /// Put a space where a block-level tag (`<p>`, `<br>`, `<li>`, ...) was,
    /// so adjacent paragraphs don't run together.
    pub block_tags_as_spaces: bool,
    /// Drop the bodies of `<script>` and `<style>` elements. A body is only
    /// dropped when its closing tag is present.
    pub drop_script_bodies: bool,
}

impl Default for PlainTextOptions {
    fn default() -> Self {
        Self {
            max_characters: 0,
            decode_entities: true,
            collapse_whitespace: true,
            block_tags_as_spaces: true,
            drop_script_bodies: false,
        }
    }
}

/// What the markup walker does beyond deleting `<...>` spans.
#[derive(Debug, Clone, Copy, Default)]
struct MarkupRules {
    block_tags_as_spaces: bool,
    drop_script_bodies: bool,
}

/// Converts the `max_characters` sentinel convention into an optional limit.
fn char_limit(max_characters: i64) -> Option<usize> {
    usize::try_from(max_characters).ok().filter(|&n| n > 0)
}

/// Byte offset at which `s` exceeds `limit` scalars, if it does.
fn truncation_point(s: &str, limit: Option<usize>) -> Option<usize> {
    let limit = limit?;
    s.char_indices().nth(limit).map(|(i, _)| i)
}

fn truncate_cow(s: Cow<'_, str>, limit: Option<usize>) -> Cow<'_, str> {
    match truncation_point(&s, limit) {
        None => s,
        Some(end) => match s {
            Cow::Borrowed(b) => Cow::Borrowed(&b[..end]),
            Cow::Owned(mut o) => {
                o.truncate(end);
                Cow::Owned(o)
            }
        },
    }
}

/// Applies a borrowing transform to a value that may already be owned.
fn then<'a>(input: Cow<'a, str>, f: for<'b> fn(&'b str) -> Cow<'b, str>) -> Cow<'a, str> {
    match input {
        Cow::Borrowed(s) => f(s),
        Cow::Owned(s) => Cow::Owned(f(&s).into_owned()),
    }
}

/// Element name of `tag` (the text between `<` and `>`), ignoring a leading `/`.
fn tag_name(tag: &str) -> &str {
    let tag = tag.strip_prefix('/').unwrap_or(tag);
    let len = tag
        .bytes()
        .position(|b| !b.is_ascii_alphanumeric())
        .unwrap_or(tag.len());
    &tag[..len]
}

fn is_block_element(tag: &str) -> bool {
    let name = tag_name(tag);
    BLOCK_ELEMENTS.iter().any(|el| el.eq_ignore_ascii_case(name))
}

/// Returns the raw-text element name if `tag` opens a `<script>` or `<style>`.
fn raw_text_element(tag: &str) -> Option<&'static str> {
    if tag.starts_with('/') || tag.trim_end().ends_with('/') {
        return None;
    }
    let name = tag_name(tag);
    RAW_TEXT_ELEMENTS
        .iter()
        .copied()
        .find(|el| el.eq_ignore_ascii_case(name))
}

/// Finds the end of `</name ...>` in `s`, ASCII case-insensitively.
/// Returns the byte offset just past the closing `>`.
fn find_closing_tag(s: &str, name: &str) -> Option<usize> {
    let needle = format!("</{}", name);
    let bytes = s.as_bytes();
    let start = bytes
        .windows(needle.len())
        .position(|w| w.eq_ignore_ascii_case(needle.as_bytes()))?;
    let after = start + needle.len();
    s[after..].find('>').map(|gt| after + gt + 1)
}

/// Removes every `<...>` span. An unterminated tag swallows the rest of the
/// input; text between tags is kept unless `rules` say otherwise.
fn strip_markup(s: &str, rules: MarkupRules) -> Cow<'_, str> {
    if !s.contains('<') {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(open) = rest.find('<') {
        result.push_str(&rest[..open]);
        let after_open = &rest[open + 1..];
        let Some(close) = after_open.find('>') else {
            rest = "";
            break;
        };

        let tag = &after_open[..close];
        rest = &after_open[close + 1..];

        if rules.drop_script_bodies {
            if let Some(end) = raw_text_element(tag).and_then(|name| find_closing_tag(rest, name)) {
                rest = &rest[end..];
                continue;
            }
        }
        if rules.block_tags_as_spaces && is_block_element(tag) {
            result.push(' ');
        }
    }
    result.push_str(rest);

    Cow::Owned(result)
}

/// Strips HTML tags from a string, returning the text between them.
///
/// Everything from `<` through the next `>` is removed without checking that
/// it is well formed; an unterminated tag swallows the rest of the input.
/// Text between tags, including the body of `<script>` or `<style>`, is kept.
///
/// The result is cut to `max_characters` scalars. Zero or a negative value
/// means no limit.
pub fn strip_tags(s: &str, max_characters: i64) -> Cow<'_, str> {
    truncate_cow(
        strip_markup(s, MarkupRules::default()),
        char_limit(max_characters),
    )
}

/// Decodes one reference at the start of `s` (which begins with `&`) into
/// `out`. Returns the number of bytes consumed, or `None` to keep it literal.
fn decode_reference(s: &str, out: &mut String) -> Option<usize> {
    let semi = s[1..]
        .bytes()
        .take(MAX_ENTITY_LEN + 1)
        .position(|b| b == b';')?;
    let body = &s[1..1 + semi];
    let consumed = semi + 2;

    if let Some(num) = body.strip_prefix('#') {
        let code = match num.strip_prefix(['x', 'X']) {
            Some(hex) if !hex.is_empty() && hex.bytes().all(|b| b.is_ascii_hexdigit()) => {
                u32::from_str_radix(hex, 16).ok()?
            }
            None if !num.is_empty() && num.bytes().all(|b| b.is_ascii_digit()) => {
                num.parse::<u32>().ok()?
            }
            _ => return None,
        };
        let c = char::from_u32(code).filter(|&c| c != '\0')?;
        out.push(c);
        return Some(consumed);
    }

    let replacement = ENTITIES.get(body)?;
    out.push_str(replacement);
    Some(consumed)
}

/// Decodes the named entities in the built-in table plus decimal and hex
/// numeric references, in a single left-to-right pass.
///
/// Anything unrecognized (unknown name, missing `;`, invalid code point) is
/// left exactly as written.
pub fn decode_entities(s: &str) -> Cow<'_, str> {
    if !s.contains('&') {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(amp) = rest.find('&') {
        result.push_str(&rest[..amp]);
        let candidate = &rest[amp..];
        match decode_reference(candidate, &mut result) {
            Some(consumed) => rest = &candidate[consumed..],
            None => {
                result.push('&');
                rest = &candidate[1..];
            }
        }
    }
    result.push_str(rest);

    Cow::Owned(result)
}

/// Human-readable rendering of feed markup: tags stripped, entities decoded,
/// whitespace collapsed.
pub fn to_plain_text(s: &str) -> Cow<'_, str> {
    plain_text_with(s, &PlainTextOptions::default())
}

/// [`to_plain_text`] with the individual steps under caller control.
/// The character limit applies to the final text.
pub fn plain_text_with<'a>(s: &'a str, options: &PlainTextOptions) -> Cow<'a, str> {
    let rules = MarkupRules {
        block_tags_as_spaces: options.block_tags_as_spaces,
        drop_script_bodies: options.drop_script_bodies,
    };
    let mut text = strip_markup(s, rules);
    if options.decode_entities {
        text = then(text, decode_entities);
    }
    if options.collapse_whitespace {
        text = then(text, collapse_whitespace);
    }
    truncate_cow(text, char_limit(options.max_characters))
}

/// Wraps `s` in an anchor pointing at `link`. Nothing is escaped.
pub fn html_link(s: &str, link: &str, class_name: Option<&str>) -> String {
    match class_name {
        Some(class_name) => format!("<a class=\"{}\" href=\"{}\">{}</a>", class_name, link, s),
        None => format!("<a href=\"{}\">{}</a>", link, s),
    }
}

/// An anchor whose text is the link itself.
pub fn html_with_link(link: &str) -> String {
    html_link(link, link, None)
}

pub fn wrap_in_tag(s: &str, tag: &str) -> String {
    format!("<{tag}>{s}</{tag}>")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_tags_basic() {
        assert_eq!(strip_tags("<p>Hello</p>", 0), "Hello");
        assert_eq!(
            strip_tags("<b>Bold</b> and <i>italic</i>", 0),
            "Bold and italic"
        );
        assert_eq!(strip_tags(r#"<a href="x" title="y">link</a>"#, 0), "link");
    }

    #[test]
    fn test_strip_tags_unterminated() {
        assert_eq!(strip_tags("before <img src=", 0), "before ");
        assert_eq!(strip_tags("a > b", 0), "a > b");
        assert_eq!(strip_tags("<<b>>x", 0), ">x");
    }

    #[test]
    fn test_strip_tags_keeps_script_and_style_bodies() {
        assert_eq!(strip_tags("x<style>y</style>z", 0), "xyz");
        assert_eq!(strip_tags("a<script>var x = 1;</script>b", 0), "avar x = 1;b");
        assert_eq!(strip_tags("<p>Hello</p><p>World</p>", 0), "HelloWorld");
    }

    #[test]
    fn test_unclosed_script_keeps_following_text() {
        let title = "Why <script> tags block rendering, and how to fix it";
        assert_eq!(strip_tags(title, 0), "Why  tags block rendering, and how to fix it");
        assert_eq!(to_plain_text(title), "Why tags block rendering, and how to fix it");

        let opts = PlainTextOptions {
            drop_script_bodies: true,
            ..Default::default()
        };
        assert_eq!(
            plain_text_with(title, &opts),
            "Why tags block rendering, and how to fix it"
        );
    }

    #[test]
    fn test_plain_text_drops_script_bodies_when_asked() {
        let opts = PlainTextOptions {
            drop_script_bodies: true,
            ..Default::default()
        };
        assert_eq!(
            plain_text_with("a<script>var x = '<b>';</script>b<STYLE>p{}</Style >c", &opts),
            "abc"
        );
        assert_eq!(plain_text_with("a<script src=x />b", &opts), "ab");
        assert_eq!(plain_text_with("a <script src=x>never closed", &opts), "a never closed");
    }

    #[test]
    fn test_plain_text_spaces_block_tags() {
        assert_eq!(to_plain_text("<p>Hello</p><p>World</p>"), "Hello World");
        assert_eq!(to_plain_text("one<br>two<br/>three"), "one two three");
        assert_eq!(to_plain_text("<b>bold</b><i>italic</i>"), "bolditalic");

        let opts = PlainTextOptions {
            block_tags_as_spaces: false,
            ..Default::default()
        };
        assert_eq!(plain_text_with("<p>Hello</p><p>World</p>", &opts), "HelloWorld");
    }

    #[test]
    fn test_strip_tags_limit() {
        assert_eq!(strip_tags("<p>Hello world</p>", 5), "Hello");
        assert_eq!(strip_tags("héllo", 2), "hé");
        assert_eq!(strip_tags("<p>Hello</p>", 0), "Hello");
        assert_eq!(strip_tags("<p>Hello</p>", -1), "Hello");
        assert_eq!(strip_tags("Hello", 100), "Hello");
    }

    #[test]
    fn test_strip_tags_borrows_without_markup() {
        assert!(matches!(strip_tags("no markup", 0), Cow::Borrowed("no markup")));
        assert!(matches!(strip_tags("no markup", 2), Cow::Borrowed("no")));
    }

    #[test]
    fn test_decode_entities_named() {
        assert_eq!(decode_entities("&amp;"), "&");
        assert_eq!(decode_entities("&lt;&gt;"), "<>");
        assert_eq!(decode_entities("&quot;test&quot;"), "\"test\"");
        assert_eq!(decode_entities("&nbsp;"), " ");
        assert_eq!(decode_entities("&mdash;"), "—");
    }

    #[test]
    fn test_decode_entities_numeric() {
        assert_eq!(decode_entities("&#38;"), "&");
        assert_eq!(decode_entities("&#x26;"), "&");
        assert_eq!(decode_entities("&#169;"), "©");
        assert_eq!(decode_entities("&#xA9;"), "©");
        assert_eq!(decode_entities("&#8217;"), "\u{2019}");
    }

    #[test]
    fn test_decode_entities_single_pass() {
        assert_eq!(decode_entities("&amp;lt;"), "&lt;");
        assert_eq!(decode_entities("&amp;&#38;&lt;"), "&&<");
    }

    #[test]
    fn test_decode_entities_leaves_unknown() {
        assert_eq!(decode_entities("&bogus;"), "&bogus;");
        assert_eq!(decode_entities("AT&T"), "AT&T");
        assert_eq!(decode_entities("&amp"), "&amp");
        assert_eq!(decode_entities("&#xZZ;"), "&#xZZ;");
        assert_eq!(decode_entities("&#;"), "&#;");
        assert_eq!(decode_entities("&#1114112;"), "&#1114112;");
        assert_eq!(decode_entities("&#xD800;"), "&#xD800;");
        assert_eq!(decode_entities("&#0;"), "&#0;");
        assert_eq!(decode_entities("trailing &"), "trailing &");
    }

    #[test]
    fn test_to_plain_text() {
        assert_eq!(to_plain_text("<p>Hello &amp; <b>world</b></p>"), "Hello & world");
        assert_eq!(to_plain_text("<p>Hello</p>\n\n<p>World</p>"), "Hello World");
        assert_eq!(to_plain_text("Multiple   spaces"), "Multiple spaces");
        assert_eq!(to_plain_text("&lt;script&gt;"), "<script>");
        assert_eq!(to_plain_text("a&nbsp;&nbsp; b"), "a b");
        assert_eq!(to_plain_text(""), "");
    }

    #[test]
    fn test_to_plain_text_borrows_clean_text() {
        assert!(matches!(to_plain_text("Just a title"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_plain_text_with_options() {
        let raw = "<p>Caf&eacute;  &amp;   bar</p>";
        let opts = PlainTextOptions {
            decode_entities: false,
            ..Default::default()
        };
        assert_eq!(plain_text_with(raw, &opts), "Caf&eacute; &amp; bar");

        let opts = PlainTextOptions {
            max_characters: 7,
            ..Default::default()
        };
        assert_eq!(plain_text_with(raw, &opts), "Caf&eac");
    }

    #[test]
    fn test_html_snippets() {
        assert_eq!(
            html_link("Home", "https://example.com/", None),
            r#"<a href="https://example.com/">Home</a>"#
        );
        assert_eq!(
            html_link("Home", "/", Some("nav")),
            r#"<a class="nav" href="/">Home</a>"#
        );
        assert_eq!(html_with_link("/x"), r#"<a href="/x">/x</a>"#);
        assert_eq!(wrap_in_tag("hi", "b"), "<b>hi</b>");
    }
}
