// ABOUTME: Heuristics for URL-shaped strings: classification, feed scheme rewriting, scheme stripping.
// ABOUTME: Deliberately loose; this is a guess for UI input, not an RFC 3986 validator.

use std::borrow::Cow;

use percent_encoding::percent_decode_str;
use url::Url;

use crate::affix::{match_prefix, AffixMatch};
use crate::whitespace::{is_whitespace_class, trim_whitespace};

/// Scheme tokens that make a string URL-like when followed by `://`.
const KNOWN_SCHEMES: &[&str] = &["http", "https", "feed", "feeds"];

/// Returns the text after `prefix` when `s` starts with it, ignoring case.
fn after_prefix<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    match match_prefix(s, prefix, false) {
        AffixMatch::NoMatch => None,
        AffixMatch::ExactMatch => Some(""),
        AffixMatch::PartialMatch(len) => Some(&s[len..]),
    }
}

fn has_known_scheme(s: &str) -> bool {
    let scheme_then_slashes = |s: &str, scheme: &str| {
        after_prefix(s, scheme).is_some_and(|rest| rest.starts_with("://"))
    };
    if KNOWN_SCHEMES.iter().any(|scheme| scheme_then_slashes(s, scheme)) {
        return true;
    }
    // feed:http://host
    after_prefix(s, "feed:").is_some_and(|rest| {
        scheme_then_slashes(rest, "http") || scheme_then_slashes(rest, "https")
    })
}

/// The host part of a scheme-less string: before any path, query or
/// fragment, without userinfo, port or a trailing root dot.
fn host_portion(s: &str) -> &str {
    let end = s.find(['/', '?', '#']).unwrap_or(s.len());
    let authority = &s[..end];
    let host = authority.rsplit_once('@').map_or(authority, |(_, h)| h);
    let host = match host.rsplit_once(':') {
        Some((h, port)) if port.bytes().all(|b| b.is_ascii_digit()) => h,
        _ => host,
    };
    host.strip_suffix('.').unwrap_or(host)
}

fn is_tld_shaped(label: &str) -> bool {
    if let Some(puny) = label.get(..4).filter(|p| p.eq_ignore_ascii_case("xn--")) {
        let rest = &label[puny.len()..];
        return !rest.is_empty()
            && rest.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-');
    }
    (2..=63).contains(&label.len()) && label.bytes().all(|b| b.is_ascii_alphabetic())
}

fn is_ipv4(labels: &[&str]) -> bool {
    labels.len() == 4
        && labels
            .iter()
            .all(|l| !l.is_empty() && l.len() <= 3 && l.parse::<u8>().is_ok())
}

/// Guesses whether `s` is meant as a URL.
///
/// True for a leading `http`, `https`, `feed` or `feeds` scheme followed by
/// `://`, or for `feed:` wrapping an `http://` or `https://` URL. Otherwise the text must be free of whitespace and carry a dotted
/// host ending in something shaped like a top-level domain (or be an IPv4
/// address).
pub fn looks_like_url(s: &str) -> bool {
    let s = trim_whitespace(s);
    if s.is_empty() {
        return false;
    }
    if has_known_scheme(s) {
        return true;
    }
    if s.contains(is_whitespace_class) {
        return false;
    }

    let host = host_portion(s);
    let labels: Vec<&str> = host.split('.').collect();
    if labels.len() < 2 {
        return false;
    }
    if is_ipv4(&labels) {
        return true;
    }
    if labels.iter().any(|l| l.is_empty()) {
        return false;
    }
    labels.last().is_some_and(|tld| is_tld_shaped(tld))
}

/// Rewrites feed-specific schemes to the fetchable equivalent.
///
/// `feed://x` becomes `http://x`, `feeds://x` becomes `https://x`, and
/// `feed:http://x` / `feed:https://x` lose the `feed:` wrapper. A bare
/// `feed:host/path` gets `http://`. Anything else is returned untouched.
pub fn normalize_scheme(s: &str) -> Cow<'_, str> {
    if let Some(rest) = after_prefix(s, "feeds:") {
        if rest.starts_with("//") {
            return Cow::Owned(format!("https:{}", rest));
        }
        return Cow::Borrowed(s);
    }

    let Some(rest) = after_prefix(s, "feed:") else {
        return Cow::Borrowed(s);
    };
    if after_prefix(rest, "http://").is_some() || after_prefix(rest, "https://").is_some() {
        return Cow::Borrowed(rest);
    }
    if rest.starts_with("//") {
        return Cow::Owned(format!("http:{}", rest));
    }
    if rest.is_empty() {
        return Cow::Borrowed(s);
    }
    Cow::Owned(format!("http://{}", rest))
}

/// Removes one leading `http://` or `https://`, ignoring case.
pub fn strip_http_scheme(s: &str) -> &str {
    ["http://", "https://"]
        .iter()
        .find_map(|scheme| after_prefix(s, scheme))
        .unwrap_or(s)
}

/// Last path component of a file path, `file://` URL or web URL.
///
/// Query and fragment are ignored for URLs, and the URL's last segment is
/// percent-decoded. A string without `/` is its own filename.
pub fn filename(s: &str) -> Cow<'_, str> {
    if s.contains("://") {
        if let Ok(url) = Url::parse(s) {
            let last = url
                .path_segments()
                .and_then(|segments| segments.filter(|seg| !seg.is_empty()).last())
                .unwrap_or_default();
            return Cow::Owned(percent_decode_str(last).decode_utf8_lossy().into_owned());
        }
    }

    let trimmed = s.trim_end_matches('/');
    match trimmed.rsplit_once('/') {
        Some((_, name)) => Cow::Borrowed(name),
        None if trimmed.len() == s.len() => Cow::Borrowed(s),
        None => Cow::Borrowed(trimmed),
    }
}
