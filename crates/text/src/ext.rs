// ABOUTME: Method-call syntax for the text helpers via an extension trait on str.
// ABOUTME: Each method forwards to the free function of the same purpose.

use std::borrow::Cow;

use crate::affix::{case_insensitive_contains, strip_prefix, strip_suffix};
use crate::hash::{digest_bytes, digest_hex, Digest};
use crate::html_utils::{strip_tags, to_plain_text};
use crate::url_heuristic::{looks_like_url, normalize_scheme, strip_http_scheme};
use crate::whitespace::{collapse_whitespace, trim_whitespace};
use crate::xml::escape_xml;

/// Extension methods on `str` for feed text cleanup.
///
/// ```
/// use rscore_text::StrExt;
///
/// assert_eq!("  a   b\tc\n".collapsed_whitespace(), "a b c");
/// assert_eq!("https://example.com".stripping_http_scheme(), "example.com");
/// ```
pub trait StrExt {
    fn trimmed_whitespace(&self) -> &str;
    fn collapsed_whitespace(&self) -> Cow<'_, str>;
    fn stripping_prefix(&self, prefix: &str, case_sensitive: bool) -> &str;
    fn stripping_suffix(&self, suffix: &str, case_sensitive: bool) -> &str;
    fn stripping_tags(&self, max_characters: i64) -> Cow<'_, str>;
    fn plain_text(&self) -> Cow<'_, str>;
    fn escaped_xml(&self) -> Cow<'_, str>;
    fn md5_digest(&self) -> Digest;
    fn md5_hex(&self) -> String;
    fn may_be_url(&self) -> bool;
    fn normalized_scheme(&self) -> Cow<'_, str>;
    fn stripping_http_scheme(&self) -> &str;
    fn contains_ignoring_case(&self, needle: &str) -> bool;
}

impl StrExt for str {
    fn trimmed_whitespace(&self) -> &str {
        trim_whitespace(self)
    }

    fn collapsed_whitespace(&self) -> Cow<'_, str> {
        collapse_whitespace(self)
    }

    fn stripping_prefix(&self, prefix: &str, case_sensitive: bool) -> &str {
        strip_prefix(self, prefix, case_sensitive)
    }

    fn stripping_suffix(&self, suffix: &str, case_sensitive: bool) -> &str {
        strip_suffix(self, suffix, case_sensitive)
    }

    fn stripping_tags(&self, max_characters: i64) -> Cow<'_, str> {
        strip_tags(self, max_characters)
    }

    fn plain_text(&self) -> Cow<'_, str> {
        to_plain_text(self)
    }

    fn escaped_xml(&self) -> Cow<'_, str> {
        escape_xml(self)
    }

    fn md5_digest(&self) -> Digest {
        digest_bytes(self)
    }

    fn md5_hex(&self) -> String {
        digest_hex(self)
    }

    fn may_be_url(&self) -> bool {
        looks_like_url(self)
    }

    fn normalized_scheme(&self) -> Cow<'_, str> {
        normalize_scheme(self)
    }

    fn stripping_http_scheme(&self) -> &str {
        strip_http_scheme(self)
    }

    fn contains_ignoring_case(&self, needle: &str) -> bool {
        case_insensitive_contains(self, needle)
    }
}
