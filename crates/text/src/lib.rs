// ABOUTME: Text sanitization and classification primitives for feed content.
// ABOUTME: Whitespace, affix stripping, hashing, XML escaping, HTML-to-text, URL heuristics, sniffing.

pub mod affix;
pub mod ext;
pub mod hash;
pub mod html_utils;
pub mod sniff;
pub mod url_heuristic;
pub mod whitespace;
pub mod xml;

pub use affix::{
    case_insensitive_contains, match_prefix, match_suffix, strip_prefix, strip_suffix, AffixMatch,
};
pub use ext::StrExt;
pub use hash::{digest_bytes, digest_data, digest_hex, hex_string, Digest, DIGEST_LEN};
pub use html_utils::{
    decode_entities, html_link, html_with_link, plain_text_with, strip_tags, to_plain_text,
    wrap_in_tag, PlainTextOptions,
};
pub use sniff::{debug_string, is_gif, is_image, is_jpeg, is_png, is_probably_html};
pub use url_heuristic::{filename, looks_like_url, normalize_scheme, strip_http_scheme};
pub use whitespace::{
    collapse_whitespace, is_whitespace_class, prepend_tabs, tabs, trim_whitespace,
};
pub use xml::escape_xml;
