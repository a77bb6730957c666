// ABOUTME: Content sniffing on raw bytes: probable HTML and common image signatures.
// ABOUTME: Works on undecoded data so callers can route downloads before picking a text encoding.

use std::borrow::Cow;

use aho_corasick::AhoCorasick;
use once_cell::sync::Lazy;

const PNG_SIGNATURE: &[u8] = &[137, 80, 78, 71, 13, 10, 26, 10];
const GIF87A_SIGNATURE: &[u8] = b"GIF87a";
const GIF89A_SIGNATURE: &[u8] = b"GIF89a";
const JFIF_SIGNATURE: &[u8] = b"JFIF";
const EXIF_SIGNATURE: &[u8] = b"Exif";

/// Byte offset of the JFIF/Exif marker inside a JPEG header.
const JPEG_MARKER_OFFSET: usize = 6;

/// Pattern ids: 0/1 are `html`/`body` in any ASCII-compatible encoding,
/// 2/3 the same words in UTF-16 (either byte order contains these bytes).
const HTML_MARKERS: [&[u8]; 4] = [b"html", b"body", b"h\0t\0m\0l", b"b\0o\0d\0y"];

static MARKER_MATCHER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .ascii_case_insensitive(true)
        .build(HTML_MARKERS)
        .expect("html marker patterns are valid")
});

/// Returns true if the data looks like an HTML document.
///
/// Requires `<`, `>`, and both `html` and `body` (ignoring ASCII case) in the
/// same encoding family. Covers UTF-8, the ASCII-compatible legacy encodings
/// and UTF-16; EBCDIC-derived data is not recognized.
pub fn is_probably_html(data: &[u8]) -> bool {
    if !data.contains(&b'<') || !data.contains(&b'>') {
        return false;
    }

    let mut seen = [false; 4];
    for m in MARKER_MATCHER.find_iter(data) {
        seen[m.pattern().as_usize()] = true;
        if (seen[0] && seen[1]) || (seen[2] && seen[3]) {
            return true;
        }
    }
    false
}

pub fn is_png(data: &[u8]) -> bool {
    data.starts_with(PNG_SIGNATURE)
}

pub fn is_gif(data: &[u8]) -> bool {
    data.starts_with(GIF89A_SIGNATURE) || data.starts_with(GIF87A_SIGNATURE)
}

pub fn is_jpeg(data: &[u8]) -> bool {
    match data.get(JPEG_MARKER_OFFSET..JPEG_MARKER_OFFSET + 4) {
        Some(marker) => marker == JFIF_SIGNATURE || marker == EXIF_SIGNATURE,
        None => false,
    }
}

/// PNG, JPEG, or GIF.
pub fn is_image(data: &[u8]) -> bool {
    is_png(data) || is_jpeg(data) || is_gif(data)
}

/// Renders bytes as text for log output, assuming UTF-8.
pub fn debug_string(data: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(data)
}
