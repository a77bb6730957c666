// ABOUTME: C FFI bindings for the rscore text primitives.
// ABOUTME: Exposes arena-allocated text results plus by-value booleans and digests to Swift/ObjC consumers.

pub mod error;

use std::borrow::Cow;
use std::panic::{self, AssertUnwindSafe};
use std::ptr;

use bumpalo::Bump;
use rscore_text::{
    case_insensitive_contains, collapse_whitespace, digest_data, escape_xml, looks_like_url,
    normalize_scheme, strip_http_scheme, strip_prefix, strip_suffix, strip_tags, to_plain_text,
    trim_whitespace, DIGEST_LEN,
};

pub use error::{FfiError, Field};

/// FFI version constant for ABI compatibility checking.
pub const RSCORE_FFI_VERSION: u32 = 1;

/// Bytes written by `rscore_md5_hex`.
pub const RSCORE_MD5_HEX_LEN: usize = DIGEST_LEN * 2;

/// Returns the FFI ABI version number.
/// Consumers should check this matches their expected version.
#[no_mangle]
pub extern "C" fn rscore_ffi_version() -> u32 {
    RSCORE_FFI_VERSION
}

// ----------------------------------------------------------------------------
// Error handling
// ----------------------------------------------------------------------------

/// Error codes matching the C ABI RErrorCode enum.
#[repr(u32)]
pub enum RErrorCode {
    Ok = 0,
    Invalid = 4,
    Internal = 255,
}

impl From<&FfiError> for RErrorCode {
    fn from(err: &FfiError) -> Self {
        match err {
            FfiError::InvalidUtf8(_) | FfiError::OutputBuffer => RErrorCode::Invalid,
            FfiError::Panic => RErrorCode::Internal,
        }
    }
}

/// UTF-8 string slice for FFI. Not null-terminated.
/// Consumer must not mutate or free; memory is owned by an arena or is static.
#[derive(Copy, Clone)]
#[repr(C)]
pub struct RString {
    pub data: *const u8,
    pub len: usize,
}

impl RString {
    /// Creates an empty RString with null pointer and zero length.
    pub const fn empty() -> Self {
        RString {
            data: ptr::null(),
            len: 0,
        }
    }

    const fn from_static(s: &'static str) -> Self {
        RString {
            data: s.as_ptr(),
            len: s.len(),
        }
    }
}

impl Default for RString {
    fn default() -> Self {
        Self::empty()
    }
}

/// FFI error struct matching C ABI RError.
#[repr(C)]
pub struct RError {
    pub code: u32,
    pub message: RString,
}

impl RError {
    /// Creates a success (R_OK) error with empty message.
    pub const fn ok() -> Self {
        RError {
            code: RErrorCode::Ok as u32,
            message: RString::empty(),
        }
    }
}

/// Arena holding one text result.
pub struct RTextArena {
    #[allow(dead_code)]
    bump: Bump,
    text: RString,
}

// ----------------------------------------------------------------------------
// Helper functions
// ----------------------------------------------------------------------------

/// Copies a string into the arena and returns an RString pointing to it.
fn copy_str_to_arena(bump: &Bump, s: &str) -> RString {
    if s.is_empty() {
        return RString::empty();
    }
    let bytes = bump.alloc_slice_copy(s.as_bytes());
    RString {
        data: bytes.as_ptr(),
        len: bytes.len(),
    }
}

/// Borrows caller bytes. Null or zero length is the empty slice.
unsafe fn input_bytes<'a>(data: *const u8, len: usize) -> &'a [u8] {
    if data.is_null() || len == 0 {
        return &[];
    }
    std::slice::from_raw_parts(data, len)
}

/// Borrows caller bytes as text. Null or zero length is the empty string.
unsafe fn input_str<'a>(data: *const u8, len: usize, field: Field) -> Result<&'a str, FfiError> {
    std::str::from_utf8(input_bytes(data, len)).map_err(|_| FfiError::InvalidUtf8(field))
}

/// Sets out_err from an FfiError. If out_err is null, this is a no-op.
unsafe fn set_error(out_err: *mut RError, err: &FfiError) {
    if !out_err.is_null() {
        (*out_err).code = RErrorCode::from(err) as u32;
        (*out_err).message = RString::from_static(err.message());
    }
}

/// Sets out_err to success (R_OK with empty message).
/// If out_err is null, this is a no-op.
unsafe fn set_success(out_err: *mut RError) {
    if !out_err.is_null() {
        (*out_err).code = RErrorCode::Ok as u32;
        (*out_err).message = RString::empty();
    }
}

fn log_failure(op: &'static str, err: &FfiError) {
    if err.is_panic() {
        tracing::error!(op, "caught panic at FFI boundary");
    } else {
        tracing::warn!(op, error = %err, "rejected FFI input");
    }
}

/// Runs a text-producing operation behind catch_unwind and boxes the result
/// into an arena. Returns null on failure with out_err filled in.
unsafe fn text_op<'a, F>(op: &'static str, out_err: *mut RError, f: F) -> *mut RTextArena
where
    F: FnOnce() -> Result<Cow<'a, str>, FfiError>,
{
    let result = panic::catch_unwind(AssertUnwindSafe(f)).unwrap_or(Err(FfiError::Panic));

    match result {
        Ok(text) => {
            let bump = Bump::new();
            let text = copy_str_to_arena(&bump, &text);
            set_success(out_err);
            Box::into_raw(Box::new(RTextArena { bump, text }))
        }
        Err(err) => {
            log_failure(op, &err);
            set_error(out_err, &err);
            ptr::null_mut()
        }
    }
}

/// Runs a predicate behind catch_unwind. Any failure reads as `false`.
fn bool_op<F>(op: &'static str, f: F) -> bool
where
    F: FnOnce() -> Result<bool, FfiError>,
{
    match panic::catch_unwind(AssertUnwindSafe(f)).unwrap_or(Err(FfiError::Panic)) {
        Ok(value) => value,
        Err(err) => {
            log_failure(op, &err);
            false
        }
    }
}

// ----------------------------------------------------------------------------
// Text FFI functions
// ----------------------------------------------------------------------------

/// Trims leading and trailing space, tab, CR and LF.
///
/// # Safety
/// `text` must point to `text_len` readable bytes or be null.
/// Caller must free the returned arena via rscore_free_text.
#[no_mangle]
pub unsafe extern "C" fn rscore_trim_whitespace(
    text: *const u8,
    text_len: usize,
    out_err: *mut RError,
) -> *mut RTextArena {
    text_op("trim_whitespace", out_err, || {
        let text = input_str(text, text_len, Field::Text)?;
        Ok(Cow::Borrowed(trim_whitespace(text)))
    })
}

/// Trims and collapses internal whitespace runs to one space.
///
/// # Safety
/// Same contract as rscore_trim_whitespace.
#[no_mangle]
pub unsafe extern "C" fn rscore_collapse_whitespace(
    text: *const u8,
    text_len: usize,
    out_err: *mut RError,
) -> *mut RTextArena {
    text_op("collapse_whitespace", out_err, || {
        let text = input_str(text, text_len, Field::Text)?;
        Ok(collapse_whitespace(text))
    })
}

/// Removes markup, keeping at most `max_characters` scalars (0 or negative: no limit).
///
/// # Safety
/// Same contract as rscore_trim_whitespace.
#[no_mangle]
pub unsafe extern "C" fn rscore_strip_tags(
    text: *const u8,
    text_len: usize,
    max_characters: i64,
    out_err: *mut RError,
) -> *mut RTextArena {
    text_op("strip_tags", out_err, || {
        let text = input_str(text, text_len, Field::Text)?;
        Ok(strip_tags(text, max_characters))
    })
}

/// Strips tags, decodes entities and collapses whitespace.
///
/// # Safety
/// Same contract as rscore_trim_whitespace.
#[no_mangle]
pub unsafe extern "C" fn rscore_to_plain_text(
    text: *const u8,
    text_len: usize,
    out_err: *mut RError,
) -> *mut RTextArena {
    text_op("to_plain_text", out_err, || {
        let text = input_str(text, text_len, Field::Text)?;
        Ok(to_plain_text(text))
    })
}

/// Escapes the five reserved XML characters.
///
/// # Safety
/// Same contract as rscore_trim_whitespace.
#[no_mangle]
pub unsafe extern "C" fn rscore_escape_xml(
    text: *const u8,
    text_len: usize,
    out_err: *mut RError,
) -> *mut RTextArena {
    text_op("escape_xml", out_err, || {
        let text = input_str(text, text_len, Field::Text)?;
        Ok(escape_xml(text))
    })
}

/// Rewrites feed: and feeds: schemes to http: and https:.
///
/// # Safety
/// Same contract as rscore_trim_whitespace.
#[no_mangle]
pub unsafe extern "C" fn rscore_normalize_scheme(
    text: *const u8,
    text_len: usize,
    out_err: *mut RError,
) -> *mut RTextArena {
    text_op("normalize_scheme", out_err, || {
        let text = input_str(text, text_len, Field::Text)?;
        Ok(normalize_scheme(text))
    })
}

/// Removes a leading http:// or https://.
///
/// # Safety
/// Same contract as rscore_trim_whitespace.
#[no_mangle]
pub unsafe extern "C" fn rscore_strip_http_scheme(
    text: *const u8,
    text_len: usize,
    out_err: *mut RError,
) -> *mut RTextArena {
    text_op("strip_http_scheme", out_err, || {
        let text = input_str(text, text_len, Field::Text)?;
        Ok(Cow::Borrowed(strip_http_scheme(text)))
    })
}

/// Removes `prefix` from the start of `text` if present.
///
/// # Safety
/// `text` and `prefix` must each point to their stated number of readable
/// bytes or be null. Caller must free the returned arena via rscore_free_text.
#[no_mangle]
pub unsafe extern "C" fn rscore_strip_prefix(
    text: *const u8,
    text_len: usize,
    prefix: *const u8,
    prefix_len: usize,
    case_sensitive: bool,
    out_err: *mut RError,
) -> *mut RTextArena {
    text_op("strip_prefix", out_err, || {
        let text = input_str(text, text_len, Field::Text)?;
        let prefix = input_str(prefix, prefix_len, Field::Affix)?;
        Ok(Cow::Borrowed(strip_prefix(text, prefix, case_sensitive)))
    })
}

/// Removes `suffix` from the end of `text` if present.
///
/// # Safety
/// Same contract as rscore_strip_prefix.
#[no_mangle]
pub unsafe extern "C" fn rscore_strip_suffix(
    text: *const u8,
    text_len: usize,
    suffix: *const u8,
    suffix_len: usize,
    case_sensitive: bool,
    out_err: *mut RError,
) -> *mut RTextArena {
    text_op("strip_suffix", out_err, || {
        let text = input_str(text, text_len, Field::Text)?;
        let suffix = input_str(suffix, suffix_len, Field::Affix)?;
        Ok(Cow::Borrowed(strip_suffix(text, suffix, case_sensitive)))
    })
}

/// Returns the text held by an arena.
///
/// # Safety
/// The arena pointer must be valid or null.
/// The returned bytes are valid until rscore_free_text is called.
#[no_mangle]
pub unsafe extern "C" fn rscore_text_result(arena: *const RTextArena) -> RString {
    if arena.is_null() {
        return RString::empty();
    }
    (*arena).text
}

/// Frees a text arena.
///
/// # Safety
/// The arena pointer must have been returned by one of the text functions
/// and not freed before. After this call, the arena pointer is invalid.
#[no_mangle]
pub unsafe extern "C" fn rscore_free_text(arena: *mut RTextArena) {
    if !arena.is_null() {
        drop(Box::from_raw(arena));
    }
}

// ----------------------------------------------------------------------------
// Hashing and classification
// ----------------------------------------------------------------------------

/// Writes the 32 lowercase hex characters of the MD5 digest of `text` into
/// `out_hex`. No terminator is written.
///
/// `text` is hashed as raw bytes and is not required to be UTF-8, so host
/// data blobs can be fingerprinted too. For valid UTF-8 the result matches
/// hashing the string.
///
/// # Safety
/// `text` must point to `text_len` readable bytes or be null; `out_hex` must
/// point to `out_len` writable bytes.
#[no_mangle]
pub unsafe extern "C" fn rscore_md5_hex(
    text: *const u8,
    text_len: usize,
    out_hex: *mut u8,
    out_len: usize,
    out_err: *mut RError,
) -> bool {
    if out_hex.is_null() || out_len < RSCORE_MD5_HEX_LEN {
        let err = FfiError::OutputBuffer;
        log_failure("md5_hex", &err);
        set_error(out_err, &err);
        return false;
    }

    let hex = digest_data(input_bytes(text, text_len)).to_hex();
    ptr::copy_nonoverlapping(hex.as_ptr(), out_hex, RSCORE_MD5_HEX_LEN);
    set_success(out_err);
    true
}

/// Writes the 16 raw MD5 digest bytes of `text` into `out_digest`.
/// Like [`rscore_md5_hex`], the input is raw bytes and may be any encoding.
///
/// # Safety
/// `text` must point to `text_len` readable bytes or be null; `out_digest`
/// must point to 16 writable bytes.
#[no_mangle]
pub unsafe extern "C" fn rscore_md5_bytes(
    text: *const u8,
    text_len: usize,
    out_digest: *mut [u8; DIGEST_LEN],
) -> bool {
    if out_digest.is_null() {
        log_failure("md5_bytes", &FfiError::OutputBuffer);
        return false;
    }
    *out_digest = digest_data(input_bytes(text, text_len)).0;
    true
}

/// URL-likeness heuristic. Invalid UTF-8 is never URL-like.
///
/// # Safety
/// `text` must point to `text_len` readable bytes or be null.
#[no_mangle]
pub unsafe extern "C" fn rscore_looks_like_url(text: *const u8, text_len: usize) -> bool {
    bool_op("looks_like_url", || {
        Ok(looks_like_url(input_str(text, text_len, Field::Text)?))
    })
}

/// Case-insensitive substring test. An empty needle is contained.
///
/// # Safety
/// Both pointers must point to their stated number of readable bytes or be null.
#[no_mangle]
pub unsafe extern "C" fn rscore_case_insensitive_contains(
    haystack: *const u8,
    haystack_len: usize,
    needle: *const u8,
    needle_len: usize,
) -> bool {
    bool_op("case_insensitive_contains", || {
        let haystack = input_str(haystack, haystack_len, Field::Text)?;
        let needle = input_str(needle, needle_len, Field::Needle)?;
        Ok(case_insensitive_contains(haystack, needle))
    })
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
