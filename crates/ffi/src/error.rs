// ABOUTME: Error types for the C ABI layer.
// ABOUTME: Each error maps to an RErrorCode and a static message safe to hand across FFI.

use thiserror::Error;

/// Which argument of an FFI call was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Text,
    Affix,
    Needle,
}

fn utf8_message(field: &Field) -> &'static str {
    match field {
        Field::Text => "text is not valid UTF-8",
        Field::Affix => "affix is not valid UTF-8",
        Field::Needle => "needle is not valid UTF-8",
    }
}

/// Errors surfaced through `RError`. The library itself never fails; these
/// only describe bad input at the boundary or a caught panic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FfiError {
    #[error("{}", utf8_message(.0))]
    InvalidUtf8(Field),

    #[error("output buffer is null or too small")]
    OutputBuffer,

    #[error("internal panic in text operation")]
    Panic,
}

impl FfiError {
    /// Message with static lifetime, so `RError.message` never dangles.
    pub fn message(&self) -> &'static str {
        match self {
            FfiError::InvalidUtf8(field) => utf8_message(field),
            FfiError::OutputBuffer => "output buffer is null or too small",
            FfiError::Panic => "internal panic in text operation",
        }
    }

    pub fn is_panic(&self) -> bool {
        matches!(self, FfiError::Panic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_static_message() {
        for err in [
            FfiError::InvalidUtf8(Field::Text),
            FfiError::InvalidUtf8(Field::Affix),
            FfiError::InvalidUtf8(Field::Needle),
            FfiError::OutputBuffer,
            FfiError::Panic,
        ] {
            assert_eq!(err.to_string(), err.message());
        }
    }
}
