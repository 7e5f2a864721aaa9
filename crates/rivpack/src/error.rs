//! Error types for building, encoding, importing and scene parsing.
//!
//! Only structural failures are errors. Data-quality problems (missing
//! parents, skipped references, injected defaults) are reported through the
//! counters in the various `*Report` types instead.

use thiserror::Error;

use crate::model::LocalId;

/// Error codes grouping decode failures by class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// E001: Invalid signature/version
    InvalidMagicOrVersion,
    /// E002: Reference to an unknown key or object
    UnresolvedReference,
    /// E004: Invalid UTF-8 encoding
    InvalidUtf8,
    /// E005: Malformed varint/length/encoding
    MalformedEncoding,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "E001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::InvalidMagicOrVersion => "E001",
            ErrorCode::UnresolvedReference => "E002",
            ErrorCode::InvalidUtf8 => "E004",
            ErrorCode::MalformedEncoding => "E005",
        }
    }
}

/// Error while decoding a byte stream.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    // === E001: Invalid signature/version ===
    #[error("[E001] invalid signature: expected RIVE, found {found:?}")]
    InvalidMagic { found: [u8; 4] },

    // === E002: Unresolved references ===
    #[error("[E002] property key {key} is not declared in the header")]
    UndeclaredPropertyKey { key: u16 },

    #[error("[E002] object with stream id {id} references missing parent {parent}")]
    UnresolvedParent { id: u32, parent: u32 },

    #[error("[E002] stream id {id} appears twice in artboard {artboard}")]
    DuplicateStreamId { id: u32, artboard: usize },

    // === E004: Invalid UTF-8 ===
    #[error("[E004] invalid UTF-8 in {field}")]
    InvalidUtf8 { field: &'static str },

    // === E005: Malformed encoding ===
    #[error("[E005] unexpected end of input while reading {context}")]
    UnexpectedEof { context: &'static str },

    #[error("[E005] varint exceeds maximum length (10 bytes)")]
    VarintTooLong,

    #[error("[E005] varint overflow (value exceeds {max})")]
    VarintOverflow { max: u64 },

    #[error("[E005] {field} length {len} exceeds maximum {max}")]
    LengthExceedsLimit {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("[E005] invalid bool value: {value} (expected 0 or 1)")]
    InvalidBool { value: u64 },

    #[error("[E005] invalid wire kind code {code} for key {key}")]
    InvalidWireCode { key: u16, code: u8 },
}

impl DecodeError {
    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            DecodeError::InvalidMagic { .. } => ErrorCode::InvalidMagicOrVersion,
            DecodeError::UndeclaredPropertyKey { .. }
            | DecodeError::UnresolvedParent { .. }
            | DecodeError::DuplicateStreamId { .. } => ErrorCode::UnresolvedReference,
            DecodeError::InvalidUtf8 { .. } => ErrorCode::InvalidUtf8,
            _ => ErrorCode::MalformedEncoding,
        }
    }
}

/// Error while encoding a document.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodeError {
    #[error("object {object} uses reserved property key 0")]
    ReservedPropertyKey { object: LocalId },

    #[error("object {object} uses reserved type tag 0")]
    ReservedTypeTag { object: LocalId },

    #[error("{field} length {len} exceeds maximum {max}")]
    LengthExceedsLimit {
        field: &'static str,
        len: usize,
        max: usize,
    },
}

/// Error while constructing a document graph.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildError {
    #[error("unknown type tag {tag}")]
    UnknownTypeTag { tag: u16 },

    #[error("object {id} was never allocated by this builder")]
    UnknownObject { id: LocalId },
}

/// The failure arms of an import.
///
/// Import failures are surfaced to callers as-is; the core never
/// reinterprets them.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ImportFailure {
    #[error("unsupported format version {major}.{minor}")]
    UnsupportedVersion { major: u8, minor: u8 },

    #[error("malformed stream: {0}")]
    Malformed(#[from] DecodeError),
}

/// Error while reading a JSON scene or record list.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{context}: {message}")]
    Shape {
        context: String,
        message: String,
    },
}
