//! Format constants and decoder safety limits.
//!
//! The decoder is fed untrusted bytes, so every count and length it reads is
//! checked against one of these bounds before anything is allocated.

/// Four-byte signature at the start of every stream.
pub const MAGIC: &[u8; 4] = b"RIVE";

/// Major format version written by the encoder and required by the importer.
pub const MAJOR_VERSION: u8 = 7;

/// Minor format version written by the encoder. Newer minors are accepted.
pub const MINOR_VERSION: u8 = 0;

/// Reserved document identifier (always zero).
pub const DOCUMENT_ID: u64 = 0;

/// Maximum bytes in a varint (ceil(64 / 7)).
pub const MAX_VARINT_BYTES: usize = 10;

/// Maximum byte length of a string or byte-array property.
pub const MAX_STRING_LEN: usize = 16 * 1024 * 1024;

/// Maximum number of keys in the header dictionary.
pub const MAX_HEADER_KEYS: usize = u16::MAX as usize;

/// Maximum number of object records in one stream.
pub const MAX_OBJECTS: usize = 4_000_000;

/// Maximum total stream size accepted by the importer.
pub const MAX_STREAM_SIZE: usize = 256 * 1024 * 1024;

/// Maximum properties on a single object record.
pub const MAX_PROPERTIES_PER_OBJECT: usize = 1024;
