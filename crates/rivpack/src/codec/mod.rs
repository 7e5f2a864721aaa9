//! Binary encoding for the container format.
//!
//! - [`primitives`]: varints and fixed-width scalars
//! - [`header`]: preamble and header dictionary
//! - [`encode`]: document encoder
//! - [`trace`]: encoder chunk tracing
//! - [`digest`]: stream digests

pub mod digest;
pub mod encode;
pub mod header;
pub mod primitives;
pub mod trace;

pub use digest::{format_digest, stream_digest};
pub use encode::{encode_document, env_flag, EncodeOptions, EncodeReport, Encoded, TRACE_ENV};
pub use header::{HeaderDictionary, Version};
pub use primitives::{Reader, Writer};
pub use trace::{format_breakdown, ChunkStat, ChunkTracer};
