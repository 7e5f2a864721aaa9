//! rivpack: object-graph serialization for the RIVE vector-animation
//! container format.
//!
//! This crate builds typed object graphs, encodes them into the versioned
//! binary container, imports streams back into runtime graphs, and
//! validates and repairs flat object record lists.
//!
//! # Overview
//!
//! Data flows through four stages:
//! - **Build**: [`GraphBuilder`] or a JSON [`scene`] produces a [`Document`]
//! - **Encode**: [`encode_document`] writes the header dictionary and records
//! - **Import**: a [`RuntimeImporter`] parses bytes into a runtime graph
//! - **Validate**: extracted records are defaulted, filtered and sorted
//!
//! # Quick Start
//!
//! ```rust
//! use rivpack::{decode_and_validate, encode_document, EncodeOptions, GraphBuilder, StreamImporter};
//! use rivpack::registry::{keys, types};
//!
//! let mut builder = GraphBuilder::new();
//! let artboard = builder
//!     .add_with(types::ARTBOARD, None, |o| {
//!         o.float(keys::ARTBOARD_WIDTH, 200.0).float(keys::ARTBOARD_HEIGHT, 100.0)
//!     })
//!     .unwrap();
//! builder
//!     .add_with(types::RECTANGLE, Some(artboard), |o| {
//!         o.float(keys::PATH_WIDTH, 100.0).float(keys::PATH_HEIGHT, 50.0)
//!     })
//!     .unwrap();
//!
//! // Encode to binary
//! let encoded = encode_document(builder.finish().document, &EncodeOptions::new()).unwrap();
//! assert!(encoded.report.is_lossless());
//!
//! // Import, extract and validate
//! let decoded = decode_and_validate(&StreamImporter::new(), &encoded.bytes).unwrap();
//! assert_eq!(decoded.records.len(), 3);
//! assert!(decoded.validation.is_clean());
//! ```
//!
//! # Modules
//!
//! - [`model`]: ids, values, property bags, documents, records, builder
//! - [`registry`]: type tags, property keys and their wire kinds
//! - [`codec`]: binary encoding, chunk tracing, digests
//! - [`import`]: runtime importer seam and record extraction
//! - [`validate`]: structural validation and repair
//! - [`scene`]: JSON scene and record list formats
//! - [`error`]: error types
//! - [`limits`]: format constants and decoder limits
//!
//! # Security
//!
//! The bundled importer is designed to safely handle untrusted input:
//! - All allocations are bounded by the limits in [`limits`]
//! - Varints are limited to prevent overflow
//! - Invalid data is rejected with descriptive errors
//!
//! # Wire Format
//!
//! `RIVE` signature, major and minor version bytes, a varint document id,
//! the sorted header key list terminated by 0, then one little-endian word
//! of 2-bit wire codes per four keys, followed by the object records. There
//! is no end-of-stream marker.

pub mod codec;
pub mod error;
pub mod import;
pub mod limits;
pub mod model;
pub mod pipeline;
pub mod registry;
pub mod scene;
pub mod validate;

// Re-export commonly used types at crate root
pub use codec::{encode_document, stream_digest, EncodeOptions, EncodeReport, Encoded};
pub use error::{BuildError, DecodeError, EncodeError, ImportFailure, SceneError};
pub use import::{
    extract_records, ExtractionReport, ImportOutcome, RuntimeGraph, RuntimeImporter, StreamImporter,
};
pub use model::{
    BuildReport, Built, Document, GraphBuilder, IdentifierResolver, LocalId, ObjectRecord, Property,
    PropertyBag, RuntimeId, StreamId, Value,
};
pub use pipeline::{decode_and_validate, sanitize_and_encode, Decoded};
pub use validate::{sanitize_document, validate_records, validate_segments, Validated, ValidationReport};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
