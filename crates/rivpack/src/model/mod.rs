//! Data model types.
//!
//! This module contains the in-memory representation of a document:
//! - Identifiers (local, stream and runtime id spaces)
//! - Values (typed property values)
//! - Property bags (one per graph object)
//! - Documents (ordered bags plus a lookup index)
//! - Records (the flat form the validator works on)
//! - Builders (graph construction with wrapper injection)

pub mod bag;
pub mod builder;
pub mod document;
pub mod id;
pub mod record;
pub mod rewrite;
pub mod value;

pub use bag::{Property, PropertyBag};
pub use builder::{BuildReport, Built, GraphBuilder, ObjectBuilder};
pub use document::{split_segments, Document};
pub use id::{IdentifierResolver, LocalId, RuntimeId, StreamId};
pub use record::{document_from_records, records_from_document, ObjectRecord};
pub use rewrite::{wrapper_rule, WrapperRule};
pub use value::{color_from_rgba, color_rgba, format_color, parse_color, Coercion, Value};
