//! Document encoding.
//!
//! Encoding runs in two passes. Planning walks each root segment, decides
//! which objects can be written without a dangling parent link, fits every
//! value to its registered wire kind and resolves reference targets. The
//! header dictionary is then derived from exactly the keys the plan will
//! write, and the records are emitted with stream ids assigned lazily in
//! write order.

use std::collections::BTreeMap;

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, debug_span, warn};

use crate::codec::header::{self, CODES_PER_WORD};
use crate::codec::primitives::{varint_len, Writer};
use crate::codec::trace::{ChunkStat, ChunkTracer};
use crate::error::EncodeError;
use crate::limits::{
    DOCUMENT_ID, MAGIC, MAX_OBJECTS, MAX_PROPERTIES_PER_OBJECT, MAX_STRING_LEN,
};
use crate::model::{Coercion, Document, IdentifierResolver, LocalId, PropertyBag, Value};
use crate::registry::{self, keys, WireKind};

/// Environment variable that enables chunk tracing in [`EncodeOptions::from_env`].
pub const TRACE_ENV: &str = "RIVPACK_TRACE_ENCODE";

/// Options for encoding documents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Record chunk offsets and sizes while encoding.
    ///
    /// Tracing never changes the output bytes.
    pub trace_chunks: bool,
}

impl EncodeOptions {
    /// Creates default options (no tracing).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options with chunk tracing enabled.
    pub fn traced() -> Self {
        Self { trace_chunks: true }
    }

    /// Reads the tracing toggle from [`TRACE_ENV`].
    pub fn from_env() -> Self {
        Self {
            trace_chunks: env_flag(std::env::var(TRACE_ENV).ok().as_deref()),
        }
    }
}

/// Interprets an environment toggle: unset, empty, `0` and `false` are off.
pub fn env_flag(value: Option<&str>) -> bool {
    match value.map(str::trim) {
        None | Some("") | Some("0") => false,
        Some(v) => !v.eq_ignore_ascii_case("false"),
    }
}

/// Counters collected while encoding.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EncodeReport {
    /// Object records written.
    pub objects_written: usize,
    /// Root segments (artboards, plus a leading rootless segment if any).
    pub segments: usize,
    /// Keys in the header dictionary.
    pub header_keys: usize,
    /// Linked objects not written because their parent chain leaves the
    /// segment, is cyclic, or their id was already written.
    pub orphaned_objects: usize,
    /// Reference properties not written because the target has no stream id.
    pub skipped_references: usize,
    /// Values converted losslessly to their registered wire kind.
    pub type_mismatches: usize,
    /// Values not written because no lossless conversion exists.
    pub dropped_values: usize,
    /// Traced chunks, empty unless tracing is enabled.
    pub chunks: Vec<ChunkStat>,
}

impl EncodeReport {
    /// Returns true if every input object and value made it into the stream.
    pub fn is_lossless(&self) -> bool {
        self.orphaned_objects == 0 && self.skipped_references == 0 && self.dropped_values == 0
    }
}

/// An encoded stream and its report.
#[derive(Debug, Clone)]
pub struct Encoded {
    pub bytes: Vec<u8>,
    pub report: EncodeReport,
}

// =============================================================================
// PLANNING
// =============================================================================

#[derive(Debug)]
enum PlannedValue {
    Direct(Value),
    /// Local id of the referenced object.
    Reference(LocalId),
}

#[derive(Debug)]
struct PlannedRecord {
    type_tag: u16,
    /// Set for linked objects.
    local_id: Option<LocalId>,
    /// Set when the parent key is written (parent is not the segment root).
    parent: Option<LocalId>,
    properties: Vec<(u16, PlannedValue)>,
}

#[derive(Debug)]
struct SegmentPlan {
    name: String,
    root: Option<LocalId>,
    members: Vec<LocalId>,
    records: Vec<PlannedRecord>,
}

fn validate_document_inputs(document: &Document) -> Result<(), EncodeError> {
    if document.len() > MAX_OBJECTS {
        return Err(EncodeError::LengthExceedsLimit {
            field: "objects",
            len: document.len(),
            max: MAX_OBJECTS,
        });
    }
    for bag in document.objects() {
        if bag.type_tag == 0 {
            return Err(EncodeError::ReservedTypeTag {
                object: bag.local_id,
            });
        }
        if bag.properties.len() > MAX_PROPERTIES_PER_OBJECT {
            return Err(EncodeError::LengthExceedsLimit {
                field: "properties",
                len: bag.properties.len(),
                max: MAX_PROPERTIES_PER_OBJECT,
            });
        }
        for prop in &bag.properties {
            if prop.key == 0 {
                return Err(EncodeError::ReservedPropertyKey {
                    object: bag.local_id,
                });
            }
            let len = match &prop.value {
                Value::String(s) => s.len(),
                Value::Bytes(b) => b.len(),
                _ => 0,
            };
            if len > MAX_STRING_LEN {
                return Err(EncodeError::LengthExceedsLimit {
                    field: "string",
                    len,
                    max: MAX_STRING_LEN,
                });
            }
        }
    }
    Ok(())
}

/// Returns the linked objects of a segment whose parent chain reaches the
/// segment root (or ends parentless in a rootless segment) without leaving
/// the segment or looping.
fn emittable_objects(bags: &[PropertyBag], root: Option<LocalId>) -> FxHashSet<LocalId> {
    let mut parents: FxHashMap<LocalId, Option<LocalId>> = FxHashMap::default();
    for bag in bags.iter().filter(|bag| bag.is_linked()) {
        parents.entry(bag.local_id).or_insert(bag.parent_id);
    }

    let mut verdicts: FxHashMap<LocalId, bool> = FxHashMap::default();
    let mut path = Vec::new();
    let mut on_path = FxHashSet::default();
    for bag in bags.iter().filter(|bag| bag.is_linked()) {
        path.clear();
        on_path.clear();
        let mut cursor = bag.local_id;
        let verdict = loop {
            if let Some(&known) = verdicts.get(&cursor) {
                break known;
            }
            if !on_path.insert(cursor) {
                break false; // cycle
            }
            path.push(cursor);
            if Some(cursor) == root {
                break true;
            }
            match parents.get(&cursor) {
                None => break false,
                Some(None) => break root.is_none(),
                Some(Some(parent)) => cursor = *parent,
            }
        };
        for id in &path {
            verdicts.insert(*id, verdict);
        }
    }

    verdicts
        .into_iter()
        .filter_map(|(id, ok)| ok.then_some(id))
        .collect()
}

fn plan_properties(
    bag: &PropertyBag,
    emittable: &FxHashSet<LocalId>,
    report: &mut EncodeReport,
) -> Vec<(u16, PlannedValue)> {
    let mut planned = Vec::with_capacity(bag.properties.len());
    for prop in bag.sorted_properties() {
        if prop.key == keys::OBJECT_ID || prop.key == keys::PARENT_ID {
            warn!(object = bag.local_id, key = prop.key, "linkage key set as a property, dropped");
            report.dropped_values += 1;
            continue;
        }

        if registry::is_reference_key(prop.key) {
            let target = match prop.value.coerce(WireKind::Uint) {
                Coercion::Exact(value) => value.as_u32(),
                Coercion::Converted(value) => value.as_u32(),
                Coercion::Incompatible => None,
            };
            match target {
                Some(target) if emittable.contains(&target) => {
                    planned.push((prop.key, PlannedValue::Reference(target)));
                }
                _ => {
                    warn!(
                        object = bag.local_id,
                        key = prop.key,
                        target = ?prop.value,
                        "reference target has no stream id, property skipped"
                    );
                    report.skipped_references += 1;
                }
            }
            continue;
        }

        let kind = registry::wire_kind_of(prop.key);
        match prop.value.coerce(kind) {
            Coercion::Exact(value) => planned.push((prop.key, PlannedValue::Direct(value.clone()))),
            Coercion::Converted(value) => {
                debug!(object = bag.local_id, key = prop.key, ?kind, "value converted to registered kind");
                report.type_mismatches += 1;
                planned.push((prop.key, PlannedValue::Direct(value)));
            }
            Coercion::Incompatible => {
                warn!(
                    object = bag.local_id,
                    key = prop.key,
                    ?kind,
                    value = ?prop.value,
                    "value does not fit its registered kind, dropped"
                );
                report.dropped_values += 1;
            }
        }
    }
    planned
}

fn plan_segment(index: usize, bags: &[PropertyBag], report: &mut EncodeReport) -> SegmentPlan {
    let root = bags.first().filter(|bag| bag.is_root()).map(|bag| bag.local_id);
    let emittable = emittable_objects(bags, root);
    let name = match root {
        Some(_) => format!("artboard[{}]", index),
        None => "leading".to_string(),
    };

    let mut written: FxHashSet<LocalId> = FxHashSet::default();
    let mut members = Vec::new();
    let mut records = Vec::with_capacity(bags.len());
    for bag in bags {
        if bag.is_linked() {
            if !emittable.contains(&bag.local_id) || !written.insert(bag.local_id) {
                warn!(
                    object = bag.local_id,
                    type_name = registry::display_name_of(bag.type_tag),
                    parent = ?bag.parent_id,
                    "object has no valid parent chain in its artboard, skipped"
                );
                report.orphaned_objects += 1;
                continue;
            }
            members.push(bag.local_id);
        }

        let is_segment_root = root == Some(bag.local_id) && bag.is_root();
        let parent = if bag.is_linked() && !is_segment_root {
            bag.parent_id.filter(|parent| Some(*parent) != root)
        } else {
            None
        };
        records.push(PlannedRecord {
            type_tag: bag.type_tag,
            local_id: bag.is_linked().then_some(bag.local_id),
            parent,
            properties: plan_properties(bag, &emittable, report),
        });
    }

    SegmentPlan {
        name,
        root,
        members,
        records,
    }
}

/// Collects `(key, kind)` for every key the plan writes, sorted by key.
fn header_entries(plans: &[SegmentPlan]) -> Vec<(u16, WireKind)> {
    let mut entries: BTreeMap<u16, WireKind> = BTreeMap::new();
    for record in plans.iter().flat_map(|plan| &plan.records) {
        if record.local_id.is_some() {
            entries.insert(keys::OBJECT_ID, WireKind::Uint);
        }
        if record.parent.is_some() {
            entries.insert(keys::PARENT_ID, WireKind::Uint);
        }
        for (key, value) in &record.properties {
            let kind = match value {
                PlannedValue::Reference(_) => WireKind::Uint,
                PlannedValue::Direct(_) => registry::wire_kind_of(*key),
            };
            entries.insert(*key, kind);
        }
    }
    entries.into_iter().collect()
}

// =============================================================================
// ENCODING
// =============================================================================

fn write_value(writer: &mut Writer, value: &Value) {
    match value {
        Value::Uint(v) => writer.write_varint(*v as u64),
        Value::Bool(b) => writer.write_bool(*b),
        Value::Float(f) => writer.write_f32(*f),
        Value::Color(c) => writer.write_u32_le(*c),
        Value::String(s) => writer.write_string(s),
        Value::Bytes(b) => writer.write_bytes_prefixed(b),
    }
}

fn write_segment(
    writer: &mut Writer,
    plan: &SegmentPlan,
    resolver: &mut IdentifierResolver,
    report: &mut EncodeReport,
) {
    resolver.begin_segment(plan.members.iter().copied());
    if let Some(root) = plan.root {
        // The root always owns stream id 0.
        resolver.assign_stream_id(root);
    }

    for record in &plan.records {
        writer.write_varint(record.type_tag as u64);
        if let Some(local_id) = record.local_id {
            if let Some(stream_id) = resolver.assign_stream_id(local_id) {
                writer.write_varint(keys::OBJECT_ID as u64);
                writer.write_varint(stream_id.0 as u64);
            }
            if let Some(stream_parent) = record.parent.and_then(|p| resolver.assign_stream_id(p)) {
                writer.write_varint(keys::PARENT_ID as u64);
                writer.write_varint(stream_parent.0 as u64);
            }
        }
        for (key, value) in &record.properties {
            match value {
                PlannedValue::Direct(value) => {
                    writer.write_varint(*key as u64);
                    write_value(writer, value);
                }
                PlannedValue::Reference(target) => {
                    if let Some(stream_id) = resolver.assign_stream_id(*target) {
                        writer.write_varint(*key as u64);
                        writer.write_varint(stream_id.0 as u64);
                    }
                }
            }
        }
        writer.write_varint(0);
        report.objects_written += 1;
    }
}

/// Encodes a document into a byte stream.
///
/// The document is consumed. Data-quality problems are counted in the
/// report; only reserved keys/tags and exceeded limits are errors.
pub fn encode_document(document: Document, options: &EncodeOptions) -> Result<Encoded, EncodeError> {
    let _span = debug_span!("encode", objects = document.len()).entered();
    validate_document_inputs(&document)?;

    let mut report = EncodeReport::default();
    let segments = document.segments();
    let plans: Vec<SegmentPlan> = segments
        .iter()
        .enumerate()
        .map(|(i, range)| plan_segment(i, &document.objects()[range.clone()], &mut report))
        .collect();
    report.segments = plans.len();

    let entries = header_entries(&plans);
    report.header_keys = entries.len();

    let mut tracer = ChunkTracer::new(options.trace_chunks);
    let mut writer = Writer::with_capacity(64 + document.len() * 24);

    header::write_preamble(&mut writer);
    let preamble_size = MAGIC.len() + 2 + varint_len(DOCUMENT_ID);
    tracer.record("preamble", 0, writer.len(), Some(preamble_size), None);

    let start = writer.len();
    header::write_keys(&mut writer, &entries);
    if tracer.is_enabled() {
        let expected = entries.iter().map(|(key, _)| varint_len(*key as u64)).sum::<usize>() + 1;
        tracer.record("header keys", start, writer.len(), Some(expected), None);
    }

    let start = writer.len();
    header::write_bitmap(&mut writer, &entries);
    let bitmap_size = entries.len().div_ceil(CODES_PER_WORD) * 4;
    tracer.record("header bitmap", start, writer.len(), Some(bitmap_size), Some(4));

    let mut resolver = IdentifierResolver::new();
    for plan in &plans {
        let start = writer.len();
        write_segment(&mut writer, plan, &mut resolver, &mut report);
        tracer.record(plan.name.as_str(), start, writer.len(), None, None);
    }

    let bytes = writer.into_bytes();
    report.chunks = tracer.finish(bytes.len());
    debug!(
        bytes = bytes.len(),
        objects = report.objects_written,
        header_keys = report.header_keys,
        "encoded document"
    );
    Ok(Encoded { bytes, report })
}
