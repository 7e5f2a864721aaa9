//! Re-extraction of flat records from an imported graph.
//!
//! Each type tag maps to one extraction function through a table built once
//! from the registry. Runtime ids are translated to re-derived local ids
//! (a running counter over all objects in stream order) through an
//! [`IdentifierResolver`].

use lazy_static::lazy_static;
use rustc_hash::FxHashMap;
use tracing::{debug, debug_span, warn};

use crate::import::{RuntimeGraph, RuntimeObject};
use crate::model::{IdentifierResolver, ObjectRecord, Property, RuntimeId, Value};
use crate::registry::{self, types::TYPE_DEFS, TypeRole};

/// Counters collected while extracting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionReport {
    /// Records extracted.
    pub objects: usize,
    /// Records outside the parent graph.
    pub unlinked: usize,
    /// Objects whose type tag the registry does not know.
    pub unknown_types: usize,
    /// Parent links whose runtime id had no re-derived local id.
    pub unresolved_parents: usize,
    /// Reference properties dropped by the importer or during extraction.
    pub unresolved_references: usize,
}

impl ExtractionReport {
    /// Returns true if any unknown type or dangling link was met.
    pub fn has_issues(&self) -> bool {
        self.unknown_types > 0 || self.unresolved_parents > 0 || self.unresolved_references > 0
    }
}

/// Records extracted from a graph, in stream order.
#[derive(Debug, Clone)]
pub struct Extracted {
    pub records: Vec<ObjectRecord>,
    pub report: ExtractionReport,
}

struct ExtractionContext<'a> {
    resolver: &'a IdentifierResolver,
    report: &'a mut ExtractionReport,
}

impl ExtractionContext<'_> {
    fn local_id(&self, object: &RuntimeObject) -> Option<u32> {
        self.resolver.runtime_id_to_local_id(object.runtime_id)
    }

    fn parent_id(&mut self, object: &RuntimeObject) -> Option<u32> {
        let parent = object.parent?;
        let local = self.resolver.runtime_id_to_local_id(parent);
        if local.is_none() {
            warn!(object = %object.runtime_id, parent = %parent, "parent has no local id");
            self.report.unresolved_parents += 1;
        }
        local
    }

    fn linked_record(&mut self, object: &RuntimeObject) -> ObjectRecord {
        ObjectRecord {
            type_tag: object.type_tag,
            local_id: self.local_id(object),
            parent_id: self.parent_id(object),
            properties: object.properties.clone(),
        }
    }
}

type ExtractFn = fn(&RuntimeObject, &mut ExtractionContext<'_>) -> ObjectRecord;

/// Artboards: no parent, whatever the graph says.
fn extract_root(object: &RuntimeObject, cx: &mut ExtractionContext<'_>) -> ObjectRecord {
    ObjectRecord {
        type_tag: object.type_tag,
        local_id: cx.local_id(object),
        parent_id: None,
        properties: object.properties.clone(),
    }
}

fn extract_component(object: &RuntimeObject, cx: &mut ExtractionContext<'_>) -> ObjectRecord {
    cx.linked_record(object)
}

/// Animation, state machine and metadata records.
fn extract_unlinked(object: &RuntimeObject, cx: &mut ExtractionContext<'_>) -> ObjectRecord {
    cx.report.unlinked += 1;
    let mut record = ObjectRecord::unlinked(object.type_tag);
    record.properties = translate_references(object, cx);
    record
}

/// Linked objects that also carry references (clipping shapes).
fn extract_with_references(object: &RuntimeObject, cx: &mut ExtractionContext<'_>) -> ObjectRecord {
    let mut record = cx.linked_record(object);
    record.properties = translate_references(object, cx);
    record
}

fn extract_unknown(object: &RuntimeObject, cx: &mut ExtractionContext<'_>) -> ObjectRecord {
    debug!(tag = object.type_tag, "extracting object of unknown type");
    cx.report.unknown_types += 1;
    if object.linked {
        cx.linked_record(object)
    } else {
        cx.report.unlinked += 1;
        let mut record = ObjectRecord::unlinked(object.type_tag);
        record.properties = object.properties.clone();
        record
    }
}

fn translate_references(object: &RuntimeObject, cx: &mut ExtractionContext<'_>) -> Vec<Property> {
    let mut properties = Vec::with_capacity(object.properties.len());
    for prop in &object.properties {
        if !registry::is_reference_key(prop.key) {
            properties.push(prop.clone());
            continue;
        }
        let local = prop
            .value
            .as_u32()
            .and_then(|id| cx.resolver.runtime_id_to_local_id(RuntimeId(id)));
        match local {
            Some(local) => properties.push(Property {
                key: prop.key,
                value: Value::Uint(local),
            }),
            None => {
                warn!(object = %object.runtime_id, key = prop.key, "reference has no local id, dropped");
                cx.report.unresolved_references += 1;
            }
        }
    }
    properties
}

fn extractor_for_role(role: TypeRole, has_references: bool) -> ExtractFn {
    match role {
        TypeRole::Root => extract_root,
        TypeRole::Animation | TypeRole::StateMachine | TypeRole::Metadata => extract_unlinked,
        _ if has_references => extract_with_references,
        _ => extract_component,
    }
}

lazy_static! {
    static ref EXTRACTORS: FxHashMap<u16, ExtractFn> = TYPE_DEFS
        .iter()
        .map(|def| {
            let has_references = def.properties.iter().any(|key| registry::is_reference_key(*key));
            (def.tag, extractor_for_role(def.role, has_references))
        })
        .collect();
}

/// Extracts flat records from an imported graph.
///
/// Every object consumes one local id in stream order; only linked objects
/// keep theirs in the record.
pub fn extract_records(graph: &RuntimeGraph) -> Extracted {
    let _span = debug_span!("extract", objects = graph.len()).entered();
    let mut resolver = IdentifierResolver::new();
    for (local, object) in graph.objects().iter().enumerate() {
        resolver.register_runtime_id(object.runtime_id, local as u32);
    }

    let mut report = ExtractionReport {
        unresolved_references: graph.unresolved_references,
        ..ExtractionReport::default()
    };
    let mut records = Vec::with_capacity(graph.len());
    {
        let mut cx = ExtractionContext {
            resolver: &resolver,
            report: &mut report,
        };
        for object in graph.objects() {
            let extract = EXTRACTORS
                .get(&object.type_tag)
                .copied()
                .unwrap_or(extract_unknown as ExtractFn);
            let mut record = extract(object, &mut cx);
            // A record without an object id in the stream is not part of
            // the parent graph, whatever its registered role.
            if !object.linked {
                record.local_id = None;
                record.parent_id = None;
            }
            records.push(record);
        }
    }
    report.objects = records.len();
    Extracted { records, report }
}
