//! Bundled stream importer.

use rustc_hash::FxHashMap;
use tracing::{debug, debug_span, warn};

use crate::codec::header::{self, HeaderDictionary};
use crate::codec::primitives::Reader;
use crate::error::{DecodeError, ImportFailure};
use crate::import::{ImportOutcome, RuntimeGraph, RuntimeImporter, RuntimeObject};
use crate::limits::{MAX_OBJECTS, MAX_PROPERTIES_PER_OBJECT, MAX_STREAM_SIZE, MAX_STRING_LEN};
use crate::model::{split_segments, Property, RuntimeId, Value};
use crate::registry::{self, keys, WireKind};

/// Reads streams written by [`encode_document`](crate::codec::encode_document).
///
/// Values are decoded by the kind their key declares in the header, so keys
/// unknown to the registry still decode. Known bool keys are then refined
/// from their shared uint code. Stream ids resolve per artboard, forward
/// references included; runtime ids are assigned globally in stream order.
#[derive(Debug, Clone, Copy, Default)]
pub struct StreamImporter;

impl StreamImporter {
    /// Creates an importer.
    pub fn new() -> Self {
        Self
    }
}

impl RuntimeImporter for StreamImporter {
    fn import(&self, bytes: &[u8]) -> ImportOutcome {
        let _span = debug_span!("import", bytes = bytes.len()).entered();
        let outcome = ImportOutcome::from(read_graph(bytes));
        match &outcome {
            ImportOutcome::Success(graph) => debug!(objects = graph.len(), "imported stream"),
            ImportOutcome::UnsupportedVersion { major, minor } => {
                warn!(major, minor, "unsupported format version")
            }
            ImportOutcome::Malformed(err) => warn!(error = %err, "malformed stream"),
        }
        outcome
    }
}

/// One record as read from the wire, ids still stream-local.
#[derive(Debug)]
struct RawRecord {
    type_tag: u16,
    stream_id: Option<u32>,
    parent: Option<u32>,
    properties: Vec<Property>,
}

impl RawRecord {
    fn is_segment_root(&self) -> bool {
        self.stream_id.is_some() && registry::is_root(self.type_tag)
    }
}

fn read_value(reader: &mut Reader<'_>, key: u16, kind: WireKind) -> Result<Value, DecodeError> {
    let value = match kind {
        WireKind::Uint | WireKind::Bool => {
            if registry::wire_kind_of(key) == WireKind::Bool {
                Value::Bool(reader.read_bool("bool value")?)
            } else {
                Value::Uint(reader.read_varint_u32("uint value")?)
            }
        }
        WireKind::Float => Value::Float(reader.read_f32("float value")?),
        WireKind::Color => Value::Color(reader.read_u32_le("color value")?),
        WireKind::String => {
            let bytes = reader.read_bytes_prefixed(MAX_STRING_LEN, "string value")?;
            match std::str::from_utf8(bytes) {
                Ok(s) => Value::String(s.to_string()),
                Err(_) => Value::Bytes(bytes.to_vec()),
            }
        }
    };
    Ok(value)
}

fn read_record(reader: &mut Reader<'_>, dict: &HeaderDictionary) -> Result<RawRecord, DecodeError> {
    let type_tag = reader.read_varint_u16("type tag")?;
    let mut record = RawRecord {
        type_tag,
        stream_id: None,
        parent: None,
        properties: Vec::new(),
    };
    loop {
        let key = reader.read_varint_u16("property key")?;
        if key == 0 {
            return Ok(record);
        }
        let kind = dict
            .kind_of(key)
            .ok_or(DecodeError::UndeclaredPropertyKey { key })?;
        match key {
            keys::OBJECT_ID => record.stream_id = Some(reader.read_varint_u32("object id")?),
            keys::PARENT_ID => record.parent = Some(reader.read_varint_u32("parent id")?),
            _ => {
                if record.properties.len() == MAX_PROPERTIES_PER_OBJECT {
                    return Err(DecodeError::LengthExceedsLimit {
                        field: "properties",
                        len: MAX_PROPERTIES_PER_OBJECT + 1,
                        max: MAX_PROPERTIES_PER_OBJECT,
                    });
                }
                let value = read_value(reader, key, kind)?;
                record.properties.push(Property { key, value });
            }
        }
    }
}

fn read_graph(bytes: &[u8]) -> Result<RuntimeGraph, ImportFailure> {
    if bytes.len() > MAX_STREAM_SIZE {
        return Err(DecodeError::LengthExceedsLimit {
            field: "stream",
            len: bytes.len(),
            max: MAX_STREAM_SIZE,
        }
        .into());
    }
    let mut reader = Reader::new(bytes);
    let version = header::read_preamble(&mut reader)?;
    let dict = header::read_dictionary(&mut reader)?;

    let mut records = Vec::new();
    while !reader.is_empty() {
        if records.len() == MAX_OBJECTS {
            return Err(DecodeError::LengthExceedsLimit {
                field: "objects",
                len: MAX_OBJECTS + 1,
                max: MAX_OBJECTS,
            }
            .into());
        }
        records.push(read_record(&mut reader, &dict)?);
    }

    let (objects, unresolved_references) = resolve(records)?;
    Ok(RuntimeGraph::new(version, objects, unresolved_references))
}

/// Resolves stream ids to runtime ids, artboard by artboard.
fn resolve(records: Vec<RawRecord>) -> Result<(Vec<RuntimeObject>, usize), DecodeError> {
    let segments = split_segments(&records, RawRecord::is_segment_root);
    let mut objects = Vec::with_capacity(records.len());
    let mut unresolved_references = 0;

    for (artboard, range) in segments.into_iter().enumerate() {
        let base = range.start;
        let segment = &records[range];

        let mut by_stream_id: FxHashMap<u32, RuntimeId> = FxHashMap::default();
        for (offset, record) in segment.iter().enumerate() {
            if let Some(id) = record.stream_id {
                let runtime_id = RuntimeId((base + offset) as u32);
                if by_stream_id.insert(id, runtime_id).is_some() {
                    return Err(DecodeError::DuplicateStreamId { id, artboard });
                }
            }
        }
        let root = segment
            .first()
            .filter(|record| record.is_segment_root())
            .map(|_| RuntimeId(base as u32));

        for (offset, record) in segment.iter().enumerate() {
            let runtime_id = RuntimeId((base + offset) as u32);
            let parent = match (record.stream_id, record.parent) {
                (None, _) => None,
                (Some(_), _) if Some(runtime_id) == root => None,
                (Some(id), Some(parent)) => Some(
                    *by_stream_id
                        .get(&parent)
                        .ok_or(DecodeError::UnresolvedParent { id, parent })?,
                ),
                (Some(_), None) => root,
            };

            let mut properties = Vec::with_capacity(record.properties.len());
            for prop in &record.properties {
                if !registry::is_reference_key(prop.key) {
                    properties.push(prop.clone());
                    continue;
                }
                match prop.value.as_u32().and_then(|id| by_stream_id.get(&id)) {
                    Some(target) => properties.push(Property {
                        key: prop.key,
                        value: Value::Uint(target.0),
                    }),
                    None => {
                        debug!(key = prop.key, value = ?prop.value, "unresolved reference in stream");
                        unresolved_references += 1;
                    }
                }
            }

            objects.push(RuntimeObject {
                runtime_id,
                type_tag: record.type_tag,
                linked: record.stream_id.is_some(),
                parent,
                artboard,
                properties,
            });
        }
    }
    Ok((objects, unresolved_references))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::primitives::Writer;
    use crate::registry::types;

    fn stream(keys_and_kinds: &[(u16, WireKind)], body: impl FnOnce(&mut Writer)) -> Vec<u8> {
        let mut writer = Writer::new();
        header::write_preamble(&mut writer);
        header::write_dictionary(&mut writer, keys_and_kinds);
        body(&mut writer);
        writer.into_bytes()
    }

    fn import(bytes: &[u8]) -> ImportOutcome {
        StreamImporter::new().import(bytes)
    }

    #[test]
    fn test_forward_parent_reference() {
        let bytes = stream(&[(keys::OBJECT_ID, WireKind::Uint), (keys::PARENT_ID, WireKind::Uint)], |w| {
            // artboard id 0
            for v in [types::ARTBOARD as u64, 3, 0, 0] {
                w.write_varint(v);
            }
            // rectangle id 2, parent 1 (not yet seen)
            for v in [types::RECTANGLE as u64, 3, 2, 5, 1, 0] {
                w.write_varint(v);
            }
            // shape id 1
            for v in [types::SHAPE as u64, 3, 1, 0] {
                w.write_varint(v);
            }
        });
        let ImportOutcome::Success(graph) = import(&bytes) else {
            panic!("expected success");
        };
        assert_eq!(graph.len(), 3);
        assert_eq!(graph.objects()[1].parent, Some(RuntimeId(2)));
        assert_eq!(graph.objects()[2].parent, Some(RuntimeId(0)));
        assert_eq!(graph.objects()[0].parent, None);
        assert_eq!(graph.children_of(RuntimeId(0)).count(), 1);
    }

    #[test]
    fn test_unknown_key_decodes_by_header_code() {
        let bytes = stream(&[(keys::OBJECT_ID, WireKind::Uint), (900, WireKind::Float)], |w| {
            for v in [types::ARTBOARD as u64, 3, 0, 900] {
                w.write_varint(v);
            }
            w.write_f32(2.5);
            w.write_varint(0);
        });
        let graph = import(&bytes).into_result().unwrap();
        assert_eq!(graph.objects()[0].get(900), Some(&Value::Float(2.5)));
    }

    #[test]
    fn test_bool_keys_are_refined() {
        let bytes = stream(&[(keys::OBJECT_ID, WireKind::Uint), (keys::IS_CLOSED, WireKind::Bool)], |w| {
            for v in [types::ARTBOARD as u64, 3, 0, 0, types::POINTS_PATH as u64, 3, 1, keys::IS_CLOSED as u64, 1, 0] {
                w.write_varint(v);
            }
        });
        let graph = import(&bytes).into_result().unwrap();
        assert_eq!(graph.objects()[1].get(keys::IS_CLOSED), Some(&Value::Bool(true)));
    }

    #[test]
    fn test_undeclared_key_is_malformed() {
        let bytes = stream(&[(keys::OBJECT_ID, WireKind::Uint)], |w| {
            for v in [types::ARTBOARD as u64, 3, 0, keys::NAME as u64] {
                w.write_varint(v);
            }
        });
        assert_eq!(
            import(&bytes),
            ImportOutcome::Malformed(DecodeError::UndeclaredPropertyKey { key: keys::NAME })
        );
    }

    #[test]
    fn test_unresolved_parent_is_malformed() {
        let bytes = stream(&[(keys::OBJECT_ID, WireKind::Uint), (keys::PARENT_ID, WireKind::Uint)], |w| {
            for v in [types::ARTBOARD as u64, 3, 0, 0, types::SHAPE as u64, 3, 1, 5, 9, 0] {
                w.write_varint(v);
            }
        });
        assert_eq!(
            import(&bytes),
            ImportOutcome::Malformed(DecodeError::UnresolvedParent { id: 1, parent: 9 })
        );
    }

    #[test]
    fn test_duplicate_stream_id_is_malformed() {
        let bytes = stream(&[(keys::OBJECT_ID, WireKind::Uint)], |w| {
            for v in [types::ARTBOARD as u64, 3, 0, 0, types::SHAPE as u64, 3, 0, 0] {
                w.write_varint(v);
            }
        });
        assert_eq!(
            import(&bytes),
            ImportOutcome::Malformed(DecodeError::DuplicateStreamId { id: 0, artboard: 0 })
        );
    }

    #[test]
    fn test_stream_ids_are_per_artboard() {
        let bytes = stream(&[(keys::OBJECT_ID, WireKind::Uint)], |w| {
            for v in [
                types::ARTBOARD as u64, 3, 0, 0,
                types::SHAPE as u64, 3, 1, 0,
                types::ARTBOARD as u64, 3, 0, 0,
                types::SHAPE as u64, 3, 1, 0,
            ] {
                w.write_varint(v);
            }
        });
        let graph = import(&bytes).into_result().unwrap();
        let parents: Vec<Option<RuntimeId>> = graph.objects().iter().map(|o| o.parent).collect();
        assert_eq!(parents, vec![None, Some(RuntimeId(0)), None, Some(RuntimeId(2))]);
        assert_eq!(graph.objects()[3].artboard, 1);
    }

    #[test]
    fn test_references_become_runtime_ids() {
        let bytes = stream(
            &[(keys::OBJECT_ID, WireKind::Uint), (keys::KEYED_OBJECT_ID, WireKind::Uint)],
            |w| {
                for v in [
                    types::ARTBOARD as u64, 3, 0, 0,
                    types::SHAPE as u64, 3, 1, 0,
                    types::LINEAR_ANIMATION as u64, 0,
                    types::KEYED_OBJECT as u64, 51, 1, 0,
                    types::KEYED_OBJECT as u64, 51, 8, 0,
                ] {
                    w.write_varint(v);
                }
            },
        );
        let graph = import(&bytes).into_result().unwrap();
        assert_eq!(graph.objects()[3].get(keys::KEYED_OBJECT_ID), Some(&Value::Uint(1)));
        assert_eq!(graph.objects()[4].get(keys::KEYED_OBJECT_ID), None);
        assert_eq!(graph.unresolved_references, 1);
        assert!(!graph.objects()[2].linked);
    }

    #[test]
    fn test_truncated_record() {
        let bytes = stream(&[(keys::OBJECT_ID, WireKind::Uint)], |w| {
            for v in [types::ARTBOARD as u64, 3] {
                w.write_varint(v);
            }
        });
        assert!(matches!(
            import(&bytes),
            ImportOutcome::Malformed(DecodeError::UnexpectedEof { .. })
        ));
    }
}
