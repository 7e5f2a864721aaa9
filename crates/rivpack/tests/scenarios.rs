//! End-to-end scenarios across build, encode, import, extraction and
//! validation.

use rivpack::registry::{keys, types};
use rivpack::{
    decode_and_validate, encode_document, validate_records, Document, EncodeOptions, LocalId,
    ObjectRecord, PropertyBag, StreamImporter, Value,
};

fn bag(tag: u16, id: LocalId, parent: Option<LocalId>) -> PropertyBag {
    let mut bag = PropertyBag::new(tag, id);
    if let Some(parent) = parent {
        bag.set_parent(parent);
    }
    bag
}

fn artboard(id: LocalId, width: f32, height: f32) -> ObjectRecord {
    ObjectRecord::linked(types::ARTBOARD, id, None)
        .with(keys::ARTBOARD_WIDTH, Value::Float(width))
        .with(keys::ARTBOARD_HEIGHT, Value::Float(height))
}

fn record_by_tag(records: &[ObjectRecord], tag: u16) -> &ObjectRecord {
    records
        .iter()
        .find(|r| r.type_tag == tag)
        .unwrap_or_else(|| panic!("no record with tag {tag}"))
}

#[test]
fn wrapped_rectangle_survives_round_trip() {
    let mut root = bag(types::ARTBOARD, 0, None);
    root.set(keys::ARTBOARD_WIDTH, Value::Float(400.0))
        .set(keys::ARTBOARD_HEIGHT, Value::Float(300.0));
    let wrapper = bag(types::SHAPE, 1, Some(0));
    let mut rect = bag(types::RECTANGLE, 2, Some(1));
    rect.set(keys::PATH_WIDTH, Value::Float(100.0))
        .set(keys::PATH_HEIGHT, Value::Float(50.0));

    let encoded = encode_document(
        Document::from_bags(vec![root, wrapper, rect]),
        &EncodeOptions::new(),
    )
    .unwrap();
    assert!(encoded.report.is_lossless());

    let decoded = decode_and_validate(&StreamImporter::new(), &encoded.bytes).unwrap();
    assert!(decoded.validation.is_clean(), "{}", decoded.validation);
    assert_eq!(decoded.records.len(), 3);
    assert!(decoded.records.iter().all(|r| r.local_id.is_some()));

    let root = record_by_tag(&decoded.records, types::ARTBOARD);
    let wrapper = record_by_tag(&decoded.records, types::SHAPE);
    let rect = record_by_tag(&decoded.records, types::RECTANGLE);
    assert_eq!(root.parent_id, None);
    assert_eq!(wrapper.parent_id, root.local_id);
    assert_eq!(rect.parent_id, wrapper.local_id);
    assert_eq!(rect.get(keys::PATH_WIDTH), Some(&Value::Float(100.0)));
    assert_eq!(rect.get(keys::PATH_HEIGHT), Some(&Value::Float(50.0)));
}

#[test]
fn gradient_stop_without_position_is_defaulted() {
    let validated = validate_records(vec![
        artboard(0, 100.0, 100.0),
        ObjectRecord::linked(types::LINEAR_GRADIENT, 1, Some(0)),
        ObjectRecord::linked(types::GRADIENT_STOP, 2, Some(1))
            .with(keys::GRADIENT_STOP_COLOR, Value::Color(0xFF00_00FF)),
    ]);

    let stop = record_by_tag(&validated.records, types::GRADIENT_STOP);
    assert_eq!(stop.get(keys::GRADIENT_STOP_POSITION), Some(&Value::Float(0.0)));
    assert_eq!(stop.get(keys::GRADIENT_STOP_COLOR), Some(&Value::Color(0xFF00_00FF)));
    assert_eq!(validated.report.dropped, 0);
    assert_eq!(validated.report.defaults_injected.get(&types::GRADIENT_STOP), Some(&1));
}

#[test]
fn missing_parent_drops_exactly_one_object() {
    let validated = validate_records(vec![
        artboard(0, 100.0, 100.0),
        ObjectRecord::linked(types::SHAPE, 1, Some(0)),
        ObjectRecord::linked(types::SHAPE, 5, Some(42)),
    ]);

    assert_eq!(validated.report.dropped, 1);
    assert_eq!(validated.report.missing_parents, vec![(5, 42)]);
    let ids: Vec<Option<LocalId>> = validated.records.iter().map(|r| r.local_id).collect();
    assert_eq!(ids, vec![Some(0), Some(1)]);
}

#[test]
fn zero_size_root_loses_every_child() {
    let mut records = vec![artboard(0, 0.0, 0.0)];
    for id in 1..=6 {
        records.push(ObjectRecord::linked(types::NODE, id, Some(id - 1)));
    }
    let validated = validate_records(records);

    assert_eq!(validated.records.len(), 1);
    assert_eq!(validated.records[0].type_tag, types::ARTBOARD);
    assert_eq!(validated.report.zero_size_roots, vec![0]);
    assert_eq!(validated.report.emptied_children, 6);
}

#[test]
fn three_node_cycle_is_reported_and_excluded() {
    let validated = validate_records(vec![
        artboard(0, 10.0, 10.0),
        ObjectRecord::linked(types::NODE, 10, Some(12)),
        ObjectRecord::linked(types::NODE, 11, Some(10)),
        ObjectRecord::linked(types::NODE, 12, Some(11)),
    ]);

    let mut cycle = validated.report.cycle.clone().unwrap();
    cycle.sort_unstable();
    assert_eq!(cycle, vec![10, 11, 12]);
    assert!(validated
        .records
        .iter()
        .all(|r| !matches!(r.local_id, Some(10..=12))));
}

#[test]
fn unmapped_track_reference_is_left_out() {
    let mut animation = bag(types::LINEAR_ANIMATION, 3, None);
    animation
        .set(keys::ANIMATION_NAME, Value::String("idle".into()))
        .set(keys::ANIMATION_FPS, Value::Uint(60));
    let mut keyed = bag(types::KEYED_OBJECT, 4, None);
    keyed.set(keys::KEYED_OBJECT_ID, Value::Uint(99));
    let mut track = bag(types::KEYED_PROPERTY, 5, None);
    track.set(keys::KEYED_PROPERTY_KEY, Value::Uint(u32::from(keys::NODE_X)));

    let encoded = encode_document(
        Document::from_bags(vec![
            bag(types::ARTBOARD, 0, None),
            bag(types::NODE, 1, Some(0)),
            animation,
            keyed,
            track,
        ]),
        &EncodeOptions::new(),
    )
    .unwrap();
    assert_eq!(encoded.report.skipped_references, 1);
    assert_eq!(encoded.report.objects_written, 5);

    let decoded = decode_and_validate(&StreamImporter::new(), &encoded.bytes).unwrap();
    let keyed = record_by_tag(&decoded.records, types::KEYED_OBJECT);
    assert!(!keyed.has(keys::KEYED_OBJECT_ID));

    let animation = record_by_tag(&decoded.records, types::LINEAR_ANIMATION);
    assert_eq!(animation.get(keys::ANIMATION_NAME), Some(&Value::String("idle".into())));
    assert_eq!(animation.get(keys::ANIMATION_FPS), Some(&Value::Uint(60)));
    let track = record_by_tag(&decoded.records, types::KEYED_PROPERTY);
    assert_eq!(
        track.get(keys::KEYED_PROPERTY_KEY),
        Some(&Value::Uint(u32::from(keys::NODE_X)))
    );
}

#[test]
fn trim_path_is_skipped_after_decoding() {
    let mut trim = bag(types::TRIM_PATH, 3, Some(2));
    trim.set(keys::TRIM_END, Value::Float(0.5));
    let encoded = encode_document(
        Document::from_bags(vec![
            bag(types::ARTBOARD, 0, None),
            bag(types::SHAPE, 1, Some(0)),
            bag(types::STROKE, 2, Some(1)),
            trim,
        ]),
        &EncodeOptions::new(),
    )
    .unwrap();

    let decoded = decode_and_validate(&StreamImporter::new(), &encoded.bytes).unwrap();
    assert_eq!(decoded.validation.known_bad_skipped, 1);
    let tags: Vec<u16> = decoded.records.iter().map(|r| r.type_tag).collect();
    assert_eq!(tags, vec![types::ARTBOARD, types::SHAPE, types::STROKE]);
}

#[test]
fn unknown_linked_type_keeps_its_subtree() {
    let validated = rivpack::validate_segments(vec![
        artboard(0, 100.0, 100.0),
        ObjectRecord::linked(4242, 1, Some(0)),
        ObjectRecord::linked(types::SHAPE, 2, Some(1)),
    ]);
    assert!(validated.report.is_clean());

    let document = rivpack::model::document_from_records(validated.records);
    let encoded = encode_document(document, &EncodeOptions::new()).unwrap();
    assert_eq!(encoded.report.orphaned_objects, 0);
    assert_eq!(encoded.report.objects_written, 3);

    let decoded = decode_and_validate(&StreamImporter::new(), &encoded.bytes).unwrap();
    assert_eq!(decoded.records.len(), 3);
    assert_eq!(decoded.extraction.unknown_types, 1);
    let unknown = record_by_tag(&decoded.records, 4242);
    let shape = record_by_tag(&decoded.records, types::SHAPE);
    assert!(unknown.local_id.is_some());
    assert_eq!(unknown.parent_id, record_by_tag(&decoded.records, types::ARTBOARD).local_id);
    assert_eq!(shape.parent_id, unknown.local_id);
}
