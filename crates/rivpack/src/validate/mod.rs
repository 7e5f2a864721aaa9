//! Structural validation and repair of flat object records.
//!
//! Records come from a decoded graph (see [`crate::import::extract_records`])
//! or from an externally produced record list before encoding. The pipeline
//! runs in a fixed order and never fails; everything it changes is counted
//! in a [`ValidationReport`]:
//!
//! 1. required-property defaulting
//! 2. zero-size root filtering
//! 3. duplicate id and parent reference checks, cycle detection
//! 4. stable topological sort, dropping unreachable objects
//! 5. trim path skip and parent re-check
//!
//! Records without a local id are appended after the sorted objects.

pub mod defaults;
pub mod report;
pub mod topo;

use std::collections::VecDeque;

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, debug_span, warn};

use crate::model::{
    document_from_records, records_from_document, split_segments, Document, LocalId, ObjectRecord,
};
use crate::registry::{keys, types};

pub use defaults::{inject_defaults, required_defaults};
pub use report::ValidationReport;
pub use topo::{find_cycle, stable_sort, Sorted};

/// Type tags skipped unconditionally after extraction.
///
/// Trim paths decode into graphs the runtime mis-renders; they are skipped
/// until that is understood.
pub const KNOWN_BAD_TYPES: &[u16] = &[types::TRIM_PATH];

/// Validated records and the report describing what changed.
#[derive(Debug, Clone, PartialEq)]
pub struct Validated {
    pub records: Vec<ObjectRecord>,
    pub report: ValidationReport,
}

/// Validates one batch of records as a single graph.
pub fn validate_records(records: Vec<ObjectRecord>) -> Validated {
    let _span = debug_span!("validate", records = records.len()).entered();
    let mut report = ValidationReport::default();
    let mut records = records;

    inject_defaults(&mut records, &mut report.defaults_injected);
    let records = remove_zero_size_children(records, &mut report);

    let (linked, unlinked): (Vec<ObjectRecord>, Vec<ObjectRecord>) =
        records.into_iter().partition(|r| r.local_id.is_some());
    let linked = drop_duplicate_ids(linked, &mut report);

    let links: Vec<(LocalId, Option<LocalId>)> = linked
        .iter()
        .filter_map(|r| r.local_id.map(|id| (id, r.parent_id)))
        .collect();
    let known: FxHashSet<LocalId> = links.iter().map(|(id, _)| *id).collect();
    for (id, parent) in &links {
        if let Some(parent) = parent {
            if !known.contains(parent) {
                warn!(object = id, parent, "parent not found");
                report.missing_parents.push((*id, *parent));
            }
        }
    }

    report.cycle = find_cycle(&links);
    if let Some(cycle) = &report.cycle {
        warn!(?cycle, "parent cycle");
    }

    let sorted = stable_sort(&links);
    report.reordered = sorted.reordered;
    report.dropped += sorted.unreachable.len();
    for &index in &sorted.unreachable {
        debug!(object = links[index].0, "unreachable from any root, dropped");
    }

    let mut slots: Vec<Option<ObjectRecord>> = linked.into_iter().map(Some).collect();
    let ordered: Vec<ObjectRecord> = sorted
        .order
        .iter()
        .filter_map(|&index| slots[index].take())
        .collect();

    let mut output = skip_known_bad(ordered, &mut report);
    for record in unlinked {
        if KNOWN_BAD_TYPES.contains(&record.type_tag) {
            report.known_bad_skipped += 1;
        } else {
            output.push(record);
        }
    }

    if report.dropped > 0 {
        warn!(dropped = report.dropped, "objects dropped during validation");
    }
    Validated {
        records: output,
        report,
    }
}

/// Validates records per root segment and concatenates the results.
///
/// Segments start at each root record that has a local id, so records
/// without one stay after the objects of their own root. A parent must be in
/// the same segment as its child, as it must be in the encoded stream.
pub fn validate_segments(records: Vec<ObjectRecord>) -> Validated {
    let segments = split_segments(&records, |r| r.is_root() && r.local_id.is_some());
    let mut output = Vec::with_capacity(records.len());
    let mut report = ValidationReport::default();
    for range in segments {
        let validated = validate_records(records[range].to_vec());
        output.extend(validated.records);
        report.merge(validated.report);
    }
    Validated {
        records: output,
        report,
    }
}

/// Validates a built document before encoding.
pub fn sanitize_document(document: Document) -> (Document, ValidationReport) {
    let validated = validate_segments(records_from_document(&document));
    (document_from_records(validated.records), validated.report)
}

fn is_zero_size_root(record: &ObjectRecord) -> bool {
    if !record.is_root() || record.local_id.is_none() {
        return false;
    }
    let dimension = |key| record.get(key).and_then(|v| v.as_f32());
    matches!(
        (dimension(keys::ARTBOARD_WIDTH), dimension(keys::ARTBOARD_HEIGHT)),
        (Some(w), Some(h)) if w == 0.0 && h == 0.0
    )
}

/// Removes every linked descendant of zero-size roots; the roots stay.
fn remove_zero_size_children(
    records: Vec<ObjectRecord>,
    report: &mut ValidationReport,
) -> Vec<ObjectRecord> {
    let roots: Vec<LocalId> = records
        .iter()
        .filter(|r| is_zero_size_root(r))
        .filter_map(|r| r.local_id)
        .collect();
    if roots.is_empty() {
        return records;
    }

    let mut children: FxHashMap<LocalId, Vec<LocalId>> = FxHashMap::default();
    for record in &records {
        if let (Some(id), Some(parent)) = (record.local_id, record.parent_id) {
            children.entry(parent).or_default().push(id);
        }
    }

    let mut removed: FxHashSet<LocalId> = FxHashSet::default();
    let mut queue: VecDeque<LocalId> = roots.iter().copied().collect();
    while let Some(id) = queue.pop_front() {
        for &child in children.get(&id).map(Vec::as_slice).unwrap_or(&[]) {
            if !roots.contains(&child) && removed.insert(child) {
                queue.push_back(child);
            }
        }
    }

    for root in &roots {
        warn!(root, "zero-size root emptied");
    }
    let before = records.len();
    let kept: Vec<ObjectRecord> = records
        .into_iter()
        .filter(|r| r.local_id.is_none_or(|id| !removed.contains(&id)))
        .collect();
    report.emptied_children += before - kept.len();
    report.zero_size_roots.extend(roots);
    kept
}

fn drop_duplicate_ids(
    records: Vec<ObjectRecord>,
    report: &mut ValidationReport,
) -> Vec<ObjectRecord> {
    let mut seen: FxHashSet<LocalId> = FxHashSet::default();
    records
        .into_iter()
        .filter(|record| match record.local_id {
            Some(id) if !seen.insert(id) => {
                warn!(object = id, "duplicate local id, dropped");
                report.duplicate_ids += 1;
                false
            }
            _ => true,
        })
        .collect()
}

/// Skips known-bad types, then drops anything whose parent is gone.
///
/// Input is topologically sorted, so one forward pass sees every parent
/// before its children.
fn skip_known_bad(records: Vec<ObjectRecord>, report: &mut ValidationReport) -> Vec<ObjectRecord> {
    let mut kept_ids: FxHashSet<LocalId> = FxHashSet::default();
    let mut output = Vec::with_capacity(records.len());
    for record in records {
        if KNOWN_BAD_TYPES.contains(&record.type_tag) {
            report.known_bad_skipped += 1;
            continue;
        }
        if let Some(parent) = record.parent_id {
            if !kept_ids.contains(&parent) {
                debug!(object = ?record.local_id, parent, "parent skipped, dropped");
                report.dropped += 1;
                continue;
            }
        }
        if let Some(id) = record.local_id {
            kept_ids.insert(id);
        }
        output.push(record);
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Value;

    fn ids(records: &[ObjectRecord]) -> Vec<Option<LocalId>> {
        records.iter().map(|r| r.local_id).collect()
    }

    fn artboard(id: LocalId, width: f32, height: f32) -> ObjectRecord {
        ObjectRecord::linked(types::ARTBOARD, id, None)
            .with(keys::ARTBOARD_WIDTH, Value::Float(width))
            .with(keys::ARTBOARD_HEIGHT, Value::Float(height))
    }

    #[test]
    fn test_missing_parent_drops_exactly_one() {
        let validated = validate_records(vec![
            artboard(0, 100.0, 100.0),
            ObjectRecord::linked(types::SHAPE, 1, Some(0)),
            ObjectRecord::linked(types::SHAPE, 2, Some(42)),
        ]);
        assert_eq!(validated.report.missing_parents, vec![(2, 42)]);
        assert_eq!(validated.report.dropped, 1);
        assert_eq!(ids(&validated.records), vec![Some(0), Some(1)]);
    }

    #[test]
    fn test_three_node_cycle_is_rejected() {
        let validated = validate_records(vec![
            artboard(0, 10.0, 10.0),
            ObjectRecord::linked(types::NODE, 1, Some(3)),
            ObjectRecord::linked(types::NODE, 2, Some(1)),
            ObjectRecord::linked(types::NODE, 3, Some(2)),
        ]);
        let mut cycle = validated.report.cycle.clone().unwrap();
        cycle.sort();
        assert_eq!(cycle, vec![1, 2, 3]);
        assert_eq!(ids(&validated.records), vec![Some(0)]);
        assert_eq!(validated.report.dropped, 3);
        assert!(validated.report.missing_parents.is_empty());
    }

    #[test]
    fn test_zero_size_root_is_emptied() {
        let validated = validate_records(vec![
            artboard(0, 0.0, 0.0),
            ObjectRecord::linked(types::SHAPE, 1, Some(0)),
            ObjectRecord::linked(types::RECTANGLE, 2, Some(1)),
            ObjectRecord::linked(types::FILL, 3, Some(1)),
            ObjectRecord::unlinked(types::LINEAR_ANIMATION),
        ]);
        assert_eq!(ids(&validated.records), vec![Some(0), None]);
        assert_eq!(validated.report.zero_size_roots, vec![0]);
        assert_eq!(validated.report.emptied_children, 3);
        assert_eq!(validated.report.dropped, 0);
    }

    #[test]
    fn test_root_without_dimensions_is_kept() {
        let validated = validate_records(vec![
            ObjectRecord::linked(types::ARTBOARD, 0, None),
            ObjectRecord::linked(types::SHAPE, 1, Some(0)),
        ]);
        assert_eq!(validated.records.len(), 2);
        assert!(validated.report.is_clean());
    }

    #[test]
    fn test_ordered_input_is_unchanged() {
        let input = vec![
            artboard(0, 10.0, 10.0),
            ObjectRecord::linked(types::SHAPE, 1, Some(0)),
            ObjectRecord::linked(types::ELLIPSE, 2, Some(1)),
            ObjectRecord::linked(types::SHAPE, 3, Some(0)),
            ObjectRecord::unlinked(types::LINEAR_ANIMATION),
        ];
        let validated = validate_records(input.clone());
        assert_eq!(validated.records, input);
        assert_eq!(validated.report.reordered, 0);
        assert!(validated.report.is_clean());
    }

    #[test]
    fn test_children_move_after_parents() {
        let validated = validate_records(vec![
            ObjectRecord::unlinked(types::LINEAR_ANIMATION),
            ObjectRecord::linked(types::ELLIPSE, 2, Some(1)),
            ObjectRecord::linked(types::SHAPE, 1, Some(0)),
            artboard(0, 10.0, 10.0),
        ]);
        assert_eq!(ids(&validated.records), vec![Some(0), Some(1), Some(2), None]);
        assert_eq!(validated.report.reordered, 2);
        assert!(!validated.report.has_issues());
    }

    #[test]
    fn test_trim_path_skip_cascades_to_children() {
        let validated = validate_records(vec![
            artboard(0, 10.0, 10.0),
            ObjectRecord::linked(types::SHAPE, 1, Some(0)),
            ObjectRecord::linked(types::TRIM_PATH, 2, Some(1)),
            ObjectRecord::linked(types::NODE, 3, Some(2)),
        ]);
        assert_eq!(ids(&validated.records), vec![Some(0), Some(1)]);
        assert_eq!(validated.report.known_bad_skipped, 1);
        assert_eq!(validated.report.dropped, 1);
        assert_eq!(validated.report.defaults_injected.get(&types::TRIM_PATH), Some(&4));
    }

    #[test]
    fn test_duplicate_ids_keep_first() {
        let validated = validate_records(vec![
            artboard(0, 10.0, 10.0),
            ObjectRecord::linked(types::SHAPE, 1, Some(0)),
            ObjectRecord::linked(types::NODE, 1, Some(0)),
        ]);
        assert_eq!(validated.records.len(), 2);
        assert_eq!(validated.records[1].type_tag, types::SHAPE);
        assert_eq!(validated.report.duplicate_ids, 1);
    }

    #[test]
    fn test_gradient_stop_is_defaulted_and_kept() {
        let validated = validate_records(vec![
            artboard(0, 10.0, 10.0),
            ObjectRecord::linked(types::LINEAR_GRADIENT, 1, Some(0)),
            ObjectRecord::linked(types::GRADIENT_STOP, 2, Some(1))
                .with(keys::GRADIENT_STOP_COLOR, Value::Color(0xFF00FF00)),
        ]);
        let stop = &validated.records[2];
        assert_eq!(stop.get(keys::GRADIENT_STOP_POSITION), Some(&Value::Float(0.0)));
        assert_eq!(validated.report.dropped, 0);
    }

    #[test]
    fn test_segments_keep_unlinked_records_with_their_root() {
        let validated = validate_segments(vec![
            artboard(0, 10.0, 10.0),
            ObjectRecord::unlinked(types::LINEAR_ANIMATION),
            ObjectRecord::linked(types::SHAPE, 1, Some(0)),
            artboard(2, 0.0, 0.0),
            ObjectRecord::linked(types::SHAPE, 3, Some(2)),
            ObjectRecord::unlinked(types::STATE_MACHINE),
        ]);
        let tags: Vec<u16> = validated.records.iter().map(|r| r.type_tag).collect();
        assert_eq!(
            tags,
            vec![
                types::ARTBOARD,
                types::SHAPE,
                types::LINEAR_ANIMATION,
                types::ARTBOARD,
                types::STATE_MACHINE,
            ]
        );
        assert_eq!(validated.report.zero_size_roots, vec![2]);
        assert_eq!(validated.report.emptied_children, 1);
    }

    #[test]
    fn test_sanitize_document() {
        let document = document_from_records(vec![
            ObjectRecord::linked(types::SHAPE, 1, Some(0)),
            artboard(0, 10.0, 10.0),
            ObjectRecord::linked(types::FEATHER, 2, Some(1)),
        ]);
        let (document, report) = sanitize_document(document);
        let order: Vec<LocalId> = document.objects().iter().map(|b| b.local_id).collect();
        // The shape precedes the root, so it lands in the leading segment
        // and is dropped there; the feather loses its parent with it.
        assert_eq!(order, vec![0]);
        assert_eq!(report.missing_parents, vec![(1, 0), (2, 1)]);
        assert_eq!(report.dropped, 2);
        assert_eq!(report.defaults_injected.get(&types::FEATHER), Some(&4));
    }
}
