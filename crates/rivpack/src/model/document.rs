//! Build-time document container.

use std::ops::Range;

use rustc_hash::FxHashMap;

use crate::model::{LocalId, PropertyBag};

/// Ordered sequence of bags plus an index of notable objects.
///
/// Append-only while a [`GraphBuilder`](crate::model::GraphBuilder) owns it,
/// frozen once handed out; the encoder consumes it by value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    objects: Vec<PropertyBag>,
    positions: FxHashMap<LocalId, usize>,
    roots: Vec<LocalId>,
}

impl Document {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a document from bags in order.
    ///
    /// If two bags share a local id, lookups resolve to the first.
    pub fn from_bags(bags: Vec<PropertyBag>) -> Self {
        let mut document = Self::new();
        for bag in bags {
            document.push(bag);
        }
        document
    }

    pub(crate) fn push(&mut self, bag: PropertyBag) {
        let position = self.objects.len();
        self.positions.entry(bag.local_id).or_insert(position);
        if bag.is_root() {
            self.roots.push(bag.local_id);
        }
        self.objects.push(bag);
    }

    pub(crate) fn get_mut(&mut self, id: LocalId) -> Option<&mut PropertyBag> {
        let position = *self.positions.get(&id)?;
        self.objects.get_mut(position)
    }

    /// Returns the bags in build order.
    pub fn objects(&self) -> &[PropertyBag] {
        &self.objects
    }

    /// Consumes the document, returning its bags in build order.
    pub fn into_objects(self) -> Vec<PropertyBag> {
        self.objects
    }

    /// Looks up a bag by local id.
    pub fn get(&self, id: LocalId) -> Option<&PropertyBag> {
        self.positions.get(&id).map(|&position| &self.objects[position])
    }

    /// Returns the position of a bag in build order.
    pub fn position_of(&self, id: LocalId) -> Option<usize> {
        self.positions.get(&id).copied()
    }

    /// Returns true if a bag with this id exists.
    pub fn contains(&self, id: LocalId) -> bool {
        self.positions.contains_key(&id)
    }

    /// Returns the ids of root containers in build order.
    pub fn roots(&self) -> &[LocalId] {
        &self.roots
    }

    /// Returns the number of bags.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns true if the document has no bags.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Returns the largest local id in use.
    pub fn max_id(&self) -> Option<LocalId> {
        self.objects.iter().map(|bag| bag.local_id).max()
    }

    /// Splits build order into root segments (see [`split_segments`]).
    pub fn segments(&self) -> Vec<Range<usize>> {
        split_segments(&self.objects, |bag| bag.is_root())
    }
}

/// Splits a sequence into segments, each starting at a root item.
///
/// Items before the first root form a leading segment of their own.
pub fn split_segments<T>(items: &[T], is_root: impl Fn(&T) -> bool) -> Vec<Range<usize>> {
    let mut segments = Vec::new();
    let mut start = 0;
    for (i, item) in items.iter().enumerate() {
        if is_root(item) && i > start {
            segments.push(start..i);
            start = i;
        }
    }
    if start < items.len() {
        segments.push(start..items.len());
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::types;

    #[test]
    fn test_index_and_roots() {
        let doc = Document::from_bags(vec![
            PropertyBag::new(types::ARTBOARD, 0),
            PropertyBag::new(types::SHAPE, 1),
            PropertyBag::new(types::ARTBOARD, 2),
        ]);
        assert_eq!(doc.roots(), &[0, 2]);
        assert_eq!(doc.get(1).map(|b| b.type_tag), Some(types::SHAPE));
        assert_eq!(doc.position_of(2), Some(2));
        assert_eq!(doc.max_id(), Some(2));
        assert!(!doc.contains(7));
    }

    #[test]
    fn test_first_duplicate_wins() {
        let doc = Document::from_bags(vec![
            PropertyBag::new(types::NODE, 4),
            PropertyBag::new(types::SHAPE, 4),
        ]);
        assert_eq!(doc.get(4).map(|b| b.type_tag), Some(types::NODE));
        assert_eq!(doc.len(), 2);
    }

    #[test]
    fn test_split_segments() {
        let tags = [types::BACKBOARD, types::ARTBOARD, types::SHAPE, types::ARTBOARD, types::FILL];
        let segments = split_segments(&tags, |t| *t == types::ARTBOARD);
        assert_eq!(segments, vec![0..1, 1..3, 3..5]);

        let segments = split_segments(&tags[1..], |t| *t == types::ARTBOARD);
        assert_eq!(segments, vec![0..2, 2..4]);

        let empty: [u16; 0] = [];
        assert!(split_segments(&empty, |_| true).is_empty());
    }
}
