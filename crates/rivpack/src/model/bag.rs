//! Property bags: one per graph object.

use crate::model::{LocalId, Value};
use crate::registry;

/// A `(key, value)` pair on a bag.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub key: u16,
    pub value: Value,
}

/// In-memory representation of one graph object.
///
/// Properties keep insertion order; duplicate keys are allowed and are all
/// written by the encoder (its sort is stable and does not deduplicate).
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyBag {
    pub type_tag: u16,
    /// Build-time id. Id 0 is reserved for the document root.
    pub local_id: LocalId,
    /// `None` for roots and for unlinked records.
    pub parent_id: Option<LocalId>,
    /// True if the bag participates in the parent graph and is written with
    /// an object id. Defaults to the registry role of the tag.
    pub linked: bool,
    pub properties: Vec<Property>,
}

impl PropertyBag {
    /// Creates an empty bag, linked according to the registry role of its tag.
    pub fn new(type_tag: u16, local_id: LocalId) -> Self {
        Self {
            type_tag,
            local_id,
            parent_id: None,
            linked: registry::is_linked(type_tag),
            properties: Vec::new(),
        }
    }

    /// Overrides the registry linkage, e.g. for tags the registry does not know.
    pub fn set_linked(&mut self, linked: bool) -> &mut Self {
        self.linked = linked;
        self
    }

    /// Records the parent back-reference. Not validated here.
    pub fn set_parent(&mut self, parent_id: LocalId) -> &mut Self {
        self.parent_id = Some(parent_id);
        self
    }

    /// Appends a property. An existing entry for the same key is kept.
    pub fn set(&mut self, key: u16, value: Value) -> &mut Self {
        self.properties.push(Property { key, value });
        self
    }

    /// Returns the first value stored under `key`.
    pub fn get(&self, key: u16) -> Option<&Value> {
        self.properties.iter().find(|p| p.key == key).map(|p| &p.value)
    }

    /// Returns true if any value is stored under `key`.
    pub fn has(&self, key: u16) -> bool {
        self.properties.iter().any(|p| p.key == key)
    }

    /// Returns true if this bag participates in the parent graph.
    pub fn is_linked(&self) -> bool {
        self.linked
    }

    /// Returns true if this bag anchors a parent graph.
    pub fn is_root(&self) -> bool {
        registry::is_root(self.type_tag)
    }

    /// Returns the properties sorted by key, preserving order among equal keys.
    pub fn sorted_properties(&self) -> Vec<&Property> {
        let mut sorted: Vec<&Property> = self.properties.iter().collect();
        sorted.sort_by_key(|p| p.key);
        sorted
    }
}
