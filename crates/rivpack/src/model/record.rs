//! Flat object records consumed by the validator.

use crate::model::{Document, LocalId, Property, PropertyBag, Value};
use crate::registry;

/// One object in a flat list, as extracted from a decoded graph or read
/// from an externally produced record list.
///
/// `local_id` is `None` for non-graph metadata records.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectRecord {
    pub type_tag: u16,
    pub local_id: Option<LocalId>,
    pub parent_id: Option<LocalId>,
    pub properties: Vec<Property>,
}

impl ObjectRecord {
    /// Creates a linked record.
    pub fn linked(type_tag: u16, local_id: LocalId, parent_id: Option<LocalId>) -> Self {
        Self {
            type_tag,
            local_id: Some(local_id),
            parent_id,
            properties: Vec::new(),
        }
    }

    /// Creates a record outside the parent graph.
    pub fn unlinked(type_tag: u16) -> Self {
        Self {
            type_tag,
            local_id: None,
            parent_id: None,
            properties: Vec::new(),
        }
    }

    /// Appends a property.
    pub fn with(mut self, key: u16, value: Value) -> Self {
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

    /// Returns true if this record is a root container.
    pub fn is_root(&self) -> bool {
        registry::is_root(self.type_tag)
    }
}

impl From<&PropertyBag> for ObjectRecord {
    fn from(bag: &PropertyBag) -> Self {
        let linked = bag.is_linked();
        Self {
            type_tag: bag.type_tag,
            local_id: linked.then_some(bag.local_id),
            parent_id: if linked { bag.parent_id } else { None },
            properties: bag.properties.clone(),
        }
    }
}

/// Builds a document from records, giving unlinked records fresh ids past
/// the largest id in use.
///
/// A record is linked exactly when it carries a local id, whatever its tag.
pub fn document_from_records(records: Vec<ObjectRecord>) -> Document {
    let mut next_id = records
        .iter()
        .filter_map(|r| r.local_id)
        .max()
        .map_or(0, |max| max + 1);

    let bags = records
        .into_iter()
        .map(|record| {
            let local_id = record.local_id.unwrap_or_else(|| {
                let id = next_id;
                next_id += 1;
                id
            });
            PropertyBag {
                type_tag: record.type_tag,
                local_id,
                parent_id: record.parent_id,
                linked: record.local_id.is_some(),
                properties: record.properties,
            }
        })
        .collect();
    Document::from_bags(bags)
}

/// Converts every bag of a document into a record.
pub fn records_from_document(document: &Document) -> Vec<ObjectRecord> {
    document.objects().iter().map(ObjectRecord::from).collect()
}
