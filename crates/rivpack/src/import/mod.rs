//! Importing byte streams into runtime object graphs.
//!
//! The validator does not parse streams itself. It consumes whatever a
//! [`RuntimeImporter`] produces, then re-extracts flat records from the
//! graph with [`extract_records`]. [`StreamImporter`] is the bundled
//! importer.

pub mod extract;
pub mod stream;

use rustc_hash::FxHashMap;

use crate::codec::header::Version;
use crate::error::{DecodeError, ImportFailure};
use crate::model::{Property, RuntimeId, Value};

pub use extract::{extract_records, ExtractionReport, Extracted};
pub use stream::StreamImporter;

/// Tri-state result of an import.
#[derive(Debug, Clone, PartialEq)]
pub enum ImportOutcome {
    Success(RuntimeGraph),
    UnsupportedVersion { major: u8, minor: u8 },
    Malformed(DecodeError),
}

impl ImportOutcome {
    /// Splits the outcome into the graph or the failure, unchanged.
    pub fn into_result(self) -> Result<RuntimeGraph, ImportFailure> {
        match self {
            ImportOutcome::Success(graph) => Ok(graph),
            ImportOutcome::UnsupportedVersion { major, minor } => {
                Err(ImportFailure::UnsupportedVersion { major, minor })
            }
            ImportOutcome::Malformed(err) => Err(ImportFailure::Malformed(err)),
        }
    }
}

impl From<Result<RuntimeGraph, ImportFailure>> for ImportOutcome {
    fn from(result: Result<RuntimeGraph, ImportFailure>) -> Self {
        match result {
            Ok(graph) => ImportOutcome::Success(graph),
            Err(ImportFailure::UnsupportedVersion { major, minor }) => {
                ImportOutcome::UnsupportedVersion { major, minor }
            }
            Err(ImportFailure::Malformed(err)) => ImportOutcome::Malformed(err),
        }
    }
}

/// Parses a byte stream into a runtime object graph.
pub trait RuntimeImporter {
    fn import(&self, bytes: &[u8]) -> ImportOutcome;
}

/// One object of an imported graph.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeObject {
    pub runtime_id: RuntimeId,
    pub type_tag: u16,
    /// True if the record carried an object id.
    pub linked: bool,
    pub parent: Option<RuntimeId>,
    /// Index of the root segment the object was read from.
    pub artboard: usize,
    /// Reference properties hold runtime ids.
    pub properties: Vec<Property>,
}

impl RuntimeObject {
    /// Returns the first value stored under `key`.
    pub fn get(&self, key: u16) -> Option<&Value> {
        self.properties.iter().find(|p| p.key == key).map(|p| &p.value)
    }
}

/// An imported object graph, objects in stream order.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeGraph {
    pub version: Version,
    objects: Vec<RuntimeObject>,
    index: FxHashMap<RuntimeId, usize>,
    /// Reference properties whose stream id had no object in its artboard.
    pub unresolved_references: usize,
}

impl RuntimeGraph {
    /// Creates a graph from objects in stream order.
    pub fn new(version: Version, objects: Vec<RuntimeObject>, unresolved_references: usize) -> Self {
        let index = objects
            .iter()
            .enumerate()
            .map(|(i, object)| (object.runtime_id, i))
            .collect();
        Self {
            version,
            objects,
            index,
            unresolved_references,
        }
    }

    /// Returns the objects in stream order.
    pub fn objects(&self) -> &[RuntimeObject] {
        &self.objects
    }

    /// Looks up an object by runtime id.
    pub fn get(&self, id: RuntimeId) -> Option<&RuntimeObject> {
        self.index.get(&id).map(|&i| &self.objects[i])
    }

    /// Returns the number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns true if the graph has no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Returns the children of `id` in stream order.
    pub fn children_of(&self, id: RuntimeId) -> impl Iterator<Item = &RuntimeObject> {
        self.objects.iter().filter(move |o| o.parent == Some(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_result_conversion() {
        let failure = ImportFailure::UnsupportedVersion { major: 6, minor: 0 };
        let outcome = ImportOutcome::from(Err::<RuntimeGraph, _>(failure.clone()));
        assert_eq!(outcome, ImportOutcome::UnsupportedVersion { major: 6, minor: 0 });
        assert_eq!(outcome.into_result().unwrap_err(), failure);

        let outcome = ImportOutcome::Malformed(DecodeError::VarintTooLong);
        assert_eq!(
            outcome.into_result().unwrap_err(),
            ImportFailure::Malformed(DecodeError::VarintTooLong)
        );
    }
}
