//! Builder API for document graph construction.
//!
//! Allocates monotonic local ids, records parent links and property values,
//! and on [`GraphBuilder::finish`] runs the shape-wrapper rewrite.
//!
//! # Example
//!
//! ```rust
//! use rivpack::model::GraphBuilder;
//! use rivpack::registry::{keys, types};
//!
//! let mut builder = GraphBuilder::new();
//! let artboard = builder
//!     .add_with(types::ARTBOARD, None, |o| {
//!         o.float(keys::ARTBOARD_WIDTH, 500.0).float(keys::ARTBOARD_HEIGHT, 500.0)
//!     })
//!     .unwrap();
//! builder
//!     .add_with(types::RECTANGLE, Some(artboard), |o| {
//!         o.float(keys::PATH_WIDTH, 100.0).float(keys::PATH_HEIGHT, 50.0)
//!     })
//!     .unwrap();
//!
//! let built = builder.finish();
//! // The rectangle was wrapped in a shape.
//! assert_eq!(built.document.len(), 3);
//! assert_eq!(built.report.wrappers_inserted, 1);
//! ```

use tracing::warn;

use crate::error::BuildError;
use crate::model::{rewrite, Document, LocalId, Property, PropertyBag, Value};
use crate::registry;

/// Counters collected while building.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Objects in the finished document, wrappers included.
    pub objects: usize,
    /// Objects not created because their type tag is unknown.
    pub skipped_types: usize,
    /// Shape wrappers synthesized around paths.
    pub wrappers_inserted: usize,
    /// Input properties ignored because their name is unknown for the type.
    pub unknown_properties: usize,
    /// Input parent or target references naming no known object.
    pub unresolved_links: usize,
}

impl BuildReport {
    /// Returns true if any input was skipped or left unresolved.
    pub fn has_issues(&self) -> bool {
        self.skipped_types > 0 || self.unknown_properties > 0 || self.unresolved_links > 0
    }
}

/// A finished document and its build report.
#[derive(Debug, Clone)]
pub struct Built {
    pub document: Document,
    pub report: BuildReport,
}

/// Builder for constructing a [`Document`].
#[derive(Debug, Default)]
pub struct GraphBuilder {
    document: Document,
    next_id: LocalId,
    report: BuildReport,
}

impl GraphBuilder {
    /// Creates an empty builder. The first object gets local id 0.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Object Construction
    // =========================================================================

    /// Appends an empty object of `tag` and returns its local id.
    ///
    /// Unknown tags are logged and counted; the builder stays usable.
    pub fn add_object(&mut self, tag: u16) -> Result<LocalId, BuildError> {
        if registry::type_def(tag).is_none() {
            warn!(tag, "skipping object with unknown type tag");
            self.report.skipped_types += 1;
            return Err(BuildError::UnknownTypeTag { tag });
        }
        let id = self.next_id;
        self.next_id += 1;
        self.document.push(PropertyBag::new(tag, id));
        Ok(id)
    }

    /// Appends an object under `parent` and fills it through an [`ObjectBuilder`].
    pub fn add_with<F>(
        &mut self,
        tag: u16,
        parent: Option<LocalId>,
        f: F,
    ) -> Result<LocalId, BuildError>
    where
        F: FnOnce(ObjectBuilder) -> ObjectBuilder,
    {
        let id = self.add_object(tag)?;
        let built = f(ObjectBuilder::default());
        let bag = self
            .document
            .get_mut(id)
            .ok_or(BuildError::UnknownObject { id })?;
        bag.parent_id = parent;
        bag.properties.extend(built.properties);
        Ok(id)
    }

    /// Records `parent` as the parent of `id`.
    ///
    /// The parent is not checked; dangling links are caught by validation.
    pub fn set_parent(&mut self, id: LocalId, parent: LocalId) -> Result<(), BuildError> {
        self.object_mut(id)?.set_parent(parent);
        Ok(())
    }

    /// Appends a property to `id`. Existing values for `key` are kept.
    pub fn set_property(&mut self, id: LocalId, key: u16, value: Value) -> Result<(), BuildError> {
        self.object_mut(id)?.set(key, value);
        Ok(())
    }

    /// Returns a mutable reference to an allocated object.
    pub fn object_mut(&mut self, id: LocalId) -> Result<&mut PropertyBag, BuildError> {
        self.document
            .get_mut(id)
            .ok_or(BuildError::UnknownObject { id })
    }

    /// Returns an allocated object.
    pub fn object(&self, id: LocalId) -> Option<&PropertyBag> {
        self.document.get(id)
    }

    /// Counts an input property that could not be mapped to a key.
    pub fn note_unknown_property(&mut self) {
        self.report.unknown_properties += 1;
    }

    /// Counts an input object skipped before a type tag was known.
    pub fn note_skipped_type(&mut self) {
        self.report.skipped_types += 1;
    }

    /// Counts an input reference that named no known object.
    pub fn note_unresolved_link(&mut self) {
        self.report.unresolved_links += 1;
    }

    /// Returns the id the next object will get.
    pub fn next_id(&self) -> LocalId {
        self.next_id
    }

    /// Returns the number of objects allocated so far.
    pub fn len(&self) -> usize {
        self.document.len()
    }

    /// Returns true if nothing has been allocated.
    pub fn is_empty(&self) -> bool {
        self.document.is_empty()
    }

    // =========================================================================
    // Build
    // =========================================================================

    /// Runs the wrapper rewrite and freezes the document.
    pub fn finish(self) -> Built {
        let Self {
            document,
            mut next_id,
            mut report,
        } = self;
        let (document, inserted) = rewrite::inject_wrappers(document, &mut next_id);
        report.wrappers_inserted = inserted;
        report.objects = document.len();
        Built { document, report }
    }
}

/// Collects property values for one object.
#[derive(Debug, Clone, Default)]
pub struct ObjectBuilder {
    properties: Vec<Property>,
}

impl ObjectBuilder {
    /// Adds a value of any kind.
    pub fn value(mut self, key: u16, value: Value) -> Self {
        self.properties.push(Property { key, value });
        self
    }

    /// Adds a float value.
    pub fn float(self, key: u16, value: f32) -> Self {
        self.value(key, Value::Float(value))
    }

    /// Adds an unsigned integer value.
    pub fn uint(self, key: u16, value: u32) -> Self {
        self.value(key, Value::Uint(value))
    }

    /// Adds an RGBA colour value.
    pub fn color(self, key: u16, value: u32) -> Self {
        self.value(key, Value::Color(value))
    }

    /// Adds a string value.
    pub fn string(self, key: u16, value: impl Into<String>) -> Self {
        self.value(key, Value::String(value.into()))
    }

    /// Adds a boolean value.
    pub fn bool(self, key: u16, value: bool) -> Self {
        self.value(key, Value::Bool(value))
    }
}
