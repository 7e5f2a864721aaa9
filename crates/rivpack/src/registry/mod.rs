//! Static type and property registry.
//!
//! Maps property keys to their wire encoding and type tags to display names
//! and graph roles. The tables are process-wide and read-only; lookups are
//! total, so unknown keys and tags degrade to safe defaults instead of
//! failing (streams may carry keys this crate does not know yet).

pub mod keys;
pub mod types;

use lazy_static::lazy_static;
use rustc_hash::FxHashMap;

/// On-the-wire encoding discipline of a property value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WireKind {
    /// Varint.
    Uint,
    /// 4-byte IEEE-754 little-endian.
    Float,
    /// 4-byte little-endian integer whose bytes are RGBA.
    Color,
    /// Varint length prefix followed by raw bytes.
    String,
    /// Varint 0 or 1.
    Bool,
}

impl WireKind {
    /// Returns the 2-bit code written in the header bitmap.
    ///
    /// Bool shares the uint code because both are varints.
    pub fn code(self) -> u8 {
        match self {
            WireKind::Uint | WireKind::Bool => 0,
            WireKind::String => 1,
            WireKind::Float => 2,
            WireKind::Color => 3,
        }
    }

    /// Returns the wire kind for a 2-bit header code.
    pub fn from_code(code: u8) -> Option<WireKind> {
        match code {
            0 => Some(WireKind::Uint),
            1 => Some(WireKind::String),
            2 => Some(WireKind::Float),
            3 => Some(WireKind::Color),
            _ => None,
        }
    }
}

/// Role of a type in the object graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeRole {
    /// Artboard: anchors a parent graph, stream id 0.
    Root,
    /// Plain transform container.
    Container,
    /// The structural wrapper paths must live under.
    ShapeContainer,
    /// Drawable path; requires a shape container parent.
    Path,
    /// Path geometry.
    Vertex,
    /// Fill or stroke.
    Paint,
    /// Colour or gradient feeding a paint.
    PaintSource,
    /// Gradient colour stop.
    GradientStop,
    /// Paint effect (trim, feather).
    Effect,
    /// Clipping and similar modifiers.
    Modifier,
    /// Animation records (order-nested, not linked).
    Animation,
    /// State machine records (order-nested, not linked).
    StateMachine,
    /// Standalone metadata record.
    Metadata,
}

impl TypeRole {
    /// Returns true if objects of this role carry id/parent linkage.
    pub fn is_linked(self) -> bool {
        !matches!(
            self,
            TypeRole::Animation | TypeRole::StateMachine | TypeRole::Metadata
        )
    }
}

/// Static description of a property key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyDef {
    pub key: u16,
    pub name: &'static str,
    pub kind: WireKind,
}

/// Static description of a type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeDef {
    pub tag: u16,
    /// Display name used in diagnostics.
    pub name: &'static str,
    /// Name used by the JSON scene format.
    pub scene_name: &'static str,
    pub role: TypeRole,
    /// Keys this type declares, inherited ones included.
    pub properties: &'static [u16],
}

impl TypeDef {
    /// Looks up one of this type's keys by property name.
    pub fn key_named(&self, name: &str) -> Option<u16> {
        self.properties
            .iter()
            .copied()
            .find(|key| property_def(*key).is_some_and(|def| def.name == name))
    }
}

lazy_static! {
    static ref TYPES: FxHashMap<u16, &'static TypeDef> =
        types::TYPE_DEFS.iter().map(|def| (def.tag, def)).collect();
    static ref TYPES_BY_SCENE_NAME: FxHashMap<&'static str, &'static TypeDef> =
        types::TYPE_DEFS.iter().map(|def| (def.scene_name, def)).collect();
    static ref PROPERTIES: FxHashMap<u16, &'static PropertyDef> =
        keys::PROPERTY_DEFS.iter().map(|def| (def.key, def)).collect();
}

/// Returns the wire kind of a property key, defaulting to uint for unknown keys.
pub fn wire_kind_of(key: u16) -> WireKind {
    PROPERTIES.get(&key).map(|def| def.kind).unwrap_or(WireKind::Uint)
}

/// Returns the display name of a type tag, or "Unknown".
pub fn display_name_of(tag: u16) -> &'static str {
    TYPES.get(&tag).map(|def| def.name).unwrap_or("Unknown")
}

/// Returns the static definition of a type tag.
pub fn type_def(tag: u16) -> Option<&'static TypeDef> {
    TYPES.get(&tag).copied()
}

/// Returns the static definition of a property key.
pub fn property_def(key: u16) -> Option<&'static PropertyDef> {
    PROPERTIES.get(&key).copied()
}

/// Returns the type with the given JSON scene name.
pub fn type_by_scene_name(name: &str) -> Option<&'static TypeDef> {
    TYPES_BY_SCENE_NAME.get(name).copied()
}

/// Looks up the key a type uses for a named property.
pub fn property_key_for(tag: u16, name: &str) -> Option<u16> {
    type_def(tag).and_then(|def| def.key_named(name))
}

/// Returns true if objects of this type carry id/parent linkage.
///
/// Unknown tags are treated as unlinked.
pub fn is_linked(tag: u16) -> bool {
    type_def(tag).is_some_and(|def| def.role.is_linked())
}

/// Returns true if this type anchors its own parent graph.
pub fn is_root(tag: u16) -> bool {
    type_def(tag).is_some_and(|def| def.role == TypeRole::Root)
}

/// Returns true if the key's value references another object.
pub fn is_reference_key(key: u16) -> bool {
    keys::REFERENCE_KEYS.contains(&key)
}
