//! Flat record list JSON.
//!
//! ```json
//! {"objects": [
//!   {"type": 1, "typeName": "Artboard", "id": 0, "properties": [
//!     {"key": 7, "name": "width", "kind": "float", "value": 500.0}
//!   ]},
//!   {"type": "shape", "id": 1, "parent": 0}
//! ]}
//! ```
//!
//! `type` is a type tag or a scene type name. A property's `kind` is
//! optional on input; without it the registered kind of `key` applies.
//! Colours are written as `#rrggbbaa`, bytes as arrays of numbers.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::SceneError;
use crate::model::{format_color, LocalId, ObjectRecord, Property, Value};
use crate::registry::{self, WireKind};
use crate::scene::{shape_error, value_from_json};

/// Parses a record list.
pub fn parse_records(text: &str) -> Result<Vec<ObjectRecord>, SceneError> {
    records_from_json_value(serde_json::from_str(text)?)
}

pub(crate) fn records_from_json_value(value: JsonValue) -> Result<Vec<ObjectRecord>, SceneError> {
    let list: RecordList = serde_json::from_value(value)?;
    list.objects
        .into_iter()
        .enumerate()
        .map(|(i, record)| record.into_record(i))
        .collect()
}

/// Renders records as pretty-printed JSON.
pub fn records_to_json(records: &[ObjectRecord]) -> Result<String, SceneError> {
    let list = RecordList {
        objects: records.iter().map(RecordJson::from_record).collect(),
    };
    Ok(serde_json::to_string_pretty(&list)?)
}

fn value_to_json(value: &Value) -> JsonValue {
    match value {
        Value::Uint(v) => JsonValue::from(*v),
        Value::Float(v) => JsonValue::from(f64::from(*v)),
        Value::Color(v) => JsonValue::from(format_color(*v)),
        Value::String(s) => JsonValue::from(s.as_str()),
        Value::Bytes(bytes) => JsonValue::from(bytes.clone()),
        Value::Bool(b) => JsonValue::from(*b),
    }
}

// =========================================================================
// JSON schema (serde)
// =========================================================================

#[derive(Debug, Serialize, Deserialize)]
struct RecordList {
    objects: Vec<RecordJson>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum TypeRef {
    Tag(u16),
    Name(String),
}

#[derive(Debug, Serialize, Deserialize)]
struct RecordJson {
    #[serde(rename = "type")]
    type_ref: TypeRef,
    #[serde(rename = "typeName", default, skip_serializing_if = "Option::is_none")]
    type_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<LocalId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    parent: Option<LocalId>,
    #[serde(default)]
    properties: Vec<PropertyJson>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum KindJson {
    Uint,
    Float,
    Color,
    String,
    Bytes,
    Bool,
}

#[derive(Debug, Serialize, Deserialize)]
struct PropertyJson {
    key: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    kind: Option<KindJson>,
    value: JsonValue,
}

impl KindJson {
    fn of(value: &Value) -> Self {
        match value {
            Value::Uint(_) => KindJson::Uint,
            Value::Float(_) => KindJson::Float,
            Value::Color(_) => KindJson::Color,
            Value::String(_) => KindJson::String,
            Value::Bytes(_) => KindJson::Bytes,
            Value::Bool(_) => KindJson::Bool,
        }
    }

    fn wire_kind(self) -> Option<WireKind> {
        match self {
            KindJson::Uint => Some(WireKind::Uint),
            KindJson::Float => Some(WireKind::Float),
            KindJson::Color => Some(WireKind::Color),
            KindJson::String => Some(WireKind::String),
            KindJson::Bool => Some(WireKind::Bool),
            KindJson::Bytes => None,
        }
    }
}

impl RecordJson {
    fn from_record(record: &ObjectRecord) -> Self {
        Self {
            type_ref: TypeRef::Tag(record.type_tag),
            type_name: Some(registry::display_name_of(record.type_tag).to_owned()),
            id: record.local_id,
            parent: record.parent_id,
            properties: record
                .properties
                .iter()
                .map(|p| PropertyJson {
                    key: p.key,
                    name: registry::property_def(p.key).map(|def| def.name.to_owned()),
                    kind: Some(KindJson::of(&p.value)),
                    value: value_to_json(&p.value),
                })
                .collect(),
        }
    }

    fn into_record(self, index: usize) -> Result<ObjectRecord, SceneError> {
        let context = format!("record {index}");
        let type_tag = match self.type_ref {
            TypeRef::Tag(tag) => tag,
            TypeRef::Name(name) => registry::type_by_scene_name(&name)
                .map(|def| def.tag)
                .ok_or_else(|| shape_error(&context, format!("unknown type name {name:?}")))?,
        };
        let mut properties = Vec::with_capacity(self.properties.len());
        for property in self.properties {
            let value = match property.kind.map(KindJson::wire_kind) {
                Some(None) => bytes_from_json(&property.value).map(Value::Bytes),
                Some(Some(kind)) => value_from_json(kind, &property.value),
                None => value_from_json(registry::wire_kind_of(property.key), &property.value),
            }
            .map_err(|message| shape_error(&context, format!("key {}: {message}", property.key)))?;
            properties.push(Property {
                key: property.key,
                value,
            });
        }
        Ok(ObjectRecord {
            type_tag,
            local_id: self.id,
            parent_id: self.parent,
            properties,
        })
    }
}

fn bytes_from_json(json: &JsonValue) -> Result<Vec<u8>, String> {
    json.as_array()
        .and_then(|items| {
            items
                .iter()
                .map(|item| item.as_u64().and_then(|b| u8::try_from(b).ok()))
                .collect::<Option<Vec<u8>>>()
        })
        .ok_or_else(|| format!("expected byte array, found {json}"))
}
