//! Required-property defaulting.
//!
//! Some producers omit properties the runtime requires to be present even
//! when they hold their default value. Missing ones are injected here;
//! values already present are never touched, so injection is idempotent.

use std::collections::BTreeMap;

use crate::model::{ObjectRecord, Property, Value};
use crate::registry::{keys, types};

/// Required `(key, default)` pairs per type tag.
static REQUIRED_DEFAULTS: &[(u16, &[(u16, Value)])] = &[
    (
        types::TRIM_PATH,
        &[
            (keys::TRIM_START, Value::Float(0.0)),
            (keys::TRIM_END, Value::Float(0.0)),
            (keys::TRIM_OFFSET, Value::Float(0.0)),
            (keys::TRIM_MODE, Value::Uint(0)),
        ],
    ),
    (
        types::FEATHER,
        &[
            (keys::FEATHER_STRENGTH, Value::Float(12.0)),
            (keys::FEATHER_OFFSET_X, Value::Float(0.0)),
            (keys::FEATHER_OFFSET_Y, Value::Float(0.0)),
            (keys::FEATHER_INNER, Value::Bool(false)),
        ],
    ),
    (
        types::GRADIENT_STOP,
        &[
            (keys::GRADIENT_STOP_COLOR, Value::Color(0xFFFF_FFFF)),
            (keys::GRADIENT_STOP_POSITION, Value::Float(0.0)),
        ],
    ),
];

/// Returns the required properties of a type, empty if it has none.
pub fn required_defaults(tag: u16) -> &'static [(u16, Value)] {
    REQUIRED_DEFAULTS
        .iter()
        .find(|(t, _)| *t == tag)
        .map(|(_, defaults)| *defaults)
        .unwrap_or(&[])
}

/// Injects missing required properties, counting injections per type tag.
pub fn inject_defaults(records: &mut [ObjectRecord], injected: &mut BTreeMap<u16, usize>) {
    for record in records {
        for (key, default) in required_defaults(record.type_tag) {
            if !record.has(*key) {
                record.properties.push(Property {
                    key: *key,
                    value: default.clone(),
                });
                *injected.entry(record.type_tag).or_insert(0) += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gradient_stop_position_defaults_to_zero() {
        let mut records = vec![ObjectRecord::linked(types::GRADIENT_STOP, 4, Some(3))
            .with(keys::GRADIENT_STOP_COLOR, Value::Color(0xFF0000FF))];
        let mut injected = BTreeMap::new();
        inject_defaults(&mut records, &mut injected);

        assert_eq!(records[0].get(keys::GRADIENT_STOP_POSITION), Some(&Value::Float(0.0)));
        assert_eq!(records[0].get(keys::GRADIENT_STOP_COLOR), Some(&Value::Color(0xFF0000FF)));
        assert_eq!(injected.get(&types::GRADIENT_STOP), Some(&1));
    }

    #[test]
    fn test_feather_defaults() {
        let mut records = vec![ObjectRecord::linked(types::FEATHER, 1, Some(0))];
        let mut injected = BTreeMap::new();
        inject_defaults(&mut records, &mut injected);
        assert_eq!(records[0].get(keys::FEATHER_STRENGTH), Some(&Value::Float(12.0)));
        assert_eq!(records[0].get(keys::FEATHER_INNER), Some(&Value::Bool(false)));
        assert_eq!(injected.get(&types::FEATHER), Some(&4));
    }

    #[test]
    fn test_second_pass_injects_nothing() {
        let mut records = vec![
            ObjectRecord::linked(types::TRIM_PATH, 1, Some(0)).with(keys::TRIM_END, Value::Float(0.5)),
            ObjectRecord::linked(types::SHAPE, 2, Some(0)),
        ];
        let mut first = BTreeMap::new();
        inject_defaults(&mut records, &mut first);
        assert_eq!(first.get(&types::TRIM_PATH), Some(&3));
        assert_eq!(records[0].get(keys::TRIM_END), Some(&Value::Float(0.5)));

        let snapshot = records.clone();
        let mut second = BTreeMap::new();
        inject_defaults(&mut records, &mut second);
        assert!(second.is_empty());
        assert_eq!(records, snapshot);
    }

    #[test]
    fn test_types_without_requirements() {
        assert!(required_defaults(types::SHAPE).is_empty());
        assert_eq!(required_defaults(types::GRADIENT_STOP).len(), 2);
    }
}
