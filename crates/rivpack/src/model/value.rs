//! Typed property values.

use crate::registry::WireKind;

/// A property value carried by a bag or record.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Uint(u32),
    Float(f32),
    /// RGBA packed little-endian: `r | g << 8 | b << 16 | a << 24`.
    Color(u32),
    String(String),
    Bytes(Vec<u8>),
    Bool(bool),
}

/// Result of fitting a value to the wire kind its key is registered with.
#[derive(Debug, Clone, PartialEq)]
pub enum Coercion<'a> {
    /// The value already has the registered kind.
    Exact(&'a Value),
    /// The value was losslessly converted.
    Converted(Value),
    /// No lossless conversion exists.
    Incompatible,
}

impl Value {
    /// Returns the wire kind this value encodes as without conversion.
    pub fn natural_kind(&self) -> WireKind {
        match self {
            Value::Uint(_) => WireKind::Uint,
            Value::Float(_) => WireKind::Float,
            Value::Color(_) => WireKind::Color,
            Value::String(_) | Value::Bytes(_) => WireKind::String,
            Value::Bool(_) => WireKind::Bool,
        }
    }

    /// Fits this value to `kind`, converting only when nothing is lost.
    pub fn coerce(&self, kind: WireKind) -> Coercion<'_> {
        if self.natural_kind() == kind {
            return Coercion::Exact(self);
        }
        let converted = match (self, kind) {
            (Value::Bool(b), WireKind::Uint) => Some(Value::Uint(*b as u32)),
            (Value::Uint(v), WireKind::Bool) if *v <= 1 => Some(Value::Bool(*v == 1)),
            (Value::Uint(v), WireKind::Float) if *v <= (1 << 24) => Some(Value::Float(*v as f32)),
            (Value::Uint(v), WireKind::Color) => Some(Value::Color(*v)),
            (Value::Color(v), WireKind::Uint) => Some(Value::Uint(*v)),
            (Value::Float(v), WireKind::Uint)
                if v.is_finite() && *v >= 0.0 && v.fract() == 0.0 && *v <= u32::MAX as f32 =>
            {
                Some(Value::Uint(*v as u32))
            }
            _ => None,
        };
        match converted {
            Some(value) => Coercion::Converted(value),
            None => Coercion::Incompatible,
        }
    }

    /// Returns the value as a float if it is numeric.
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Value::Float(v) => Some(*v),
            Value::Uint(v) => Some(*v as f32),
            _ => None,
        }
    }

    /// Returns the value as an unsigned integer if it is integral.
    pub fn as_u32(&self) -> Option<u32> {
        match self {
            Value::Uint(v) | Value::Color(v) => Some(*v),
            Value::Bool(b) => Some(*b as u32),
            _ => None,
        }
    }

    /// Returns the string payload, if any.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

/// Packs RGBA channels into a colour value.
pub fn color_from_rgba(r: u8, g: u8, b: u8, a: u8) -> u32 {
    u32::from_le_bytes([r, g, b, a])
}

/// Unpacks a colour value into `[r, g, b, a]`.
pub fn color_rgba(color: u32) -> [u8; 4] {
    color.to_le_bytes()
}

/// Parses `#RRGGBB` or `#RRGGBBAA` (the leading `#` is optional).
pub fn parse_color(s: &str) -> Option<u32> {
    let hex = s.strip_prefix('#').unwrap_or(s);
    if !matches!(hex.len(), 6 | 8) || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    let alpha = if hex.len() == 8 { channel(6)? } else { 0xFF };
    Some(color_from_rgba(channel(0)?, channel(2)?, channel(4)?, alpha))
}

/// Formats a colour value as `#RRGGBBAA`.
pub fn format_color(color: u32) -> String {
    let [r, g, b, a] = color_rgba(color);
    format!("#{:02x}{:02x}{:02x}{:02x}", r, g, b, a)
}
