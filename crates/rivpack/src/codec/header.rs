//! Stream preamble and header dictionary.
//!
//! Layout:
//! ```text
//! "RIVE" | major: u8 | minor: u8 | doc id: varint
//! key: varint ... 0                      (ascending, deduplicated)
//! ceil(n / 4) x u32 LE                    (2-bit wire code per key)
//! ```

use rustc_hash::FxHashMap;

use crate::codec::primitives::{Reader, Writer};
use crate::error::{DecodeError, ImportFailure};
use crate::limits::{DOCUMENT_ID, MAGIC, MAJOR_VERSION, MAX_HEADER_KEYS, MINOR_VERSION};
use crate::registry::WireKind;

/// Keys packed per bitmap word.
pub const CODES_PER_WORD: usize = 4;

/// Format version read from a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Version {
    pub major: u8,
    pub minor: u8,
}

/// Parsed header dictionary: each declared key with its wire code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderDictionary {
    keys: Vec<u16>,
    kinds: FxHashMap<u16, WireKind>,
}

impl HeaderDictionary {
    /// Builds a dictionary from `(key, kind)` pairs sorted by key.
    pub fn from_entries(entries: &[(u16, WireKind)]) -> Self {
        Self {
            keys: entries.iter().map(|(key, _)| *key).collect(),
            kinds: entries.iter().copied().collect(),
        }
    }

    /// Returns the declared keys in header order.
    pub fn keys(&self) -> &[u16] {
        &self.keys
    }

    /// Returns the wire kind declared for `key`.
    ///
    /// Uint and bool share a code, so a declared uint may carry a bool.
    pub fn kind_of(&self, key: u16) -> Option<WireKind> {
        self.kinds.get(&key).copied()
    }

    /// Returns true if `key` is declared.
    pub fn contains(&self, key: u16) -> bool {
        self.kinds.contains_key(&key)
    }

    /// Returns the number of declared keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns true if no keys are declared.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Packs 2-bit codes four per word, first code in bits 0-1.
pub fn pack_codes(codes: &[u8]) -> Vec<u32> {
    codes
        .chunks(CODES_PER_WORD)
        .map(|chunk| {
            chunk
                .iter()
                .enumerate()
                .fold(0u32, |word, (i, code)| word | ((*code as u32 & 0b11) << (i * 2)))
        })
        .collect()
}

/// Unpacks `count` 2-bit codes from bitmap words.
pub fn unpack_codes(words: &[u32], count: usize) -> Vec<u8> {
    (0..count)
        .map(|i| {
            let word = words.get(i / CODES_PER_WORD).copied().unwrap_or(0);
            ((word >> ((i % CODES_PER_WORD) * 2)) & 0b11) as u8
        })
        .collect()
}

/// Writes the signature, version and document id.
pub fn write_preamble(writer: &mut Writer) {
    writer.write_bytes(MAGIC);
    writer.write_byte(MAJOR_VERSION);
    writer.write_byte(MINOR_VERSION);
    writer.write_varint(DOCUMENT_ID);
}

/// Writes the key list, its terminator and the bitmap words.
///
/// `entries` must be sorted by key and must not contain key 0.
pub fn write_dictionary(writer: &mut Writer, entries: &[(u16, WireKind)]) {
    write_keys(writer, entries);
    write_bitmap(writer, entries);
}

/// Writes the key list and its terminator.
pub fn write_keys(writer: &mut Writer, entries: &[(u16, WireKind)]) {
    for (key, _) in entries {
        writer.write_varint(*key as u64);
    }
    writer.write_varint(0);
}

/// Writes the wire-code bitmap words.
pub fn write_bitmap(writer: &mut Writer, entries: &[(u16, WireKind)]) {
    let codes: Vec<u8> = entries.iter().map(|(_, kind)| kind.code()).collect();
    for word in pack_codes(&codes) {
        writer.write_u32_le(word);
    }
}

/// Reads and checks the signature and version.
///
/// A major version other than the one this crate writes is unsupported;
/// any minor version is accepted.
pub fn read_preamble(reader: &mut Reader<'_>) -> Result<Version, ImportFailure> {
    let magic: [u8; 4] = reader.read_array("magic")?;
    if &magic != MAGIC {
        return Err(DecodeError::InvalidMagic { found: magic }.into());
    }
    let major = reader.read_byte("major version")?;
    let minor = reader.read_byte("minor version")?;
    if major != MAJOR_VERSION {
        return Err(ImportFailure::UnsupportedVersion { major, minor });
    }
    reader.read_varint("document id")?;
    Ok(Version { major, minor })
}

/// Reads the key list and bitmap words.
pub fn read_dictionary(reader: &mut Reader<'_>) -> Result<HeaderDictionary, DecodeError> {
    let mut keys = Vec::new();
    loop {
        let key = reader.read_varint_u16("header key")?;
        if key == 0 {
            break;
        }
        if keys.len() == MAX_HEADER_KEYS {
            return Err(DecodeError::LengthExceedsLimit {
                field: "header keys",
                len: keys.len() + 1,
                max: MAX_HEADER_KEYS,
            });
        }
        keys.push(key);
    }

    let word_count = keys.len().div_ceil(CODES_PER_WORD);
    let mut words = Vec::with_capacity(word_count);
    for _ in 0..word_count {
        words.push(reader.read_u32_le("header bitmap")?);
    }

    let mut kinds = FxHashMap::default();
    for (key, code) in keys.iter().zip(unpack_codes(&words, keys.len())) {
        let kind = WireKind::from_code(code).ok_or(DecodeError::InvalidWireCode { key: *key, code })?;
        kinds.insert(*key, kind);
    }
    Ok(HeaderDictionary { keys, kinds })
}
