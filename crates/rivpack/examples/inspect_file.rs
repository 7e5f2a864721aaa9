//! Simple inspector for RIVE container files.

use std::fs;

use rivpack::codec::header::{read_dictionary, read_preamble};
use rivpack::codec::{format_digest, stream_digest, Reader};
use rivpack::model::format_color;
use rivpack::registry;
use rivpack::{decode_and_validate, StreamImporter, Value};

fn format_value(v: &Value) -> String {
    match v {
        Value::String(s) => {
            let preview: String = s.chars().take(60).collect();
            if s.chars().count() > 60 {
                format!("\"{}...\"", preview)
            } else {
                format!("\"{}\"", preview)
            }
        }
        Value::Uint(n) => format!("{}", n),
        Value::Float(f) => format!("{:.4}", f),
        Value::Color(c) => format_color(*c),
        Value::Bool(b) => format!("{}", b),
        Value::Bytes(b) => format!("BYTES[{}]", b.len()),
    }
}

fn property_name(key: u16) -> String {
    registry::property_def(key)
        .map(|def| def.name.to_string())
        .unwrap_or_else(|| format!("#{}", key))
}

fn main() {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "scene.riv".to_string());

    println!("Reading: {}", path);
    let data = fs::read(&path).expect("Failed to read file");
    println!("File size: {} bytes", data.len());
    println!("SHA-256: {}", format_digest(&stream_digest(&data)));

    let mut reader = Reader::new(&data);
    let version = read_preamble(&mut reader).expect("Failed to read preamble");
    let dict = read_dictionary(&mut reader).expect("Failed to read header");

    println!("\n=== Header ===");
    println!("Version: {}.{}", version.major, version.minor);
    println!("Keys: {}", dict.len());
    for key in dict.keys() {
        let kind = dict.kind_of(*key).map(|k| format!("{:?}", k)).unwrap_or_default();
        println!("  {:>4}  {:<24} {}", key, property_name(*key), kind);
    }

    let decoded = decode_and_validate(&StreamImporter::new(), &data).expect("Failed to decode");

    println!("\n=== Objects ({}) ===", decoded.records.len());
    for record in &decoded.records {
        let id = record.local_id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string());
        let parent = record.parent_id.map(|id| format!(" <- {}", id)).unwrap_or_default();
        println!("[{}] {}{}", id, registry::display_name_of(record.type_tag), parent);
        for prop in &record.properties {
            println!("      {} = {}", property_name(prop.key), format_value(&prop.value));
        }
    }

    println!("\n=== Validation ===");
    println!("{}", decoded.validation);
}
