use std::path::Path;

use anyhow::{Context, Result};
use rivpack::codec::format_breakdown;
use rivpack::model::document_from_records;
use rivpack::scene::{build_scene, JsonDocument};
use rivpack::{encode_document, validate_segments, Document, EncodeOptions};
use tracing::{info, warn};

use crate::error::{EXIT_FAILURE, EXIT_SUCCESS};
use crate::input::{read_json, write_bytes};
use crate::output;

/// Encodes a JSON scene or record list into a container file.
///
/// Scenes go through the graph builder; record lists are validated first so
/// that defaults are injected and broken links dropped before encoding.
/// The file is still written when objects are left out, but the exit code is
/// [`EXIT_FAILURE`].
pub fn run(input: &Path, output_path: &Path, trace: bool, verbose: bool) -> Result<i32> {
    let document = load_document(input, verbose)?;

    let options = if trace {
        EncodeOptions::traced()
    } else {
        EncodeOptions::new()
    };
    let encoded = encode_document(document, &options)
        .with_context(|| format!("encoding {}", input.display()))?;
    write_bytes(output_path, &encoded.bytes)?;
    info!(bytes = encoded.bytes.len(), "encoded");

    output::print_encode_summary(output_path, &encoded, verbose);
    if trace {
        eprintln!("{}", format_breakdown(&encoded.report.chunks, encoded.bytes.len()));
    }

    let orphaned = encoded.report.orphaned_objects;
    if orphaned > 0 {
        warn!(orphaned, "objects without a parent chain were not written");
        eprintln!(
            "error: {}: {orphaned} object(s) had no valid parent chain and were not written",
            input.display()
        );
        return Ok(EXIT_FAILURE);
    }
    Ok(EXIT_SUCCESS)
}

fn load_document(input: &Path, verbose: bool) -> Result<Document> {
    match read_json(input)? {
        JsonDocument::Scene(scene) => {
            let built = build_scene(&scene).with_context(|| format!("building {}", input.display()))?;
            output::print_build_report(&built.report, verbose);
            Ok(built.document)
        }
        JsonDocument::Records(records) => {
            let validated = validate_segments(records);
            output::print_validation(&validated.report, verbose);
            Ok(document_from_records(validated.records))
        }
    }
}
