use std::path::Path;

use anyhow::{Context, Result};
use rivpack::scene::{build_scene, JsonDocument};
use rivpack::{decode_and_validate, sanitize_document, validate_segments, StreamImporter};
use tracing::warn;

use crate::error::{EXIT_FAILURE, EXIT_SUCCESS, EXIT_USAGE};
use crate::input::{read_input, Input};
use crate::output;

/// Validates a container file, JSON scene or record list.
///
/// Returns [`EXIT_SUCCESS`] when nothing but reordering was needed,
/// [`EXIT_FAILURE`] when the input has issues (for streams, extraction
/// counters such as dangling references count too), and [`EXIT_USAGE`] when a
/// stream cannot be imported at all.
pub fn run(input: &Path, verbose: bool) -> Result<i32> {
    let has_issues = match read_input(input)? {
        Input::Stream(bytes) => match decode_and_validate(&StreamImporter::new(), &bytes) {
            Ok(decoded) => {
                output::print_extraction(&decoded.extraction, verbose);
                output::print_validation(&decoded.validation, verbose);
                decoded.extraction.has_issues() || decoded.validation.has_issues()
            }
            Err(e) => {
                warn!(error = %e, "import failed");
                eprintln!("error: {}: {e}", input.display());
                return Ok(EXIT_USAGE);
            }
        },
        Input::Json(JsonDocument::Scene(scene)) => {
            let built = build_scene(&scene).with_context(|| format!("building {}", input.display()))?;
            output::print_build_report(&built.report, verbose);
            let (_, report) = sanitize_document(built.document);
            output::print_validation(&report, verbose);
            built.report.has_issues() || report.has_issues()
        }
        Input::Json(JsonDocument::Records(records)) => {
            let validated = validate_segments(records);
            output::print_validation(&validated.report, verbose);
            validated.report.has_issues()
        }
    };

    Ok(if has_issues { EXIT_FAILURE } else { EXIT_SUCCESS })
}
