use std::path::Path;

use anyhow::{Context, Result};
use rivpack::scene::records::records_to_json;
use rivpack::{decode_and_validate, StreamImporter};

use crate::error::EXIT_SUCCESS;
use crate::input::{read_bytes, write_bytes};
use crate::output;

/// Decodes a container file into a validated JSON record list.
pub fn run(input: &Path, output_path: &Path, verbose: bool) -> Result<i32> {
    let bytes = read_bytes(input)?;
    let decoded = decode_and_validate(&StreamImporter::new(), &bytes)
        .with_context(|| format!("decoding {}", input.display()))?;

    let json = records_to_json(&decoded.records)?;
    write_bytes(output_path, json)?;

    output::print_decode_summary(output_path, &decoded, verbose);
    Ok(EXIT_SUCCESS)
}
