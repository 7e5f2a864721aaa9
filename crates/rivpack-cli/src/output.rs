//! Human-readable summaries.
//!
//! Counters are printed when nonzero, or always with `--verbose`.

use std::path::Path;

use rivpack::codec::{format_digest, stream_digest};
use rivpack::registry;
use rivpack::{BuildReport, Decoded, Encoded, ExtractionReport, ValidationReport};

fn counter(label: &str, value: usize, verbose: bool) {
    if verbose || value > 0 {
        println!("{:<20}{value}", format!("{label}:"));
    }
}

pub fn print_build_report(report: &BuildReport, verbose: bool) {
    counter("Objects built", report.objects, verbose);
    counter("Wrappers inserted", report.wrappers_inserted, verbose);
    counter("Skipped types", report.skipped_types, verbose);
    counter("Unknown properties", report.unknown_properties, verbose);
    counter("Unresolved links", report.unresolved_links, verbose);
}

pub fn print_encode_summary(path: &Path, encoded: &Encoded, verbose: bool) {
    let report = &encoded.report;
    println!("{:<20}{} ({} bytes)", "Wrote:", path.display(), encoded.bytes.len());
    println!("{:<20}{}", "SHA-256:", format_digest(&stream_digest(&encoded.bytes)));
    counter("Objects written", report.objects_written, true);
    counter("Artboards", report.segments, verbose);
    counter("Header keys", report.header_keys, verbose);
    counter("Orphaned objects", report.orphaned_objects, verbose);
    counter("Skipped references", report.skipped_references, verbose);
    counter("Type mismatches", report.type_mismatches, verbose);
    counter("Dropped values", report.dropped_values, verbose);
}

pub fn print_extraction(report: &ExtractionReport, verbose: bool) {
    counter("Objects extracted", report.objects, true);
    counter("Unlinked records", report.unlinked, verbose);
    counter("Unknown types", report.unknown_types, verbose);
    counter("Unresolved parents", report.unresolved_parents, verbose);
    counter("Unresolved refs", report.unresolved_references, verbose);
}

pub fn print_decode_summary(path: &Path, decoded: &Decoded, verbose: bool) {
    println!("{:<20}{}.{}", "Format version:", decoded.version.major, decoded.version.minor);
    print_extraction(&decoded.extraction, verbose);
    print_validation(&decoded.validation, verbose);
    println!("{:<20}{} ({} records)", "Wrote:", path.display(), decoded.records.len());
}

pub fn print_validation(report: &ValidationReport, verbose: bool) {
    println!("{:<20}{report}", "Validation:");
    if !verbose {
        return;
    }
    counter("Missing parents", report.missing_parents.len(), true);
    for (child, parent) in &report.missing_parents {
        println!("  object {child} -> missing parent {parent}");
    }
    counter("Dropped", report.dropped, true);
    counter("Defaults injected", report.total_defaults_injected(), true);
    for (tag, count) in &report.defaults_injected {
        println!("  {}: {count}", registry::display_name_of(*tag));
    }
    counter("Reordered", report.reordered, true);
    match &report.cycle {
        Some(cycle) => println!("{:<20}{cycle:?}", "Cycle:"),
        None => println!("{:<20}none", "Cycle:"),
    }
    counter("Zero-size roots", report.zero_size_roots.len(), true);
    counter("Emptied children", report.emptied_children, true);
    counter("Trim paths skipped", report.known_bad_skipped, true);
    counter("Duplicate ids", report.duplicate_ids, true);
}
