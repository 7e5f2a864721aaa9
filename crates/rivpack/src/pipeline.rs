//! End-to-end flows composed from the individual stages.

use tracing::{debug, debug_span};

use crate::codec::{encode_document, EncodeOptions, Encoded, Version};
use crate::error::{EncodeError, ImportFailure};
use crate::import::{extract_records, ExtractionReport, RuntimeImporter};
use crate::model::{Document, ObjectRecord};
use crate::validate::{sanitize_document, validate_segments, ValidationReport};

/// Validated records of a decoded stream.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    pub version: Version,
    pub records: Vec<ObjectRecord>,
    pub extraction: ExtractionReport,
    pub validation: ValidationReport,
}

/// Imports a stream, re-extracts its records and validates them.
///
/// Import failures are returned unchanged; everything after a successful
/// import is reported, never failed.
pub fn decode_and_validate(
    importer: &impl RuntimeImporter,
    bytes: &[u8],
) -> Result<Decoded, ImportFailure> {
    let _span = debug_span!("decode_and_validate", bytes = bytes.len()).entered();
    let graph = importer.import(bytes).into_result()?;
    let extracted = extract_records(&graph);
    let validated = validate_segments(extracted.records);
    debug!(
        objects = validated.records.len(),
        report = %validated.report,
        "decoded"
    );
    Ok(Decoded {
        version: graph.version,
        records: validated.records,
        extraction: extracted.report,
        validation: validated.report,
    })
}

/// Validates a document, then encodes what survived.
pub fn sanitize_and_encode(
    document: Document,
    options: &EncodeOptions,
) -> Result<(Encoded, ValidationReport), EncodeError> {
    let (document, report) = sanitize_document(document);
    let encoded = encode_document(document, options)?;
    Ok((encoded, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::StreamImporter;
    use crate::model::GraphBuilder;
    use crate::registry::{keys, types};

    #[test]
    fn test_decode_and_validate_round_trip() {
        let mut builder = GraphBuilder::new();
        let artboard = builder
            .add_with(types::ARTBOARD, None, |o| {
                o.float(keys::ARTBOARD_WIDTH, 200.0).float(keys::ARTBOARD_HEIGHT, 100.0)
            })
            .unwrap();
        builder
            .add_with(types::RECTANGLE, Some(artboard), |o| {
                o.float(keys::PATH_WIDTH, 100.0).float(keys::PATH_HEIGHT, 50.0)
            })
            .unwrap();
        let built = builder.finish();
        let encoded = encode_document(built.document, &EncodeOptions::new()).unwrap();

        let decoded = decode_and_validate(&StreamImporter::new(), &encoded.bytes).unwrap();
        let tags: Vec<u16> = decoded.records.iter().map(|r| r.type_tag).collect();
        assert_eq!(tags, vec![types::ARTBOARD, types::SHAPE, types::RECTANGLE]);
        assert_eq!(decoded.version, Version { major: 7, minor: 0 });
        assert!(decoded.validation.is_clean());
    }

    #[test]
    fn test_import_failure_is_returned_unchanged() {
        let mut bytes = b"RIVE".to_vec();
        bytes.extend_from_slice(&[6, 0, 0]);
        let err = decode_and_validate(&StreamImporter::new(), &bytes).unwrap_err();
        assert_eq!(err, ImportFailure::UnsupportedVersion { major: 6, minor: 0 });
    }

    #[test]
    fn test_sanitize_and_encode_defaults_gradient_stop() {
        let mut builder = GraphBuilder::new();
        let artboard = builder.add_object(types::ARTBOARD).unwrap();
        let gradient = builder.add_with(types::LINEAR_GRADIENT, Some(artboard), |o| o).unwrap();
        builder.add_with(types::GRADIENT_STOP, Some(gradient), |o| o).unwrap();
        let (encoded, report) =
            sanitize_and_encode(builder.finish().document, &EncodeOptions::new()).unwrap();

        assert_eq!(report.defaults_injected.get(&types::GRADIENT_STOP), Some(&2));
        let decoded = decode_and_validate(&StreamImporter::new(), &encoded.bytes).unwrap();
        let stop = decoded.records.iter().find(|r| r.type_tag == types::GRADIENT_STOP).unwrap();
        assert_eq!(stop.get(keys::GRADIENT_STOP_POSITION).and_then(|v| v.as_f32()), Some(0.0));
        assert!(!decoded.validation.has_issues());
    }
}
