pub mod decode;
pub mod encode;
pub mod validate;

#[cfg(test)]
mod tests {
    use std::fs;

    use crate::error::{exit_code_for, EXIT_FAILURE, EXIT_SUCCESS, EXIT_USAGE};

    use super::*;

    const SCENE: &str = r##"{"artboards": [{
        "name": "Main", "width": 200, "height": 100,
        "objects": [
            {"id": "box", "type": "rectangle", "width": 100, "height": 50},
            {"id": "paint", "type": "fill", "parent": "box"},
            {"type": "solid_color", "parent": "paint", "color": "#3366ff"}
        ],
        "animations": [{"name": "slide", "fps": 60, "duration": 30, "tracks": [
            {"object": "box", "property": "x", "keyframes": [{"frame": 0, "value": 0}, {"frame": 30, "value": 50}]}
        ]}]
    }]}"##;

    #[test]
    fn test_encode_decode_validate() {
        let dir = tempfile::tempdir().unwrap();
        let scene = dir.path().join("scene.json");
        let stream = dir.path().join("scene.riv");
        let records = dir.path().join("records.json");
        fs::write(&scene, SCENE).unwrap();

        assert_eq!(encode::run(&scene, &stream, true, false).unwrap(), EXIT_SUCCESS);
        assert!(fs::read(&stream).unwrap().starts_with(b"RIVE"));

        assert_eq!(decode::run(&stream, &records, false).unwrap(), EXIT_SUCCESS);
        let json = fs::read_to_string(&records).unwrap();
        assert!(json.contains("\"Rectangle\""));
        assert!(json.contains("\"KeyFrameDouble\""));

        assert_eq!(validate::run(&stream, true).unwrap(), EXIT_SUCCESS);
        assert_eq!(validate::run(&scene, false).unwrap(), EXIT_SUCCESS);
        assert_eq!(validate::run(&records, false).unwrap(), EXIT_SUCCESS);
    }

    #[test]
    fn test_record_list_is_sanitized_before_encoding() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("records.json");
        let stream = dir.path().join("out.riv");
        fs::write(
            &input,
            r#"{"objects": [
                {"type": "artboard", "id": 0, "properties": [{"key": 7, "value": 10}, {"key": 8, "value": 10}]},
                {"type": "gradient_stop", "id": 2, "parent": 1},
                {"type": "linear_gradient", "id": 1, "parent": 0}
            ]}"#,
        )
        .unwrap();

        assert_eq!(validate::run(&input, false).unwrap(), EXIT_FAILURE);
        assert_eq!(encode::run(&input, &stream, false, false).unwrap(), EXIT_SUCCESS);
        // Defaults were injected before encoding, so the stream is clean.
        assert_eq!(validate::run(&stream, false).unwrap(), EXIT_SUCCESS);
    }

    #[test]
    fn test_validate_reports_issues() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("records.json");
        fs::write(
            &input,
            r#"{"objects": [
                {"type": 1, "id": 0},
                {"type": 3, "id": 1, "parent": 0},
                {"type": 3, "id": 2, "parent": 42}
            ]}"#,
        )
        .unwrap();
        assert_eq!(validate::run(&input, true).unwrap(), EXIT_FAILURE);
    }

    #[test]
    fn test_environment_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.riv");
        let err = validate::run(&missing, false).unwrap_err();
        assert_eq!(exit_code_for(&err), EXIT_USAGE);

        let bad_json = dir.path().join("bad.json");
        fs::write(&bad_json, "{ not json").unwrap();
        let err = encode::run(&bad_json, &dir.path().join("out.riv"), false, false).unwrap_err();
        assert_eq!(exit_code_for(&err), EXIT_USAGE);
    }

    #[test]
    fn test_malformed_streams() {
        let dir = tempfile::tempdir().unwrap();
        let stream = dir.path().join("old.riv");
        fs::write(&stream, b"RIVE\x06\x00\x00").unwrap();

        assert_eq!(validate::run(&stream, false).unwrap(), EXIT_USAGE);
        let err = decode::run(&stream, &dir.path().join("out.json"), false).unwrap_err();
        assert_eq!(exit_code_for(&err), EXIT_FAILURE);
    }

    #[test]
    fn test_dangling_stream_reference_is_an_issue() {
        use rivpack::codec::header::{write_dictionary, write_preamble};
        use rivpack::codec::Writer;
        use rivpack::registry::{keys, types, WireKind};

        let mut writer = Writer::new();
        write_preamble(&mut writer);
        write_dictionary(
            &mut writer,
            &[(keys::OBJECT_ID, WireKind::Uint), (keys::KEYED_OBJECT_ID, WireKind::Uint)],
        );
        for v in [
            types::ARTBOARD as u64, 3, 0, 0,
            types::LINEAR_ANIMATION as u64, 0,
            // keyed object targeting stream id 8, which is never written
            types::KEYED_OBJECT as u64, keys::KEYED_OBJECT_ID as u64, 8, 0,
        ] {
            writer.write_varint(v);
        }

        let dir = tempfile::tempdir().unwrap();
        let stream = dir.path().join("dangling.riv");
        fs::write(&stream, writer.into_bytes()).unwrap();
        assert_eq!(validate::run(&stream, false).unwrap(), EXIT_FAILURE);
    }

    #[test]
    fn test_encode_fails_when_objects_are_left_out() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("records.json");
        let stream = dir.path().join("out.riv");
        // The node has no parent, so it cannot hang under the artboard.
        fs::write(
            &input,
            r#"{"objects": [
                {"type": "artboard", "id": 0, "properties": [{"key": 7, "value": 10}, {"key": 8, "value": 10}]},
                {"type": "node", "id": 1}
            ]}"#,
        )
        .unwrap();

        assert_eq!(encode::run(&input, &stream, false, false).unwrap(), EXIT_FAILURE);
        assert!(fs::read(&stream).unwrap().starts_with(b"RIVE"));
    }
}
