//! Exit codes.

use rivpack::SceneError;

/// Success; for `validate`, no issues found.
pub const EXIT_SUCCESS: i32 = 0;
/// Conversion failed, or `validate` found issues.
pub const EXIT_FAILURE: i32 = 1;
/// Unreadable input, unparseable input, or bad arguments.
pub const EXIT_USAGE: i32 = 2;

/// Maps an error to an exit code: problems with the input itself are usage
/// errors, everything else is a conversion failure.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    let is_input_error = err.chain().any(|cause| {
        cause.is::<std::io::Error>() || cause.is::<SceneError>() || cause.is::<serde_json::Error>()
    });
    if is_input_error {
        EXIT_USAGE
    } else {
        EXIT_FAILURE
    }
}
