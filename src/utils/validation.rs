//! Centralized validation of user-supplied command arguments.

use crate::core::error::RestoreError;

/// Longest path argument accepted from the shell
pub const MAX_ARGUMENT_LENGTH: usize = 4096;

/// Validate a path-like argument given to a shell command.
///
/// Returns the argument with surrounding whitespace removed. Interior spaces
/// are kept so names like `my photo` still work.
///
/// # Examples
///
/// ```
/// use ext_restorer::utils::validation::validate_path_argument;
///
/// assert_eq!(validate_path_argument("take", " report ").unwrap(), "report");
/// assert!(validate_path_argument("take", "").is_err());
/// ```
///
/// # Errors
///
/// Returns `RestoreError::InvalidArgument` if the argument is empty, too long,
/// or contains NUL or other control characters.
pub fn validate_path_argument<'a>(command: &str, argument: &'a str) -> Result<&'a str, RestoreError> {
    let trimmed = argument.trim();

    if trimmed.is_empty() {
        return Err(RestoreError::InvalidArgument(format!(
            "{command} requires a path"
        )));
    }

    if trimmed.len() > MAX_ARGUMENT_LENGTH {
        return Err(RestoreError::InvalidArgument(format!(
            "path exceeds {MAX_ARGUMENT_LENGTH} characters"
        )));
    }

    // Null bytes and other control characters never name a real file here
    if trimmed.chars().any(char::is_control) {
        return Err(RestoreError::InvalidArgument(
            "path contains control characters".to_string(),
        ));
    }

    Ok(trimmed)
}

/// Split a file name into the part kept by a rename and the part replaced.
///
/// The base ends at the first `.` after any leading dots, so `photo.tar.gz`
/// keeps `photo` and a hidden `.profile` keeps `.profile`.
#[must_use]
pub fn base_name(file_name: &str) -> &str {
    let leading = file_name.len() - file_name.trim_start_matches('.').len();
    match file_name[leading..].find('.') {
        Some(dot) => &file_name[..leading + dot],
        None => file_name,
    }
}
