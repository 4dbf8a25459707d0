use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

use crate::core::error::RestoreError;
use crate::core::token::ByteToken;

/// Read up to `length` leading bytes of a file as a [`ByteToken`].
///
/// Files shorter than `length` yield a shorter token. The file handle is
/// closed before returning, on success and on error.
///
/// # Errors
///
/// Returns `RestoreError::Io` if the file cannot be opened or read.
pub fn read_prefix_token(path: &Path, length: usize) -> Result<ByteToken, RestoreError> {
    let file = File::open(path).map_err(|e| RestoreError::io(path, e))?;

    let mut buffer = Vec::with_capacity(length);
    file.take(length as u64)
        .read_to_end(&mut buffer)
        .map_err(|e| RestoreError::io(path, e))?;

    let token = ByteToken::new(buffer);
    debug!("Read prefix '{}' from {}", token, path.display());
    Ok(token)
}
