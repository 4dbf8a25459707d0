use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{debug, info};
use zip::ZipArchive;

use crate::core::error::RestoreError;
use crate::core::types::ContainerFormat;

/// Classify a ZIP-signature file as docx, pptx, xlsx or plain zip.
///
/// Entry names are read from the central directory in archive order. The
/// first entry under `word/`, `ppt/` or `xl/` decides the format; if none is
/// found the file is a plain `zip`. Entry data is never decompressed, so
/// archives with data descriptors, any compression method or encrypted
/// entries are classified by name alone.
///
/// # Errors
///
/// Returns `RestoreError::Io` if the file cannot be opened, or
/// `RestoreError::CorruptArchive` if the central directory cannot be read.
/// Whether a corrupt archive fails detection is decided by the resolver.
pub fn classify_archive(path: &Path) -> Result<ContainerFormat, RestoreError> {
    debug!("Inspecting archive entries of {}", path.display());

    let file = File::open(path).map_err(|e| RestoreError::io(path, e))?;
    let archive =
        ZipArchive::new(BufReader::new(file)).map_err(|e| RestoreError::CorruptArchive {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let format = (0..archive.len())
        .filter_map(|index| archive.name_for_index(index))
        .find_map(ContainerFormat::from_entry_name);

    match format {
        Some(format) => {
            info!("{} is a {format} container", path.display());
            Ok(format)
        }
        None => {
            info!("{} is a plain zip archive", path.display());
            Ok(ContainerFormat::Zip)
        }
    }
}
