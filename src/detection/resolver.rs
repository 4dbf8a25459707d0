use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::core::error::RestoreError;
use crate::core::token::{ByteToken, DEFAULT_PREFIX_LEN};
use crate::core::types::{ContainerFormat, TypeId};
use crate::detection::container::classify_archive;
use crate::detection::reader::read_prefix_token;
use crate::signatures::SignatureTable;

/// Tunable behaviour of the resolver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolverOptions {
    /// Number of leading bytes read for comparison
    pub prefix_len: usize,

    /// Fail with `CorruptArchive` instead of falling back to `zip` when the
    /// archive entries of a ZIP-signature file cannot be read
    pub strict_archives: bool,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            prefix_len: DEFAULT_PREFIX_LEN,
            strict_archives: false,
        }
    }
}

/// Full outcome of detecting one file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Detection {
    pub path: PathBuf,

    /// Leading bytes that were compared
    pub prefix: ByteToken,

    /// Type id of the matching signature table entry
    pub signature: Option<TypeId>,

    /// Refinement of a `zip` signature match
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container: Option<ContainerFormat>,

    /// Archive read failure that was degraded to a plain `zip`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archive_error: Option<String>,

    /// Final answer: the extension to restore, or `None` for unknown
    pub type_id: Option<TypeId>,
}

impl Detection {
    #[must_use]
    pub fn is_known(&self) -> bool {
        self.type_id.is_some()
    }
}

/// Matches file prefixes against a signature table
pub struct TypeResolver<'a> {
    table: &'a SignatureTable,
    options: ResolverOptions,
}

impl<'a> TypeResolver<'a> {
    pub fn new(table: &'a SignatureTable) -> Self {
        Self::with_options(table, ResolverOptions::default())
    }

    pub fn with_options(table: &'a SignatureTable, options: ResolverOptions) -> Self {
        Self { table, options }
    }

    #[must_use]
    pub fn table(&self) -> &SignatureTable {
        self.table
    }

    #[must_use]
    pub fn options(&self) -> ResolverOptions {
        self.options
    }

    /// Resolve the type id of a file, or `None` when no signature matches
    ///
    /// # Errors
    ///
    /// Returns `RestoreError::Io` if the file cannot be read, or
    /// `RestoreError::CorruptArchive` in strict mode.
    pub fn resolve(&self, path: &Path) -> Result<Option<TypeId>, RestoreError> {
        self.detect(path).map(|detection| detection.type_id)
    }

    /// Detect a file and report every intermediate result
    ///
    /// # Errors
    ///
    /// Same as [`TypeResolver::resolve`].
    pub fn detect(&self, path: &Path) -> Result<Detection, RestoreError> {
        let prefix = read_prefix_token(path, self.options.prefix_len)?;
        let signature = self.match_prefix(&prefix);

        let mut detection = Detection {
            path: path.to_path_buf(),
            prefix,
            signature: signature.clone(),
            container: None,
            archive_error: None,
            type_id: signature,
        };

        match &detection.signature {
            Some(id) if id.as_str() == ContainerFormat::TRIGGER => {
                let format = match classify_archive(path) {
                    Ok(format) => format,
                    Err(e @ RestoreError::CorruptArchive { .. }) if !self.options.strict_archives => {
                        warn!("{e}; treating it as a plain zip");
                        detection.archive_error = Some(e.to_string());
                        ContainerFormat::Zip
                    }
                    Err(e) => return Err(e),
                };
                detection.container = Some(format);
                detection.type_id = Some(TypeId::from(format));
            }
            Some(id) => info!("{} matches signature '{id}'", path.display()),
            None => info!(
                "{} has no known signature (prefix '{}')",
                path.display(),
                detection.prefix.to_trimmed_string()
            ),
        }

        Ok(detection)
    }

    /// Match an already-read prefix against the table
    #[must_use]
    pub fn match_prefix(&self, prefix: &ByteToken) -> Option<TypeId> {
        let entry = self.table.find_match(prefix)?;
        debug!(
            "Prefix '{}' matched type '{}'",
            prefix.to_trimmed_string(),
            entry.type_id
        );
        Some(entry.type_id.clone())
    }
}
