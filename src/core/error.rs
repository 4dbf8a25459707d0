use std::path::PathBuf;
use thiserror::Error;

use crate::core::token::ByteToken;

/// Failures reported by selection, detection and renaming.
///
/// The interactive shell renders each variant as a single line; nothing in the
/// core panics or retries.
#[derive(Error, Debug)]
pub enum RestoreError {
    #[error("the file is not selected")]
    NotSelected,

    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("unknown file type (signature {prefix}). cannot rename")]
    UnknownType { prefix: String },

    #[error("failed to rename {} to {}: {reason}", .from.display(), .to.display())]
    Rename {
        from: PathBuf,
        to: PathBuf,
        reason: String,
    },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("corrupt archive {}: {message}", .path.display())]
    CorruptArchive { path: PathBuf, message: String },
}

impl RestoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn unknown_type(prefix: &ByteToken) -> Self {
        let text = prefix.to_trimmed_string();
        Self::UnknownType {
            prefix: if text.is_empty() {
                "<empty>".to_string()
            } else {
                text
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_single_line() {
        let errors = [
            RestoreError::NotSelected,
            RestoreError::io(
                "/tmp/a",
                std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            ),
            RestoreError::FileNotFound(PathBuf::from("missing.bin")),
            RestoreError::unknown_type(&ByteToken::new(vec![0, 1, 2, 3])),
            RestoreError::Rename {
                from: PathBuf::from("a"),
                to: PathBuf::from("a.png"),
                reason: "target already exists".to_string(),
            },
            RestoreError::InvalidArgument("empty file name".to_string()),
            RestoreError::CorruptArchive {
                path: PathBuf::from("x.zip"),
                message: "bad header".to_string(),
            },
        ];

        for error in errors {
            assert!(!error.to_string().contains('\n'), "{error}");
        }
    }

    #[test]
    fn test_unknown_type_mentions_prefix() {
        let err = RestoreError::unknown_type(&ByteToken::new(vec![0xDE, 0xAD]));
        assert_eq!(
            err.to_string(),
            "unknown file type (signature DE AD). cannot rename"
        );

        let empty = RestoreError::unknown_type(&ByteToken::default());
        assert!(empty.to_string().contains("<empty>"));
    }
}
