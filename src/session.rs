//! Working directory and file selection for one interactive session.
//!
//! A [`Session`] replaces process-wide "current path" and "current file"
//! state: every operation that needs a selection takes the session explicitly,
//! so independent sessions never interfere.

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::core::error::RestoreError;
use crate::core::token::ByteToken;
use crate::detection::reader::read_prefix_token;
use crate::utils::validation::validate_path_argument;

/// Token that moves to the parent directory
pub const PARENT_TOKEN: &str = "..";

/// Outcome of a directory change that did not fail outright
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// The working directory is now this path
    Moved(PathBuf),
    /// `..` was requested at the filesystem root; nothing changed
    AtRoot,
    /// The named directory does not exist; nothing changed
    NotFound(String),
}

#[derive(Debug, Clone)]
pub struct Session {
    cwd: PathBuf,
    selected: Option<PathBuf>,
}

impl Session {
    /// Start a session in `start`, which must be an existing directory
    ///
    /// # Errors
    ///
    /// Returns `RestoreError::Io` if the directory cannot be resolved, or
    /// `RestoreError::InvalidArgument` if it is not a directory.
    pub fn new(start: &Path) -> Result<Self, RestoreError> {
        let cwd = std::fs::canonicalize(start).map_err(|e| RestoreError::io(start, e))?;
        if !cwd.is_dir() {
            return Err(RestoreError::InvalidArgument(format!(
                "{} is not a directory",
                start.display()
            )));
        }

        debug!("Session started in {}", cwd.display());
        Ok(Self {
            cwd,
            selected: None,
        })
    }

    /// Start a session in the process working directory
    ///
    /// # Errors
    ///
    /// Returns `RestoreError::Io` if the working directory is unavailable.
    pub fn from_current_dir() -> Result<Self, RestoreError> {
        let cwd = std::env::current_dir().map_err(|e| RestoreError::io(".", e))?;
        Self::new(&cwd)
    }

    /// Current working directory (always absolute)
    #[must_use]
    pub fn current_dir(&self) -> &Path {
        &self.cwd
    }

    /// Names of the entries in the working directory, sorted
    ///
    /// # Errors
    ///
    /// Returns `RestoreError::Io` if the directory cannot be read.
    pub fn list_current_directory(&self) -> Result<Vec<String>, RestoreError> {
        let entries = std::fs::read_dir(&self.cwd).map_err(|e| RestoreError::io(&self.cwd, e))?;

        let mut names = entries
            .map(|entry| {
                entry
                    .map(|e| e.file_name().to_string_lossy().into_owned())
                    .map_err(|e| RestoreError::io(&self.cwd, e))
            })
            .collect::<Result<Vec<_>, _>>()?;
        names.sort();

        debug!("Listed {} entries in {}", names.len(), self.cwd.display());
        Ok(names)
    }

    /// Move to the parent (`..`) or to a named subdirectory.
    ///
    /// Reaching the root or naming a missing directory is reported through
    /// [`Navigation`] rather than as an error.
    ///
    /// # Errors
    ///
    /// Returns `RestoreError::InvalidArgument` for an empty or malformed token.
    pub fn change_directory(&mut self, token: &str) -> Result<Navigation, RestoreError> {
        let token = validate_path_argument("cd", token)?;

        if token == PARENT_TOKEN {
            return Ok(match self.cwd.parent() {
                Some(parent) => {
                    self.cwd = parent.to_path_buf();
                    info!("Moved up to {}", self.cwd.display());
                    Navigation::Moved(self.cwd.clone())
                }
                None => {
                    warn!("Already at the filesystem root");
                    Navigation::AtRoot
                }
            });
        }

        match std::fs::canonicalize(self.cwd.join(token)) {
            Ok(target) if target.is_dir() => {
                self.cwd = target;
                info!("Moved to {}", self.cwd.display());
                Ok(Navigation::Moved(self.cwd.clone()))
            }
            _ => {
                warn!("Directory not found: {token}");
                Ok(Navigation::NotFound(token.to_string()))
            }
        }
    }

    /// Select a file relative to the working directory
    ///
    /// # Errors
    ///
    /// Returns `RestoreError::InvalidArgument` for an empty argument or a
    /// directory, and `RestoreError::FileNotFound` if nothing exists there.
    pub fn select_file(&mut self, argument: &str) -> Result<&Path, RestoreError> {
        let argument = validate_path_argument("take", argument)?;
        let path = self.cwd.join(argument);

        if !path.exists() {
            warn!("File not found: {}", path.display());
            return Err(RestoreError::FileNotFound(path));
        }
        if path.is_dir() {
            return Err(RestoreError::InvalidArgument(format!(
                "{argument} is a directory"
            )));
        }

        info!("Selected {}", path.display());
        let selected = self.selected.insert(path);
        Ok(selected.as_path())
    }

    /// Path of the selected file
    ///
    /// # Errors
    ///
    /// Returns `RestoreError::NotSelected` if no file has been selected.
    pub fn selected(&self) -> Result<&Path, RestoreError> {
        self.selected.as_deref().ok_or(RestoreError::NotSelected)
    }

    /// File name of the selected file
    ///
    /// # Errors
    ///
    /// Returns `RestoreError::NotSelected` if no file has been selected.
    pub fn selected_file_name(&self) -> Result<String, RestoreError> {
        let path = self.selected()?;
        Ok(path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default())
    }

    /// Leading bytes of the selected file
    ///
    /// # Errors
    ///
    /// Returns `RestoreError::NotSelected` without a selection, or
    /// `RestoreError::Io` if the file cannot be read.
    pub fn selected_prefix_token(&self, length: usize) -> Result<ByteToken, RestoreError> {
        read_prefix_token(self.selected()?, length)
    }

    /// Point the selection at a file that was just renamed
    pub(crate) fn replace_selection(&mut self, path: PathBuf) {
        self.selected = Some(path);
    }
}
