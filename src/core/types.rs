use serde::{Deserialize, Serialize};

/// File type identifier from the signature table, e.g. `png` or `docx`.
///
/// The identifier is also the extension written back onto the file, so it is
/// stored lower-case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct TypeId(String);

impl TypeId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into().to_lowercase())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Extension to append when restoring this type
    #[must_use]
    pub fn extension(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for TypeId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<TypeId> for String {
    fn from(id: TypeId) -> Self {
        id.0
    }
}

impl From<ContainerFormat> for TypeId {
    fn from(format: ContainerFormat) -> Self {
        Self::new(format.extension())
    }
}

/// Formats that share the ZIP local-file-header signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerFormat {
    /// Office Open XML word processing document
    Docx,
    /// Office Open XML presentation
    Pptx,
    /// Office Open XML spreadsheet
    Xlsx,
    /// Plain archive, or nothing more specific was found
    Zip,
}

impl ContainerFormat {
    /// Type id in the signature table that triggers archive inspection
    pub const TRIGGER: &'static str = "zip";

    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Docx => "docx",
            Self::Pptx => "pptx",
            Self::Xlsx => "xlsx",
            Self::Zip => "zip",
        }
    }

    /// Map an archive entry name to the format its top-level folder implies
    #[must_use]
    pub fn from_entry_name(name: &str) -> Option<Self> {
        if name.starts_with("word/") {
            Some(Self::Docx)
        } else if name.starts_with("ppt/") {
            Some(Self::Pptx)
        } else if name.starts_with("xl/") {
            Some(Self::Xlsx)
        } else {
            None
        }
    }
}

impl std::fmt::Display for ContainerFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}
