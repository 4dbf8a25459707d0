use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::OnceLock;
use thiserror::Error;
use tracing::debug;

use crate::core::token::ByteToken;
use crate::core::types::TypeId;

#[derive(Error, Debug)]
pub enum TableError {
    #[error("Failed to parse signature table: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Duplicate type id in signature table: {0}")]
    DuplicateType(TypeId),

    #[error("Type '{0}' has no patterns")]
    NoPatterns(TypeId),

    #[error("Patterns overlap: {0}")]
    Overlap(Overlap),
}

/// Signature table version for compatibility checking
pub const TABLE_VERSION: &str = "1.0.0";

/// Serializable table format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableData {
    pub version: String,
    pub entries: Vec<SignatureEntry>,
}

/// One file type and the alternative byte patterns that identify it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureEntry {
    pub type_id: TypeId,
    pub patterns: Vec<ByteToken>,
}

impl SignatureEntry {
    pub fn new(type_id: impl Into<String>, patterns: Vec<ByteToken>) -> Self {
        Self {
            type_id: TypeId::new(type_id),
            patterns,
        }
    }

    /// First pattern of this entry that `prefix` starts with
    #[must_use]
    pub fn matching_pattern(&self, prefix: &ByteToken) -> Option<&ByteToken> {
        self.patterns.iter().find(|p| prefix.starts_with(p))
    }
}

/// Two patterns under distinct type ids where one is a prefix of the other
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlap {
    pub first: TypeId,
    pub first_pattern: ByteToken,
    pub second: TypeId,
    pub second_pattern: ByteToken,
}

impl std::fmt::Display for Overlap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] and {} [{}]",
            self.first,
            self.first_pattern.to_trimmed_string(),
            self.second,
            self.second_pattern.to_trimmed_string()
        )
    }
}

/// Immutable mapping from type id to byte patterns.
///
/// Entries keep their registration order. Resolution walks that order and the
/// first entry with a matching pattern wins.
#[derive(Debug, Clone, Default)]
pub struct SignatureTable {
    entries: Vec<SignatureEntry>,

    /// Index: type id -> index in entries vec
    id_to_index: HashMap<TypeId, usize>,
}

impl SignatureTable {
    /// The table embedded at build time, parsed on first call.
    ///
    /// # Errors
    ///
    /// Returns `TableError` if the embedded document fails to parse or violates
    /// a table invariant. `build.rs` rejects such a document, so this only
    /// fires if the two validators disagree.
    pub fn embedded() -> Result<&'static SignatureTable, &'static TableError> {
        static EMBEDDED: OnceLock<Result<SignatureTable, TableError>> = OnceLock::new();

        EMBEDDED
            .get_or_init(|| {
                // Embedded at compile time, validated by build.rs
                const EMBEDDED_TABLE: &str = include_str!("../../signatures/signatures.json");
                let table = Self::from_json(EMBEDDED_TABLE)?;
                if let Some(overlap) = table.overlaps().into_iter().next() {
                    return Err(TableError::Overlap(overlap));
                }
                debug!("Loaded embedded signature table with {} types", table.len());
                Ok(table)
            })
            .as_ref()
    }

    /// Parse a table from its JSON document form
    ///
    /// # Errors
    ///
    /// Returns `TableError::ParseError` for malformed JSON or tokens, and the
    /// errors of [`SignatureTable::from_entries`].
    pub fn from_json(json: &str) -> Result<Self, TableError> {
        let data: TableData = serde_json::from_str(json)?;

        // Version check (warn but don't fail)
        if data.version != TABLE_VERSION {
            tracing::warn!(
                "Signature table version mismatch (expected {}, found {})",
                TABLE_VERSION,
                data.version
            );
        }

        Self::from_entries(data.entries)
    }

    /// Build a table from entries in registration order.
    ///
    /// Overlapping patterns are accepted here; call [`SignatureTable::overlaps`]
    /// to check for them.
    ///
    /// # Errors
    ///
    /// Returns `TableError::DuplicateType` if a type id repeats, or
    /// `TableError::NoPatterns` if an entry has no patterns.
    pub fn from_entries(entries: Vec<SignatureEntry>) -> Result<Self, TableError> {
        let mut id_to_index = HashMap::with_capacity(entries.len());

        for (index, entry) in entries.iter().enumerate() {
            if entry.patterns.is_empty() {
                return Err(TableError::NoPatterns(entry.type_id.clone()));
            }
            if id_to_index.insert(entry.type_id.clone(), index).is_some() {
                return Err(TableError::DuplicateType(entry.type_id.clone()));
            }
        }

        Ok(Self {
            entries,
            id_to_index,
        })
    }

    /// Patterns registered for a type id; empty when the id is unknown
    #[must_use]
    pub fn lookup(&self, type_id: &str) -> &[ByteToken] {
        self.id_to_index
            .get(&TypeId::new(type_id))
            .map_or(&[], |&idx| self.entries[idx].patterns.as_slice())
    }

    /// All entries in registration order
    #[must_use]
    pub fn all_entries(&self) -> &[SignatureEntry] {
        &self.entries
    }

    /// First entry, in registration order, with a pattern that `prefix` starts with
    #[must_use]
    pub fn find_match(&self, prefix: &ByteToken) -> Option<&SignatureEntry> {
        self.entries
            .iter()
            .find(|entry| entry.matching_pattern(prefix).is_some())
    }

    /// Every pair of patterns under distinct type ids where one is a prefix of
    /// the other. A valid table returns an empty list.
    #[must_use]
    pub fn overlaps(&self) -> Vec<Overlap> {
        let mut found = Vec::new();

        for (i, first) in self.entries.iter().enumerate() {
            for second in &self.entries[i + 1..] {
                for a in &first.patterns {
                    for b in &second.patterns {
                        if a.starts_with(b) || b.starts_with(a) {
                            found.push(Overlap {
                                first: first.type_id.clone(),
                                first_pattern: a.clone(),
                                second: second.type_id.clone(),
                                second_pattern: b.clone(),
                            });
                        }
                    }
                }
            }
        }

        found
    }

    /// Number of types in the table
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
