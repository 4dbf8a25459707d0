use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Default number of leading bytes read from a file for signature comparison
pub const DEFAULT_PREFIX_LEN: usize = 4;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Empty byte token")]
    Empty,

    #[error("Invalid hex octet '{group}' in byte token '{token}'")]
    InvalidOctet { token: String, group: String },
}

/// A fixed run of bytes rendered as space-separated hex octets.
///
/// Used both for the prefix read from a file and for the patterns stored in the
/// signature table. Rendering is always upper-case with a trailing space after
/// every octet, so `[0x89, 0x50]` displays as `"89 50 "`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ByteToken(Vec<u8>);

impl ByteToken {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Number of octets in the token
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when `pattern` covers the leading octets of this token.
    ///
    /// A pattern longer than the token never matches, which is how a short
    /// read from a tiny file is kept from matching a longer signature.
    #[must_use]
    pub fn starts_with(&self, pattern: &ByteToken) -> bool {
        !pattern.is_empty() && self.0.starts_with(&pattern.0)
    }

    /// Render the token text without the trailing separator
    #[must_use]
    pub fn to_trimmed_string(&self) -> String {
        self.to_string().trim_end().to_string()
    }
}

impl fmt::Display for ByteToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02X} ")?;
        }
        Ok(())
    }
}

impl FromStr for ByteToken {
    type Err = TokenError;

    /// Parse `"89 50 4E 47"` style text. Octets must be exactly two hex digits
    /// separated by single spaces; one trailing space is tolerated.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let body = s.strip_suffix(' ').unwrap_or(s);
        if body.is_empty() {
            return Err(TokenError::Empty);
        }

        body.split(' ')
            .map(|group| {
                if group.len() == 2 && group.chars().all(|c| c.is_ascii_hexdigit()) {
                    u8::from_str_radix(group, 16).map_err(|_| TokenError::InvalidOctet {
                        token: s.to_string(),
                        group: group.to_string(),
                    })
                } else {
                    Err(TokenError::InvalidOctet {
                        token: s.to_string(),
                        group: group.to_string(),
                    })
                }
            })
            .collect::<Result<Vec<u8>, _>>()
            .map(Self)
    }
}

impl From<&[u8]> for ByteToken {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl Serialize for ByteToken {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_trimmed_string())
    }
}

impl<'de> Deserialize<'de> for ByteToken {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
