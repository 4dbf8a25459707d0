//! Core data types for file type identification.
//!
//! This module provides the fundamental types used throughout the library:
//!
//! - [`ByteToken`]: The rendered hex prefix of a file, and the shape of every stored signature
//! - [`TypeId`]: A file type identifier, which doubles as the restored extension
//! - [`ContainerFormat`]: The closed set of formats that share the ZIP signature
//! - [`RestoreError`]: Every failure the core can report to its caller
//!
//! ## Token Format
//!
//! Prefixes are compared as tokens of upper-case, two-digit hex octets, each
//! followed by a single space:
//!
//! | Bytes                  | Token            |
//! |------------------------|------------------|
//! | `0x89 0x50 0x4E 0x47`  | `"89 50 4E 47 "` |
//! | `0x42 0x4D`            | `"42 4D "`       |
//!
//! Parsing accepts lower-case digits and an omitted trailing space.

pub mod error;
pub mod token;
pub mod types;
