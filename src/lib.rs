//! # ext-restorer
//!
//! A library for identifying a file's real type from its leading bytes and
//! restoring the extension it should carry.
//!
//! Files lose their extensions all the time: browser downloads named after a
//! URL, attachments saved as `file`, recovered data with generated names. The
//! first few bytes of most formats are a fixed "magic number", so the type can
//! be read from the content instead of the name.
//!
//! ## Features
//!
//! - **Signature matching**: Compares a file's first four bytes against an embedded table
//! - **Short signatures**: Two- and three-byte signatures (BMP, MP3) match as prefixes
//! - **Office detection**: ZIP files are opened to tell docx, pptx and xlsx from plain zip
//! - **Safe renames**: Unknown types and existing targets leave the file untouched
//! - **Interactive shell**: `ls`, `cd`, `take`, `see`, `rename` over a working directory
//!
//! ## Example
//!
//! ```rust,no_run
//! use ext_restorer::{Session, SignatureTable, TypeResolver};
//! use ext_restorer::restore::rename_selected;
//! use std::path::Path;
//!
//! let table = SignatureTable::embedded().unwrap();
//! let resolver = TypeResolver::new(table);
//!
//! let mut session = Session::new(Path::new("/home/me/Downloads")).unwrap();
//! session.select_file("attachment").unwrap();
//!
//! let mut notices: Vec<String> = Vec::new();
//! let new_name = rename_selected(&mut session, &resolver, &mut notices).unwrap();
//! println!("renamed to {new_name}");
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Byte tokens, type ids and the error type
//! - [`signatures`]: The embedded signature table
//! - [`detection`]: Prefix reading, type resolution and archive inspection
//! - [`session`]: Working directory and file selection
//! - [`restore`]: The renamer
//! - [`shell`]: Interactive command shell
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod detection;
pub mod restore;
pub mod session;
pub mod shell;
pub mod signatures;
pub mod utils;

// Re-export commonly used types for convenience
pub use crate::core::error::RestoreError;
pub use crate::core::token::ByteToken;
pub use crate::core::types::{ContainerFormat, TypeId};
pub use crate::detection::resolver::{Detection, ResolverOptions, TypeResolver};
pub use crate::session::Session;
pub use crate::signatures::SignatureTable;
