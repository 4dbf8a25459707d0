//! Identify a file's type from its leading bytes.
//!
//! Detection runs in three steps:
//!
//! 1. [`reader`] reads a short prefix (four bytes by default) into a [`ByteToken`]
//! 2. [`resolver`] finds the first signature table entry whose pattern the prefix starts with
//! 3. [`container`] refines a `zip` match into docx, pptx or xlsx by scanning archive entries
//!
//! ## Example
//!
//! ```rust,no_run
//! use ext_restorer::detection::resolver::TypeResolver;
//! use ext_restorer::signatures::SignatureTable;
//! use std::path::Path;
//!
//! let table = SignatureTable::embedded().unwrap();
//! let resolver = TypeResolver::new(table);
//!
//! match resolver.resolve(Path::new("download")).unwrap() {
//!     Some(type_id) => println!("looks like .{type_id}"),
//!     None => println!("unknown"),
//! }
//! ```
//!
//! [`ByteToken`]: crate::core::token::ByteToken

pub mod container;
pub mod reader;
pub mod resolver;
