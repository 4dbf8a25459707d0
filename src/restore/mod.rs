//! Restore the extension of the selected file.
//!
//! The renamer keeps the file's base name (everything before the first `.`),
//! appends the resolved type id as the extension and renames the file in
//! place. Nothing on disk changes unless the type is known and the target
//! name is free.

pub mod renamer;

pub use renamer::{plan_rename, rename_selected, RenamePlan};
