//! Helpers shared by the shell and the renamer.

pub mod validation;
