//! The signature table: which leading bytes identify which file type.
//!
//! The table ships inside the binary. `signatures/signatures.json` is
//! validated by `build.rs` (hex syntax, unique type ids, no overlapping
//! patterns) and embedded with `include_str!`, then parsed once on first use.
//!
//! ## Embedded Types
//!
//! | Type | Pattern(s) |
//! |------|------------|
//! | png  | `89 50 4E 47` |
//! | zip  | `50 4B 03 04` (refined to docx/pptx/xlsx by archive inspection) |
//! | jpg  | `FF D8 FF DB`, `FF D8 FF E0`, `FF D8 FF E1` |
//! | webp | `52 49 46 46` |
//! | doc  | `0D 44 4F 43` |
//! | gif  | `47 49 46 38` |
//! | pdf  | `25 50 44 46` |
//! | rar  | `52 61 72 21` |
//! | mp3  | `49 44 33` |
//! | mp4  | `66 74 79 70` |
//! | 7z   | `37 7A BC AF` |
//! | iso  | `43 44 30 30` |
//! | bmp  | `42 4D` |

pub mod table;

pub use table::{SignatureEntry, SignatureTable, TableError};
