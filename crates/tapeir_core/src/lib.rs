//! tapeir_core: Core utilities for the tapeir IR toolchain.
//!
//! Provides the source position types shared by the scanner, the
//! diagnostics layer and the command-line front-end.

pub mod text;

// Re-export commonly used types
pub use text::{byte_offset, text_pos, LineAndColumn, LineMap, TextPos, TextSpan};
