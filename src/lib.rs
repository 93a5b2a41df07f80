//! # md2pdf
//!
//! Convert Markdown documents to styled, paginated PDF files.
//!
//! ## Pipeline
//!
//! ```text
//! ┌────────┐   ┌─────────────────────┐   ┌─────────┐   ┌──────────┐
//! │ Loader │ ─▶ │     Transformer     │ ─▶ │ Renderer │ ─▶ │ Reporter │
//! │ (file) │   │ Parser │ Regex       │   │ (genpdf) │   │ (stats)  │
//! └────────┘   └─────────────────────┘   └─────────┘   └──────────┘
//! ```
//!
//! Two interchangeable transformer engines produce the same intermediate
//! [`Block`] sequence:
//!
//! - [`Engine::Parser`] — a full CommonMark parser (pulldown-cmark) with
//!   tables and strikethrough; robust against nested and malformed input.
//! - [`Engine::Regex`] — ordered regex substitution passes and a
//!   line-oriented scanner; simple, predictable, best-effort.
//!
//! The renderer lays the blocks out with a fixed style sheet (dark slate
//! headings, framed monospace code, centered title) onto A4 pages.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use md2pdf::{convert_to_file, ConversionConfig};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), md2pdf::Md2PdfError> {
//! let config = ConversionConfig::default();
//! let out = convert_to_file(Path::new("notes.md"), Path::new("notes.pdf"), &config)?;
//! println!("{} blocks, {} bytes", out.stats.blocks, out.stats.output_bytes);
//! # Ok(())
//! # }
//! ```
//!
//! Rendering embeds TTF fonts; see [`fonts`] for how the Liberation
//! families are located and how to override the directory.

pub mod block;
pub mod config;
pub mod convert;
pub mod error;
pub mod fonts;
pub mod output;
pub mod pipeline;
pub mod styles;

pub use block::{Block, Span, SpanStyle};
pub use config::{ConversionConfig, ConversionConfigBuilder, Engine};
pub use convert::{convert, convert_str, convert_to_file, inspect};
pub use error::Md2PdfError;
pub use output::{ConversionOutput, ConversionStats, DocumentOutline, OutlineEntry};
pub use styles::{BlockStyle, Rgb, StyleSheet};
