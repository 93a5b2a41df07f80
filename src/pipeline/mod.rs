//! The conversion pipeline, one module per stage.
//!
//! ```text
//! path ──▶ input ──▶ markdown │ tagging ──▶ render ──▶ PDF bytes
//!          (load)   (block extraction)      (layout)
//! ```
//!
//! [`input`] reads the source file into memory. Exactly one of the two
//! transformer stages runs next, selected by [`crate::config::Engine`]:
//! [`markdown`] walks a CommonMark event stream, [`tagging`] applies
//! ordered regex passes and scans the tagged lines. Both produce the same
//! [`crate::block::Block`] sequence, which [`render`] lays out into pages.

pub mod input;
pub mod markdown;
pub mod render;
pub mod tagging;
