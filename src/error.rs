//! Error types for the md2pdf library.
//!
//! One error enum covers the whole pipeline because the pipeline is strictly
//! linear: the first failing stage aborts everything after it, so there is no
//! partial-success state to model. Two variants matter most to callers:
//!
//! * [`Md2PdfError::FileNotFound`] — the input precondition failed; nothing
//!   was processed and no output file exists.
//! * [`Md2PdfError::RenderFailed`] — the layout engine reported an internal
//!   error; the output file was never created because rendering targets an
//!   in-memory buffer before anything touches disk.
//!
//! Every message carries enough context to act on without re-running with
//! extra logging.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the md2pdf library.
#[derive(Debug, Error)]
pub enum Md2PdfError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error(
        "Markdown file not found: '{}'\nCheck the path exists and is readable.",
        .path.display()
    )]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{}'\nTry: chmod +r {:?}", .path.display(), .path)]
    PermissionDenied { path: PathBuf },

    /// The file exists but is not valid UTF-8 text.
    #[error(
        "File is not valid UTF-8 text: '{}'\nmd2pdf only converts plain-text Markdown.",
        .path.display()
    )]
    InvalidUtf8 { path: PathBuf },

    // ── Font errors ───────────────────────────────────────────────────────
    /// No usable TTF font family could be located.
    #[error(
        "Could not find the Liberation font families.\nSearched:\n{}\n\n\
         Install them (Debian/Ubuntu: `apt install fonts-liberation`) or point\n\
         --font-dir / MD2PDF_FONT_DIR at a directory containing\n\
         LiberationSans-*.ttf and LiberationMono-*.ttf.",
        .searched.iter().map(|p| format!("  - {}", p.display())).collect::<Vec<_>>().join("\n")
    )]
    FontsNotFound { searched: Vec<PathBuf> },

    // ── Render errors ─────────────────────────────────────────────────────
    /// The layout engine reported an internal error while paginating.
    #[error("PDF rendering failed: {detail}")]
    RenderFailed { detail: String },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write the output PDF file.
    #[error("Failed to write output file '{}': {}", .path.display(), .source)]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_not_found_display() {
        let e = Md2PdfError::FileNotFound {
            path: PathBuf::from("notes.md"),
        };
        let msg = e.to_string();
        assert!(msg.contains("notes.md"), "got: {msg}");
        assert!(msg.contains("not found"));
    }

    #[test]
    fn fonts_not_found_lists_searched_paths() {
        let e = Md2PdfError::FontsNotFound {
            searched: vec![PathBuf::from("/a/fonts"), PathBuf::from("/b/fonts")],
        };
        let msg = e.to_string();
        assert!(msg.contains("/a/fonts"));
        assert!(msg.contains("/b/fonts"));
        assert!(msg.contains("MD2PDF_FONT_DIR"));
    }

    #[test]
    fn render_failed_carries_detail() {
        let e = Md2PdfError::RenderFailed {
            detail: "glyph metrics unavailable".into(),
        };
        assert!(e.to_string().contains("glyph metrics unavailable"));
    }

    #[test]
    fn invalid_config_display() {
        let e = Md2PdfError::InvalidConfig("font size must be 6-32".into());
        assert!(e.to_string().starts_with("Invalid configuration"));
    }
}
