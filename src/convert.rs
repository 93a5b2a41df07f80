//! Top-level conversion operations.
//!
//! Everything here is orchestration: the stages in [`crate::pipeline`] do the
//! work, this module sequences them, times them, and assembles the
//! [`ConversionOutput`]. The file-writing variant keeps the write atomic so a
//! failed run never leaves a partial PDF at the destination.

use crate::block::Block;
use crate::config::{ConversionConfig, Engine};
use crate::error::Md2PdfError;
use crate::fonts;
use crate::output::{ConversionOutput, ConversionStats, DocumentOutline};
use crate::pipeline::{input, markdown, render, tagging};
use std::io::Write;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Convert the Markdown file at `input_path` to PDF bytes in memory.
pub fn convert(
    input_path: &Path,
    config: &ConversionConfig,
) -> Result<ConversionOutput, Md2PdfError> {
    let started = Instant::now();
    let text = input::load_document(input_path)?;
    info!(
        "Converting {} ({} bytes, {:?} engine)",
        input_path.display(),
        text.len(),
        config.engine
    );
    let mut out = convert_str(&text, config)?;
    out.stats.total_duration_ms = started.elapsed().as_millis() as u64;
    Ok(out)
}

/// Convert Markdown text to PDF bytes in memory.
pub fn convert_str(
    text: &str,
    config: &ConversionConfig,
) -> Result<ConversionOutput, Md2PdfError> {
    let started = Instant::now();

    let parse_started = Instant::now();
    let blocks = transform(text, config.engine);
    let parse_duration_ms = parse_started.elapsed().as_millis() as u64;
    debug!(
        "Transformed {} bytes into {} blocks in {} ms",
        text.len(),
        blocks.len(),
        parse_duration_ms
    );

    let outline = DocumentOutline::from_blocks(&blocks);

    let render_started = Instant::now();
    let font_set = fonts::discover(config.font_dir.as_deref())?;
    debug!("Embedding fonts from {}", font_set.dir.display());
    let pdf = render::render_pdf(&blocks, outline.title.as_deref(), config, font_set)?;
    let render_duration_ms = render_started.elapsed().as_millis() as u64;

    let stats = ConversionStats {
        blocks: blocks.len(),
        input_bytes: text.len() as u64,
        output_bytes: pdf.len() as u64,
        parse_duration_ms,
        render_duration_ms,
        total_duration_ms: started.elapsed().as_millis() as u64,
    };

    Ok(ConversionOutput {
        pdf,
        outline,
        stats,
    })
}

/// Convert the Markdown file at `input_path` and write the PDF to `output_path`.
///
/// The PDF is rendered fully in memory first, then written to a temporary
/// file in the destination directory and renamed into place, so
/// `output_path` either holds a complete PDF or is untouched.
pub fn convert_to_file(
    input_path: &Path,
    output_path: &Path,
    config: &ConversionConfig,
) -> Result<ConversionOutput, Md2PdfError> {
    let out = convert(input_path, config)?;
    write_atomic(output_path, &out.pdf)?;
    info!(
        "Wrote {} ({} bytes)",
        output_path.display(),
        out.stats.output_bytes
    );
    Ok(out)
}

/// Extract the document outline without rendering anything.
///
/// Runs only the transformer stage; needs no fonts and writes no files.
pub fn inspect(text: &str, config: &ConversionConfig) -> DocumentOutline {
    DocumentOutline::from_blocks(&transform(text, config.engine))
}

fn transform(text: &str, engine: Engine) -> Vec<Block> {
    match engine {
        Engine::Parser => markdown::parse_blocks(text),
        Engine::Regex => tagging::parse_blocks(text),
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), Md2PdfError> {
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
    let mut tmp = match dir {
        Some(dir) => tempfile::NamedTempFile::new_in(dir),
        None => tempfile::NamedTempFile::new(),
    }
    .map_err(|e| Md2PdfError::OutputWriteFailed {
        path: path.to_path_buf(),
        source: e,
    })?;

    tmp.write_all(bytes)
        .map_err(|e| Md2PdfError::OutputWriteFailed {
            path: path.to_path_buf(),
            source: e,
        })?;
    tmp.persist(path)
        .map_err(|e| Md2PdfError::OutputWriteFailed {
            path: path.to_path_buf(),
            source: e.error,
        })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inspect_counts_blocks_for_both_engines() {
        let text = "# Title\n\nProse here.\n\n- item one\n- item two\n";
        for engine in [Engine::Parser, Engine::Regex] {
            let config = ConversionConfig::builder().engine(engine).build().unwrap();
            let outline = inspect(text, &config);
            assert_eq!(outline.title.as_deref(), Some("Title"), "{engine:?}");
            assert_eq!(outline.paragraphs, 1, "{engine:?}");
            assert_eq!(outline.list_items, 2, "{engine:?}");
        }
    }

    #[test]
    fn write_atomic_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.pdf");
        std::fs::write(&path, b"old").unwrap();
        write_atomic(&path, b"new contents").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"new contents");
    }

    #[test]
    fn write_atomic_fails_without_destination_dir() {
        let err = write_atomic(Path::new("/no/such/dir/out.pdf"), b"x").unwrap_err();
        assert!(matches!(err, Md2PdfError::OutputWriteFailed { .. }));
    }
}
