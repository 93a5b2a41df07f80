//! Output types: conversion results, statistics, and the document outline.

use serde::Serialize;

/// The result of a successful conversion.
#[derive(Debug, Clone)]
pub struct ConversionOutput {
    /// The rendered PDF file contents.
    pub pdf: Vec<u8>,
    /// Title and heading structure extracted during transformation.
    pub outline: DocumentOutline,
    /// Timing and size statistics.
    pub stats: ConversionStats,
}

/// Statistics about a conversion run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConversionStats {
    /// Total blocks produced by the transformer.
    pub blocks: usize,
    /// Size of the Markdown input in bytes.
    pub input_bytes: u64,
    /// Size of the rendered PDF in bytes.
    pub output_bytes: u64,
    /// Time spent in the transformer.
    pub parse_duration_ms: u64,
    /// Time spent in font loading and PDF layout.
    pub render_duration_ms: u64,
    /// End-to-end wall-clock time.
    pub total_duration_ms: u64,
}

/// Title and heading structure of a document, without rendering it.
///
/// Produced by [`crate::inspect`]; needs no fonts and writes no files.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DocumentOutline {
    /// The first level-1 heading, when present.
    pub title: Option<String>,
    /// All headings in source order.
    pub headings: Vec<OutlineEntry>,
    /// Total block count.
    pub blocks: usize,
    pub paragraphs: usize,
    pub code_blocks: usize,
    pub list_items: usize,
    pub tables: usize,
}

/// One heading in the outline.
#[derive(Debug, Clone, Serialize)]
pub struct OutlineEntry {
    pub level: u8,
    pub text: String,
}

impl DocumentOutline {
    /// Tally a block sequence into an outline.
    pub fn from_blocks(blocks: &[crate::block::Block]) -> Self {
        use crate::block::Block;

        let mut outline = DocumentOutline {
            blocks: blocks.len(),
            ..Default::default()
        };
        for block in blocks {
            match block {
                Block::Heading { level, text } => {
                    if *level == 1 && outline.title.is_none() {
                        outline.title = Some(text.clone());
                    }
                    outline.headings.push(OutlineEntry {
                        level: *level,
                        text: text.clone(),
                    });
                }
                Block::Paragraph(_) => outline.paragraphs += 1,
                Block::CodeBlock { .. } => outline.code_blocks += 1,
                Block::ListItem { .. } => outline.list_items += 1,
                Block::Table { .. } => outline.tables += 1,
                Block::Rule => {}
            }
        }
        outline
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::{Block, Span};

    #[test]
    fn outline_picks_first_h1_as_title() {
        let blocks = vec![
            Block::Heading {
                level: 1,
                text: "Title".into(),
            },
            Block::Paragraph(vec![Span::plain("body")]),
            Block::Heading {
                level: 1,
                text: "Second".into(),
            },
        ];
        let outline = DocumentOutline::from_blocks(&blocks);
        assert_eq!(outline.title.as_deref(), Some("Title"));
        assert_eq!(outline.headings.len(), 2);
        assert_eq!(outline.paragraphs, 1);
        assert_eq!(outline.blocks, 3);
    }
}
