//! The intermediate representation shared by both transformer engines.
//!
//! A Markdown document becomes an ordered `Vec<Block>`; order is preserved
//! from the source and the renderer walks the sequence exactly once. Blocks
//! do not nest — a heading's level is metadata, not structure — which keeps
//! the flow-layout renderer a single loop instead of a tree walk.

use serde::Serialize;

/// Inline styling of a [`Span`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum SpanStyle {
    #[default]
    Plain,
    Bold,
    Italic,
    /// Inline code; rendered in the monospace family.
    Code,
}

/// A run of inline text with uniform styling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Span {
    pub text: String,
    pub style: SpanStyle,
}

impl Span {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: SpanStyle::Plain,
        }
    }

    pub fn styled(text: impl Into<String>, style: SpanStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

/// One structurally distinct unit of document content.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Block {
    /// ATX heading, level 1–6. Text is plain; inline markup inside headings
    /// is flattened.
    Heading { level: u8, text: String },
    /// A run of prose built from contiguous non-blank lines.
    Paragraph(Vec<Span>),
    /// Fenced or indented code. `text` keeps its internal line structure.
    CodeBlock {
        lang: Option<String>,
        text: String,
    },
    /// A single list item. `index` is `Some` for ordered lists.
    ListItem {
        spans: Vec<Span>,
        index: Option<u64>,
    },
    /// A pipe table: one header row plus zero or more body rows.
    Table {
        header: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    /// Horizontal rule.
    Rule,
}

impl Block {
    /// Concatenated plain text of the block, used by the outline and tests.
    pub fn plain_text(&self) -> String {
        match self {
            Block::Heading { text, .. } => text.clone(),
            Block::Paragraph(spans) | Block::ListItem { spans, .. } => {
                spans.iter().map(|s| s.text.as_str()).collect()
            }
            Block::CodeBlock { text, .. } => text.clone(),
            Block::Table { header, rows } => {
                let mut out = header.join(" ");
                for row in rows {
                    out.push(' ');
                    out.push_str(&row.join(" "));
                }
                out
            }
            Block::Rule => String::new(),
        }
    }
}

/// Merge adjacent spans with identical styling.
///
/// Both engines can emit fragmented spans (the parser because events split
/// at every inline boundary, the scanner because lines are joined one at a
/// time). Coalescing keeps the renderer's output stream small.
pub fn coalesce(spans: Vec<Span>) -> Vec<Span> {
    let mut out: Vec<Span> = Vec::with_capacity(spans.len());
    for span in spans {
        if span.text.is_empty() {
            continue;
        }
        match out.last_mut() {
            Some(last) if last.style == span.style => last.text.push_str(&span.text),
            _ => out.push(span),
        }
    }
    out
}
