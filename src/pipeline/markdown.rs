//! Parser engine: full Markdown grammar via pulldown-cmark.
//!
//! The event stream is folded into the shared [`Block`] sequence. Tables and
//! strikethrough are enabled; everything the parser understands round-trips
//! into a matching block, and anything it does not (raw HTML, math, footnote
//! syntax without the extension) flows through as literal text. Malformed
//! Markdown therefore degrades to prose instead of failing — the parser
//! engine has no error path at all.
//!
//! Inline structure is flattened to [`Span`] runs: bold wins over italic when
//! both apply, block quotes and image alt text render italic, and link text
//! survives while the destination is dropped (which is also what makes
//! anchor-style table-of-contents links degrade gracefully).

use crate::block::{coalesce, Block, Span, SpanStyle};
use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};
use tracing::debug;

/// Convert Markdown text into the ordered block sequence.
pub fn parse_blocks(input: &str) -> Vec<Block> {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
    let mut builder = Builder::default();
    for event in Parser::new_ext(input, options) {
        builder.event(event);
    }
    let blocks = builder.finish();
    debug!("Parser engine produced {} blocks", blocks.len());
    blocks
}

#[derive(Default)]
struct TableState {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
    current_row: Vec<String>,
    cell: String,
    in_head: bool,
}

#[derive(Default)]
struct Builder {
    blocks: Vec<Block>,
    spans: Vec<Span>,
    bold: usize,
    italic: usize,
    quote: usize,
    image: usize,
    heading: Option<u8>,
    code: Option<(Option<String>, String)>,
    /// Per-list next-index counters; `Some` for ordered lists.
    list_stack: Vec<Option<u64>>,
    item_depth: usize,
    table: Option<TableState>,
}

impl Builder {
    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(t) => self.text(&t),
            Event::Code(t) => self.inline_code(&t),
            Event::Html(t) | Event::InlineHtml(t) => self.text(&t),
            Event::SoftBreak | Event::HardBreak => self.text(" "),
            Event::Rule => self.blocks.push(Block::Rule),
            // Footnotes, math, task markers: extensions are off, but stay
            // total over the event enum.
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => {
                // Loose list items wrap their text in paragraphs; keep the
                // item's accumulated spans and just separate with a space.
                if self.item_depth > 0 && !self.spans.is_empty() {
                    self.spans.push(Span::plain(" "));
                }
            }
            Tag::Heading { level, .. } => {
                self.heading = Some(level as u8);
                self.spans.clear();
            }
            Tag::CodeBlock(kind) => {
                let lang = match kind {
                    CodeBlockKind::Fenced(info) => {
                        let tag = info.split([' ', ',']).next().unwrap_or("").trim();
                        if tag.is_empty() {
                            None
                        } else {
                            Some(tag.to_string())
                        }
                    }
                    CodeBlockKind::Indented => None,
                };
                self.code = Some((lang, String::new()));
            }
            Tag::List(start) => self.list_stack.push(start),
            Tag::Item => {
                // A nested list begins before the enclosing item ends; flush
                // the enclosing item's text so order is preserved.
                if self.item_depth > 0 && !self.spans.is_empty() {
                    let parent = self.list_stack.len().saturating_sub(2);
                    self.flush_list_item(parent);
                }
                self.item_depth += 1;
            }
            Tag::Emphasis => self.italic += 1,
            Tag::Strong => self.bold += 1,
            Tag::BlockQuote { .. } => self.quote += 1,
            Tag::Image { .. } => self.image += 1,
            Tag::Table(_) => self.table = Some(TableState::default()),
            Tag::TableHead => {
                if let Some(t) = self.table.as_mut() {
                    t.in_head = true;
                }
            }
            Tag::TableRow => {
                if let Some(t) = self.table.as_mut() {
                    t.current_row.clear();
                }
            }
            Tag::TableCell => {
                if let Some(t) = self.table.as_mut() {
                    t.cell.clear();
                }
            }
            // Links keep their text; strikethrough keeps plain styling.
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => {
                if self.item_depth == 0 {
                    let spans = coalesce(std::mem::take(&mut self.spans));
                    if !spans.is_empty() {
                        self.blocks.push(Block::Paragraph(spans));
                    }
                }
            }
            TagEnd::Heading(_) => {
                let level = self.heading.take().unwrap_or(1);
                let text: String = std::mem::take(&mut self.spans)
                    .into_iter()
                    .map(|s| s.text)
                    .collect();
                self.blocks.push(Block::Heading {
                    level,
                    text: text.trim().to_string(),
                });
            }
            TagEnd::CodeBlock => {
                if let Some((lang, text)) = self.code.take() {
                    self.blocks.push(Block::CodeBlock {
                        lang,
                        text: text.trim_end_matches('\n').to_string(),
                    });
                }
            }
            TagEnd::List(_) => {
                self.list_stack.pop();
            }
            TagEnd::Item => {
                if !self.spans.is_empty() {
                    let current = self.list_stack.len().saturating_sub(1);
                    self.flush_list_item(current);
                }
                self.item_depth = self.item_depth.saturating_sub(1);
            }
            TagEnd::Emphasis => self.italic = self.italic.saturating_sub(1),
            TagEnd::Strong => self.bold = self.bold.saturating_sub(1),
            TagEnd::BlockQuote { .. } => self.quote = self.quote.saturating_sub(1),
            TagEnd::Image => self.image = self.image.saturating_sub(1),
            TagEnd::TableHead => {
                if let Some(t) = self.table.as_mut() {
                    t.in_head = false;
                    t.header = std::mem::take(&mut t.current_row);
                }
            }
            TagEnd::TableRow => {
                if let Some(t) = self.table.as_mut() {
                    if !t.in_head {
                        t.rows.push(std::mem::take(&mut t.current_row));
                    }
                }
            }
            TagEnd::TableCell => {
                if let Some(t) = self.table.as_mut() {
                    let cell = std::mem::take(&mut t.cell);
                    t.current_row.push(cell.trim().to_string());
                }
            }
            TagEnd::Table => {
                if let Some(t) = self.table.take() {
                    self.blocks.push(Block::Table {
                        header: t.header,
                        rows: t.rows,
                    });
                }
            }
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        if let Some((_, buf)) = self.code.as_mut() {
            buf.push_str(text);
        } else if let Some(t) = self.table.as_mut() {
            t.cell.push_str(text);
        } else {
            let style = self.current_style();
            self.spans.push(Span::styled(text, style));
        }
    }

    fn inline_code(&mut self, text: &str) {
        if let Some(t) = self.table.as_mut() {
            t.cell.push_str(text);
        } else {
            self.spans.push(Span::styled(text, SpanStyle::Code));
        }
    }

    fn current_style(&self) -> SpanStyle {
        if self.bold > 0 {
            SpanStyle::Bold
        } else if self.italic > 0 || self.quote > 0 || self.image > 0 {
            SpanStyle::Italic
        } else {
            SpanStyle::Plain
        }
    }

    fn flush_list_item(&mut self, list_idx: usize) {
        let index = match self.list_stack.get_mut(list_idx) {
            Some(Some(n)) => {
                let current = *n;
                *n += 1;
                Some(current)
            }
            _ => None,
        };
        let spans = coalesce(std::mem::take(&mut self.spans));
        self.blocks.push(Block::ListItem { spans, index });
    }

    fn finish(mut self) -> Vec<Block> {
        let spans = coalesce(std::mem::take(&mut self.spans));
        if !spans.is_empty() {
            self.blocks.push(Block::Paragraph(spans));
        }
        self.blocks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headings_and_paragraphs() {
        let blocks = parse_blocks("# Title\n\nSome prose.\n\n## Section\n\nMore prose.");
        assert_eq!(blocks.len(), 4);
        assert_eq!(
            blocks[0],
            Block::Heading {
                level: 1,
                text: "Title".into()
            }
        );
        assert!(matches!(blocks[1], Block::Paragraph(_)));
        assert_eq!(
            blocks[2],
            Block::Heading {
                level: 2,
                text: "Section".into()
            }
        );
    }

    #[test]
    fn six_hash_heading_is_level_six() {
        let blocks = parse_blocks("###### Deep");
        assert_eq!(
            blocks[0],
            Block::Heading {
                level: 6,
                text: "Deep".into()
            }
        );
    }

    #[test]
    fn fenced_code_keeps_language_and_content() {
        let blocks = parse_blocks("```rust\nfn main() {}\n```");
        match &blocks[0] {
            Block::CodeBlock { lang, text } => {
                assert_eq!(lang.as_deref(), Some("rust"));
                assert_eq!(text, "fn main() {}");
            }
            other => panic!("expected code block, got {other:?}"),
        }
    }

    #[test]
    fn emphasis_inside_fence_stays_literal() {
        let blocks = parse_blocks("```\n*not italic*\n```");
        match &blocks[0] {
            Block::CodeBlock { text, .. } => assert_eq!(text, "*not italic*"),
            other => panic!("expected code block, got {other:?}"),
        }
    }

    #[test]
    fn bold_and_italic_spans() {
        let blocks = parse_blocks("plain **bold** and *italic* end");
        let Block::Paragraph(spans) = &blocks[0] else {
            panic!("expected paragraph");
        };
        assert!(spans
            .iter()
            .any(|s| s.style == SpanStyle::Bold && s.text == "bold"));
        assert!(spans
            .iter()
            .any(|s| s.style == SpanStyle::Italic && s.text == "italic"));
    }

    #[test]
    fn link_text_survives_destination_dropped() {
        let blocks = parse_blocks("See [Overview](#overview) here.");
        let text = blocks[0].plain_text();
        assert!(text.contains("Overview"));
        assert!(!text.contains("#overview"));
    }

    #[test]
    fn ordered_list_items_carry_indices() {
        let blocks = parse_blocks("1. first\n2. second\n");
        let indices: Vec<_> = blocks
            .iter()
            .filter_map(|b| match b {
                Block::ListItem { index, .. } => Some(*index),
                _ => None,
            })
            .collect();
        assert_eq!(indices, vec![Some(1), Some(2)]);
    }

    #[test]
    fn unordered_list_items_have_no_index() {
        let blocks = parse_blocks("- alpha\n- beta\n");
        assert_eq!(blocks.len(), 2);
        assert!(blocks
            .iter()
            .all(|b| matches!(b, Block::ListItem { index: None, .. })));
    }

    #[test]
    fn table_round_trips() {
        let blocks = parse_blocks("| Name | Age |\n|------|-----|\n| Ada | 36 |\n");
        match &blocks[0] {
            Block::Table { header, rows } => {
                assert_eq!(header, &vec!["Name".to_string(), "Age".to_string()]);
                assert_eq!(rows, &vec![vec!["Ada".to_string(), "36".to_string()]]);
            }
            other => panic!("expected table, got {other:?}"),
        }
    }

    #[test]
    fn rule_becomes_block() {
        let blocks = parse_blocks("above\n\n---\n\nbelow");
        assert!(blocks.iter().any(|b| matches!(b, Block::Rule)));
    }

    #[test]
    fn blockquote_renders_italic() {
        let blocks = parse_blocks("> quoted words");
        let Block::Paragraph(spans) = &blocks[0] else {
            panic!("expected paragraph");
        };
        assert!(spans.iter().all(|s| s.style == SpanStyle::Italic));
    }

    #[test]
    fn plain_lines_in_order() {
        let blocks = parse_blocks("first line\n\nsecond line\n\nthird line");
        let texts: Vec<_> = blocks.iter().map(|b| b.plain_text()).collect();
        assert_eq!(texts, vec!["first line", "second line", "third line"]);
    }
}
