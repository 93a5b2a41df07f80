//! Direct flow-layout rendering: blocks → paginated PDF bytes.
//!
//! The renderer walks the ordered block sequence exactly once, emitting one
//! styled drawing primitive per block (paragraph, heading, framed code
//! layout, table grid, list line) followed by a spacer, and lets `genpdf`
//! handle line wrapping and page breaks. The document's first level-1
//! heading is recognized as the title and gets the distinct centered title
//! style, once.
//!
//! ## Why render into memory?
//!
//! `genpdf` can write straight to a file, but a layout failure halfway
//! through would leave a truncated PDF behind. Rendering into a `Vec<u8>`
//! first means a [`Md2PdfError::RenderFailed`] never creates or clobbers
//! the output path; the caller writes the buffer atomically afterwards.

use crate::block::{Block, Span, SpanStyle};
use crate::config::ConversionConfig;
use crate::error::Md2PdfError;
use crate::fonts::FontSet;
use crate::styles::{BlockStyle, Rgb};
use genpdf::elements::{Break, FrameCellDecorator, LinearLayout, Paragraph, TableLayout};
use genpdf::fonts::{Font, FontFamily};
use genpdf::{style, Alignment, Document, Element, Margins, PaperSize, SimplePageDecorator};
use tracing::{debug, info};

/// Render the block sequence to PDF bytes.
pub fn render_pdf(
    blocks: &[Block],
    title: Option<&str>,
    config: &ConversionConfig,
    fonts: FontSet,
) -> Result<Vec<u8>, Md2PdfError> {
    let mut doc = Document::new(fonts.sans);
    let mono = doc.add_font_family(fonts.mono);

    doc.set_paper_size(PaperSize::A4);
    doc.set_font_size(config.base_font_size);
    doc.set_line_spacing(config.line_spacing);
    if let Some(t) = title {
        doc.set_title(t.to_string());
    }

    let mut decorator = SimplePageDecorator::new();
    decorator.set_margins(pad(config.margin_mm));
    if config.page_numbers {
        decorator.set_header(|page| {
            let mut header = LinearLayout::vertical();
            if page > 1 {
                header.push(
                    Paragraph::new(format!("Page {page}"))
                        .aligned(Alignment::Right)
                        .styled(
                            style::Style::new()
                                .with_font_size(9)
                                .with_color(style::Color::Rgb(0x66, 0x66, 0x66)),
                        ),
                );
                header.push(Break::new(0.5));
            }
            header
        });
    }
    doc.set_page_decorator(decorator);

    let mut emitter = Emitter {
        doc: &mut doc,
        mono,
        config,
        title_done: false,
    };
    for block in blocks {
        emitter.emit(block)?;
    }

    debug!("Layout assembled from {} blocks, rendering", blocks.len());
    let mut buf = Vec::new();
    doc.render(&mut buf)
        .map_err(|e| Md2PdfError::RenderFailed {
            detail: e.to_string(),
        })?;
    info!("Rendered {} bytes of PDF", buf.len());
    Ok(buf)
}

struct Emitter<'a> {
    doc: &'a mut Document,
    mono: FontFamily<Font>,
    config: &'a ConversionConfig,
    title_done: bool,
}

impl Emitter<'_> {
    fn emit(&mut self, block: &Block) -> Result<(), Md2PdfError> {
        let sheet = &self.config.stylesheet;
        match block {
            Block::Heading { level, text } => {
                let is_title = *level == 1
                    && self.config.title_from_first_heading
                    && !self.title_done;
                let bs = if is_title {
                    self.title_done = true;
                    &sheet.title
                } else {
                    sheet.heading(*level)
                };
                let style = self.text_style(bs);
                let mut p = Paragraph::new(text.as_str());
                if bs.centered {
                    p = p.aligned(Alignment::Center);
                }
                self.doc.push(p.styled(style));
                self.doc.push(Break::new(bs.spacing_after));
            }
            Block::Paragraph(spans) => {
                let bs = &sheet.paragraph;
                let p = self.spans_paragraph(spans, bs);
                self.doc.push(p);
                self.doc.push(Break::new(bs.spacing_after));
            }
            Block::CodeBlock { text, .. } => {
                let bs = &sheet.code;
                let code_style = self.text_style(bs);
                let mut lines = LinearLayout::vertical();
                if text.is_empty() {
                    lines.push(Paragraph::new("").styled(code_style));
                } else {
                    for line in text.lines() {
                        lines.push(Paragraph::new(preserve_indent(line)).styled(code_style));
                    }
                }
                let padded = lines.padded(Margins::trbl(2.0, 3.0, 2.0, 3.0));
                if bs.framed {
                    self.doc.push(padded.framed());
                } else {
                    self.doc.push(padded);
                }
                self.doc.push(Break::new(bs.spacing_after));
            }
            Block::ListItem { spans, index } => {
                let bs = &sheet.list_item;
                let marker = match index {
                    Some(n) => format!("{n}. "),
                    None => "\u{2022} ".to_string(),
                };
                let style = self.text_style(bs);
                let mut p = Paragraph::default();
                p.push_styled(marker, style);
                self.push_spans(&mut p, spans, bs);
                self.doc.push(p.padded(Margins::trbl(0.0, 0.0, 0.0, 5.0)));
                self.doc.push(Break::new(bs.spacing_after));
            }
            Block::Table { header, rows } => {
                self.emit_table(header, rows)?;
            }
            Block::Rule => {
                self.doc.push(Break::new(sheet.rule_spacing));
            }
        }
        Ok(())
    }

    fn emit_table(&mut self, header: &[String], rows: &[Vec<String>]) -> Result<(), Md2PdfError> {
        let sheet = &self.config.stylesheet;
        let bs = &sheet.table;
        let columns = rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(header.len()))
            .max()
            .unwrap_or(1)
            .max(1);

        let mut table = TableLayout::new(vec![1; columns]);
        table.set_cell_decorator(FrameCellDecorator::new(true, true, false));

        let cell_style = self.text_style(bs);
        let header_style = cell_style.bold();

        let mut head = table.row();
        for i in 0..columns {
            let text = header.get(i).cloned().unwrap_or_default();
            head.push_element(Paragraph::new(text).styled(header_style).padded(pad(1.0)));
        }
        head.push().map_err(|e| Md2PdfError::RenderFailed {
            detail: format!("table header row: {e}"),
        })?;

        for row in rows {
            let mut r = table.row();
            for i in 0..columns {
                let text = row.get(i).cloned().unwrap_or_default();
                r.push_element(Paragraph::new(text).styled(cell_style).padded(pad(1.0)));
            }
            r.push().map_err(|e| Md2PdfError::RenderFailed {
                detail: format!("table row: {e}"),
            })?;
        }

        self.doc.push(table);
        self.doc.push(Break::new(bs.spacing_after));
        Ok(())
    }

    fn spans_paragraph(&self, spans: &[Span], bs: &BlockStyle) -> Paragraph {
        let mut p = Paragraph::default();
        self.push_spans(&mut p, spans, bs);
        p
    }

    fn push_spans(&self, p: &mut Paragraph, spans: &[Span], bs: &BlockStyle) {
        let base = self.text_style(bs);
        for span in spans {
            let s = match span.style {
                SpanStyle::Plain => base,
                SpanStyle::Bold => base.bold(),
                SpanStyle::Italic => base.italic(),
                SpanStyle::Code => base.with_font_family(self.mono),
            };
            p.push_styled(span.text.clone(), s);
        }
    }

    /// Translate a [`BlockStyle`] into a genpdf text style.
    ///
    /// A style without a fixed size inherits the configured base font size;
    /// this is what makes `--font-size` reach prose and list items.
    fn text_style(&self, bs: &BlockStyle) -> style::Style {
        let size = bs.font_size.unwrap_or(self.config.base_font_size);
        let mut s = style::Style::new()
            .with_font_size(size)
            .with_color(color(bs.color));
        if bs.bold {
            s = s.bold();
        }
        if bs.italic {
            s = s.italic();
        }
        if bs.monospace {
            s = s.with_font_family(self.mono);
        }
        s
    }
}

fn color(rgb: Rgb) -> style::Color {
    style::Color::Rgb(rgb.0, rgb.1, rgb.2)
}

fn pad(mm: f64) -> Margins {
    Margins::trbl(mm, mm, mm, mm)
}

/// Replace leading spaces and tabs with non-breaking spaces so code
/// indentation survives paragraph layout.
fn preserve_indent(line: &str) -> String {
    let stripped = line.trim_start_matches([' ', '\t']);
    let lead = &line[..line.len() - stripped.len()];
    let mut out = String::with_capacity(line.len() + lead.len());
    for c in lead.chars() {
        match c {
            '\t' => out.push_str("\u{a0}\u{a0}\u{a0}\u{a0}"),
            _ => out.push('\u{a0}'),
        }
    }
    out.push_str(stripped);
    out
}
