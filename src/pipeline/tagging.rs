//! Regex engine: ordered substitution passes plus a line-oriented scanner.
//!
//! This is the lightweight alternative to the parser engine: a fixed
//! sequence of pattern substitutions tags the text with `<h1>`…`<h6>`,
//! `<pre>`, `<code>`, `<b>` and `<i>` markers, then [`scan_blocks`] walks
//! the tagged lines and assembles the shared [`Block`] sequence. It is a
//! best-effort line pass, not a parser: unmatched or deeply nested syntax
//! flows through unchanged, and there is no error path.
//!
//! ## Pass order
//!
//! The passes are order-dependent and must run in the sequence below.
//! Fenced code is extracted into a stash *first* (leaving single-line
//! `<pre>` placeholders) so that no later pass can touch fence interiors —
//! a fence containing `*not italic*` or `# not a heading` must reach the
//! renderer byte-for-byte. Headings convert longest prefix first so a
//! six-hash line is never claimed by a shorter pattern.
//!
//! 1. Strip link-style table-of-contents references
//! 2. Extract fenced code blocks into the stash
//! 3. Convert ATX headings, `######` before `#`
//! 4. Convert inline code spans
//! 5. Convert bold markers
//! 6. Convert italic markers
//! 7. Strip the decorative-symbol denylist
//! 8. Remove horizontal-rule lines

use crate::block::{coalesce, Block, Span, SpanStyle};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::debug;

/// Convert Markdown text into the ordered block sequence.
pub fn parse_blocks(input: &str) -> Vec<Block> {
    let tagged = tag_document(input);
    let blocks = scan_blocks(&tagged);
    debug!(
        "Regex engine produced {} blocks ({} fenced)",
        blocks.len(),
        tagged.fences.len()
    );
    blocks
}

/// The tagged intermediate form: line-oriented text plus the code stash.
pub struct TaggedDocument {
    pub text: String,
    pub fences: Vec<Fence>,
}

/// One fenced code block lifted out of the text before the inline passes.
pub struct Fence {
    pub lang: Option<String>,
    pub body: String,
}

/// Run the ordered substitution passes.
pub fn tag_document(input: &str) -> TaggedDocument {
    let s = strip_toc_links(input);
    let (s, fences) = extract_fences(&s);
    let s = convert_headings(&s);
    let s = convert_inline_code(&s);
    let s = convert_bold(&s);
    let s = convert_italic(&s);
    let s = strip_decorations(&s);
    let text = remove_rules(&s);
    TaggedDocument { text, fences }
}

// ── Pass 1: strip TOC links ──────────────────────────────────────────────────

static RE_TOC_LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(#[^)]+\)").unwrap());

fn strip_toc_links(input: &str) -> String {
    RE_TOC_LINK.replace_all(input, "$1").to_string()
}

// ── Pass 2: extract fenced code blocks ───────────────────────────────────────

static RE_FENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)```([^\n]*)\n(.*?)```").unwrap());

fn extract_fences(input: &str) -> (String, Vec<Fence>) {
    let mut fences = Vec::new();
    let text = RE_FENCE
        .replace_all(input, |caps: &Captures<'_>| {
            let tag = caps[1].split([' ', ',']).next().unwrap_or("").trim();
            let lang = if tag.is_empty() {
                None
            } else {
                Some(tag.to_string())
            };
            let body = caps[2].trim_end_matches('\n').to_string();
            fences.push(Fence { lang, body });
            format!("<pre>{}</pre>", fences.len() - 1)
        })
        .to_string();
    (text, fences)
}

// ── Pass 3: ATX headings, longest prefix first ───────────────────────────────

static RE_HEADINGS: Lazy<Vec<(Regex, u8)>> = Lazy::new(|| {
    // Six-hash before one-hash: shorter prefixes must never claim a deeper
    // heading line.
    (1..=6u8)
        .rev()
        .map(|n| {
            let re = Regex::new(&format!(r"(?m)^#{{{n}}}\s+(.+)$")).unwrap();
            (re, n)
        })
        .collect()
});

fn convert_headings(input: &str) -> String {
    let mut s = input.to_string();
    for (re, level) in RE_HEADINGS.iter() {
        s = re
            .replace_all(&s, format!("<h{level}>$1</h{level}>"))
            .to_string();
    }
    s
}

// ── Pass 4: inline code spans ────────────────────────────────────────────────

static RE_INLINE_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([^`]+)`").unwrap());

fn convert_inline_code(input: &str) -> String {
    RE_INLINE_CODE
        .replace_all(input, "<code>$1</code>")
        .to_string()
}

// ── Pass 5 & 6: bold before italic ───────────────────────────────────────────

static RE_BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*([^*]+)\*\*").unwrap());
static RE_ITALIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*([^*]+)\*").unwrap());

fn convert_bold(input: &str) -> String {
    RE_BOLD.replace_all(input, "<b>$1</b>").to_string()
}

fn convert_italic(input: &str) -> String {
    RE_ITALIC.replace_all(input, "<i>$1</i>").to_string()
}

// ── Pass 7: decorative-symbol denylist ───────────────────────────────────────

/// The literal denylist is the contract; the variation selector rides along
/// because several of the listed symbols are typed with it.
const DECORATIONS: &[char] = &[
    '📚', '🎯', '🛠', '📊', '🔍', '💻', '🔑', '⚠', '🎤', '🚀', '🔧', '📝', '\u{FE0F}',
];

fn strip_decorations(input: &str) -> String {
    input.replace(DECORATIONS, "")
}

// ── Pass 8: horizontal rules ─────────────────────────────────────────────────

static RE_RULE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^-{3,}\s*$").unwrap());

fn remove_rules(input: &str) -> String {
    RE_RULE.replace_all(input, "").to_string()
}

// ── Scanner: tagged lines → blocks ───────────────────────────────────────────

static RE_H_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^<h([1-6])>(.*)</h[1-6]>$").unwrap());
static RE_PRE_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^<pre>(\d+)</pre>$").unwrap());
static RE_ORDERED: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+)\.\s+(.+)$").unwrap());
static RE_INLINE_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"</?(?:b|i|code)>").unwrap());

/// Walk the tagged lines and build the block sequence.
///
/// Contiguous untagged non-blank lines buffer into one paragraph; the buffer
/// flushes on every blank line and before every block-level element, and the
/// final buffered paragraph flushes when input ends without a trailing blank
/// line. No paragraph content is dropped or merged across block boundaries.
pub fn scan_blocks(tagged: &TaggedDocument) -> Vec<Block> {
    let mut blocks: Vec<Block> = Vec::new();
    let mut paragraph: Vec<String> = Vec::new();

    let flush = |paragraph: &mut Vec<String>, blocks: &mut Vec<Block>| {
        if paragraph.is_empty() {
            return;
        }
        let text = paragraph.join(" ");
        paragraph.clear();
        let spans = parse_spans(&text);
        if !spans.is_empty() {
            blocks.push(Block::Paragraph(spans));
        }
    };

    for raw_line in tagged.text.lines() {
        let line = raw_line.trim();

        if line.is_empty() {
            flush(&mut paragraph, &mut blocks);
            continue;
        }

        if let Some(caps) = RE_H_LINE.captures(line) {
            flush(&mut paragraph, &mut blocks);
            let level: u8 = caps[1].parse().unwrap_or(1);
            let text = RE_INLINE_TAG.replace_all(&caps[2], "").trim().to_string();
            blocks.push(Block::Heading { level, text });
            continue;
        }

        if let Some(caps) = RE_PRE_LINE.captures(line) {
            flush(&mut paragraph, &mut blocks);
            if let Some(fence) = caps[1].parse::<usize>().ok().and_then(|n| tagged.fences.get(n)) {
                blocks.push(Block::CodeBlock {
                    lang: fence.lang.clone(),
                    text: fence.body.clone(),
                });
            }
            continue;
        }

        if let Some(rest) = line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) {
            flush(&mut paragraph, &mut blocks);
            blocks.push(Block::ListItem {
                spans: parse_spans(rest.trim()),
                index: None,
            });
            continue;
        }

        if let Some(caps) = RE_ORDERED.captures(line) {
            flush(&mut paragraph, &mut blocks);
            blocks.push(Block::ListItem {
                spans: parse_spans(caps[2].trim()),
                index: caps[1].parse().ok(),
            });
            continue;
        }

        paragraph.push(line.to_string());
    }

    // Trailing paragraph: input ending without a blank line still flushes.
    flush(&mut paragraph, &mut blocks);
    blocks
}

static RE_SPAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"<(b|i|code)>(.*?)</(?:b|i|code)>").unwrap());

/// Split a tagged line into styled spans; untagged text stays plain and
/// unmatched tags pass through as literal text.
fn parse_spans(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut last = 0;
    for caps in RE_SPAN.captures_iter(text) {
        let whole = caps.get(0).expect("capture 0 always present");
        if whole.start() > last {
            spans.push(Span::plain(&text[last..whole.start()]));
        }
        let style = match &caps[1] {
            "b" => SpanStyle::Bold,
            "i" => SpanStyle::Italic,
            _ => SpanStyle::Code,
        };
        spans.push(Span::styled(&caps[2], style));
        last = whole.end();
    }
    if last < text.len() {
        spans.push(Span::plain(&text[last..]));
    }
    coalesce(spans)
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toc_links_keep_text() {
        assert_eq!(
            strip_toc_links("See [Overview](#overview) and [Setup](#setup)."),
            "See Overview and Setup."
        );
    }

    #[test]
    fn external_links_untouched() {
        let input = "[docs](https://example.com)";
        assert_eq!(strip_toc_links(input), input);
    }

    #[test]
    fn fences_extract_with_language() {
        let (text, fences) = extract_fences("```python\nprint('hi')\n```\n");
        assert_eq!(text, "<pre>0</pre>\n");
        assert_eq!(fences[0].lang.as_deref(), Some("python"));
        assert_eq!(fences[0].body, "print('hi')");
    }

    #[test]
    fn fences_extract_untagged() {
        let (_, fences) = extract_fences("```\nplain\n```");
        assert_eq!(fences[0].lang, None);
        assert_eq!(fences[0].body, "plain");
    }

    #[test]
    fn six_hash_converts_before_one_hash() {
        let out = convert_headings("###### Deep\n# Top");
        assert!(out.contains("<h6>Deep</h6>"), "got: {out}");
        assert!(out.contains("<h1>Top</h1>"));
    }

    #[test]
    fn heading_requires_space_after_hashes() {
        // "#hashtag" is not a heading.
        assert_eq!(convert_headings("#hashtag"), "#hashtag");
    }

    #[test]
    fn inline_code_converts() {
        assert_eq!(
            convert_inline_code("run `cargo build` now"),
            "run <code>cargo build</code> now"
        );
    }

    #[test]
    fn bold_before_italic() {
        let s = convert_italic(&convert_bold("**strong** and *soft*"));
        assert_eq!(s, "<b>strong</b> and <i>soft</i>");
    }

    #[test]
    fn decorations_stripped() {
        assert_eq!(strip_decorations("🚀 Launch 📚 notes ⚠️ warn"), " Launch  notes  warn");
    }

    #[test]
    fn rules_removed() {
        let out = remove_rules("above\n---\nbelow\n-----\nend");
        assert!(!out.contains("---"));
        assert!(out.contains("above"));
        assert!(out.contains("end"));
    }

    // ── Scanner ──────────────────────────────────────────────────────────

    #[test]
    fn paragraph_flushes_on_blank_line() {
        let blocks = parse_blocks("line one\nline two\n\nline three\n");
        let paragraphs: Vec<_> = blocks
            .iter()
            .filter(|b| matches!(b, Block::Paragraph(_)))
            .collect();
        assert_eq!(paragraphs.len(), 2);
        assert_eq!(paragraphs[0].plain_text(), "line one line two");
        assert_eq!(paragraphs[1].plain_text(), "line three");
    }

    #[test]
    fn trailing_paragraph_without_blank_line_flushes() {
        let blocks = parse_blocks("# Title\nfinal words without trailing newline");
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[1].plain_text(), "final words without trailing newline");
    }

    #[test]
    fn heading_flushes_buffered_paragraph() {
        let blocks = parse_blocks("prose before\n## Section\nprose after\n");
        assert!(matches!(blocks[0], Block::Paragraph(_)));
        assert!(matches!(blocks[1], Block::Heading { level: 2, .. }));
        assert!(matches!(blocks[2], Block::Paragraph(_)));
    }

    #[test]
    fn emphasis_inside_fence_stays_literal() {
        let blocks = parse_blocks("```\n*not italic* and **not bold**\n# not a heading\n```\n");
        match &blocks[0] {
            Block::CodeBlock { text, .. } => {
                assert_eq!(text, "*not italic* and **not bold**\n# not a heading");
            }
            other => panic!("expected code block, got {other:?}"),
        }
    }

    #[test]
    fn list_items_become_blocks() {
        let blocks = parse_blocks("- alpha\n- beta\n1. first\n");
        assert!(matches!(
            blocks[0],
            Block::ListItem { index: None, .. }
        ));
        assert!(matches!(
            blocks[2],
            Block::ListItem { index: Some(1), .. }
        ));
    }

    #[test]
    fn tagged_spans_parse() {
        let spans = parse_spans("plain <b>bold</b> mid <code>x()</code> end");
        assert_eq!(spans.len(), 5);
        assert_eq!(spans[1].style, SpanStyle::Bold);
        assert_eq!(spans[3].style, SpanStyle::Code);
        assert_eq!(spans[4].text, " end");
    }

    #[test]
    fn unmatched_tags_stay_literal() {
        let spans = parse_spans("lonely <b>opener without close");
        assert_eq!(spans.len(), 1);
        assert!(spans[0].text.contains("<b>"));
    }

    #[test]
    fn full_pipeline_heading_precedence() {
        let blocks = parse_blocks("###### Six\n##### Five\n# One\n");
        let levels: Vec<u8> = blocks
            .iter()
            .filter_map(|b| match b {
                Block::Heading { level, .. } => Some(*level),
                _ => None,
            })
            .collect();
        assert_eq!(levels, vec![6, 5, 1]);
    }
}
