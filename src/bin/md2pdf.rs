//! CLI binary for md2pdf.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `ConversionConfig` and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use md2pdf::{convert_to_file, inspect, ConversionConfig, Engine};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Basic conversion (notes.md → notes.pdf)
  md2pdf notes.md

  # Explicit output path
  md2pdf notes.md -o build/notes.pdf

  # Use the regex engine
  md2pdf --engine regex notes.md

  # Smaller body text, no page numbers
  md2pdf --font-size 9 --no-page-numbers report.md

  # Fonts from a non-standard location
  md2pdf --font-dir ~/fonts/liberation notes.md

  # Show the document structure without rendering
  md2pdf --inspect-only notes.md

  # Structure as JSON
  md2pdf --inspect-only --json notes.md > outline.json

ENVIRONMENT VARIABLES:
  MD2PDF_OUTPUT     Default output path
  MD2PDF_ENGINE     Transformer engine (parser, regex)
  MD2PDF_FONT_DIR   Directory containing the Liberation TTF families

SETUP:
  Rendering embeds TTF fonts into the PDF, so the Liberation families must
  be installed (they usually are):

    Debian/Ubuntu:  apt install fonts-liberation
    Fedora:         dnf install liberation-fonts
    Alpine:         apk add font-liberation

  Or point MD2PDF_FONT_DIR / --font-dir at any directory containing
  LiberationSans-Regular.ttf (and friends).
"#;

/// Convert Markdown documents to styled, paginated PDF files.
#[derive(Parser, Debug)]
#[command(
    name = "md2pdf",
    version,
    about = "Convert Markdown documents to styled, paginated PDF files",
    long_about = "Convert Markdown documents to clean, styled PDF files with a fixed visual \
preset: centered title, dark slate headings, framed monospace code blocks, bordered tables, \
and page numbers. Two transformer engines are available: a full CommonMark parser (default) \
and a simpler ordered-regex engine.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Markdown file to convert.
    input: PathBuf,

    /// Output PDF path. Default: the input path with a .pdf extension.
    #[arg(short, long, env = "MD2PDF_OUTPUT")]
    output: Option<PathBuf>,

    /// Transformer engine: parser, regex.
    #[arg(long, env = "MD2PDF_ENGINE", value_enum, default_value = "parser")]
    engine: EngineArg,

    /// Directory containing the Liberation TTF families.
    #[arg(long, env = "MD2PDF_FONT_DIR")]
    font_dir: Option<PathBuf>,

    /// Body font size in points (6–32).
    #[arg(long, default_value_t = 11,
          value_parser = clap::value_parser!(u8).range(6..=32))]
    font_size: u8,

    /// Page margin in millimetres (5–50).
    #[arg(long, default_value_t = 20.0)]
    margin: f64,

    /// Do not render "Page N" on pages after the first.
    #[arg(long)]
    no_page_numbers: bool,

    /// Do not promote the first level-1 heading to the title style.
    #[arg(long)]
    no_title: bool,

    /// Print the document outline only, no rendering.
    #[arg(long)]
    inspect_only: bool,

    /// Output structured JSON (outline or stats) instead of text.
    #[arg(long)]
    json: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "MD2PDF_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "MD2PDF_QUIET")]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum EngineArg {
    Parser,
    Regex,
}

impl From<EngineArg> for Engine {
    fn from(v: EngineArg) -> Self {
        match v {
            EngineArg::Parser => Engine::Parser,
            EngineArg::Regex => Engine::Regex,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let config = build_config(&cli)?;

    // ── Inspect-only mode ────────────────────────────────────────────────
    if cli.inspect_only {
        // Same loader as conversion, so a missing or non-UTF-8 input gets
        // the same typed message in both modes.
        let text = md2pdf::pipeline::input::load_document(&cli.input)?;
        let outline = inspect(&text, &config);

        if cli.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&outline).context("Failed to serialise outline")?
            );
        } else {
            println!("File:         {}", cli.input.display());
            if let Some(ref t) = outline.title {
                println!("Title:        {t}");
            }
            println!("Blocks:       {}", outline.blocks);
            println!("Headings:     {}", outline.headings.len());
            println!("Paragraphs:   {}", outline.paragraphs);
            println!("Code blocks:  {}", outline.code_blocks);
            println!("List items:   {}", outline.list_items);
            println!("Tables:       {}", outline.tables);
            for h in &outline.headings {
                println!("  {}{}", "  ".repeat(h.level.saturating_sub(1) as usize), h.text);
            }
        }
        return Ok(());
    }

    // ── Run conversion ───────────────────────────────────────────────────
    let output_path = cli
        .output
        .clone()
        .unwrap_or_else(|| cli.input.with_extension("pdf"));

    let out = convert_to_file(&cli.input, &output_path, &config).context("Conversion failed")?;

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&out.stats).context("Failed to serialise stats")?
        );
    } else if !cli.quiet {
        eprintln!(
            "{}  {}  {}",
            green("✔"),
            bold(&output_path.display().to_string()),
            dim(&format!(
                "{:.1} KB",
                out.stats.output_bytes as f64 / 1024.0
            )),
        );
        eprintln!(
            "   {} blocks  {}ms parse  {}ms render",
            dim(&out.stats.blocks.to_string()),
            out.stats.parse_duration_ms,
            out.stats.render_duration_ms,
        );
    }

    Ok(())
}

/// Map CLI args to `ConversionConfig`.
fn build_config(cli: &Cli) -> Result<ConversionConfig> {
    let mut builder = ConversionConfig::builder()
        .engine(cli.engine.into())
        .base_font_size(cli.font_size)
        .margin_mm(cli.margin)
        .page_numbers(!cli.no_page_numbers)
        .title_from_first_heading(!cli.no_title);

    if let Some(ref dir) = cli.font_dir {
        builder = builder.font_dir(dir);
    }

    builder.build().context("Invalid configuration")
}
