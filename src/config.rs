//! Configuration types for Markdown-to-PDF conversion.
//!
//! All conversion behaviour is controlled through [`ConversionConfig`], built
//! via its [`ConversionConfigBuilder`]. Keeping every knob in one struct makes
//! it trivial to share a config across calls and to diff two runs to
//! understand why their outputs differ.
//!
//! # Design choice: builder over constructor
//! The builder lets callers set only what they care about and rely on
//! documented defaults for the rest, and gives validation a single choke
//! point ([`ConversionConfigBuilder::build`]).

use crate::error::Md2PdfError;
use crate::styles::StyleSheet;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Which transformer turns Markdown text into the block sequence.
///
/// The two engines solve the same problem with different fidelity/complexity
/// trade-offs; they are alternatives, not collaborating components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Engine {
    /// Full CommonMark parser (pulldown-cmark) with tables and
    /// strikethrough. Handles nested and malformed input gracefully. (default)
    #[default]
    Parser,
    /// Fixed, ordered regex substitution passes plus a line-oriented
    /// scanner. Best-effort: unmatched syntax passes through as literal text.
    Regex,
}

/// Configuration for a Markdown-to-PDF conversion.
///
/// Built via [`ConversionConfig::builder()`] or using
/// [`ConversionConfig::default()`].
///
/// # Example
/// ```rust
/// use md2pdf::{ConversionConfig, Engine};
///
/// let config = ConversionConfig::builder()
///     .engine(Engine::Regex)
///     .base_font_size(10)
///     .page_numbers(false)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct ConversionConfig {
    /// Transformer engine. Default: [`Engine::Parser`].
    pub engine: Engine,

    /// Directory containing the Liberation TTF families. Default: `None`.
    ///
    /// When `None`, discovery falls back to `MD2PDF_FONT_DIR` and a list of
    /// well-known system font directories (see [`crate::fonts`]).
    pub font_dir: Option<PathBuf>,

    /// Body font size in points. Range: 6–32. Default: 11.
    ///
    /// Heading and code sizes come from the style sheet, not this field;
    /// this is the size used for prose and list items when the style sheet
    /// entry does not override it.
    pub base_font_size: u8,

    /// Page margin on all four sides, in millimetres. Range: 5–50. Default: 20.
    ///
    /// A4 with 20 mm margins leaves a 170 mm text column, comfortable for
    /// 11 pt body text. Values below 5 mm collide with printer dead zones.
    pub margin_mm: f64,

    /// Line spacing multiplier for body text. Default: 1.25.
    pub line_spacing: f64,

    /// Render "Page N" in the running decorator from page 2 onward. Default: true.
    pub page_numbers: bool,

    /// Treat the document's first level-1 heading as the title and apply the
    /// distinct centered title style. Default: true.
    pub title_from_first_heading: bool,

    /// The fixed block-kind → visual-attribute mapping.
    pub stylesheet: StyleSheet,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            engine: Engine::default(),
            font_dir: None,
            base_font_size: 11,
            margin_mm: 20.0,
            line_spacing: 1.25,
            page_numbers: true,
            title_from_first_heading: true,
            stylesheet: StyleSheet::default(),
        }
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ConversionConfig`].
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    pub fn engine(mut self, engine: Engine) -> Self {
        self.config.engine = engine;
        self
    }

    pub fn font_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.font_dir = Some(dir.into());
        self
    }

    pub fn base_font_size(mut self, pt: u8) -> Self {
        self.config.base_font_size = pt;
        self
    }

    pub fn margin_mm(mut self, mm: f64) -> Self {
        self.config.margin_mm = mm;
        self
    }

    pub fn line_spacing(mut self, factor: f64) -> Self {
        self.config.line_spacing = factor;
        self
    }

    pub fn page_numbers(mut self, on: bool) -> Self {
        self.config.page_numbers = on;
        self
    }

    pub fn title_from_first_heading(mut self, on: bool) -> Self {
        self.config.title_from_first_heading = on;
        self
    }

    pub fn stylesheet(mut self, sheet: StyleSheet) -> Self {
        self.config.stylesheet = sheet;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConversionConfig, Md2PdfError> {
        let c = &self.config;
        if c.base_font_size < 6 || c.base_font_size > 32 {
            return Err(Md2PdfError::InvalidConfig(format!(
                "base font size must be 6–32 pt, got {}",
                c.base_font_size
            )));
        }
        if !(5.0..=50.0).contains(&c.margin_mm) {
            return Err(Md2PdfError::InvalidConfig(format!(
                "margin must be 5–50 mm, got {}",
                c.margin_mm
            )));
        }
        if !(0.5..=3.0).contains(&c.line_spacing) {
            return Err(Md2PdfError::InvalidConfig(format!(
                "line spacing must be 0.5–3.0, got {}",
                c.line_spacing
            )));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_builds() {
        let config = ConversionConfig::builder().build().unwrap();
        assert_eq!(config.engine, Engine::Parser);
        assert!(config.page_numbers);
    }

    #[test]
    fn rejects_tiny_font() {
        let err = ConversionConfig::builder().base_font_size(4).build();
        assert!(matches!(err, Err(Md2PdfError::InvalidConfig(_))));
    }

    #[test]
    fn rejects_huge_margin() {
        let err = ConversionConfig::builder().margin_mm(80.0).build();
        assert!(matches!(err, Err(Md2PdfError::InvalidConfig(_))));
    }

    #[test]
    fn rejects_absurd_line_spacing() {
        let err = ConversionConfig::builder().line_spacing(10.0).build();
        assert!(matches!(err, Err(Md2PdfError::InvalidConfig(_))));
    }
}
