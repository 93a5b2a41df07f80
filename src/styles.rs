//! The fixed style rule set: Block kind → visual attributes.
//!
//! Appearance is a compiled-in preset, not runtime configuration. The whole
//! mapping lives in one immutable [`StyleSheet`] value that is constructed
//! once and passed by reference into the renderer — never a process-wide
//! global, so two conversions with different sheets can coexist in one
//! process.
//!
//! The mapping is total: every block kind the transformers can produce has
//! an entry, and heading levels outside the configured range clamp to the
//! nearest entry instead of failing.

use serde::Serialize;

/// An RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Near-black body text (#333333).
    pub const BODY: Rgb = Rgb(0x33, 0x33, 0x33);
    /// Dark slate used for level-1/3 headings and the title (#2c3e50).
    pub const SLATE: Rgb = Rgb(0x2c, 0x3e, 0x50);
    /// Softer slate used for level-2 headings (#34495e).
    pub const SLATE_LIGHT: Rgb = Rgb(0x34, 0x49, 0x5e);
}

/// Visual attributes applied to one block kind.
#[derive(Debug, Clone, Serialize)]
pub struct BlockStyle {
    /// Font size in points. `None` inherits the configured base size, so
    /// prose and list items follow `base_font_size` while headings and code
    /// keep their preset sizes.
    pub font_size: Option<u8>,
    pub color: Rgb,
    /// Vertical space after the element, in line heights.
    pub spacing_after: f64,
    pub bold: bool,
    pub italic: bool,
    /// Render in the monospace family.
    pub monospace: bool,
    pub centered: bool,
    /// Draw a frame around the element (code blocks).
    pub framed: bool,
}

impl Default for BlockStyle {
    fn default() -> Self {
        Self {
            font_size: None,
            color: Rgb::BODY,
            spacing_after: 0.5,
            bold: false,
            italic: false,
            monospace: false,
            centered: false,
            framed: false,
        }
    }
}

/// The fixed mapping from block kind to [`BlockStyle`].
#[derive(Debug, Clone, Serialize)]
pub struct StyleSheet {
    /// Distinct centered styling for the document's first level-1 heading.
    pub title: BlockStyle,
    /// Per-level heading styles, index 0 = `#`.
    pub headings: [BlockStyle; 6],
    pub paragraph: BlockStyle,
    pub code: BlockStyle,
    pub list_item: BlockStyle,
    pub table: BlockStyle,
    /// Spacing emitted for a horizontal rule, in line heights.
    pub rule_spacing: f64,
}

impl Default for StyleSheet {
    fn default() -> Self {
        let heading = |size: u8, color: Rgb, after: f64| BlockStyle {
            font_size: Some(size),
            color,
            spacing_after: after,
            bold: true,
            ..BlockStyle::default()
        };

        Self {
            title: BlockStyle {
                font_size: Some(20),
                color: Rgb::SLATE,
                spacing_after: 2.0,
                bold: true,
                centered: true,
                ..BlockStyle::default()
            },
            headings: [
                heading(16, Rgb::SLATE, 1.0),
                heading(14, Rgb::SLATE_LIGHT, 0.8),
                heading(12, Rgb::SLATE, 0.7),
                heading(11, Rgb::SLATE, 0.6),
                heading(11, Rgb::SLATE_LIGHT, 0.6),
                heading(11, Rgb::SLATE_LIGHT, 0.6),
            ],
            paragraph: BlockStyle::default(),
            code: BlockStyle {
                font_size: Some(9),
                monospace: true,
                framed: true,
                spacing_after: 0.8,
                ..BlockStyle::default()
            },
            list_item: BlockStyle {
                spacing_after: 0.25,
                ..BlockStyle::default()
            },
            table: BlockStyle {
                font_size: Some(10),
                spacing_after: 0.8,
                ..BlockStyle::default()
            },
            rule_spacing: 1.5,
        }
    }
}

impl StyleSheet {
    /// Style for a heading of the given 1-based level.
    ///
    /// Levels outside 1–6 clamp to the nearest entry; the renderer must
    /// never fail because a transformer produced an unexpected level.
    pub fn heading(&self, level: u8) -> &BlockStyle {
        let idx = (level.max(1) as usize - 1).min(self.headings.len() - 1);
        &self.headings[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_levels_clamp() {
        let sheet = StyleSheet::default();
        assert_eq!(sheet.heading(0).font_size, sheet.heading(1).font_size);
        assert_eq!(sheet.heading(7).font_size, sheet.heading(6).font_size);
    }

    #[test]
    fn default_preset_matches_fixed_palette() {
        let sheet = StyleSheet::default();
        assert_eq!(sheet.title.font_size, Some(20));
        assert!(sheet.title.centered);
        assert_eq!(sheet.heading(1).color, Rgb::SLATE);
        assert_eq!(sheet.heading(2).color, Rgb::SLATE_LIGHT);
        assert!(sheet.code.monospace);
        assert!(sheet.code.framed);
    }

    #[test]
    fn prose_and_list_items_inherit_base_size() {
        // Paragraphs and list items carry no fixed size, so the configured
        // base font size actually reaches them.
        let sheet = StyleSheet::default();
        assert_eq!(sheet.paragraph.font_size, None);
        assert_eq!(sheet.list_item.font_size, None);
        assert_eq!(sheet.code.font_size, Some(9));
    }
}
