//! Font provider seam.
//!
//! The engine never loads font data. The caller hands it two font handles
//! and a way to measure text, which is needed for geometry that hugs a
//! chord (ring diamonds, breath marks) and for the key box.

use crate::model::FontHandle;

pub trait FontProvider {
    /// Font for titles, labels and other running text.
    fn text_font(&self) -> FontHandle;

    /// Font carrying the chord glyphs.
    fn chord_font(&self) -> FontHandle;

    /// Advance width of `text` set in `font` at `size` points.
    fn text_width(&self, font: &FontHandle, size: f64, text: &str) -> f64;
}

/// Metrics that give every character the same advance, `size × advance`.
///
/// Good enough for previews and tests; a PDF sink should supply the real
/// font metrics instead.
#[derive(Debug, Clone)]
pub struct FixedAdvanceFonts {
    pub text: FontHandle,
    pub chord: FontHandle,
    pub advance: f64,
}

impl Default for FixedAdvanceFonts {
    fn default() -> Self {
        Self {
            text: FontHandle::new("Roboto-Regular"),
            chord: FontHandle::new("ChordletType"),
            advance: 0.6,
        }
    }
}

impl FontProvider for FixedAdvanceFonts {
    fn text_font(&self) -> FontHandle {
        self.text.clone()
    }

    fn chord_font(&self) -> FontHandle {
        self.chord.clone()
    }

    fn text_width(&self, _font: &FontHandle, size: f64, text: &str) -> f64 {
        text.chars().count() as f64 * size * self.advance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_advance_counts_chars_not_bytes() {
        let fonts = FixedAdvanceFonts::default();
        let font = fonts.chord_font();
        assert_eq!(fonts.text_width(&font, 10.0, "Am"), 12.0);
        assert_eq!(fonts.text_width(&font, 10.0, "\u{e10d}"), 6.0);
        assert_eq!(fonts.text_width(&font, 10.0, ""), 0.0);
    }
}
