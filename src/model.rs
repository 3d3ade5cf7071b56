//! Data model for a laid-out chord chart.
//!
//! Bars are transient: they live only while one content line is being laid
//! out. What survives a render is the ordered list of drawing commands plus
//! the document metadata a page sink needs to paint them.

use serde::{Deserialize, Serialize};

use crate::chord::ChordToken;
use crate::error::ChartError;

/// Raw repeat count that means "repeat until cue" rather than a number.
pub const REPEAT_TO_CUE: i32 = -1;

/// Trailing edge of a bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Barline {
    #[default]
    Single,
    Double,
    StartRepeat,
    EndRepeat,
    DoubleRepeat,
    /// Only ever assigned at draw time, to the last bar of the chart.
    Final,
}

/// Time signature, e.g. 3/4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSignature {
    pub top: u32,
    pub bottom: u32,
}

/// How many times an end-repeat section is played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Repeat {
    Count(i32),
    UntilCue,
}

impl Repeat {
    /// The signed integer form, with [`REPEAT_TO_CUE`] for cues.
    pub fn as_raw(self) -> i32 {
        match self {
            Repeat::Count(n) => n,
            Repeat::UntilCue => REPEAT_TO_CUE,
        }
    }
}

/// A segment of a chart line between two barlines.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Bar {
    /// Chords in left-to-right order.
    pub chords: Vec<ChordToken>,
    pub barline: Barline,
    pub repeat: Option<Repeat>,
    pub signature: Option<TimeSignature>,
}

impl Bar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, raw: &str) {
        self.chords.push(ChordToken::parse(raw));
    }

    /// Repeat count as a signed integer; 0 when unset.
    pub fn repeat_count(&self) -> i32 {
        self.repeat.map_or(0, Repeat::as_raw)
    }
}

/// Opaque font reference owned by the font provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FontHandle(pub String);

impl FontHandle {
    pub fn new(name: impl Into<String>) -> Self {
        FontHandle(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

/// An RGB colour with components in 0..=1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0.0, g: 0.0, b: 0.0 };
    pub const WHITE: Rgb = Rgb { r: 1.0, g: 1.0, b: 1.0 };

    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Rgb {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
        }
    }

    /// Parse any CSS colour: hex, `rgb()`, `rgba()`, `hsl()`, `hwb()` or a
    /// named colour. Alpha is dropped.
    pub fn parse(s: &str) -> Option<Self> {
        csscolorparser::parse(s.trim())
            .ok()
            .map(|c| Rgb { r: c.r, g: c.g, b: c.b })
    }

    pub fn to_hex(self) -> String {
        let to_u8 = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", to_u8(self.r), to_u8(self.g), to_u8(self.b))
    }
}

/// Point in page coordinates (origin bottom-left, y up).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Line width and colour captured when a shape is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub width: f64,
    pub color: Rgb,
}

/// One primitive drawing instruction, in page coordinates.
///
/// Text `y` is the baseline. `Rect` is anchored at its lower-left corner.
/// Arc angles are in degrees, measured clockwise from 12 o'clock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawCommand {
    TextAt {
        text: String,
        size: f64,
        font: FontHandle,
        x: f64,
        y: f64,
        color: Rgb,
    },
    /// `x` is the horizontal centre of the run.
    TextCentered {
        text: String,
        size: f64,
        font: FontHandle,
        x: f64,
        y: f64,
        color: Rgb,
    },
    /// `x` is the right edge of the run.
    TextRightJustified {
        text: String,
        size: f64,
        font: FontHandle,
        x: f64,
        y: f64,
        color: Rgb,
    },
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        filled: bool,
        stroke: Stroke,
    },
    Circle {
        x: f64,
        y: f64,
        radius: f64,
        filled: bool,
        stroke: Stroke,
    },
    Arc {
        x: f64,
        y: f64,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        stroke: Stroke,
    },
    Polyline {
        points: Vec<Point>,
        stroke: Stroke,
    },
}

impl DrawCommand {
    /// Text content and font, for text commands.
    pub fn text(&self) -> Option<(&str, &FontHandle)> {
        match self {
            DrawCommand::TextAt { text, font, .. }
            | DrawCommand::TextCentered { text, font, .. }
            | DrawCommand::TextRightJustified { text, font, .. } => Some((text, font)),
            _ => None,
        }
    }
}

/// Document-wide settings accumulated while the chart is interpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentMeta {
    /// Accumulated `#title` text, space-joined.
    pub title: String,
    /// Value of the `#version` directive, if any.
    pub version: Option<String>,
    pub page_width: f64,
    pub page_height: f64,
    pub text_font: FontHandle,
    pub chord_font: FontHandle,
    pub background: Rgb,
    pub color: Rgb,
    pub comment_delim: char,
    pub draw_barlines: bool,
    pub lock_copyright: bool,
    pub use_final_barline: bool,
    pub key_box: bool,
}

/// The complete output of one render pass.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedChart {
    pub meta: DocumentMeta,
    /// Paint order.
    pub commands: Vec<DrawCommand>,
    /// Default output file name derived from the title.
    pub file_name: String,
    /// Non-fatal problems, in the order they were met.
    pub diagnostics: Vec<ChartError>,
}

impl RenderedChart {
    /// Distinct fonts referenced by text commands, in first-use order.
    pub fn fonts_used(&self) -> Vec<FontHandle> {
        let mut fonts: Vec<FontHandle> = Vec::new();
        for (_, font) in self.commands.iter().filter_map(DrawCommand::text) {
            if !fonts.contains(font) {
                fonts.push(font.clone());
            }
        }
        fonts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_and_named_colors() {
        assert_eq!(Rgb::parse("#ffffff"), Some(Rgb::WHITE));
        assert_eq!(Rgb::parse("#000"), Some(Rgb::BLACK));
        assert_eq!(Rgb::parse("Red"), Some(Rgb::from_u8(255, 0, 0)));
        assert_eq!(Rgb::parse("#336699"), Some(Rgb::from_u8(0x33, 0x66, 0x99)));
        assert_eq!(Rgb::parse("#12345"), None);
        assert_eq!(Rgb::parse("#gg0000"), None);
        assert_eq!(Rgb::parse("chartreuse-ish"), None);
        assert_eq!(Rgb::from_u8(0x33, 0x66, 0x99).to_hex(), "#336699");
    }

    #[test]
    fn parses_css_functions_and_extended_names() {
        let red = |s: &str| Rgb::parse(s).map(Rgb::to_hex);
        assert_eq!(red("rgb(255, 0, 0)").as_deref(), Some("#ff0000"));
        assert_eq!(red("rgba(255,0,0,1)").as_deref(), Some("#ff0000"));
        assert_eq!(red("hsl(0, 100%, 50%)").as_deref(), Some("#ff0000"));
        assert_eq!(red("darkred").as_deref(), Some("#8b0000"));
        assert_eq!(red("  cornflowerblue ").as_deref(), Some("#6495ed"));
        assert_eq!(Rgb::parse("rgb(1, 2"), None);
    }

    #[test]
    fn repeat_raw_values() {
        let mut bar = Bar::new();
        assert_eq!(bar.repeat_count(), 0);
        bar.repeat = Some(Repeat::Count(3));
        assert_eq!(bar.repeat_count(), 3);
        bar.repeat = Some(Repeat::UntilCue);
        assert_eq!(bar.repeat_count(), REPEAT_TO_CUE);
    }
}
