//! Shared constants for the chart renderer (lengths in PDF points).

use crate::model::Rgb;

// ── Page ────────────────────────────────────────────────────────────
pub(crate) const A4_WIDTH: f64 = 595.276;
pub(crate) const A4_HEIGHT: f64 = 841.89;
pub(crate) const LETTER_WIDTH: f64 = 612.0;
pub(crate) const LETTER_HEIGHT: f64 = 792.0;

// ── Markup ──────────────────────────────────────────────────────────
pub(super) const DIRECTIVE_MARKER: char = '#';
pub(super) const DEFAULT_COMMENT_DELIM: char = '!';

// ── Colors ──────────────────────────────────────────────────────────
pub(super) const DEFAULT_BACKGROUND: Rgb = Rgb::WHITE;
pub(super) const DEFAULT_DRAW_COLOR: Rgb = Rgb::BLACK;

// ── Output naming ───────────────────────────────────────────────────
pub(super) const DEFAULT_FILE_STEM: &str = "chrd_output";
pub(super) const OUTPUT_EXTENSION: &str = ".pdf";

// ── Hand-placed ornament offsets (in units of the document scale) ───
pub(super) const CHOKE_INSET: f64 = 1.0;
pub(super) const PUSH_CHOKE_SHIFT: f64 = 8.0;
pub(super) const PUSH_PAUSE_GAP: f64 = 2.0;

// ── Repeat counts and signatures ────────────────────────────────────
pub(super) const REPEAT_COUNT_SHIFT: f64 = 1.4;
pub(super) const REPEAT_CUE_SHIFT: f64 = 1.2;
pub(super) const REPEAT_CUE_TEXT: &str = "Until cue";
pub(super) const SIGNATURE_SCALING: f64 = 1.8;
/// Barlines stand this much taller than the chord size.
pub(super) const BARLINE_OVERHANG: f64 = 2.0;
