//! Barline, repeat-count and time-signature drawing.
//!
//! Barlines are filled rectangles standing on the chord baseline; repeat
//! dots sit a third and two thirds of the way up the chord height.

use super::constants::*;
use super::params::Param;
use super::Renderer;
use crate::model::{Barline, Repeat, TimeSignature};

impl Renderer<'_> {
    /// Draw `kind` with its right-hand reference edge at `x`.
    pub(super) fn draw_barline(&mut self, kind: Barline, x: f64, y: f64, repeat: Option<Repeat>) {
        if !self.meta.draw_barlines {
            return;
        }

        let bw = self.param(Param::BarlineWidth);
        let fbw = self.param(Param::FinalBarlineWidth);
        let bs = self.param(Param::BarlineSpacing);
        let cs = self.param(Param::ChordSize);
        let rr = self.param(Param::RepeatRadius);
        let rdo = self.param(Param::RepeatDotOffset);
        let h = cs + BARLINE_OVERHANG;
        let pen = self.stroke();

        let upper_dot = y - cs / 3.0 - rdo;
        let lower_dot = y - cs / 3.0 * 2.0 - rdo;

        match kind {
            Barline::Single => {
                self.out.rect(x, y, bw, h, true, pen);
            }
            Barline::Double => {
                self.out.rect(x - 2.0 * bw - bs, y, bw, h, true, pen);
                self.out.rect(x - bw, y, bw, h, true, pen);
            }
            Barline::StartRepeat => {
                self.out.rect(x, y, fbw, h, true, pen);
                self.out.rect(x + fbw + bs, y, bw, h, true, pen);
                let dot_x = x + fbw + bw + 3.0 * bs;
                self.out.circle(dot_x, upper_dot, rr, true, pen);
                self.out.circle(dot_x, lower_dot, rr, true, pen);
            }
            Barline::EndRepeat => {
                self.out.rect(x - fbw - bw - bs, y, bw, h, true, pen);
                self.out.rect(x - fbw, y, fbw, h, true, pen);
                let dot_x = x - fbw - bw - 3.0 * bs;
                self.out.circle(dot_x, upper_dot, rr, true, pen);
                self.out.circle(dot_x, lower_dot, rr, true, pen);
            }
            Barline::DoubleRepeat => {
                self.out.rect(x - fbw - bw - bs, y, bw, h, true, pen);
                self.out.rect(x + bs, y, bw, h, true, pen);
                self.out.rect(x - fbw, y, fbw, h, true, pen);
                let left_x = x - fbw - bw - 3.0 * bs;
                let right_x = x + bw + 3.0 * bs;
                self.out.circle(left_x, upper_dot, rr, true, pen);
                self.out.circle(left_x, lower_dot, rr, true, pen);
                self.out.circle(right_x, upper_dot, rr, true, pen);
                self.out.circle(right_x, lower_dot, rr, true, pen);
            }
            Barline::Final => {
                self.out.rect(x - fbw - bw - bs, y, bw, h, true, pen);
                self.out.rect(x - fbw, y, fbw, h, true, pen);
            }
        }

        if matches!(kind, Barline::EndRepeat | Barline::DoubleRepeat) {
            if let Some(repeat) = repeat {
                self.draw_repeat_count(repeat, x, y);
            }
        }
    }

    /// `x3` or `Until cue`, just left of and above the closing barline.
    fn draw_repeat_count(&mut self, repeat: Repeat, x: f64, y: f64) {
        let (text, shift) = match repeat {
            Repeat::Count(n) => (format!("x{n}"), REPEAT_COUNT_SHIFT),
            Repeat::UntilCue => (REPEAT_CUE_TEXT.to_string(), REPEAT_CUE_SHIFT),
        };
        let size = self.param(Param::RepeatNumSize);
        let font = self.meta.text_font.clone();
        let width = self.fonts.text_width(&font, size, &text);
        let baseline = y - self.param(Param::ChordSize) - self.param(Param::RepeatNumOffset);
        self.out.text_at(&text, size, &font, x - width * shift, baseline, self.meta.color);
    }

    /// Numerator over denominator, in front of the bar starting at `x`.
    pub(super) fn draw_signature(&mut self, sig: TimeSignature, x: f64, y: f64) {
        let cs = self.param(Param::ChordSize);
        let size = cs / SIGNATURE_SCALING;
        let sx = x - self.param(Param::BarlinePadding);
        let top = y - cs + size;
        let font = self.meta.chord_font.clone();
        let color = self.meta.color;
        self.out.text_at(&sig.top.to_string(), size, &font, sx, top, color);
        self.out.text_at(&sig.bottom.to_string(), size, &font, sx, top + size, color);
    }
}
