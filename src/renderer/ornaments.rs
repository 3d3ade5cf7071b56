//! Chord text and the performance-modifier marks drawn around it.
//!
//! Push is a chevron above the chord, choke a notch, pause a breath mark
//! (dot under a half circle) and ring a diamond around the whole symbol.

use super::constants::*;
use super::params::Param;
use super::Renderer;
use crate::chord::ChordToken;

impl Renderer<'_> {
    /// Draw one chord with its baseline at `y`, starting at `x`.
    pub(super) fn draw_chord(&mut self, chord: &ChordToken, x: f64, y: f64) {
        let size = self.param(Param::ChordSize);
        let font = self.meta.chord_font.clone();
        self.out.text_at(&chord.glyphs, size, &font, x, y, self.meta.color);

        // Hand-placed offsets for the two combinations that would overlap.
        if chord.push && chord.choke {
            self.draw_choke(x - CHOKE_INSET * self.scale, y);
            self.draw_push(x + PUSH_CHOKE_SHIFT * self.scale, y);
        } else if chord.push && chord.pause {
            let ph = self.param(Param::PushHeight);
            self.draw_pause(x, y - ph, &chord.glyphs);
            self.draw_push(x, y + PUSH_PAUSE_GAP * self.scale);
        } else {
            if chord.push {
                self.draw_push(x, y);
            }
            if chord.choke {
                self.draw_choke(x, y);
            }
            if chord.pause {
                self.draw_pause(x, y, &chord.glyphs);
            }
        }

        if chord.ring {
            self.draw_ring(x, y, &chord.glyphs);
        }
    }

    fn chord_text_width(&self, glyphs: &str) -> f64 {
        let size = self.param(Param::ChordSize);
        self.fonts.text_width(&self.meta.chord_font, size, glyphs)
    }

    fn draw_push(&mut self, x: f64, y: f64) {
        let cs = self.param(Param::ChordSize);
        let top = y - cs - self.param(Param::PushOffset);
        let bottom = top - self.param(Param::PushHeight);
        let mid = (top + bottom) / 2.0;
        let pw = self.param(Param::PushWidth);
        let pen = self.stroke();
        self.out.polyline(&[(x, top), (x + pw, mid), (x, bottom)], pen);
    }

    fn draw_choke(&mut self, x: f64, y: f64) {
        let cs = self.param(Param::ChordSize);
        let left = x + CHOKE_INSET * self.scale;
        let right = left + self.param(Param::ChokeWidth);
        let center = (left + right) / 2.0;
        let top = y - cs - self.param(Param::ChokeOffset);
        let bottom = top + self.param(Param::ChokeHeight);
        let pen = self.stroke();
        self.out.polyline(&[(left, bottom), (center, top), (right, bottom)], pen);
    }

    fn draw_pause(&mut self, x: f64, y: f64, glyphs: &str) {
        let cs = self.param(Param::ChordSize);
        let center = x + self.chord_text_width(glyphs) / 2.0;
        let cy = y + self.param(Param::PauseYOffset) - cs;
        let dot = self.param(Param::PauseDotRadius);
        let line = self.param(Param::PauseLineRadius);
        let pen = self.stroke();
        self.out.circle(center, cy, dot, true, pen);
        self.out.arc(center, cy, line, -90.0, 90.0, pen);
    }

    fn draw_ring(&mut self, x: f64, y: f64, glyphs: &str) {
        let cs = self.param(Param::ChordSize);
        let cw = self.chord_text_width(glyphs);
        let rxm = self.param(Param::RingXMargin);
        let rym = self.param(Param::RingYMargin);
        let rxo = self.param(Param::RingXOffset);
        let ryo = self.param(Param::RingYOffset);

        let left = x - rxm + rxo;
        let right = x + rxm + rxo + cw;
        let center_x = (left + right) / 2.0;
        let top = y - cs - rym + ryo;
        let bottom = top + cw + rym + ryo;
        let center_y = (top + bottom) / 2.0;

        let pen = self.stroke();
        self.out.polyline(
            &[
                (center_x, top),
                (right, center_y),
                (center_x, bottom),
                (left, center_y),
                (center_x, top),
            ],
            pen,
        );
    }
}
