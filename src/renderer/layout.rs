//! Line layout. Spreads the bars of one line across the page width and
//! places chords evenly inside each bar.

use log::debug;

use super::bars::segment_line;
use super::params::Param;
use super::{Cursor, Renderer};
use crate::error::ChartError;
use crate::model::Barline;

/// Width of each of `bar_count` bars sharing `content_width`.
pub fn bar_width(content_width: f64, bar_count: usize) -> Option<f64> {
    (bar_count > 0).then(|| content_width / bar_count as f64)
}

/// Width of each of `chord_count` chord slots inside a bar.
pub fn chord_width(bar_width: f64, padding: f64, chord_count: usize) -> Option<f64> {
    (chord_count > 0).then(|| (bar_width - 2.0 * padding) / chord_count as f64)
}

impl Renderer<'_> {
    /// Lay out one content line at the cursor and move the cursor past it.
    pub(super) fn layout_line(&mut self, cursor: &mut Cursor, line: &str, line_no: usize, is_final: bool) {
        let seg = segment_line(line);
        for token in seg.invalid {
            self.report(ChartError::Syntax { line: line_no, token });
        }

        let margin_left = self.param(Param::MarginLeft);
        let margin_right = self.param(Param::MarginRight);
        let content_width = self.meta.page_width - margin_left - margin_right;

        let Some(width) = bar_width(content_width, seg.bars.len()) else {
            debug!("line {line_no}: no bars, nothing drawn");
            return;
        };
        debug!("line {line_no}: {} bars of width {width:.2}", seg.bars.len());

        if self.on_first_line {
            cursor.advance(self.param(Param::FirstLineOffset));
            self.on_first_line = false;
        }
        let y = cursor.y();

        let mut x = margin_left;
        self.draw_barline(seg.leading, x, y, None);

        let padding = self.param(Param::BarlinePadding);
        let last = seg.bars.len() - 1;

        for (i, bar) in seg.bars.iter().enumerate() {
            if let Some(slot) = chord_width(width, padding, bar.chords.len()) {
                for (j, chord) in bar.chords.iter().enumerate() {
                    self.draw_chord(chord, x + padding + j as f64 * slot, y);
                }
            }

            if let Some(sig) = bar.signature {
                self.draw_signature(sig, x, y);
            }

            x += width;

            let barline = if is_final
                && i == last
                && self.meta.use_final_barline
                && bar.barline == Barline::Single
            {
                Barline::Final
            } else {
                bar.barline
            };
            self.draw_barline(barline, x, y, bar.repeat);
        }

        cursor.advance(self.param(Param::ChordSize) + self.param(Param::SystemOffset));
    }
}
