//! Command builder. Accumulates drawing commands in paint order.
//!
//! Layout code measures vertical positions from the top of the page, the
//! way lines are read. Page sinks want PDF coordinates with the origin at
//! the bottom, so every `y` goes through [`CommandBuilder::flip`] here and
//! nowhere else.

use crate::model::{DrawCommand, FontHandle, Point, Rgb, Stroke};

pub(super) struct CommandBuilder {
    page_height: f64,
    pub(super) commands: Vec<DrawCommand>,
}

impl CommandBuilder {
    pub(super) fn new(page_height: f64) -> Self {
        Self {
            page_height,
            commands: Vec::new(),
        }
    }

    pub(super) fn flip(&self, y: f64) -> f64 {
        self.page_height - y
    }

    pub(super) fn text_at(
        &mut self,
        text: &str,
        size: f64,
        font: &FontHandle,
        x: f64,
        y: f64,
        color: Rgb,
    ) {
        self.commands.push(DrawCommand::TextAt {
            text: text.to_string(),
            size,
            font: font.clone(),
            x,
            y: self.flip(y),
            color,
        });
    }

    pub(super) fn text_centered(
        &mut self,
        text: &str,
        size: f64,
        font: &FontHandle,
        center_x: f64,
        y: f64,
        color: Rgb,
    ) {
        self.commands.push(DrawCommand::TextCentered {
            text: text.to_string(),
            size,
            font: font.clone(),
            x: center_x,
            y: self.flip(y),
            color,
        });
    }

    pub(super) fn text_right_justified(
        &mut self,
        text: &str,
        size: f64,
        font: &FontHandle,
        right_x: f64,
        y: f64,
        color: Rgb,
    ) {
        self.commands.push(DrawCommand::TextRightJustified {
            text: text.to_string(),
            size,
            font: font.clone(),
            x: right_x,
            y: self.flip(y),
            color,
        });
    }

    /// `y` is the bottom edge; the rectangle extends `h` upwards on the page.
    pub(super) fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, filled: bool, stroke: Stroke) {
        self.commands.push(DrawCommand::Rect {
            x,
            y: self.flip(y),
            width: w,
            height: h,
            filled,
            stroke,
        });
    }

    pub(super) fn circle(&mut self, x: f64, y: f64, radius: f64, filled: bool, stroke: Stroke) {
        self.commands.push(DrawCommand::Circle {
            x,
            y: self.flip(y),
            radius,
            filled,
            stroke,
        });
    }

    pub(super) fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64, stroke: Stroke) {
        self.commands.push(DrawCommand::Arc {
            x,
            y: self.flip(y),
            radius,
            start_angle: start,
            end_angle: end,
            stroke,
        });
    }

    /// Open polyline through `vertices`. Fewer than two vertices draw nothing.
    pub(super) fn polyline(&mut self, vertices: &[(f64, f64)], stroke: Stroke) {
        if vertices.len() < 2 {
            return;
        }
        let points = vertices
            .iter()
            .map(|&(x, y)| Point { x, y: self.flip(y) })
            .collect();
        self.commands.push(DrawCommand::Polyline { points, stroke });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PEN: Stroke = Stroke { width: 1.0, color: Rgb::BLACK };

    #[test]
    fn every_y_is_flipped_against_page_height() {
        let mut out = CommandBuilder::new(800.0);
        out.rect(10.0, 100.0, 1.0, 16.0, true, PEN);
        out.circle(5.0, 50.0, 1.0, true, PEN);
        out.polyline(&[(0.0, 0.0), (1.0, 800.0)], PEN);

        match &out.commands[0] {
            DrawCommand::Rect { y, height, .. } => {
                assert_eq!(*y, 700.0);
                assert_eq!(*height, 16.0);
            }
            other => panic!("expected rect, got {other:?}"),
        }
        match &out.commands[1] {
            DrawCommand::Circle { y, .. } => assert_eq!(*y, 750.0),
            other => panic!("expected circle, got {other:?}"),
        }
        match &out.commands[2] {
            DrawCommand::Polyline { points, .. } => {
                assert_eq!(points[0], Point { x: 0.0, y: 800.0 });
                assert_eq!(points[1], Point { x: 1.0, y: 0.0 });
            }
            other => panic!("expected polyline, got {other:?}"),
        }
    }

    #[test]
    fn degenerate_polyline_is_dropped() {
        let mut out = CommandBuilder::new(800.0);
        out.polyline(&[(1.0, 1.0)], PEN);
        assert!(out.commands.is_empty());
    }
}
