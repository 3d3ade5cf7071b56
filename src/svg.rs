//! SVG sink. Paints a rendered chart as a standalone SVG page.
//!
//! Drawing commands are in PDF coordinates (y up), so every y is flipped
//! back against the page height here. Centred and right-justified text is
//! aligned with `text-anchor`, which leaves the real font metrics to the
//! viewer.

use crate::model::*;

pub(crate) struct SvgBuilder {
    elements: Vec<String>,
    width: f64,
    height: f64,
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn paint(filled: bool, stroke: &Stroke) -> String {
    let color = stroke.color.to_hex();
    if filled {
        format!(r#"fill="{color}" stroke="none""#)
    } else {
        format!(
            r#"fill="none" stroke="{color}" stroke-width="{:.2}""#,
            stroke.width
        )
    }
}

impl SvgBuilder {
    pub(crate) fn new(width: f64, height: f64) -> Self {
        Self {
            elements: Vec::new(),
            width,
            height,
        }
    }

    pub(crate) fn build(self) -> String {
        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {:.2} {:.2}" width="{:.2}" height="{:.2}">"#,
            self.width, self.height, self.width, self.height
        );
        svg.push('\n');
        for el in &self.elements {
            svg.push_str("  ");
            svg.push_str(el);
            svg.push('\n');
        }
        svg.push_str("</svg>\n");
        svg
    }

    fn flip(&self, y: f64) -> f64 {
        self.height - y
    }

    pub(crate) fn background(&mut self, color: Rgb) {
        self.elements.push(format!(
            r#"<rect x="0" y="0" width="{:.2}" height="{:.2}" fill="{}"/>"#,
            self.width,
            self.height,
            color.to_hex()
        ));
    }

    fn text(&mut self, text: &str, size: f64, font: &FontHandle, x: f64, y: f64, color: Rgb, anchor: &str) {
        self.elements.push(format!(
            r#"<text x="{:.2}" y="{:.2}" font-family="{}" font-size="{:.2}" fill="{}" text-anchor="{}">{}</text>"#,
            x,
            self.flip(y),
            escape(font.name()),
            size,
            color.to_hex(),
            anchor,
            escape(text)
        ));
    }

    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, filled: bool, stroke: &Stroke) {
        self.elements.push(format!(
            r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" {}/>"#,
            x,
            self.flip(y + h),
            w,
            h,
            paint(filled, stroke)
        ));
    }

    fn circle(&mut self, x: f64, y: f64, r: f64, filled: bool, stroke: &Stroke) {
        self.elements.push(format!(
            r#"<circle cx="{:.2}" cy="{:.2}" r="{:.2}" {}/>"#,
            x,
            self.flip(y),
            r,
            paint(filled, stroke)
        ));
    }

    /// Angles in degrees, clockwise from 12 o'clock.
    fn arc(&mut self, x: f64, y: f64, r: f64, start: f64, end: f64, stroke: &Stroke) {
        let point = |deg: f64| {
            let rad = deg.to_radians();
            (x + r * rad.sin(), self.flip(y + r * rad.cos()))
        };
        let (x0, y0) = point(start);
        let (x1, y1) = point(end);
        let large = if (end - start).abs() > 180.0 { 1 } else { 0 };
        self.elements.push(format!(
            r#"<path d="M{x0:.2},{y0:.2} A{r:.2},{r:.2} 0 {large} 1 {x1:.2},{y1:.2}" {}/>"#,
            paint(false, stroke)
        ));
    }

    fn polyline(&mut self, points: &[Point], stroke: &Stroke) {
        let coords: Vec<String> = points
            .iter()
            .map(|p| format!("{:.2},{:.2}", p.x, self.flip(p.y)))
            .collect();
        self.elements.push(format!(
            r#"<polyline points="{}" stroke-linejoin="round" {}/>"#,
            coords.join(" "),
            paint(false, stroke)
        ));
    }

    pub(crate) fn command(&mut self, cmd: &DrawCommand) {
        match cmd {
            DrawCommand::TextAt { text, size, font, x, y, color } => {
                self.text(text, *size, font, *x, *y, *color, "start")
            }
            DrawCommand::TextCentered { text, size, font, x, y, color } => {
                self.text(text, *size, font, *x, *y, *color, "middle")
            }
            DrawCommand::TextRightJustified { text, size, font, x, y, color } => {
                self.text(text, *size, font, *x, *y, *color, "end")
            }
            DrawCommand::Rect { x, y, width, height, filled, stroke } => {
                self.rect(*x, *y, *width, *height, *filled, stroke)
            }
            DrawCommand::Circle { x, y, radius, filled, stroke } => {
                self.circle(*x, *y, *radius, *filled, stroke)
            }
            DrawCommand::Arc { x, y, radius, start_angle, end_angle, stroke } => {
                self.arc(*x, *y, *radius, *start_angle, *end_angle, stroke)
            }
            DrawCommand::Polyline { points, stroke } => self.polyline(points, stroke),
        }
    }
}

/// Paint every command of `chart`, in order, over its background colour.
pub fn chart_to_svg(chart: &RenderedChart) -> String {
    let mut svg = SvgBuilder::new(chart.meta.page_width, chart.meta.page_height);
    svg.background(chart.meta.background);
    for cmd in &chart.commands {
        svg.command(cmd);
    }
    svg.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PEN: Stroke = Stroke { width: 1.0, color: Rgb::BLACK };

    #[test]
    fn rect_is_flipped_by_its_top_edge() {
        let mut svg = SvgBuilder::new(100.0, 200.0);
        svg.command(&DrawCommand::Rect {
            x: 10.0,
            y: 50.0,
            width: 5.0,
            height: 20.0,
            filled: true,
            stroke: PEN,
        });
        let out = svg.build();
        assert!(
            out.contains(r##"<rect x="10.00" y="130.00" width="5.00" height="20.00" fill="#000000""##),
            "{out}"
        );
    }

    #[test]
    fn text_is_escaped_and_anchored() {
        let mut svg = SvgBuilder::new(100.0, 100.0);
        svg.command(&DrawCommand::TextCentered {
            text: "Tom & Jerry".into(),
            size: 12.0,
            font: FontHandle::new("Roboto"),
            x: 50.0,
            y: 90.0,
            color: Rgb::BLACK,
        });
        let out = svg.build();
        assert!(out.contains("Tom &amp; Jerry"));
        assert!(out.contains(r#"text-anchor="middle""#));
        assert!(out.contains(r#"y="10.00""#));
    }

    #[test]
    fn upper_half_arc_runs_left_to_right() {
        let mut svg = SvgBuilder::new(100.0, 100.0);
        svg.command(&DrawCommand::Arc {
            x: 50.0,
            y: 50.0,
            radius: 4.0,
            start_angle: -90.0,
            end_angle: 90.0,
            stroke: PEN,
        });
        let out = svg.build();
        assert!(out.contains("M46.00,50.00 A4.00,4.00 0 0 1 54.00,50.00"), "{out}");
    }
}
