//! Chart renderer. Interprets chord chart markup into drawing commands.
//!
//! The driver walks the input line by line. Each line is cut at its first
//! unescaped comment delimiter and trimmed; what is left is either empty,
//! a directive (`#name ...`) for the interpreter, or one system of bars.
//! A single vertical cursor is threaded through all of it, growing
//! downwards as content is placed.

mod barlines;
mod bars;
mod commands;
mod constants;
mod directives;
mod layout;
mod ornaments;
mod params;

pub use bars::{segment_line, BarToken, Segmentation};
pub use directives::Directive;
pub use layout::{bar_width, chord_width};
pub use params::{Param, ParamStack, ParameterSet};

use log::{debug, info, warn};
use serde::Deserialize;

use crate::error::{ChartError, Result};
use crate::fonts::FontProvider;
use crate::model::*;
use commands::CommandBuilder;
use constants::*;

// ═══════════════════════════════════════════════════════════════════════
// Options
// ═══════════════════════════════════════════════════════════════════════

/// Page size in PDF points, portrait.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageSize {
    #[default]
    A4,
    Letter,
    Custom { width: f64, height: f64 },
}

impl PageSize {
    pub fn dimensions(self) -> (f64, f64) {
        match self {
            PageSize::A4 => (A4_WIDTH, A4_HEIGHT),
            PageSize::Letter => (LETTER_WIDTH, LETTER_HEIGHT),
            PageSize::Custom { width, height } => (width, height),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Global scale applied to every layout parameter.
    pub scale: f64,
    pub page: PageSize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            scale: 1.0,
            page: PageSize::A4,
        }
    }
}

impl RenderOptions {
    pub fn with_scale(scale: f64) -> Self {
        Self {
            scale,
            ..Self::default()
        }
    }

    fn effective_scale(&self) -> f64 {
        if self.scale.is_finite() && self.scale > 0.0 {
            self.scale
        } else {
            1.0
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Cursor
// ═══════════════════════════════════════════════════════════════════════

/// Vertical layout position, measured from the top of the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cursor {
    y: f64,
}

impl Cursor {
    pub fn new(y: f64) -> Self {
        Self { y }
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn advance(&mut self, dy: f64) {
        self.y += dy;
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Render pass state
// ═══════════════════════════════════════════════════════════════════════

/// Everything one render pass owns, apart from the cursor.
pub(crate) struct Renderer<'f> {
    fonts: &'f dyn FontProvider,
    scale: f64,
    params: ParamStack,
    meta: DocumentMeta,
    out: CommandBuilder,
    diagnostics: Vec<ChartError>,
    on_first_line: bool,
}

impl<'f> Renderer<'f> {
    fn new(options: &RenderOptions, fonts: &'f dyn FontProvider) -> Self {
        let scale = options.effective_scale();
        let (page_width, page_height) = options.page.dimensions();
        Self {
            fonts,
            scale,
            params: ParamStack::new(scale),
            meta: DocumentMeta {
                title: String::new(),
                version: None,
                page_width,
                page_height,
                text_font: fonts.text_font(),
                chord_font: fonts.chord_font(),
                background: DEFAULT_BACKGROUND,
                color: DEFAULT_DRAW_COLOR,
                comment_delim: DEFAULT_COMMENT_DELIM,
                draw_barlines: true,
                lock_copyright: true,
                use_final_barline: true,
                key_box: true,
            },
            out: CommandBuilder::new(page_height),
            diagnostics: Vec::new(),
            on_first_line: true,
        }
    }

    fn param(&self, p: Param) -> f64 {
        self.params.get(p)
    }

    /// Pen for the next shape: current stroke width and draw colour.
    fn stroke(&self) -> Stroke {
        Stroke {
            width: self.param(Param::StrokeWidth),
            color: self.meta.color,
        }
    }

    fn report(&mut self, error: ChartError) {
        warn!("{error}");
        self.diagnostics.push(error);
    }

    fn finish(self) -> RenderedChart {
        let file_name = file_name_for_title(&self.meta.title);
        info!(
            "rendered chart: {} commands, {} diagnostics, output '{}'",
            self.out.commands.len(),
            self.diagnostics.len(),
            file_name
        );
        RenderedChart {
            meta: self.meta,
            commands: self.out.commands,
            file_name,
            diagnostics: self.diagnostics,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════

/// Interpret a whole chart and lay it out as drawing commands.
///
/// Fatal problems (`#pop` without `#push`, `#include`) abort with `Err`.
/// Everything else that looks wrong is skipped and listed in
/// [`RenderedChart::diagnostics`].
pub fn render_chart(
    text: &str,
    options: &RenderOptions,
    fonts: &dyn FontProvider,
) -> Result<RenderedChart> {
    let mut renderer = Renderer::new(options, fonts);
    let mut cursor = Cursor::new(renderer.param(Param::MarginTop));

    let lines: Vec<&str> = text.lines().collect();
    let final_content = last_content_line(&lines);

    for (idx, &raw) in lines.iter().enumerate() {
        let line = strip_comment(raw, renderer.meta.comment_delim);
        if line.is_empty() {
            continue;
        }
        let line_no = idx + 1;

        if line.starts_with(DIRECTIVE_MARKER) {
            renderer.interpret_directive(&mut cursor, line, line_no)?;
        } else {
            renderer.layout_line(&mut cursor, line, line_no, final_content == Some(idx));
        }
    }

    debug!("final cursor position {:.1}", cursor.y());
    Ok(renderer.finish())
}

/// `line` cut at its first comment delimiter not escaped by a backslash,
/// then trimmed.
fn strip_comment(line: &str, delim: char) -> &str {
    let mut prev = None;
    for (idx, c) in line.char_indices() {
        if c == delim && prev != Some('\\') {
            return line[..idx].trim();
        }
        prev = Some(c);
    }
    line.trim()
}

/// Index of the last line that will be laid out as bars, following any
/// `#comment_delim` changes along the way.
fn last_content_line(lines: &[&str]) -> Option<usize> {
    let mut delim = DEFAULT_COMMENT_DELIM;
    let mut last = None;

    for (idx, raw) in lines.iter().enumerate() {
        let line = strip_comment(raw, delim);
        if line.is_empty() {
            continue;
        }
        if line.starts_with(DIRECTIVE_MARKER) {
            let mut tokens = directives::split_tokens(line);
            if tokens.next() == Some("#comment_delim") {
                if let Some(c) = tokens.next().and_then(|t| t.chars().next()) {
                    delim = c;
                }
            }
        } else {
            last = Some(idx);
        }
    }
    last
}

/// Default output name: the title lower-cased, whitespace as underscores,
/// anything else that is not alphanumeric dropped.
pub fn file_name_for_title(title: &str) -> String {
    let mut stem = String::with_capacity(title.len() + OUTPUT_EXTENSION.len());
    for c in title.chars() {
        if c.is_whitespace() {
            stem.push('_');
        } else if c.is_alphanumeric() {
            stem.extend(c.to_lowercase());
        }
    }
    if stem.is_empty() {
        stem.push_str(DEFAULT_FILE_STEM);
    }
    stem.push_str(OUTPUT_EXTENSION);
    stem
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_from_title() {
        assert_eq!(file_name_for_title("Autumn Leaves"), "autumn_leaves.pdf");
        assert_eq!(file_name_for_title("Don't Stop (Live)"), "dont_stop_live.pdf");
        assert_eq!(file_name_for_title(""), "chrd_output.pdf");
        assert_eq!(file_name_for_title("!!!"), "chrd_output.pdf");
    }

    #[test]
    fn last_content_line_tracks_comment_delimiter() {
        let lines = ["#title A", "| C |", "#comment_delim %", "% note", "#break"];
        assert_eq!(last_content_line(&lines), Some(1));

        // Before the delimiter changes, '%' lines are still content.
        let lines = ["| C |", "% early", "#comment_delim %", "% late"];
        assert_eq!(last_content_line(&lines), Some(1));

        let lines = ["| C |", "! comment"];
        assert_eq!(last_content_line(&lines), Some(0));

        assert_eq!(last_content_line(&["#title Only"]), None);

        // A line that is all comment after stripping is not content.
        let lines = ["| C ! verse", "  ! coda", "#break"];
        assert_eq!(last_content_line(&lines), Some(0));
    }

    #[test]
    fn trailing_comments_are_stripped() {
        assert_eq!(strip_comment("| C | G ! to coda", '!'), "| C | G");
        assert_eq!(strip_comment("  | C  ", '!'), "| C");
        assert_eq!(strip_comment("! whole line", '!'), "");
        assert_eq!(strip_comment("#title Wow\\! Now ! note", '!'), "#title Wow\\! Now");
        assert_eq!(strip_comment("| C % tail", '%'), "| C");
        assert_eq!(strip_comment("| C ! tail", '%'), "| C ! tail");
    }

    #[test]
    fn bad_scale_falls_back_to_one() {
        assert_eq!(RenderOptions::with_scale(0.0).effective_scale(), 1.0);
        assert_eq!(RenderOptions::with_scale(f64::NAN).effective_scale(), 1.0);
        assert_eq!(RenderOptions::with_scale(2.5).effective_scale(), 2.5);
    }

    #[test]
    fn options_deserialize_with_defaults() {
        let opts: RenderOptions = serde_json::from_str(r#"{"scale": 2.0}"#).unwrap();
        assert_eq!(opts.scale, 2.0);
        assert_eq!(opts.page, PageSize::A4);

        let opts: RenderOptions =
            serde_json::from_str(r#"{"page": {"custom": {"width": 300.0, "height": 400.0}}}"#)
                .unwrap();
        assert_eq!(opts.page.dimensions(), (300.0, 400.0));
        assert_eq!(opts.scale, 1.0);
    }
}
