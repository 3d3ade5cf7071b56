//! Directive interpretation for `#name args...` lines.
//!
//! Directives either scope the parameter stack, draw header text at the
//! cursor, flip document toggles, or assign one numeric parameter. Names
//! are matched exactly against a fixed table.

use log::{debug, warn};

use super::params::Param;
use super::{Cursor, Renderer};
use crate::error::{ChartError, Result};
use crate::glyphs;
use crate::model::{FontHandle, Rgb};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    Version,
    Push,
    Pop,
    Title,
    Subtitle,
    Author,
    Copyright,
    Key,
    Tempo,
    Label,
    LabelAt,
    Start,
    Break,
    Include,
    CommentDelim,
    Background,
    Color,
    DrawBarlines,
    LockCopyright,
    UseFinalBarline,
    KeyBox,
    TextFont,
    ChordFont,
    /// `#<parameter name> <value>`
    Set(Param),
}

const TABLE: &[(&str, Directive)] = &[
    ("version", Directive::Version),
    ("push", Directive::Push),
    ("pop", Directive::Pop),
    ("title", Directive::Title),
    ("subtitle", Directive::Subtitle),
    ("author", Directive::Author),
    ("copyright", Directive::Copyright),
    ("key", Directive::Key),
    ("tempo", Directive::Tempo),
    ("label", Directive::Label),
    ("label_at", Directive::LabelAt),
    ("start", Directive::Start),
    ("break", Directive::Break),
    ("include", Directive::Include),
    ("comment_delim", Directive::CommentDelim),
    ("background", Directive::Background),
    ("color", Directive::Color),
    ("draw_barlines", Directive::DrawBarlines),
    ("lock_copyright", Directive::LockCopyright),
    ("use_final_barline", Directive::UseFinalBarline),
    ("key_box", Directive::KeyBox),
    ("text_font", Directive::TextFont),
    ("chord_font", Directive::ChordFont),
];

impl Directive {
    /// Look up a directive token such as `#title`.
    pub fn lookup(token: &str) -> Option<Directive> {
        let name = token.strip_prefix('#')?;
        TABLE
            .iter()
            .find(|(n, _)| *n == name)
            .map(|&(_, d)| d)
            .or_else(|| Param::from_name(name).map(Directive::Set))
    }
}

/// Space-separated fields of a line, empty fields dropped.
pub(super) fn split_tokens(line: &str) -> impl Iterator<Item = &str> {
    line.split(' ').filter(|t| !t.is_empty())
}

/// Everything after the directive name, trimmed.
fn argument_text(line: &str) -> &str {
    line.split_once(' ').map_or("", |(_, rest)| rest.trim())
}

/// Leading decimal number of `s`, or 0.
fn parse_number(s: &str) -> f64 {
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'-' | b'+')) {
        end = 1;
    }
    let mut seen_dot = false;
    let mut seen_digit = false;
    while let Some(&b) = bytes.get(end) {
        match b {
            b'0'..=b'9' => seen_digit = true,
            b'.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end += 1;
    }
    // Exponent only counts when at least one digit follows it.
    if seen_digit && matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'-' | b'+')) {
            exp += 1;
        }
        if bytes.get(exp).is_some_and(u8::is_ascii_digit) {
            while bytes.get(exp).is_some_and(u8::is_ascii_digit) {
                exp += 1;
            }
            end = exp;
        }
    }
    s[..end].parse().unwrap_or(0.0)
}

fn parse_flag(arg: &str) -> bool {
    arg != "false"
}

impl Renderer<'_> {
    /// Numeric argument `idx`, multiplied by the document scale.
    fn scaled_arg(&self, tokens: &[&str], idx: usize) -> f64 {
        tokens.get(idx).map_or(0.0, |t| parse_number(t)) * self.scale
    }

    fn parse_color(&self, arg: &str, line_no: usize) -> Rgb {
        Rgb::parse(arg).unwrap_or_else(|| {
            warn!("line {line_no}: unrecognised colour '{arg}', using black");
            Rgb::BLACK
        })
    }

    pub(super) fn interpret_directive(&mut self, cursor: &mut Cursor, line: &str, line_no: usize) -> Result<()> {
        let tokens: Vec<&str> = split_tokens(line).collect();
        let Some(&name) = tokens.first() else {
            return Ok(());
        };
        let first = tokens.get(1).copied().unwrap_or("");
        let data = argument_text(line);

        let Some(directive) = Directive::lookup(name) else {
            self.report(ChartError::UnknownDirective {
                line: line_no,
                directive: name.to_string(),
            });
            return Ok(());
        };
        debug!("line {line_no}: {directive:?}");

        match directive {
            Directive::Version => {
                if !data.is_empty() {
                    self.meta.version = Some(data.to_string());
                }
            }
            Directive::Push => self.params.push(),
            Directive::Pop => {
                if self.params.pop().is_none() {
                    return Err(ChartError::Config {
                        line: line_no,
                        text: line.to_string(),
                    });
                }
            }
            Directive::Title => {
                if data.is_empty() {
                    return Ok(());
                }
                if !self.meta.title.is_empty() {
                    self.meta.title.push(' ');
                }
                self.meta.title.push_str(data);
                self.heading_centered(cursor, data, Param::TitleSize);
            }
            Directive::Subtitle => {
                if !data.is_empty() {
                    self.heading_centered(cursor, data, Param::SubtitleSize);
                }
            }
            Directive::Author => {
                if !data.is_empty() {
                    let size = self.param(Param::AuthorSize);
                    let right = self.meta.page_width - self.param(Param::MarginRight);
                    let font = self.meta.text_font.clone();
                    self.out
                        .text_right_justified(data, size, &font, right, cursor.y() + size, self.meta.color);
                    cursor.advance(size);
                }
            }
            Directive::Copyright => {
                if !data.is_empty() {
                    self.draw_copyright(cursor, data);
                }
            }
            Directive::Key => {
                if !data.is_empty() {
                    self.draw_key(data);
                }
            }
            Directive::Tempo => {
                // A count, not a length: unscaled, truncated.
                let bpm = tokens.get(1).map_or(0.0, |t| parse_number(t)) as u32;
                let text = format!("{} = {bpm}", glyphs::CROTCHET);
                let size = self.param(Param::TempoSize);
                let font = self.meta.chord_font.clone();
                let x = self.param(Param::MarginLeft);
                self.out.text_at(&text, size, &font, x, cursor.y(), self.meta.color);
                cursor.advance(self.param(Param::TempoBreak));
            }
            Directive::Label => {
                if !data.is_empty() {
                    let size = self.param(Param::LabelSize);
                    let font = self.meta.text_font.clone();
                    let x = self.param(Param::MarginLeft);
                    self.out.text_at(data, size, &font, x, cursor.y(), self.meta.color);
                    cursor.advance(size + self.param(Param::LabelOffset));
                }
            }
            Directive::LabelAt => {
                if tokens.len() < 4 {
                    debug!("line {line_no}: #label_at needs x, y and text");
                    return Ok(());
                }
                let x = self.scaled_arg(&tokens, 1);
                let y = self.scaled_arg(&tokens, 2);
                let label = tokens[3..].join(" ");
                let size = self.param(Param::LabelSize);
                let font = self.meta.text_font.clone();
                self.out.text_at(&label, size, &font, x, y, self.meta.color);
            }
            Directive::Start => {
                self.on_first_line = false;
                cursor.advance(self.param(Param::FirstLineOffset));
            }
            Directive::Break => cursor.advance(self.param(Param::BreakSize)),
            Directive::Include => {
                return Err(ChartError::Unsupported {
                    line: line_no,
                    directive: line.to_string(),
                });
            }
            Directive::CommentDelim => {
                if let Some(c) = first.chars().next() {
                    self.meta.comment_delim = c;
                }
            }
            Directive::Background => self.meta.background = self.parse_color(data, line_no),
            Directive::Color => self.meta.color = self.parse_color(data, line_no),
            Directive::DrawBarlines => self.meta.draw_barlines = parse_flag(first),
            Directive::LockCopyright => self.meta.lock_copyright = parse_flag(first),
            Directive::UseFinalBarline => self.meta.use_final_barline = parse_flag(first),
            Directive::KeyBox => self.meta.key_box = parse_flag(first),
            Directive::TextFont => {
                if !first.is_empty() {
                    self.meta.text_font = FontHandle::new(first);
                }
            }
            Directive::ChordFont => {
                if !first.is_empty() {
                    self.meta.chord_font = FontHandle::new(first);
                }
            }
            Directive::Set(param) => {
                let value = self.scaled_arg(&tokens, 1);
                self.params.set(param, value);
            }
        }
        Ok(())
    }

    /// Centred line of text below the cursor, in the text font.
    fn heading_centered(&mut self, cursor: &mut Cursor, text: &str, size_param: Param) {
        let size = self.param(size_param);
        let center = self.meta.page_width / 2.0;
        let font = self.meta.text_font.clone();
        self.out
            .text_centered(text, size, &font, center, cursor.y() + size, self.meta.color);
        cursor.advance(size);
    }

    fn draw_copyright(&mut self, cursor: &mut Cursor, data: &str) {
        let text = data
            .replace("(c)", glyphs::COPYRIGHT)
            .replace("(C)", glyphs::COPYRIGHT);
        let size = self.param(Param::CopyrightSize);
        let y = if self.meta.lock_copyright {
            self.meta.page_height - self.param(Param::MarginBottom)
        } else {
            cursor.y() + size
        };
        let center = self.meta.page_width / 2.0;
        let font = self.meta.text_font.clone();
        self.out.text_centered(&text, size, &font, center, y, self.meta.color);

        if !self.meta.lock_copyright {
            cursor.advance(size);
        }
    }

    /// Key name in a square box at the top-left corner of the page.
    fn draw_key(&mut self, data: &str) {
        let text = data.replace('#', glyphs::SHARP).replace('b', glyphs::FLAT);
        let ks = self.param(Param::KeySize);
        let kp = self.param(Param::KeyPadding);
        let ko = self.param(Param::KeyOffset);
        let font = self.meta.chord_font.clone();

        let width = self.fonts.text_width(&font, ks, &text);
        let side = kp * 2.0 + width.max(ks);
        let x = ko;
        let y = ko + side;
        self.out.text_at(&text, ks, &font, x + kp, y - kp, self.meta.color);

        if self.meta.key_box {
            let mut pen = self.stroke();
            pen.width = self.param(Param::KeyBoxWidth);
            self.out.rect(x, y, side, side, false, pen);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_covers_table_and_parameters() {
        assert_eq!(Directive::lookup("#title"), Some(Directive::Title));
        assert_eq!(Directive::lookup("#label_at"), Some(Directive::LabelAt));
        assert_eq!(Directive::lookup("#include"), Some(Directive::Include));
        assert_eq!(Directive::lookup("#chord_size"), Some(Directive::Set(Param::ChordSize)));
        assert_eq!(
            Directive::lookup("#barline_padding"),
            Some(Directive::Set(Param::BarlinePadding))
        );
        assert_eq!(Directive::lookup("#titel"), None);
        assert_eq!(Directive::lookup("title"), None);
    }

    #[test]
    fn argument_text_is_trimmed_remainder() {
        assert_eq!(argument_text("#title  Autumn Leaves "), "Autumn Leaves");
        assert_eq!(argument_text("#title"), "");
    }

    #[test]
    fn numbers_parse_like_strtof() {
        assert_eq!(parse_number("12.5pt"), 12.5);
        assert_eq!(parse_number("-3"), -3.0);
        assert_eq!(parse_number("abc"), 0.0);
        assert_eq!(parse_number(""), 0.0);
        assert_eq!(parse_number("1.2.3"), 1.2);
        assert_eq!(parse_number("inf"), 0.0);
        assert_eq!(parse_number("1.4e1"), 14.0);
        assert_eq!(parse_number("25E-1pt"), 2.5);
        assert_eq!(parse_number("3e"), 3.0);
        assert_eq!(parse_number("3e+"), 3.0);
        assert_eq!(parse_number("e5"), 0.0);
        assert_eq!(parse_number(".5"), 0.5);
    }

    #[test]
    fn flags_are_true_unless_false() {
        assert!(parse_flag("true"));
        assert!(parse_flag(""));
        assert!(parse_flag("no"));
        assert!(!parse_flag("false"));
    }
}
