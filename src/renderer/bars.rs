//! Bar segmentation: splits one chart line into bars.
//!
//! A line is a run of space-separated tokens. Barline tokens open bars and
//! decorate the trailing edge of the bar before them, repeat tokens carry
//! counts, `T<top>/<bottom>` sets a time signature, and anything else is a
//! chord. A chord met outside an open bar gets a bar of its own.

use crate::model::{Bar, Barline, Repeat, TimeSignature};

/// One classified token of a chart line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BarToken<'a> {
    /// `|`
    Bar,
    /// `||`
    DoubleBar,
    /// `||:`, start repeat and then a new bar.
    StartRepeatBar,
    /// `|:`, start repeat on the current edge only.
    StartRepeat,
    /// `\`
    CloseGroup,
    /// `|\`
    CloseGroupDouble,
    /// `:|`
    EndRepeat,
    /// `:||`
    EndRepeatBar,
    /// `:|\`
    EndRepeatClose,
    /// `:|3`, `:||2`, `:|\c` ...
    RepeatCount {
        repeat: Option<Repeat>,
        opens_bar: bool,
        closes_group: bool,
    },
    /// `T3/4`; `None` when either part is missing or zero.
    Signature(Option<TimeSignature>),
    Chord(&'a str),
}

impl<'a> BarToken<'a> {
    pub fn classify(token: &'a str) -> Self {
        match token {
            "|" => return BarToken::Bar,
            "||" => return BarToken::DoubleBar,
            "||:" => return BarToken::StartRepeatBar,
            "|:" => return BarToken::StartRepeat,
            "\\" => return BarToken::CloseGroup,
            "|\\" => return BarToken::CloseGroupDouble,
            ":|" => return BarToken::EndRepeat,
            ":||" => return BarToken::EndRepeatBar,
            ":|\\" => return BarToken::EndRepeatClose,
            _ => {}
        }

        let (suffix, opens_bar, closes_group) = if let Some(s) = token.strip_prefix(":||") {
            (s, true, false)
        } else if let Some(s) = token.strip_prefix(":|\\") {
            (s, false, true)
        } else if let Some(s) = token.strip_prefix(":|") {
            (s, false, false)
        } else if let Some(s) = token.strip_prefix('T') {
            return BarToken::Signature(parse_signature(s));
        } else {
            return BarToken::Chord(token);
        };

        let repeat = match suffix {
            "c" | "C" => Some(Repeat::UntilCue),
            _ => match parse_leading_int(suffix) {
                0 => None,
                n => Some(Repeat::Count(n)),
            },
        };
        BarToken::RepeatCount {
            repeat,
            opens_bar,
            closes_group,
        }
    }
}

/// Integer prefix of `s` (optional sign, then digits); 0 if there is none.
fn parse_leading_int(s: &str) -> i32 {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let value = digits[..end].parse::<i32>().unwrap_or(0);
    if negative {
        -value
    } else {
        value
    }
}

fn parse_signature(s: &str) -> Option<TimeSignature> {
    let (top, bottom) = s.split_once('/')?;
    let top = parse_leading_int(top);
    let bottom = parse_leading_int(bottom);
    if top > 0 && bottom > 0 {
        Some(TimeSignature {
            top: top as u32,
            bottom: bottom as u32,
        })
    } else {
        None
    }
}

/// Result of segmenting one line.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Segmentation {
    /// Barline drawn at the left margin, before the first bar.
    pub leading: Barline,
    pub bars: Vec<Bar>,
    /// Tokens that referred to a bar before any existed.
    pub invalid: Vec<String>,
}

struct Segmenter {
    seg: Segmentation,
    in_bar: bool,
}

impl Segmenter {
    fn open_bar(&mut self) {
        self.in_bar = true;
        self.seg.bars.push(Bar::new());
    }

    /// Set the trailing edge of the last bar, or the leading barline when
    /// the line has no bars yet.
    fn mark_edge(&mut self, barline: Barline) {
        match self.seg.bars.last_mut() {
            Some(bar) => bar.barline = barline,
            None => self.seg.leading = barline,
        }
    }

    fn mark_start_repeat(&mut self) {
        match self.seg.bars.last_mut() {
            Some(bar) if bar.barline == Barline::EndRepeat => bar.barline = Barline::DoubleRepeat,
            Some(bar) => bar.barline = Barline::StartRepeat,
            None => self.seg.leading = Barline::StartRepeat,
        }
    }

    /// End-repeat marks need a bar to attach to.
    fn last_bar_or_report(&mut self, token: &str) -> Option<&mut Bar> {
        if self.seg.bars.is_empty() {
            self.seg.invalid.push(token.to_string());
            return None;
        }
        self.seg.bars.last_mut()
    }

    fn end_repeat(&mut self, token: &str) {
        if let Some(bar) = self.last_bar_or_report(token) {
            bar.barline = Barline::EndRepeat;
        }
    }

    fn apply(&mut self, token: &str) {
        match BarToken::classify(token) {
            BarToken::Bar => self.open_bar(),
            BarToken::DoubleBar => {
                self.mark_edge(Barline::Double);
                self.open_bar();
            }
            BarToken::StartRepeatBar => {
                self.mark_start_repeat();
                self.open_bar();
            }
            BarToken::StartRepeat => self.mark_start_repeat(),
            BarToken::CloseGroup => self.in_bar = false,
            BarToken::CloseGroupDouble => {
                self.in_bar = false;
                self.mark_edge(Barline::Double);
            }
            BarToken::EndRepeat => self.end_repeat(token),
            BarToken::EndRepeatBar => {
                self.end_repeat(token);
                self.open_bar();
            }
            BarToken::EndRepeatClose => {
                self.end_repeat(token);
                self.in_bar = false;
            }
            BarToken::RepeatCount {
                repeat,
                opens_bar,
                closes_group,
            } => {
                if closes_group {
                    self.in_bar = false;
                }
                if let Some(bar) = self.last_bar_or_report(token) {
                    bar.barline = Barline::EndRepeat;
                    if repeat.is_some() {
                        bar.repeat = repeat;
                    }
                }
                if opens_bar {
                    self.open_bar();
                }
            }
            BarToken::Signature(Some(sig)) => {
                if let Some(bar) = self.last_bar_or_report(token) {
                    bar.signature = Some(sig);
                }
            }
            BarToken::Signature(None) => {}
            BarToken::Chord(chord) => {
                // A chord outside a bar gets its own bar; the grouping stays
                // closed so the next loose chord does too.
                if !self.in_bar {
                    self.seg.bars.push(Bar::new());
                }
                if let Some(bar) = self.seg.bars.last_mut() {
                    bar.push(chord);
                }
            }
        }
    }
}

/// Split a trimmed content line into bars.
pub fn segment_line(line: &str) -> Segmentation {
    let mut segmenter = Segmenter {
        seg: Segmentation::default(),
        in_bar: false,
    };
    for token in line.split(' ').filter(|t| !t.is_empty()) {
        segmenter.apply(token);
    }
    segmenter.seg
}
