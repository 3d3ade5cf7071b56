//! Chord symbol translation from informal chord spelling to chord-font glyphs.
//!
//! A chord token such as `Bb-7/Ab` or `F#^>` is scanned left to right.
//! Single characters map straight onto the glyph table, a handful of
//! multi-character sequences are matched greedily first, and the four
//! performance-modifier characters are lifted out into flags.

use serde::Serialize;

use crate::glyphs::*;

pub const PUSH_CH: char = '>';
pub const RING_CH: char = 'R';
pub const CHOKE_CH: char = 'K';
pub const PAUSE_CH: char = 'P';

/// Multi-character sequences, tried in this order before any single
/// character mapping. `add11` must precede `add`, and the simile runs go
/// longest first.
const SEQUENCES: &[(&str, &str)] = &[
    ("add11", ADD11),
    ("add", ADD),
    ("dim", DIM),
    ("11", ELEVEN),
    ("13", THIRTEEN),
    ("s4", SUS4),
    ("s", SUS),
    ("%%%", SIMILE3),
    ("%%", SIMILE2),
    ("%", SIMILE),
];

fn single_glyph(c: char) -> Option<&'static str> {
    let glyph = match c {
        'n' => NATURAL,
        'o' => SUPER_DIM0,
        '+' => AUG,
        '^' => MAJ7,
        '-' => MIN7,
        '@' => HALF_DIM,
        '5' => SUPER5,
        '6' => SUPER6,
        '7' => SUPER7,
        '9' => SUPER9,
        'S' => CROTCHET_REST,
        _ => return None,
    };
    Some(glyph)
}

/// One chord as it will be drawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChordToken {
    /// The token exactly as written in the chart.
    pub raw: String,
    /// Display string after glyph substitution.
    pub glyphs: String,
    pub push: bool,
    pub ring: bool,
    pub choke: bool,
    pub pause: bool,
}

impl ChordToken {
    pub fn parse(raw: &str) -> Self {
        let mut token = ChordToken {
            raw: raw.to_string(),
            glyphs: String::with_capacity(raw.len()),
            push: false,
            ring: false,
            choke: false,
            pause: false,
        };

        // Set by the first accidental; the next one stacks. Reset by '/'.
        let mut has_accidental = false;
        let mut i = 0;

        while let Some(c) = raw[i..].chars().next() {
            let rest = &raw[i..];
            i += c.len_utf8();

            match c {
                PUSH_CH => token.push = true,
                RING_CH => token.ring = true,
                CHOKE_CH => token.choke = true,
                PAUSE_CH => token.pause = true,
                'b' | '#' => {
                    let glyph = match (c, has_accidental) {
                        ('b', false) => FLAT,
                        ('b', true) => SUPER_FLAT,
                        (_, false) => SHARP,
                        (_, true) => SUPER_SHARP,
                    };
                    has_accidental = true;
                    token.glyphs.push_str(glyph);
                }
                '/' => {
                    has_accidental = false;
                    token.glyphs.push('/');
                }
                _ => {
                    if let Some(glyph) = single_glyph(c) {
                        token.glyphs.push_str(glyph);
                    } else if let Some((seq, glyph)) =
                        SEQUENCES.iter().find(|(seq, _)| rest.starts_with(seq))
                    {
                        token.glyphs.push_str(glyph);
                        i += seq.len() - c.len_utf8();
                    } else {
                        token.glyphs.push(c);
                    }
                }
            }
        }

        token
    }

    pub fn has_modifiers(&self) -> bool {
        self.push || self.ring || self.choke || self.pause
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glyphs(raw: &str) -> String {
        ChordToken::parse(raw).glyphs
    }

    #[test]
    fn second_accidental_is_stacked() {
        assert_eq!(glyphs("bb"), format!("{FLAT}{SUPER_FLAT}"));
        assert_eq!(glyphs("b b"), format!("{FLAT} {SUPER_FLAT}"));
        assert_eq!(glyphs("F##"), format!("F{SHARP}{SUPER_SHARP}"));
        assert_eq!(glyphs("Eb#"), format!("E{FLAT}{SUPER_SHARP}"));
    }

    #[test]
    fn slash_resets_accidental_stacking() {
        assert_eq!(
            glyphs("Bb/Ab"),
            format!("B{FLAT}/A{FLAT}"),
        );
        assert_eq!(
            glyphs("Db7b9/Cb"),
            format!("D{FLAT}{SUPER7}{SUPER_FLAT}{SUPER9}/C{FLAT}"),
        );
    }

    #[test]
    fn sus_and_sus4() {
        assert_eq!(glyphs("Cs4"), format!("C{SUS4}"));
        assert_eq!(glyphs("Cs"), format!("C{SUS}"));
        assert_eq!(glyphs("Cs2"), format!("C{SUS}2"));
    }

    #[test]
    fn add11_wins_over_add() {
        assert_eq!(glyphs("Cadd11"), format!("C{ADD11}"));
        assert_eq!(glyphs("Cadd9"), format!("C{ADD}{SUPER9}"));
        assert_eq!(glyphs("add"), ADD);
    }

    #[test]
    fn extensions_and_qualities() {
        assert_eq!(glyphs("C11"), format!("C{ELEVEN}"));
        assert_eq!(glyphs("G13"), format!("G{THIRTEEN}"));
        assert_eq!(glyphs("Bdim"), format!("B{DIM}"));
        assert_eq!(glyphs("Bo7"), format!("B{SUPER_DIM0}{SUPER7}"));
        assert_eq!(glyphs("C+"), format!("C{AUG}"));
        assert_eq!(glyphs("F^"), format!("F{MAJ7}"));
        assert_eq!(glyphs("D-7"), format!("D{MIN7}{SUPER7}"));
        assert_eq!(glyphs("E@"), format!("E{HALF_DIM}"));
        assert_eq!(glyphs("C6"), format!("C{SUPER6}"));
        assert_eq!(glyphs("Cn5"), format!("C{NATURAL}{SUPER5}"));
        assert_eq!(glyphs("S"), CROTCHET_REST);
    }

    #[test]
    fn simile_runs_match_longest_first() {
        assert_eq!(glyphs("%"), SIMILE);
        assert_eq!(glyphs("%%"), SIMILE2);
        assert_eq!(glyphs("%%%"), SIMILE3);
        assert_eq!(glyphs("%%%%"), format!("{SIMILE3}{SIMILE}"));
    }

    #[test]
    fn modifiers_become_flags() {
        let c = ChordToken::parse("A>K");
        assert_eq!(c.glyphs, "A");
        assert!(c.push && c.choke);
        assert!(!c.ring && !c.pause);

        let c = ChordToken::parse("RGP");
        assert_eq!(c.glyphs, "G");
        assert!(c.ring && c.pause);
        assert!(c.has_modifiers());
        assert!(!ChordToken::parse("G").has_modifiers());
    }

    #[test]
    fn unknown_characters_pass_through() {
        assert_eq!(glyphs("Am"), "Am");
        assert_eq!(glyphs("x1y"), "x1y");
        assert_eq!(glyphs("é"), "é");
        assert_eq!(ChordToken::parse("Am").raw, "Am");
    }
}
