//! Code points of the chord font (ChordletType) glyphs.
//!
//! The chord font places its musical symbols in the Private Use Area; a few
//! (similes, note values) borrow the standard Miscellaneous Symbols block.
//! Only the glyphs the renderer emits are listed.

// ── Accidentals ─────────────────────────────────────────────────────
pub const SHARP: &str = "\u{e10c}";
pub const FLAT: &str = "\u{e10d}";
pub const NATURAL: &str = "\u{e10e}";
pub const SUPER_FLAT: &str = "\u{e188}"; // stacked second flat
pub const SUPER_SHARP: &str = "\u{e189}"; // stacked second sharp

// ── Chord qualities ─────────────────────────────────────────────────
pub const ELEVEN: &str = "\u{e182}";
pub const THIRTEEN: &str = "\u{e183}";
pub const DIM: &str = "\u{e184}";
pub const SUS: &str = "\u{e185}";
pub const AUG: &str = "\u{e186}";
pub const SUPER_DIM0: &str = "\u{e187}";
pub const MAJ7: &str = "\u{e18a}";
pub const MIN7: &str = "-";
pub const ADD: &str = "\u{e18b}";
pub const ADD11: &str = "\u{e18c}";
pub const SUS4: &str = "\u{e18d}";
pub const HALF_DIM: &str = "\u{e18f}";

// ── Superscript digits ──────────────────────────────────────────────
pub const SUPER5: &str = "\u{e195}";
pub const SUPER6: &str = "\u{e196}";
pub const SUPER7: &str = "\u{e197}";
pub const SUPER9: &str = "\u{e199}";

// ── Repeat ornaments ────────────────────────────────────────────────
pub const SIMILE: &str = "\u{2673}";
pub const SIMILE2: &str = "\u{2674}";
pub const SIMILE3: &str = "\u{2675}";

// ── Note values ─────────────────────────────────────────────────────
pub const CROTCHET: &str = "\u{2669}";
pub const CROTCHET_REST: &str = "\u{00a6}"; // also at U+1D13D

pub const COPYRIGHT: &str = "\u{00a9}";
