//! Line segmentation and width distribution through the public API.

use chrdlib::renderer::{bar_width, chord_width};
use chrdlib::{segment_line, Barline, Repeat};
use pretty_assertions::assert_eq;

#[test]
fn bar_widths_fill_the_content_width() {
    let content = 548.276;
    for line in ["| C", "| C | D", "| C | D | E | F | G", "C D E F G A B"] {
        let seg = segment_line(line);
        let each = bar_width(content, seg.bars.len()).unwrap();
        let total: f64 = seg.bars.iter().map(|_| each).sum();
        assert!((total - content).abs() < 1e-9, "{line}: {total}");
    }
}

#[test]
fn chord_slots_fill_the_padded_bar() {
    let seg = segment_line("| C E- G7 B@");
    let slot = chord_width(137.0, 8.0, seg.bars[0].chords.len()).unwrap();
    assert_eq!(slot * 4.0 + 16.0, 137.0);
}

#[test]
fn repeat_section_with_count_and_cue() {
    let seg = segment_line("||: C | G :||2 F | C :|c");
    assert_eq!(seg.leading, Barline::StartRepeat);
    assert_eq!(seg.bars.len(), 4);

    let edges: Vec<Barline> = seg.bars.iter().map(|b| b.barline).collect();
    assert_eq!(
        edges,
        vec![Barline::Single, Barline::EndRepeat, Barline::Single, Barline::EndRepeat]
    );
    assert_eq!(seg.bars[1].repeat, Some(Repeat::Count(2)));
    assert_eq!(seg.bars[3].repeat, Some(Repeat::UntilCue));
    assert_eq!(seg.bars[3].repeat_count(), -1);
}

#[test]
fn modifiers_survive_segmentation() {
    let seg = segment_line("| C>K | G7R");
    let c = &seg.bars[0].chords[0];
    assert!(c.push && c.choke);
    assert_eq!(c.raw, "C>K");
    assert!(seg.bars[1].chords[0].ring);
}

#[test]
fn line_without_bars_is_empty() {
    let seg = segment_line("\\ :|");
    assert!(seg.bars.is_empty());
    assert_eq!(seg.invalid, vec![":|".to_string()]);
    assert_eq!(bar_width(548.276, seg.bars.len()), None);
}
