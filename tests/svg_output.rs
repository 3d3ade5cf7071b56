//! Output tests: JSON and SVG renderings of whole charts.

use chrdlib::{render_chart_to_json, render_chart_to_svg, PageSize, RenderOptions};
use std::path::PathBuf;

fn sample(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/charts").join(name);
    std::fs::read_to_string(path).expect("failed to read sample chart")
}

fn output_dir() -> PathBuf {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("test_output");
    std::fs::create_dir_all(&dir).ok();
    dir
}

#[test]
fn render_autumn_leaves_svg() {
    let svg = render_chart_to_svg(&sample("autumn_leaves.chrd"), &RenderOptions::default())
        .expect("Failed to render autumn leaves");

    assert!(svg.starts_with("<svg"), "Output should be SVG");
    assert!(svg.trim_end().ends_with("</svg>"), "SVG should be closed");
    assert!(svg.contains(r#"viewBox="0 0 595.28 841.89""#));
    assert!(svg.contains(r##"fill="#ffffff""##), "SVG should paint the background");
    assert!(svg.contains("Autumn Leaves"), "SVG should contain title");
    assert!(svg.contains(r#"text-anchor="middle""#));
    assert!(svg.contains(r#"text-anchor="end""#), "author is right-justified");
    assert!(svg.contains("<circle"), "repeat dots");

    let out = output_dir().join("autumn_leaves.svg");
    std::fs::write(&out, &svg).expect("Failed to write SVG");
}

#[test]
fn render_blues_svg_has_ornaments() {
    let svg = render_chart_to_svg(&sample("blues_in_f.chrd"), &RenderOptions::default())
        .expect("Failed to render blues");

    assert_eq!(svg.matches("<polyline").count(), 3);
    assert_eq!(svg.matches("<path").count(), 1);

    let out = output_dir().join("blues_in_f.svg");
    std::fs::write(&out, &svg).expect("Failed to write SVG");
}

#[test]
fn letter_page_sets_svg_size() {
    let options = RenderOptions { scale: 1.0, page: PageSize::Letter };
    let svg = render_chart_to_svg("| C", &options).unwrap();
    assert!(svg.contains(r#"width="612.00" height="792.00""#));
}

#[test]
fn json_lists_commands_and_diagnostics() {
    let json = render_chart_to_json("#title Song\n#nope\n| C", &RenderOptions::default()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["meta"]["title"], "Song");
    assert_eq!(value["file_name"], "song.pdf");
    assert_eq!(value["commands"][0]["kind"], "text_centered");
    assert_eq!(value["commands"][1]["kind"], "rect");
    assert_eq!(value["diagnostics"][0]["kind"], "unknown_directive");
    assert_eq!(value["diagnostics"][0]["line"], 2);
}

#[test]
fn fatal_errors_propagate_through_outputs() {
    let err = render_chart_to_svg("#pop", &RenderOptions::default()).unwrap_err();
    assert!(err.is_fatal());
    assert_eq!(err.to_string(), "line 1: '#pop' has no matching #push");
}
