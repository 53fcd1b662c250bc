#![cfg(feature = "cli")]

use std::path::Path;

use hierarchy_layout::cli::parse_input;
use hierarchy_layout::{
    Direction, JsonLabels, LayoutConfig, RenderConfig, Theme, compute_layout, render_svg,
};

fn assert_valid_svg(svg: &str, fixture: &str) {
    assert!(svg.contains("<svg"), "{fixture}: missing <svg tag");
    assert!(svg.contains("</svg>"), "{fixture}: missing </svg tag");
}

fn render_fixture(path: &Path, direction: Direction) -> (String, usize, usize) {
    let text = std::fs::read_to_string(path).expect("fixture read failed");
    let input = parse_input(&text).expect("parse failed");
    let config = LayoutConfig::default().with_direction(direction);
    let layout =
        compute_layout(&input.forest, input.edges.as_deref(), &config).expect("layout failed");
    let svg = render_svg(&layout, &Theme::modern(), &RenderConfig::default(), &JsonLabels);
    (svg, layout.nodes.len(), layout.edges.len())
}

#[test]
fn render_all_fixtures() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures");

    // Keep this list explicit so new fixtures must be added intentionally.
    // (fixture, nodes, edges)
    let candidates = [
        ("basic.json", 7, 6),
        ("forest.json", 7, 4),
        ("edges.json", 3, 2),
        ("deep.json5", 5, 4),
        ("wide.json", 9, 8),
    ];

    for (rel, nodes, edges) in candidates {
        let path = root.join(rel);
        assert!(path.exists(), "fixture missing: {}", rel);
        for direction in Direction::ALL {
            let (svg, node_count, edge_count) = render_fixture(&path, direction);
            assert_valid_svg(&svg, rel);
            assert_eq!(node_count, nodes, "{rel} {direction:?}: node count");
            assert_eq!(edge_count, edges, "{rel} {direction:?}: edge count");
            assert_eq!(svg.matches("<path id=").count(), edges, "{rel}: drawn edges");
        }
    }
}

#[test]
fn labels_are_escaped() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/deep.json5");
    let (svg, _, _) = render_fixture(&path, Direction::TopDown);
    assert!(svg.contains("leaf &amp; &lt;tail&gt;"));
}
