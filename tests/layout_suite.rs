use std::f64::consts::TAU;
use std::path::Path;

use chordwheel::layout::{AnnotationKind, ShapeKind, ideogram, ribbon};
use chordwheel::{
    ChordError, Config, RenderOptions, build, compute_chord_layout, parse_input, render_svg,
};

fn assert_valid_svg(svg: &str, fixture: &str) {
    assert!(svg.contains("<svg"), "{fixture}: missing <svg tag");
    assert!(svg.contains("</svg>"), "{fixture}: missing </svg tag");
}

fn fixture_path(rel: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(rel)
}

fn render_fixture(path: &Path) -> String {
    let input = std::fs::read_to_string(path).expect("fixture read failed");
    chordwheel::render_with_options(&input, RenderOptions::default()).expect("render failed")
}

fn labels(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

#[test]
fn render_all_fixtures() {
    // Keep this list explicit so new fixtures must be added intentionally.
    let candidates = [
        "chain.json",
        "diagonal.json5",
        "tags.json5",
        "asymmetric.json",
    ];

    for rel in candidates {
        let path = fixture_path(rel);
        assert!(path.exists(), "fixture missing: {}", rel);
        let svg = render_fixture(&path);
        assert_valid_svg(&svg, rel);
    }
}

#[test]
fn chain_fixture_matches_expected_shapes() {
    let input = std::fs::read_to_string(fixture_path("chain.json")).unwrap();
    let parsed = parse_input(&input).unwrap();
    let config = Config::default();
    let colors = config.theme.entity_colors(parsed.data.len());
    let layout =
        compute_chord_layout(&parsed.data, &colors, &config.theme, &config.layout).unwrap();

    assert_eq!(layout.shapes_of(ShapeKind::Ideogram).count(), 3);
    assert_eq!(layout.shapes_of(ShapeKind::Ribbon).count(), 2);
    assert_eq!(layout.shapes_of(ShapeKind::SelfRelation).count(), 0);

    let ab: Vec<&str> = layout
        .annotations_of(AnnotationKind::RibbonEnd)
        .take(2)
        .map(|annotation| annotation.text.as_str())
        .collect();
    assert_eq!(ab, vec!["A x B: 2 times", "B x A: 2 times"]);

    let svg = render_svg(&layout, &config.theme, &config.render);
    assert_eq!(svg.matches("class=\"ribbon\"").count(), 2);
}

#[test]
fn diagonal_fixture_has_only_self_relations() {
    let svg = render_fixture(&fixture_path("diagonal.json5"));
    assert_eq!(svg.matches("class=\"self-relation\"").count(), 2);
    assert_eq!(svg.matches("class=\"ribbon\"").count(), 0);
    assert_eq!(svg.matches("class=\"ideogram\"").count(), 2);
}

#[test]
fn asymmetric_fixture_skips_empty_pairs() {
    let svg = render_fixture(&fixture_path("asymmetric.json"));
    assert_eq!(svg.matches("class=\"ribbon\"").count(), 4);
    assert_eq!(svg.matches("class=\"self-relation\"").count(), 3);
    // inline config switched labels off
    assert!(!svg.contains("<text"));
    assert!(svg.contains("#d62728"));
}

#[test]
fn tags_fixture_orders_labels_by_occurrence() {
    let input = std::fs::read_to_string(fixture_path("tags.json5")).unwrap();
    let parsed = parse_input(&input).unwrap();
    assert_eq!(parsed.data.labels, labels(&["rust", "cli", "svg", "layout"]));
    assert_eq!(parsed.data.matrix.row_sums(), vec![9.0, 6.0, 7.0, 3.0]);
    assert_eq!(parsed.title.as_deref(), Some("Tag co-occurrence"));
}

#[test]
fn ideograms_tile_the_circle() {
    let matrix = vec![
        vec![5.0, 0.0, 0.0],
        vec![0.0, 3.0, 0.0],
        vec![0.0, 0.0, 2.0],
    ];
    let layout = build(&matrix, &labels(&["A", "B", "C"]), &labels(&["r", "g", "b"]), 0.01, 0.2)
        .unwrap();
    let gap = TAU * 0.01;

    let a = &layout.ideograms[0];
    assert!((a.end.end - a.end.start - (0.5 * TAU - gap)).abs() < 1e-9);

    let covered: f64 = layout
        .ideograms
        .iter()
        .map(|ideogram| ideogram.end.end - ideogram.end.start + gap)
        .sum();
    assert!((covered - TAU).abs() < 1e-9);
    for pair in layout.ideograms.windows(2) {
        assert!(pair[0].end.end < pair[1].end.start);
    }
}

#[test]
fn ribbon_ends_partition_every_ideogram() {
    let matrix = chordwheel::WeightMatrix::from_rows(&[
        vec![2.0, 7.0, 1.0, 0.0, 3.0],
        vec![7.0, 1.0, 0.0, 2.0, 2.0],
        vec![1.0, 0.0, 9.0, 4.0, 1.0],
        vec![0.0, 2.0, 4.0, 0.0, 6.0],
        vec![3.0, 2.0, 1.0, 6.0, 5.0],
    ])
    .unwrap();
    let gap = TAU * 0.005;
    let row_sums = matrix.row_sums();
    let lengths = ideogram::lengths_from_weights(&row_sums, gap).unwrap();
    let ends = ideogram::compute_ends(&lengths, gap);
    let mapped = ribbon::map_weights(&matrix, &row_sums, &lengths);
    let perms = ribbon::sort_permutation(&mapped);
    let maps = ribbon::ribbon_ends(&mapped, &ends, &perms).unwrap();

    for (k, map) in maps.iter().enumerate() {
        assert_eq!(map.slot(0).start, ends[k].start);
        assert_eq!(map.slot(map.len() - 1).end, ends[k].end);
        for slot in 1..map.len() {
            assert_eq!(map.slot(slot - 1).end, map.slot(slot).start);
        }
        let inverse = ribbon::invert(&perms[k]).unwrap();
        for (slot, &partner) in perms[k].iter().enumerate() {
            assert_eq!(inverse[partner], slot);
        }
    }
}

#[test]
fn symmetric_ribbons_share_segments_regardless_of_direction() {
    let matrix = vec![
        vec![1.0, 4.0, 2.0],
        vec![4.0, 0.0, 3.0],
        vec![2.0, 3.0, 5.0],
    ];
    let names = labels(&["a", "b", "c"]);
    let colors = labels(&["#000", "#111", "#222"]);
    let layout = build(&matrix, &names, &colors, 0.005, 0.2).unwrap();

    // the transposed ordering of entities must reserve the same segments
    let reversed: Vec<Vec<f64>> = (0..3)
        .rev()
        .map(|i| (0..3).rev().map(|j| matrix[i][j]).collect())
        .collect();
    let reversed_names: Vec<String> = names.iter().rev().cloned().collect();
    let flipped = build(&reversed, &reversed_names, &colors, 0.005, 0.2).unwrap();

    for ribbon in layout.ribbons.iter().filter(|ribbon| !ribbon.is_self_relation()) {
        let widths = (ribbon.source_end.width(), ribbon.target_end.width());
        let twin = flipped
            .ribbons
            .iter()
            .find(|other| other.source == 2 - ribbon.target && other.target == 2 - ribbon.source)
            .expect("matching ribbon");
        assert!((twin.source_end.width() - widths.1).abs() < 1e-9);
        assert!((twin.target_end.width() - widths.0).abs() < 1e-9);
    }
}

#[test]
fn degenerate_inputs_are_rejected_whole() {
    let err = build(
        &[vec![0.0, 0.0], vec![0.0, 0.0]],
        &labels(&["a", "b"]),
        &labels(&["r", "g"]),
        0.005,
        0.2,
    )
    .unwrap_err();
    assert!(matches!(err, ChordError::DegenerateInput { .. }));

    let err = build(&[vec![1.0]], &labels(&["a"]), &labels(&["r"]), 1.0, 0.2).unwrap_err();
    assert!(matches!(err, ChordError::DegenerateInput { .. }));

    let err = build(
        &[vec![1.0, 2.0]],
        &labels(&["a"]),
        &labels(&["r"]),
        0.005,
        0.2,
    )
    .unwrap_err();
    assert!(matches!(err, ChordError::NonSquare { .. }));
}

#[test]
fn tiny_weights_render_as_slivers() {
    let matrix = vec![vec![1e-12, 1.0], vec![1.0, 1e-12]];
    let layout = build(&matrix, &labels(&["a", "b"]), &labels(&["r", "g"]), 0.005, 0.2).unwrap();
    assert_eq!(layout.shapes_of(ShapeKind::SelfRelation).count(), 2);
    for shape in &layout.shapes {
        assert!(shape.path.starts_with("M "));
        assert!(shape.path.ends_with(" Z"));
    }
}

#[test]
fn repeated_renders_are_bit_identical() {
    let path = fixture_path("tags.json5");
    assert_eq!(render_fixture(&path), render_fixture(&path));
}

#[test]
fn rare_label_in_long_tail_samples_still_renders() {
    let mut samples = vec!["['A']"; 300];
    samples.push("['B']");
    let input = format!("{{ samples: [{}] }}", samples.join(", "));

    let parsed = parse_input(&input).unwrap();
    assert_eq!(parsed.data.labels, labels(&["A", "B"]));
    let config = Config::default();
    let colors = config.theme.entity_colors(parsed.data.len());
    let layout =
        compute_chord_layout(&parsed.data, &colors, &config.theme, &config.layout).unwrap();

    assert_eq!(layout.ideograms[1].end.length(), 0.0);
    assert_eq!(layout.shapes_of(ShapeKind::SelfRelation).count(), 2);
    let gap = TAU * config.layout.chord.gap_fraction;
    let covered: f64 = layout
        .ideograms
        .iter()
        .map(|ideogram| ideogram.end.length() + gap)
        .sum();
    assert!((covered - TAU).abs() < 1e-9);

    let svg = render_svg(&layout, &config.theme, &config.render);
    assert_valid_svg(&svg, "long tail samples");
}
