pub mod angle;
pub mod curve;
mod error;
pub mod ideogram;
pub mod ribbon;
mod types;

pub use error::{ChordError, Result};
pub use ribbon::RibbonEndMap;
pub use types::*;

use std::f64::consts::TAU;

use tracing::{debug, trace};

use crate::config::{ChordConfig, LayoutConfig};
use crate::ir::{ChordData, WeightMatrix};
use crate::theme::Theme;

fn format_weight(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if (rounded - rounded.round()).abs() < 0.001 {
        format!("{:.0}", rounded)
    } else {
        format!("{}", rounded)
    }
}

/// Lays out a chord diagram with explicit gap and neck settings and the
/// default theme strokes.
pub fn build(
    matrix: &[Vec<f64>],
    labels: &[String],
    colors: &[String],
    gap_fraction: f64,
    neck_radius: f64,
) -> Result<ChordLayout> {
    let matrix = WeightMatrix::from_rows(matrix)?;
    let data = ChordData::new(labels.to_vec(), matrix)?;
    let mut config = LayoutConfig::default();
    config.chord.gap_fraction = gap_fraction;
    config.chord.neck_radius = neck_radius;
    compute_chord_layout(&data, colors, &Theme::plotly(), &config)
}

pub fn compute_chord_layout(
    data: &ChordData,
    colors: &[String],
    theme: &Theme,
    config: &LayoutConfig,
) -> Result<ChordLayout> {
    let chord = &config.chord;
    let size = data.matrix.size();
    if data.labels.len() != size {
        return Err(ChordError::LabelCountMismatch {
            expected: size,
            actual: data.labels.len(),
        });
    }
    if colors.len() != size {
        return Err(ChordError::ColorCountMismatch {
            expected: size,
            actual: colors.len(),
        });
    }

    let gap = TAU * chord.gap_fraction;
    let row_sums = data.matrix.row_sums();
    let lengths = ideogram::lengths_from_weights(&row_sums, gap)?;
    let ideogram_ends = ideogram::compute_ends(&lengths, gap);
    debug!(
        entities = size,
        gap,
        symmetric = data.matrix.is_symmetric(),
        "computed ideogram ends"
    );

    let mapped = ribbon::map_weights(&data.matrix, &row_sums, &lengths);
    let permutations = ribbon::sort_permutation(&mapped);
    let end_maps = ribbon::ribbon_ends(&mapped, &ideogram_ends, &permutations)?;
    debug!(entities = size, "computed ribbon ends");

    let mut layout = ChordLayout {
        ideograms: Vec::with_capacity(size),
        ribbons: Vec::new(),
        shapes: Vec::new(),
        annotations: Vec::new(),
    };

    for (k, end) in ideogram_ends.iter().enumerate() {
        let path = curve::ideogram_path(
            *end,
            chord.inner_radius,
            chord.outer_radius,
            chord.ideogram_resolution,
        )?;
        layout.shapes.push(Shape {
            kind: ShapeKind::Ideogram,
            path,
            stroke_color: theme.ideogram_stroke.clone(),
            fill_color: colors[k].clone(),
            stroke_width: chord.ideogram_stroke_width,
            layer: ShapeLayer::Below,
        });
        let anchor = Point::polar((chord.inner_radius + chord.outer_radius) / 2.0, end.midpoint());
        layout.annotations.push(Annotation {
            kind: AnnotationKind::Ideogram,
            x: anchor.x,
            y: anchor.y,
            text: format!(
                "label: {}\noccurrence: {}",
                data.labels[k],
                format_weight(row_sums[k])
            ),
            color: colors[k].clone(),
        });
        layout.ideograms.push(IdeogramLayout {
            index: k,
            label: data.labels[k].clone(),
            color: colors[k].clone(),
            total: row_sums[k],
            end: *end,
        });
    }

    for k in 0..size {
        for j in k..size {
            let forward = data.matrix.get(k, j);
            let backward = data.matrix.get(j, k);
            if forward == 0.0 && backward == 0.0 {
                continue;
            }
            let left = end_maps[k].for_partner(j);
            if k == j {
                emit_self_relation(&mut layout, data, colors, theme, chord, k, left)?;
            } else {
                let right = end_maps[j].for_partner(k);
                emit_ribbon(&mut layout, data, colors, theme, chord, (k, j), left, right)?;
            }
        }
    }

    debug!(
        shapes = layout.shapes.len(),
        annotations = layout.annotations.len(),
        "chord layout complete"
    );
    Ok(layout)
}

fn emit_self_relation(
    layout: &mut ChordLayout,
    data: &ChordData,
    colors: &[String],
    theme: &Theme,
    chord: &ChordConfig,
    k: usize,
    end: RibbonEnd,
) -> Result<()> {
    let path =
        curve::build_self_relation_path(end, chord.self_neck_radius, chord.ribbon_resolution)?;
    trace!(entity = k, "self relation");
    layout.shapes.push(Shape {
        kind: ShapeKind::SelfRelation,
        path,
        stroke_color: theme.ribbon_stroke.clone(),
        fill_color: colors[k].clone(),
        stroke_width: chord.ribbon_stroke_width,
        layer: ShapeLayer::Below,
    });
    let anchor = Point::polar(chord.annotation_radius, end.midpoint());
    let weight = data.matrix.get(k, k);
    layout.annotations.push(Annotation {
        kind: AnnotationKind::SelfRelation,
        x: anchor.x,
        y: anchor.y,
        text: format!(
            "label {} appeared in {} samples",
            data.labels[k],
            format_weight(weight)
        ),
        color: colors[k].clone(),
    });
    layout.ribbons.push(RibbonLayout {
        source: k,
        target: k,
        source_end: end,
        target_end: end,
        source_weight: weight,
        target_weight: weight,
    });
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn emit_ribbon(
    layout: &mut ChordLayout,
    data: &ChordData,
    colors: &[String],
    theme: &Theme,
    chord: &ChordConfig,
    (k, j): (usize, usize),
    left: RibbonEnd,
    right: RibbonEnd,
) -> Result<()> {
    // the far end runs the other way round, else the outline twists
    let path = curve::build_ribbon_path(
        left,
        right.reversed(),
        chord.neck_radius,
        chord.ribbon_resolution,
    )?;
    trace!(source = k, target = j, "ribbon");
    layout.shapes.push(Shape {
        kind: ShapeKind::Ribbon,
        path,
        stroke_color: theme.ribbon_stroke.clone(),
        fill_color: colors[k].clone(),
        stroke_width: chord.ribbon_stroke_width,
        layer: ShapeLayer::Below,
    });

    let forward = data.matrix.get(k, j);
    let backward = data.matrix.get(j, k);
    for (end, (from, to), weight) in [(left, (k, j), forward), (right, (j, k), backward)] {
        let anchor = Point::polar(chord.annotation_radius, end.midpoint());
        layout.annotations.push(Annotation {
            kind: AnnotationKind::RibbonEnd,
            x: anchor.x,
            y: anchor.y,
            text: format!(
                "{} x {}: {} times",
                data.labels[from],
                data.labels[to],
                format_weight(weight)
            ),
            color: colors[k].clone(),
        });
    }
    layout.ribbons.push(RibbonLayout {
        source: k,
        target: j,
        source_end: left,
        target_end: right,
        source_weight: forward,
        target_weight: backward,
    });
    Ok(())
}
