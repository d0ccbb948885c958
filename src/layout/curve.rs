use std::f64::consts::{PI, TAU};

use super::angle::{is_in_standard_range, normalize};
use super::error::{ChordError, Result};
use super::{IdeogramEnd, Point, RibbonEnd};

const MIN_IDEOGRAM_POINTS: usize = 5;
const MIN_RIBBON_ARC_POINTS: usize = 3;

fn fmt_coord(value: f64) -> String {
    // keep "-0.000000" out of the output
    let value = if value.abs() < 5e-7 { 0.0 } else { value };
    format!("{value:.6}")
}

fn fmt_point(point: Point) -> String {
    format!("{},{}", fmt_coord(point.x), fmt_coord(point.y))
}

fn linspace(start: f64, end: f64, count: usize) -> impl Iterator<Item = f64> {
    let steps = count.saturating_sub(1).max(1) as f64;
    (0..count).map(move |idx| start + (end - start) * idx as f64 / steps)
}

/// Samples the arc `[phi[0], phi[1]]` on a circle of `radius`.
///
/// Ordered endpoints at most one turn apart are sampled as given, so an arc
/// ending exactly at `2π` stays intact. Otherwise angles outside `[0, 2π)`
/// are folded back first, and an arc whose start lies after its end crosses
/// the 0/2π seam and is sampled in `[-π, π)`.
pub fn arc_polyline(radius: f64, phi: [f64; 2], resolution: f64) -> Result<Vec<Point>> {
    let [mut start, mut end] = phi;
    if is_single_turn(start, end) {
        return Ok(sample_angles(start, end, resolution, MIN_IDEOGRAM_POINTS)
            .map(|theta| Point::polar(radius, theta))
            .collect());
    }
    if !is_in_standard_range(start) || !is_in_standard_range(end) {
        start = normalize(start, 0.0, TAU)?;
        end = normalize(end, 0.0, TAU)?;
    }
    if start > end {
        start = normalize(start, -PI, PI)?;
        end = normalize(end, -PI, PI)?;
    }
    Ok(sample_angles(start, end, resolution, MIN_IDEOGRAM_POINTS)
        .map(|theta| Point::polar(radius, theta))
        .collect())
}

/// `to` follows `from` counter-clockwise within one full turn.
fn is_single_turn(from: f64, to: f64) -> bool {
    from.is_finite() && to.is_finite() && from <= to && to - from <= TAU
}

fn sample_angles(
    from: f64,
    to: f64,
    resolution: f64,
    min_points: usize,
) -> impl Iterator<Item = f64> {
    let count = ((resolution * (to - from).abs() / PI) as usize).max(min_points);
    linspace(from, to, count)
}

/// Control polygon of a ribbon side: unit-circle points at the three angles,
/// the middle one pulled in to `neck_radius`.
pub fn control_points(angles: [f64; 3], neck_radius: f64) -> [Point; 3] {
    [
        Point::polar(1.0, angles[0]),
        Point::polar(neck_radius, angles[1]),
        Point::polar(1.0, angles[2]),
    ]
}

/// The two opposite Bézier sides of a ribbon joining `left` and `right`.
pub fn ribbon_control_polygons(
    left: RibbonEnd,
    right: RibbonEnd,
    neck_radius: f64,
) -> ([Point; 3], [Point; 3]) {
    let side = |l: f64, r: f64| control_points([l, (l + r) / 2.0, r], neck_radius);
    (side(left.start, right.start), side(left.end, right.end))
}

pub fn quadratic_bezier_path(points: &[Point; 3]) -> String {
    format!(
        "M {} {}",
        fmt_point(points[0]),
        quadratic_bezier_segment(points)
    )
}

/// Curve command only; the pen must already sit on `points[0]`.
fn quadratic_bezier_segment(points: &[Point; 3]) -> String {
    format!("Q {} {}", fmt_point(points[1]), fmt_point(points[2]))
}

/// Line-to run along the unit circle, sweeping clockwise from `theta0` to
/// `theta1`. A clockwise run within one turn is sampled as given. Otherwise
/// angles are folded into `[0, 2π)` first, and a sweep that has to cross the
/// seam is re-expressed in `[-π, π)`.
pub fn arc_path(theta0: f64, theta1: f64, resolution: f64) -> Result<String> {
    let invalid = || ChordError::InvalidArc {
        start: theta0,
        end: theta1,
    };
    if !theta0.is_finite() || !theta1.is_finite() {
        return Err(invalid());
    }
    let (mut from, mut to) = (theta0, theta1);
    if !is_single_turn(to, from) {
        from = normalize(theta0, 0.0, TAU)?;
        to = normalize(theta1, 0.0, TAU)?;
        if from < to {
            from = normalize(from, -PI, PI)?;
            to = normalize(to, -PI, PI)?;
            if from <= to {
                return Err(invalid());
            }
        }
    }

    let mut path = String::new();
    for theta in sample_angles(from, to, resolution, MIN_RIBBON_ARC_POINTS) {
        path.push_str(&format!(" L {}", fmt_point(Point::polar(1.0, theta))));
    }
    Ok(path)
}

/// Closed ribbon outline: neck, back along `right`, second neck, back along
/// `left`. `right` is expected to be reversed already so the outline does
/// not twist.
pub fn build_ribbon_path(
    left: RibbonEnd,
    right: RibbonEnd,
    neck_radius: f64,
    resolution: f64,
) -> Result<String> {
    let (side_a, side_b) = ribbon_control_polygons(left, right, neck_radius);
    let side_b = [side_b[2], side_b[1], side_b[0]];

    let mut path = quadratic_bezier_path(&side_a);
    path.push_str(&arc_path(right.start, right.end, resolution)?);
    path.push(' ');
    path.push_str(&quadratic_bezier_segment(&side_b));
    path.push_str(&arc_path(left.end, left.start, resolution)?);
    path.push_str(" Z");
    Ok(path)
}

/// Loop from one end of `end` to the other through the neck, closed along
/// the arc itself.
pub fn build_self_relation_path(end: RibbonEnd, neck_radius: f64, resolution: f64) -> Result<String> {
    let points = control_points([end.start, end.midpoint(), end.end], neck_radius);
    let mut path = quadratic_bezier_path(&points);
    path.push_str(&arc_path(end.end, end.start, resolution)?);
    path.push_str(" Z");
    Ok(path)
}

/// Thin ring between `inner` and `outer` covering one ideogram.
pub fn ideogram_path(end: IdeogramEnd, inner: f64, outer: f64, resolution: f64) -> Result<String> {
    let outer_points = arc_polyline(outer, [end.start, end.end], resolution)?;
    let inner_points = arc_polyline(inner, [end.start, end.end], resolution)?;

    let mut path = String::new();
    for (idx, point) in outer_points
        .iter()
        .chain(inner_points.iter().rev())
        .enumerate()
    {
        let command = if idx == 0 { "M" } else { " L" };
        path.push_str(&format!("{command} {}", fmt_point(*point)));
    }
    path.push_str(" Z");
    Ok(path)
}
