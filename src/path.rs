//! Connector shapes between two anchor points.

use crate::ir::Direction;
use crate::layout::Point;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

pub const DEFAULT_BEND_RATIO: f32 = 0.3;
/// Beyond half the flow distance the lead-in and lead-out would cross.
pub const MAX_BEND_RATIO: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    CubicTo(Point, Point, Point),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path {
    pub commands: Vec<PathCommand>,
}

impl Path {
    fn start(at: Point) -> Self {
        Self {
            commands: vec![PathCommand::MoveTo(at)],
        }
    }

    fn line_to(mut self, to: Point) -> Self {
        self.commands.push(PathCommand::LineTo(to));
        self
    }

    fn cubic_to(mut self, c1: Point, c2: Point, to: Point) -> Self {
        self.commands.push(PathCommand::CubicTo(c1, c2, to));
        self
    }

    pub fn end(&self) -> Option<Point> {
        self.commands.last().map(|cmd| match *cmd {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) | PathCommand::CubicTo(_, _, p) => p,
        })
    }

    /// True if `point` lies on the path within `tolerance`. Cubic segments are
    /// sampled.
    pub fn passes_through(&self, point: Point, tolerance: f32) -> bool {
        let near =
            |p: Point| (p.x - point.x).abs() <= tolerance && (p.y - point.y).abs() <= tolerance;
        let mut current = None;
        for cmd in &self.commands {
            match *cmd {
                PathCommand::MoveTo(p) => {
                    if near(p) {
                        return true;
                    }
                    current = Some(p);
                }
                PathCommand::LineTo(p) => {
                    if let Some(from) = current
                        && segment_distance(from, p, point) <= tolerance
                    {
                        return true;
                    }
                    current = Some(p);
                }
                PathCommand::CubicTo(c1, c2, p) => {
                    if let Some(from) = current {
                        const STEPS: usize = 64;
                        for i in 0..=STEPS {
                            let t = i as f32 / STEPS as f32;
                            if near(cubic_point(from, c1, c2, p, t)) {
                                return true;
                            }
                        }
                    }
                    current = Some(p);
                }
            }
        }
        false
    }

    /// SVG `d` attribute, numbers trimmed to at most two decimals.
    pub fn to_svg(&self) -> String {
        let mut d = String::new();
        for cmd in &self.commands {
            if !d.is_empty() {
                d.push(' ');
            }
            let _ = match *cmd {
                PathCommand::MoveTo(p) => write!(d, "M {} {}", fmt_num(p.x), fmt_num(p.y)),
                PathCommand::LineTo(p) => write!(d, "L {} {}", fmt_num(p.x), fmt_num(p.y)),
                PathCommand::CubicTo(c1, c2, p) => write!(
                    d,
                    "C {} {} {} {} {} {}",
                    fmt_num(c1.x),
                    fmt_num(c1.y),
                    fmt_num(c2.x),
                    fmt_num(c2.y),
                    fmt_num(p.x),
                    fmt_num(p.y)
                ),
            };
        }
        d
    }
}

pub(crate) fn fmt_num(value: f32) -> String {
    let mut s = format!("{value:.2}");
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" { "0".to_string() } else { s }
}

fn cubic_point(p0: Point, p1: Point, p2: Point, p3: Point, t: f32) -> Point {
    let u = 1.0 - t;
    let (a, b, c, d) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
    Point::new(
        a * p0.x + b * p1.x + c * p2.x + d * p3.x,
        a * p0.y + b * p1.y + c * p2.y + d * p3.y,
    )
}

fn segment_distance(a: Point, b: Point, p: Point) -> f32 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len_sq = dx * dx + dy * dy;
    let t = if len_sq == 0.0 {
        0.0
    } else {
        (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0)
    };
    let (cx, cy) = (a.x + t * dx, a.y + t * dy);
    ((p.x - cx).powi(2) + (p.y - cy).powi(2)).sqrt()
}

fn flows_horizontally(direction: Option<Direction>, source: Point, target: Point) -> bool {
    match direction {
        Some(direction) => direction.is_horizontal(),
        None => (target.x - source.x).abs() >= (target.y - source.y).abs(),
    }
}

pub fn straight_path(source: Point, target: Point) -> Path {
    Path::start(source).line_to(target)
}

/// S-curve with straight lead-in and lead-out of `bend_ratio` times the flow
/// distance at each end. The ratio is clamped to `[0, MAX_BEND_RATIO]`; a
/// non-finite one falls back to the default.
pub fn curved_path(
    source: Point,
    target: Point,
    direction: Option<Direction>,
    bend_ratio: Option<f32>,
) -> Path {
    let ratio = bend_ratio
        .filter(|r| r.is_finite())
        .unwrap_or(DEFAULT_BEND_RATIO)
        .clamp(0.0, MAX_BEND_RATIO);
    if flows_horizontally(direction, source, target) {
        let lead = (target.x - source.x) * ratio;
        let bend_start = source.x + lead;
        let bend_end = target.x - lead;
        let control = (bend_start + bend_end) / 2.0;
        Path::start(source)
            .line_to(Point::new(bend_start, source.y))
            .cubic_to(
                Point::new(control, source.y),
                Point::new(control, target.y),
                Point::new(bend_end, target.y),
            )
            .line_to(target)
    } else {
        let lead = (target.y - source.y) * ratio;
        let bend_start = source.y + lead;
        let bend_end = target.y - lead;
        let control = (bend_start + bend_end) / 2.0;
        Path::start(source)
            .line_to(Point::new(source.x, bend_start))
            .cubic_to(
                Point::new(source.x, control),
                Point::new(target.x, control),
                Point::new(target.x, bend_end),
            )
            .line_to(target)
    }
}

/// Right-angled connector that turns at the middle of the flow axis.
pub fn elbow_path(source: Point, target: Point, direction: Option<Direction>) -> Path {
    if flows_horizontally(direction, source, target) {
        let mid_x = (source.x + target.x) / 2.0;
        Path::start(source)
            .line_to(Point::new(mid_x, source.y))
            .line_to(Point::new(mid_x, target.y))
            .line_to(target)
    } else {
        let mid_y = (source.y + target.y) / 2.0;
        Path::start(source)
            .line_to(Point::new(source.x, mid_y))
            .line_to(Point::new(target.x, mid_y))
            .line_to(target)
    }
}

/// Strategy turning a pair of anchors into a drawable path.
pub trait PathBuilder {
    fn build(&self, source: Point, target: Point, direction: Option<Direction>) -> Path;
}

impl<F> PathBuilder for F
where
    F: Fn(Point, Point, Option<Direction>) -> Path,
{
    fn build(&self, source: Point, target: Point, direction: Option<Direction>) -> Path {
        self(source, target, direction)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EdgeStyle {
    Straight,
    #[default]
    Curved,
    Elbow,
}

impl EdgeStyle {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "straight" => Some(Self::Straight),
            "curved" | "curve" => Some(Self::Curved),
            "elbow" => Some(Self::Elbow),
            _ => None,
        }
    }
}

impl PathBuilder for EdgeStyle {
    fn build(&self, source: Point, target: Point, direction: Option<Direction>) -> Path {
        match self {
            Self::Straight => straight_path(source, target),
            Self::Curved => curved_path(source, target, direction, None),
            Self::Elbow => elbow_path(source, target, direction),
        }
    }
}

/// Curved edges with a non-default bend ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Curved {
    pub bend_ratio: f32,
}

impl PathBuilder for Curved {
    fn build(&self, source: Point, target: Point, direction: Option<Direction>) -> Path {
        curved_path(source, target, direction, Some(self.bend_ratio))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: Point = Point::new(0.0, 0.0);
    const TARGET: Point = Point::new(40.0, 20.0);

    #[test]
    fn straight_path_is_a_single_line() {
        assert_eq!(straight_path(SOURCE, TARGET).to_svg(), "M 0 0 L 40 20");
    }

    #[test]
    fn curved_path_infers_horizontal_flow() {
        assert_eq!(
            curved_path(SOURCE, TARGET, None, None).to_svg(),
            "M 0 0 L 12 0 C 20 0 20 20 28 20 L 40 20"
        );
    }

    #[test]
    fn curved_path_follows_explicit_direction() {
        assert_eq!(
            curved_path(SOURCE, TARGET, Some(Direction::TopDown), Some(0.25)).to_svg(),
            "M 0 0 L 0 5 C 0 10 40 10 40 15 L 40 20"
        );
    }

    #[test]
    fn curved_path_clamps_bend_ratio() {
        assert_eq!(
            curved_path(SOURCE, TARGET, None, Some(0.9)).to_svg(),
            curved_path(SOURCE, TARGET, None, Some(MAX_BEND_RATIO)).to_svg()
        );
        assert_eq!(
            curved_path(SOURCE, TARGET, None, Some(0.9)).to_svg(),
            "M 0 0 L 20 0 C 20 0 20 20 20 20 L 40 20"
        );
        assert_eq!(
            curved_path(SOURCE, TARGET, None, Some(-1.0)).to_svg(),
            "M 0 0 L 0 0 C 20 0 20 20 40 20 L 40 20"
        );
        assert_eq!(
            curved_path(SOURCE, TARGET, None, Some(f32::NAN)).to_svg(),
            curved_path(SOURCE, TARGET, None, None).to_svg()
        );
    }

    #[test]
    fn elbow_path_turns_at_midpoint() {
        assert_eq!(
            elbow_path(SOURCE, TARGET, None).to_svg(),
            "M 0 0 L 20 0 L 20 20 L 40 20"
        );
        assert_eq!(
            elbow_path(SOURCE, TARGET, Some(Direction::BottomUp)).to_svg(),
            "M 0 0 L 0 10 L 40 10 L 40 20"
        );
    }

    #[test]
    fn every_shape_passes_through_the_anchor_midpoint() {
        let mid = SOURCE.midpoint(TARGET);
        for direction in [None, Some(Direction::TopDown), Some(Direction::RightLeft)] {
            for style in [EdgeStyle::Straight, EdgeStyle::Curved, EdgeStyle::Elbow] {
                let path = style.build(SOURCE, TARGET, direction);
                assert!(path.passes_through(mid, 0.01), "{style:?} {direction:?}");
                assert_eq!(path.end(), Some(TARGET));
            }
        }
    }

    #[test]
    fn closures_are_path_builders() {
        let reversed = |s: Point, t: Point, _: Option<Direction>| straight_path(t, s);
        assert_eq!(reversed.build(SOURCE, TARGET, None).to_svg(), "M 40 20 L 0 0");
    }

    #[test]
    fn numbers_are_trimmed() {
        assert_eq!(fmt_num(12.5), "12.5");
        assert_eq!(fmt_num(-0.001), "0");
        assert_eq!(fmt_num(1.23456), "1.23");
        assert_eq!(fmt_num(100.0), "100");
    }
}
