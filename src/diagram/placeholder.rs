use std::fmt::Write as _;

use crate::diagram::model::StrokeDocument;
use crate::diagram::normalize::normalize;
use crate::foundation::config::{LabelAccent, PlaceholderConfig};
use crate::foundation::core::{Family, Point, Role, Vec2};
use crate::foundation::error::KakijunResult;

/// Angular offset of each stroke's tail relative to its head.
pub const TAIL_TURN_DEG: f64 = 60.0;
/// Tail distance from the center as a fraction of `R`.
pub const TAIL_RATIO: f64 = 0.6;
// Labels sit slightly outside each stroke's head.
const LABEL_RATIO: f64 = 1.12;

/// Geometry of one synthesized stroke: head on the outer ring, through the center, tail inside.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaceholderStroke {
    /// Head angle in degrees, `i * 360 / n`.
    pub angle_deg: f64,
    /// Point at distance `R` along `angle_deg`.
    pub head: Point,
    /// Center of the diagram.
    pub center: Point,
    /// Point at distance `0.6 R` along `angle_deg + 60`.
    pub tail: Point,
}

/// Stroke count used for a placeholder: the hint when it is within `1..=max_stroke_count`,
/// else the default.
pub fn placeholder_stroke_count(hint: Option<u32>, cfg: &PlaceholderConfig) -> u32 {
    let max = cfg.max_stroke_count.max(1);
    match hint {
        Some(n) if (1..=max).contains(&n) => n,
        Some(n) if n > max => {
            tracing::warn!(hint = n, max, "stroke count hint out of range, using default");
            cfg.default_stroke_count.clamp(1, max)
        }
        _ => cfg.default_stroke_count.clamp(1, max),
    }
}

/// Radial layout of `stroke_count` strokes, capped at `max_stroke_count`. Pure: equal
/// inputs give equal output.
pub fn placeholder_strokes(stroke_count: u32, cfg: &PlaceholderConfig) -> Vec<PlaceholderStroke> {
    let stroke_count = stroke_count.min(cfg.max_stroke_count.max(1));
    let half = cfg.view_size * 0.5;
    let center = Point::new(half, half);
    let radius = cfg.view_size * cfg.radius_ratio;
    let step = 360.0 / f64::from(stroke_count.max(1));

    (0..stroke_count)
        .map(|i| {
            let angle_deg = f64::from(i) * step;
            PlaceholderStroke {
                angle_deg,
                head: center + polar(radius, angle_deg),
                center,
                tail: center + polar(radius * TAIL_RATIO, angle_deg + TAIL_TURN_DEG),
            }
        })
        .collect()
}

fn polar(r: f64, deg: f64) -> Vec2 {
    let rad = deg.to_radians();
    Vec2::new(r * rad.cos(), r * rad.sin())
}

/// SVG markup for a placeholder diagram, with numbered labels.
pub fn placeholder_markup(stroke_count: u32, cfg: &PlaceholderConfig) -> String {
    let size = cfg.view_size;
    let strokes = placeholder_strokes(stroke_count, cfg);
    let radius = size * cfg.radius_ratio;

    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 {size} {size}" data-placeholder="true">"#
    );
    out.push_str("<g>\n");
    for (i, s) in strokes.iter().enumerate() {
        let _ = writeln!(
            out,
            r#"<path id="placeholder-s{}" d="M{:.2},{:.2} L{:.2},{:.2} L{:.2},{:.2}"/>"#,
            i + 1,
            s.head.x,
            s.head.y,
            s.center.x,
            s.center.y,
            s.tail.x,
            s.tail.y
        );
    }
    out.push_str("</g>\n<g>\n");
    for (i, s) in strokes.iter().enumerate() {
        let at = s.center + polar(radius * LABEL_RATIO, s.angle_deg);
        let _ = writeln!(out, r#"<text x="{:.2}" y="{:.2}">{}</text>"#, at.x, at.y, i + 1);
    }
    out.push_str("</g>\n</svg>\n");
    out
}

/// Synthesize and normalize a placeholder document.
///
/// Degraded-mode output: stroke-count accurate, stylistically generic.
pub fn synthesize_placeholder(
    hint: Option<u32>,
    role: Role,
    cfg: &PlaceholderConfig,
    accent: &LabelAccent,
) -> KakijunResult<StrokeDocument> {
    let n = placeholder_stroke_count(hint, cfg);
    normalize(&placeholder_markup(n, cfg), Family::Kanji, role, accent)
}

#[cfg(test)]
#[path = "../../tests/unit/diagram/placeholder.rs"]
mod tests;
