use std::fmt::Write as _;

use kurbo::{ParamCurveArclen, Shape};

use crate::foundation::core::{BezPath, Family, Rect, Role};
use crate::foundation::error::{KakijunError, KakijunResult};

const ARCLEN_ACCURACY: f64 = 1e-3;

/// Viewport of a diagram in its own user units.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ViewBox {
    /// Minimum x.
    pub x: f64,
    /// Minimum y.
    pub y: f64,
    /// Width, always > 0.
    pub width: f64,
    /// Height, always > 0.
    pub height: f64,
}

impl ViewBox {
    /// Square viewBox at the origin.
    pub fn square(size: f64) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: size,
            height: size,
        }
    }

    /// Parse an SVG `viewBox` attribute (`"min-x min-y width height"`).
    pub fn parse(s: &str) -> KakijunResult<Self> {
        let nums = s
            .split(|c: char| c.is_ascii_whitespace() || c == ',')
            .filter(|p| !p.is_empty())
            .map(str::parse::<f64>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| KakijunError::parse(format!("viewBox '{s}': {e}")))?;
        let [x, y, width, height] = nums[..] else {
            return Err(KakijunError::parse(format!(
                "viewBox '{s}': expected 4 numbers"
            )));
        };
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(KakijunError::parse(format!(
                "viewBox '{s}': width/height must be > 0"
            )));
        }
        Ok(Self {
            x,
            y,
            width,
            height,
        })
    }

    /// As a kurbo rectangle.
    pub fn rect(self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    pub(crate) fn attr(self) -> String {
        format!(
            "{} {} {} {}",
            fmt_num(self.x),
            fmt_num(self.y),
            fmt_num(self.width),
            fmt_num(self.height)
        )
    }
}

/// One pen stroke, in writing order.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct StrokePath {
    /// Element id, unique within the document.
    pub id: String,
    /// SVG path data exactly as supplied.
    pub d: String,
    /// Arc length of `d` in document units.
    pub length: f64,
}

impl StrokePath {
    /// Parse `d` and measure its length.
    pub fn new(id: impl Into<String>, d: impl Into<String>) -> KakijunResult<Self> {
        let id = id.into();
        let d = d.into();
        let path = BezPath::from_svg(&d)
            .map_err(|e| KakijunError::parse(format!("stroke '{id}' path data: {e}")))?;
        let length = path_length(&path);
        Ok(Self { id, d, length })
    }

    /// The parsed geometry.
    pub fn bez_path(&self) -> KakijunResult<BezPath> {
        BezPath::from_svg(&self.d)
            .map_err(|e| KakijunError::parse(format!("stroke '{}' path data: {e}", self.id)))
    }

    /// Bounding box of the geometry.
    pub fn bounds(&self) -> KakijunResult<Rect> {
        Ok(self.bez_path()?.bounding_box())
    }
}

/// Total arc length of all segments.
pub fn path_length(path: &BezPath) -> f64 {
    path.segments().map(|s| s.arclen(ARCLEN_ACCURACY)).sum()
}

/// How stroke-number labels are drawn.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub enum LabelStyle {
    /// Not shown (kana).
    Hidden,
    /// Shown with an accent (kanji).
    Accent {
        /// CSS color.
        color: String,
        /// CSS font weight.
        font_weight: String,
        /// CSS text-shadow value.
        shadow: String,
    },
}

impl LabelStyle {
    pub(crate) fn style_attr(&self) -> String {
        match self {
            Self::Hidden => "display:none".to_string(),
            Self::Accent {
                color,
                font_weight,
                shadow,
            } => format!("fill:{color};font-weight:{font_weight};text-shadow:{shadow}"),
        }
    }
}

/// Stroke-number text annotation.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct LabelAnnotation {
    /// Label text, usually the 1-based stroke number.
    pub text: String,
    /// Raw `transform` attribute, if any.
    pub transform: Option<String>,
    /// `x` attribute.
    pub x: Option<f64>,
    /// `y` attribute.
    pub y: Option<f64>,
}

/// A parsed, normalized stroke-order diagram.
///
/// `strokes` is in writing order; no later stage reorders it.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct StrokeDocument {
    /// Family this document was normalized for.
    pub family: Family,
    /// Layout role.
    pub role: Role,
    /// Coordinate system of the strokes.
    pub view_box: ViewBox,
    /// Strokes in writing order.
    pub strokes: Vec<StrokePath>,
    /// Stroke-number annotations.
    pub labels: Vec<LabelAnnotation>,
    /// Label treatment.
    pub label_style: LabelStyle,
    /// True when produced by the placeholder synthesizer.
    pub placeholder: bool,
}

impl StrokeDocument {
    /// Number of strokes.
    pub fn stroke_count(&self) -> usize {
        self.strokes.len()
    }

    /// Same document under a different layout role.
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    /// Serialize back to responsive SVG markup (no width/height, aspect-preserving fit).
    ///
    /// Normalizing the output again yields an equal document.
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        let _ = write!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{}" preserveAspectRatio="xMidYMid meet" data-role="{}" data-family="{}""#,
            self.view_box.attr(),
            self.role.as_str(),
            self.family.as_str(),
        );
        if self.placeholder {
            out.push_str(r#" data-placeholder="true""#);
        }
        out.push_str(">\n<g data-kind=\"strokes\">\n");
        for s in &self.strokes {
            let _ = writeln!(
                out,
                r#"<path id="{}" d="{}"/>"#,
                escape(&s.id),
                escape(&s.d)
            );
        }
        out.push_str("</g>\n");
        if !self.labels.is_empty() {
            let _ = writeln!(
                out,
                r#"<g data-kind="labels" style="{}">"#,
                escape(&self.label_style.style_attr())
            );
            for l in &self.labels {
                out.push_str(&label_markup(l));
                out.push('\n');
            }
            out.push_str("</g>\n");
        }
        out.push_str("</svg>\n");
        out
    }
}

pub(crate) fn label_markup(l: &LabelAnnotation) -> String {
    let mut out = String::from("<text");
    if let Some(t) = &l.transform {
        let _ = write!(out, r#" transform="{}""#, escape(t));
    }
    if let Some(x) = l.x {
        let _ = write!(out, r#" x="{}""#, fmt_num(x));
    }
    if let Some(y) = l.y {
        let _ = write!(out, r#" y="{}""#, fmt_num(y));
    }
    let _ = write!(out, ">{}</text>", escape(&l.text));
    out
}

pub(crate) fn escape(s: &str) -> String {
    quick_xml::escape::escape(s).into_owned()
}

/// Shortest round-tripping decimal form; integers print without a fraction.
pub(crate) fn fmt_num(v: f64) -> String {
    if v == v.trunc() && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}

#[cfg(test)]
#[path = "../../tests/unit/diagram/model.rs"]
mod tests;
