use std::fmt::Write as _;

use crate::animation::schedule::StrokeSchedule;
use crate::diagram::model::{LabelStyle, escape, fmt_num, label_markup};
use crate::foundation::config::StrokeStyle;
use crate::layout::composite::Composite;

// KanjiVG label size, in document units.
const LABEL_FONT_SIZE: f64 = 8.0;

/// A renderable, self-animating composite.
///
/// Keyframe names and node ids carry `epoch`, so a newer handle never shares animation
/// identity with an older one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderHandle {
    /// Run identity this markup was generated for.
    pub epoch: u64,
    /// Standalone SVG document.
    pub markup: String,
}

enum Mode<'a> {
    Animated { epoch: u64 },
    Frozen { offsets: &'a [f64] },
}

/// Emit the animated SVG for `composite` driven by `schedule`.
pub fn present(
    composite: &Composite,
    schedule: &StrokeSchedule,
    stroke: &StrokeStyle,
    epoch: u64,
) -> RenderHandle {
    RenderHandle {
        epoch,
        markup: write_svg(composite, schedule, stroke, Mode::Animated { epoch }),
    }
}

/// Emit a static SVG of the animation at `t` seconds: no CSS animation, sampled dash offsets.
pub fn frame_markup(
    composite: &Composite,
    schedule: &StrokeSchedule,
    stroke: &StrokeStyle,
    t: f64,
) -> String {
    let offsets = schedule.sample(t);
    write_svg(
        composite,
        schedule,
        stroke,
        Mode::Frozen { offsets: &offsets },
    )
}

fn write_svg(
    composite: &Composite,
    schedule: &StrokeSchedule,
    stroke: &StrokeStyle,
    mode: Mode<'_>,
) -> String {
    let mut out = String::new();
    let vb = composite.canvas;
    let _ = write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{}" preserveAspectRatio="xMidYMid meet""#,
        vb.attr()
    );
    match mode {
        Mode::Animated { epoch } => {
            let _ = writeln!(out, r#" data-epoch="{epoch}">"#);
            let _ = writeln!(
                out,
                "<style>@keyframes kakijun-draw-{epoch} {{ to {{ stroke-dashoffset: 0; }} }}</style>"
            );
        }
        Mode::Frozen { .. } => {
            let _ = writeln!(
                out,
                r#" width="{}" height="{}">"#,
                fmt_num(vb.width),
                fmt_num(vb.height)
            );
        }
    }

    let mut entries = schedule.entries.iter();
    for layer in composite.layers() {
        let doc = &layer.document;
        let [a, b, c, d, e, f] = layer.transform.as_coeffs();
        let _ = writeln!(
            out,
            r#"<g data-role="{}"{} transform="matrix({} {} {} {} {} {})" opacity="{}">"#,
            doc.role.as_str(),
            if doc.placeholder {
                r#" data-placeholder="true""#
            } else {
                ""
            },
            fmt_num(a),
            fmt_num(b),
            fmt_num(c),
            fmt_num(d),
            fmt_num(e),
            fmt_num(f),
            fmt_num(layer.opacity)
        );
        let _ = writeln!(
            out,
            r#"<g fill="none" stroke="{}" stroke-width="{}" stroke-linecap="round" stroke-linejoin="round">"#,
            escape(&stroke.color),
            fmt_num(stroke.width)
        );

        for path in &doc.strokes {
            // Schedule entries are built from the same layers in the same order.
            let Some(timing) = entries.next() else {
                break;
            };
            let mut attrs = String::new();
            if !timing.already_drawn {
                let len = fmt_num(timing.path_length);
                let offset = match &mode {
                    Mode::Animated { .. } => timing.start_offset,
                    Mode::Frozen { offsets } => {
                        offsets.get(timing.index).copied().unwrap_or(0.0)
                    }
                };
                let _ = write!(
                    attrs,
                    r#" stroke-dasharray="{len} {len}" stroke-dashoffset="{}""#,
                    fmt_num(offset)
                );
                if let Mode::Animated { epoch } = &mode {
                    let _ = write!(
                        attrs,
                        r#" style="animation: kakijun-draw-{epoch} {}s {} {}s 1 forwards""#,
                        fmt_secs(timing.duration_secs),
                        schedule.ease.css(),
                        fmt_secs(timing.delay_secs)
                    );
                }
            }
            let id = match &mode {
                Mode::Animated { epoch } => format!("k{epoch}-{}", timing.index),
                Mode::Frozen { .. } => format!("k-{}", timing.index),
            };
            let _ = writeln!(
                out,
                r#"<path id="{id}" data-stroke="{}" d="{}"{attrs}/>"#,
                escape(&path.id),
                escape(&path.d)
            );
        }
        out.push_str("</g>\n");

        if !doc.labels.is_empty() && doc.label_style != LabelStyle::Hidden {
            let _ = writeln!(
                out,
                r#"<g data-kind="labels" font-size="{}" style="{}">"#,
                fmt_num(LABEL_FONT_SIZE),
                escape(&doc.label_style.style_attr())
            );
            for l in &doc.labels {
                out.push_str(&label_markup(l));
                out.push('\n');
            }
            out.push_str("</g>\n");
        }
        out.push_str("</g>\n");
    }
    out.push_str("</svg>\n");
    out
}

// CSS times at microsecond resolution, so `3 * 0.3` prints as `0.9`.
fn fmt_secs(v: f64) -> String {
    fmt_num((v * 1e6).round() / 1e6)
}

#[cfg(test)]
#[path = "../../tests/unit/render/present.rs"]
mod tests;
