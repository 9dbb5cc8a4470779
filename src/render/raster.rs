use anyhow::Context as _;

use crate::animation::schedule::StrokeSchedule;
use crate::foundation::config::StrokeStyle;
use crate::foundation::error::{KakijunError, KakijunResult};
use crate::layout::composite::Composite;
use crate::render::present::frame_markup;

/// Largest raster side accepted by [`render_frame`].
pub const MAX_FRAME_PX: u32 = 4096;

/// Rasterize the animation at `t` seconds into a `size_px` square straight-alpha RGBA image.
///
/// Labels need system fonts to appear; strokes are always drawn.
pub fn render_frame(
    composite: &Composite,
    schedule: &StrokeSchedule,
    stroke: &StrokeStyle,
    t: f64,
    size_px: u32,
) -> KakijunResult<image::RgbaImage> {
    if size_px == 0 || size_px > MAX_FRAME_PX {
        return Err(KakijunError::validation(format!(
            "frame size must be within 1..={MAX_FRAME_PX}, got {size_px}"
        )));
    }

    let markup = frame_markup(composite, schedule, stroke, t);
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_str(&markup, &opts).context("parse frame svg")?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(size_px, size_px)
        .ok_or_else(|| KakijunError::validation("failed to allocate frame pixmap"))?;
    let sx = size_px as f32 / tree.size().width();
    let sy = size_px as f32 / tree.size().height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);
    resvg::render(&tree, xform, &mut pixmap.as_mut());

    let mut rgba = Vec::with_capacity(pixmap.pixels().len() * 4);
    for px in pixmap.pixels() {
        let c = px.demultiply();
        rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    image::RgbaImage::from_raw(size_px, size_px, rgba)
        .ok_or_else(|| KakijunError::validation("frame buffer size mismatch"))
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
