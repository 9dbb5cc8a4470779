use crate::diagram::model::{StrokeDocument, ViewBox};
use crate::foundation::config::LayoutConfig;
use crate::foundation::core::{Affine, Rect, Role, Vec2};

/// A document positioned inside the composite canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedDiagram {
    /// The normalized document, stroke order untouched.
    pub document: StrokeDocument,
    /// Target area in canvas units.
    pub frame: Rect,
    /// Maps document coordinates into `frame` (uniform scale, centered).
    pub transform: Affine,
    /// Layer opacity.
    pub opacity: f64,
}

/// One or two placed documents sharing a square canvas.
///
/// Paint order is primary first, then secondary.
#[derive(Clone, Debug, PartialEq)]
pub struct Composite {
    /// Canvas coordinate system.
    pub canvas: ViewBox,
    /// Main glyph.
    pub primary: PlacedDiagram,
    /// Attached small glyph of a compound, if any.
    pub secondary: Option<PlacedDiagram>,
}

impl Composite {
    /// Layers in paint order.
    pub fn layers(&self) -> impl Iterator<Item = &PlacedDiagram> {
        std::iter::once(&self.primary).chain(self.secondary.as_ref())
    }

    /// Total strokes across all layers.
    pub fn stroke_count(&self) -> usize {
        self.layers().map(|l| l.document.stroke_count()).sum()
    }
}

/// Arrange documents on the canvas.
///
/// A lone document fills the canvas. With a secondary, the primary shrinks to
/// `primary_scale` anchored top-leading and the secondary takes `secondary_scale` anchored
/// bottom-trailing, overlapping the primary's lower-right area.
pub fn compose(
    primary: StrokeDocument,
    secondary: Option<StrokeDocument>,
    cfg: &LayoutConfig,
) -> Composite {
    let size = cfg.canvas_size;
    let canvas = ViewBox::square(size);
    let primary = primary.with_role(Role::Primary);

    let Some(secondary) = secondary else {
        let frame = canvas.rect();
        return Composite {
            canvas,
            primary: place(primary, frame, 1.0),
            secondary: None,
        };
    };

    let p = size * cfg.primary_scale;
    let s = size * cfg.secondary_scale;
    let primary_frame = Rect::new(0.0, 0.0, p, p);
    let secondary_frame = Rect::new(size - s, size - s, size, size);

    Composite {
        canvas,
        primary: place(primary, primary_frame, 1.0),
        secondary: Some(place(
            secondary.with_role(Role::Secondary),
            secondary_frame,
            cfg.secondary_opacity,
        )),
    }
}

fn place(document: StrokeDocument, frame: Rect, opacity: f64) -> PlacedDiagram {
    let transform = fit_transform(document.view_box, frame);
    PlacedDiagram {
        document,
        frame,
        transform,
        opacity,
    }
}

/// `xMidYMid meet`: uniform scale to fit, centered on both axes.
pub fn fit_transform(view_box: ViewBox, frame: Rect) -> Affine {
    let scale = (frame.width() / view_box.width).min(frame.height() / view_box.height);
    let content_w = view_box.width * scale;
    let content_h = view_box.height * scale;
    let dx = frame.x0 + (frame.width() - content_w) * 0.5;
    let dy = frame.y0 + (frame.height() - content_h) * 0.5;
    Affine::translate(Vec2::new(dx, dy))
        * Affine::scale(scale)
        * Affine::translate(Vec2::new(-view_box.x, -view_box.y))
}

#[cfg(test)]
#[path = "../../tests/unit/layout/composite.rs"]
mod tests;
