use super::*;
use crate::diagram::model::{LabelStyle, StrokePath};
use crate::foundation::core::{Family, Point};

fn doc(strokes: usize, view: f64) -> StrokeDocument {
    StrokeDocument {
        family: Family::Kana,
        role: Role::Primary,
        view_box: ViewBox::square(view),
        strokes: (0..strokes)
            .map(|i| StrokePath::new(format!("s{i}"), format!("M0,{i} L10,{i}")).unwrap())
            .collect(),
        labels: vec![],
        label_style: LabelStyle::Hidden,
        placeholder: false,
    }
}

#[test]
fn single_document_fills_canvas() {
    let c = compose(doc(3, 109.0), None, &LayoutConfig::default());
    assert!(c.secondary.is_none());
    assert_eq!(c.primary.frame, Rect::new(0.0, 0.0, 109.0, 109.0));
    assert_eq!(c.primary.transform, Affine::IDENTITY);
    assert_eq!(c.primary.opacity, 1.0);
    assert_eq!(c.stroke_count(), 3);
}

#[test]
fn single_document_with_other_view_box_is_centered() {
    let mut d = doc(1, 50.0);
    d.view_box.width = 100.0;
    let c = compose(d, None, &LayoutConfig::default());
    // 100x50 into 109x109: scale 1.09, vertically centered.
    let p = c.primary.transform * Point::new(0.0, 0.0);
    assert!((p.x - 0.0).abs() < 1e-9);
    assert!((p.y - (109.0 - 54.5) / 2.0).abs() < 1e-9);
    let q = c.primary.transform * Point::new(100.0, 50.0);
    assert!((q.x - 109.0).abs() < 1e-9);
}

#[test]
fn compound_places_secondary_bottom_trailing_and_smaller() {
    let cfg = LayoutConfig::default();
    let c = compose(doc(3, 109.0), Some(doc(2, 109.0)), &cfg);
    let sec = c.secondary.as_ref().unwrap();

    let canvas_area = 109.0 * 109.0;
    let primary_share = c.primary.frame.area() / canvas_area;
    let secondary_side = sec.frame.width() / 109.0;
    assert!((0.70..=0.85).contains(&(c.primary.frame.width() / 109.0)));
    assert!((0.40..=0.55).contains(&secondary_side));
    assert!(primary_share > sec.frame.area() / canvas_area);

    assert_eq!(sec.frame.x1, 109.0);
    assert_eq!(sec.frame.y1, 109.0);
    assert!(c.primary.frame.intersect(sec.frame).area() > 0.0);

    assert_eq!(c.primary.document.role, Role::Primary);
    assert_eq!(sec.document.role, Role::Secondary);
}

#[test]
fn layers_keep_paint_and_stroke_order() {
    let c = compose(doc(3, 109.0), Some(doc(2, 109.0)), &LayoutConfig::default());
    let roles: Vec<_> = c.layers().map(|l| l.document.role).collect();
    assert_eq!(roles, vec![Role::Primary, Role::Secondary]);
    let ids: Vec<_> = c
        .layers()
        .flat_map(|l| l.document.strokes.iter().map(|s| s.id.clone()))
        .collect();
    assert_eq!(ids, vec!["s0", "s1", "s2", "s0", "s1"]);
    assert_eq!(c.stroke_count(), 5);
}

#[test]
fn fit_transform_honors_view_box_origin() {
    let vb = ViewBox {
        x: 10.0,
        y: 10.0,
        width: 20.0,
        height: 20.0,
    };
    let t = fit_transform(vb, Rect::new(0.0, 0.0, 40.0, 40.0));
    assert_eq!(t * Point::new(10.0, 10.0), Point::new(0.0, 0.0));
    assert_eq!(t * Point::new(30.0, 30.0), Point::new(40.0, 40.0));
}
