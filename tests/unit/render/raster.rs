use super::*;
use crate::diagram::normalize::normalize;
use crate::foundation::config::{FamilyProfile, LabelAccent, LayoutConfig};
use crate::foundation::core::{Family, Role};
use crate::layout::composite::compose;

const SAN: &str = include_str!("../../fixtures/kanjivg/04e09.svg");

fn setup() -> (Composite, StrokeSchedule) {
    // kana: labels hidden, so the raster only contains strokes
    let doc = normalize(SAN, Family::Kana, Role::Primary, &LabelAccent::default()).unwrap();
    let c = compose(doc, None, &LayoutConfig::default());
    let s = StrokeSchedule::build(&c, &FamilyProfile::kana());
    (c, s)
}

fn inked(img: &image::RgbaImage) -> usize {
    img.pixels().filter(|p| p.0[3] > 0).count()
}

#[test]
fn ink_grows_as_strokes_are_drawn() {
    let (c, s) = setup();
    let style = StrokeStyle::default();
    let start = render_frame(&c, &s, &style, 0.0, 128).unwrap();
    let mid = render_frame(&c, &s, &style, 0.6, 128).unwrap();
    let end = render_frame(&c, &s, &style, s.total_secs(), 128).unwrap();

    assert_eq!(end.dimensions(), (128, 128));
    assert!(inked(&start) < inked(&mid));
    assert!(inked(&mid) < inked(&end));
    assert!(inked(&end) > 0);
}

#[test]
fn frame_size_is_validated() {
    let (c, s) = setup();
    let style = StrokeStyle::default();
    assert!(matches!(
        render_frame(&c, &s, &style, 0.0, 0),
        Err(KakijunError::Validation(_))
    ));
    assert!(render_frame(&c, &s, &style, 0.0, MAX_FRAME_PX + 1).is_err());
}
