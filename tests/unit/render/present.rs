use super::*;
use crate::diagram::normalize::normalize;
use crate::foundation::config::{FamilyProfile, LabelAccent, LayoutConfig};
use crate::foundation::core::{Family, Role};
use crate::layout::composite::compose;

const SAN: &str = include_str!("../../fixtures/kanjivg/04e09.svg");
const KI: &str = include_str!("../../fixtures/kanjivg/0304d.svg");
const YA: &str = include_str!("../../fixtures/kanjivg/03083.svg");

fn kanji() -> (Composite, StrokeSchedule) {
    let doc = normalize(SAN, Family::Kanji, Role::Primary, &LabelAccent::default()).unwrap();
    let c = compose(doc, None, &LayoutConfig::default());
    let s = StrokeSchedule::build(&c, &FamilyProfile::kanji());
    (c, s)
}

fn compound_kana() -> (Composite, StrokeSchedule) {
    let accent = LabelAccent::default();
    let p = normalize(KI, Family::Kana, Role::Primary, &accent).unwrap();
    let s = normalize(YA, Family::Kana, Role::Secondary, &accent).unwrap();
    let c = compose(p, Some(s), &LayoutConfig::default());
    let sched = StrokeSchedule::build(&c, &FamilyProfile::kana());
    (c, sched)
}

#[test]
fn animated_markup_carries_per_stroke_delays() {
    let (c, s) = kanji();
    let h = present(&c, &s, &StrokeStyle::default(), 0);
    assert_eq!(h.epoch, 0);
    assert!(h.markup.contains("@keyframes kakijun-draw-0"));
    assert!(h.markup.contains("kakijun-draw-0 1s ease-in-out 0s 1 forwards"));
    assert!(h.markup.contains("kakijun-draw-0 1s ease-in-out 0.3s 1 forwards"));
    assert!(h.markup.contains("kakijun-draw-0 1s ease-in-out 0.6s 1 forwards"));
    assert!(h.markup.contains(r#"stroke-dasharray="60 60" stroke-dashoffset="60""#));
    assert!(!h.markup.contains(" width=\""));
    assert!(!h.markup.contains("infinite"));
}

#[test]
fn kanji_labels_render_with_accent() {
    let (c, s) = kanji();
    let h = present(&c, &s, &StrokeStyle::default(), 0);
    assert!(h.markup.contains(&LabelAccent::default().color));
    assert!(h.markup.contains(">3</text>"));
}

#[test]
fn compound_numbering_continues_into_secondary() {
    let (c, s) = compound_kana();
    let h = present(&c, &s, &StrokeStyle::default(), 2);
    let primary_at = h.markup.find(r#"data-role="primary""#).unwrap();
    let secondary_at = h.markup.find(r#"data-role="secondary""#).unwrap();
    assert!(primary_at < secondary_at);

    // Secondary's first stroke is global index 4 with delay 4 * 0.25.
    let first_secondary = &h.markup[secondary_at..];
    assert!(first_secondary.contains(r#"id="k2-4""#));
    assert!(first_secondary.contains("kakijun-draw-2 0.7s ease-in-out 1s 1 forwards"));
    assert!(!h.markup.contains(r#"id="k2-0" data-stroke="kvg:03083"#));
    // kana labels are not shown
    assert!(!h.markup.contains("<text"));
}

#[test]
fn new_epoch_yields_distinct_nodes() {
    let (c, s) = kanji();
    let a = present(&c, &s, &StrokeStyle::default(), 0);
    let b = present(&c, &s, &StrokeStyle::default(), 1);
    assert_ne!(a, b);
    assert!(b.markup.contains(r#"id="k1-0""#));
    assert!(!b.markup.contains("kakijun-draw-0"));
    assert_eq!(
        a.markup.replace("k0-", "k1-").replace("draw-0", "draw-1").replace(
            r#"data-epoch="0""#,
            r#"data-epoch="1""#
        ),
        b.markup
    );
}

#[test]
fn frozen_frame_uses_sampled_offsets() {
    let (c, s) = kanji();
    let start = frame_markup(&c, &s, &StrokeStyle::default(), 0.0);
    assert!(!start.contains("animation"));
    assert!(start.contains(r#"stroke-dashoffset="60""#));
    assert!(start.contains(r#"width="109" height="109""#));

    let end = frame_markup(&c, &s, &StrokeStyle::default(), s.total_secs());
    assert_eq!(end.matches(r#"stroke-dashoffset="0""#).count(), 3);
}

#[test]
fn already_drawn_strokes_are_not_animated() {
    let doc = normalize(
        r#"<svg viewBox="0 0 10 10"><path id="dot" d="M3,3"/></svg>"#,
        Family::Kana,
        Role::Primary,
        &LabelAccent::default(),
    )
    .unwrap();
    let c = compose(doc, None, &LayoutConfig::default());
    let s = StrokeSchedule::build(&c, &FamilyProfile::kana());
    let h = present(&c, &s, &StrokeStyle::default(), 0);
    assert!(h.markup.contains(r#"<path id="k0-0" data-stroke="dot" d="M3,3"/>"#));
}

#[test]
fn placeholder_layer_is_marked() {
    use crate::diagram::placeholder::synthesize_placeholder;
    use crate::foundation::config::PlaceholderConfig;

    let doc = synthesize_placeholder(
        Some(5),
        Role::Primary,
        &PlaceholderConfig::default(),
        &LabelAccent::default(),
    )
    .unwrap();
    let c = compose(doc, None, &LayoutConfig::default());
    let s = StrokeSchedule::build(&c, &FamilyProfile::kanji());
    let h = present(&c, &s, &StrokeStyle::default(), 0);
    assert!(h.markup.contains(r#"<g data-role="primary" data-placeholder="true""#));

    let (c, s) = kanji();
    let h = present(&c, &s, &StrokeStyle::default(), 0);
    assert!(!h.markup.contains("data-placeholder"));
}
