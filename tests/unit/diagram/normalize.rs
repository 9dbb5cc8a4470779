use super::*;

const JUU: &str = include_str!("../../fixtures/kanjivg/05341.svg");
const SAN: &str = include_str!("../../fixtures/kanjivg/04e09.svg");
const KI: &str = include_str!("../../fixtures/kanjivg/0304d.svg");

fn accent() -> LabelAccent {
    LabelAccent::default()
}

#[test]
fn kanjivg_file_parses_in_stroke_order() {
    let doc = normalize(SAN, Family::Kanji, Role::Primary, &accent()).unwrap();
    let ids: Vec<_> = doc.strokes.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["kvg:04e09-s1", "kvg:04e09-s2", "kvg:04e09-s3"]);
    assert_eq!(doc.view_box, ViewBox::square(109.0));
    assert!((doc.strokes[0].length - 60.0).abs() < 1e-6);
    assert!((doc.strokes[1].length - 48.0).abs() < 1e-6);
    assert!((doc.strokes[2].length - 80.0).abs() < 1e-6);
    assert!(!doc.placeholder);
}

#[test]
fn curved_strokes_have_positive_length() {
    let doc = normalize(JUU, Family::Kanji, Role::Primary, &accent()).unwrap();
    assert_eq!(doc.stroke_count(), 2);
    for s in &doc.strokes {
        assert!(s.length > 50.0, "{} too short: {}", s.id, s.length);
    }
}

#[test]
fn kanji_labels_are_kept_and_restyled() {
    let doc = normalize(JUU, Family::Kanji, Role::Primary, &accent()).unwrap();
    assert_eq!(doc.labels.len(), 2);
    assert_eq!(doc.labels[0].text, "1");
    assert_eq!(
        doc.labels[1].transform.as_deref(),
        Some("matrix(1 0 0 1 44.50 13.50)")
    );
    let LabelStyle::Accent {
        color, font_weight, ..
    } = &doc.label_style
    else {
        panic!("kanji labels must be accented");
    };
    assert_eq!(color, &accent().color);
    assert_eq!(font_weight, "bold");
}

#[test]
fn kana_labels_are_hidden() {
    let doc = normalize(KI, Family::Kana, Role::Secondary, &accent()).unwrap();
    assert_eq!(doc.role, Role::Secondary);
    assert_eq!(doc.stroke_count(), 4);
    assert_eq!(doc.labels.len(), 4);
    assert_eq!(doc.label_style, LabelStyle::Hidden);
    assert!(doc.to_markup().contains("display:none"));
}

#[test]
fn sizing_is_removed_from_markup() {
    let doc = normalize(SAN, Family::Kanji, Role::Primary, &accent()).unwrap();
    let out = doc.to_markup();
    assert!(!out.contains("width=\"109\""));
    assert!(!out.contains("height=\"109\""));
    assert!(out.contains("viewBox=\"0 0 109 109\""));
    assert!(out.contains("preserveAspectRatio=\"xMidYMid meet\""));
    assert!(out.contains("data-role=\"primary\""));
}

#[test]
fn normalization_is_idempotent() {
    for (markup, family) in [(JUU, Family::Kanji), (SAN, Family::Kanji), (KI, Family::Kana)] {
        let once = normalize(markup, family, Role::Primary, &accent()).unwrap();
        let twice = normalize(&once.to_markup(), family, Role::Primary, &accent()).unwrap();
        assert_eq!(once, twice);
        assert_eq!(once.to_markup(), twice.to_markup());
    }
}

#[test]
fn view_box_falls_back_to_size_then_default() {
    let doc = normalize(
        r#"<svg width="200px" height="100"><path d="M0,0 L10,0"/></svg>"#,
        Family::Kana,
        Role::Primary,
        &accent(),
    )
    .unwrap();
    assert_eq!(doc.view_box.width, 200.0);
    assert_eq!(doc.view_box.height, 100.0);

    let doc = normalize(
        r#"<svg><path d="M0,0 L10,0"/></svg>"#,
        Family::Kana,
        Role::Primary,
        &accent(),
    )
    .unwrap();
    assert_eq!(doc.view_box, ViewBox::square(DEFAULT_VIEW_SIZE));
}

#[test]
fn paths_in_defs_are_not_strokes() {
    let doc = normalize(
        r#"<svg viewBox="0 0 10 10"><defs><clipPath id="c"><path d="M0,0 L1,1"/></clipPath></defs><path d="M0,0 L3,4"/></svg>"#,
        Family::Kana,
        Role::Primary,
        &accent(),
    )
    .unwrap();
    assert_eq!(doc.stroke_count(), 1);
    assert_eq!(doc.strokes[0].id, "stroke-1");
    assert!((doc.strokes[0].length - 5.0).abs() < 1e-9);
}

#[test]
fn malformed_markup_is_a_parse_error() {
    for bad in [
        "<svg",
        "not markup at all",
        "<html><body/></html>",
        r#"<svg viewBox="0 0 10"><path d="M0,0 L1,1"/></svg>"#,
        r#"<svg viewBox="0 0 10 10"><path d="M0,0 Lx"/></svg>"#,
        r#"<svg viewBox="0 0 10 10"><g><path d="M0,0 L1,1"/></svg>"#,
    ] {
        let err = normalize(bad, Family::Kanji, Role::Primary, &accent()).unwrap_err();
        assert!(matches!(err, KakijunError::Parse(_)), "{bad}: {err}");
    }
}

#[test]
fn empty_document_has_no_strokes() {
    let doc = normalize(
        r#"<svg viewBox="0 0 10 10"></svg>"#,
        Family::Kanji,
        Role::Primary,
        &accent(),
    )
    .unwrap();
    assert_eq!(doc.stroke_count(), 0);
}
