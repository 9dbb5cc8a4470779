use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::diagram::model::{LabelAnnotation, LabelStyle, StrokeDocument, StrokePath, ViewBox};
use crate::foundation::config::LabelAccent;
use crate::foundation::core::{Family, Role};
use crate::foundation::error::{KakijunError, KakijunResult};

/// Assumed coordinate space when markup carries neither `viewBox` nor `width`/`height`.
pub const DEFAULT_VIEW_SIZE: f64 = 109.0;

// Subtrees whose paths are never strokes.
const NON_RENDERED: &[&[u8]] = &[
    b"defs",
    b"clipPath",
    b"mask",
    b"marker",
    b"pattern",
    b"symbol",
    b"metadata",
];

/// Parse raw diagram markup into a [`StrokeDocument`].
///
/// - explicit sizing is dropped: `width`/`height` only seed the viewBox when it is missing
/// - every `<path>` outside non-rendered containers becomes a stroke, in document order
/// - every `<text>` becomes a label; kana hides them, kanji restyles them with `accent`
///
/// Normalizing a document's own [`StrokeDocument::to_markup`] output is a no-op.
pub fn normalize(
    markup: &str,
    family: Family,
    role: Role,
    accent: &LabelAccent,
) -> KakijunResult<StrokeDocument> {
    let parsed = parse_markup(markup)?;
    let label_style = match family {
        Family::Kana => LabelStyle::Hidden,
        Family::Kanji => LabelStyle::Accent {
            color: accent.color.clone(),
            font_weight: accent.font_weight.clone(),
            shadow: accent.shadow.clone(),
        },
    };
    Ok(StrokeDocument {
        family,
        role,
        view_box: parsed.view_box,
        strokes: parsed.strokes,
        labels: parsed.labels,
        label_style,
        placeholder: parsed.placeholder,
    })
}

struct Parsed {
    view_box: ViewBox,
    strokes: Vec<StrokePath>,
    labels: Vec<LabelAnnotation>,
    placeholder: bool,
}

#[derive(Default)]
struct RootAttrs {
    view_box: Option<String>,
    width: Option<String>,
    height: Option<String>,
    placeholder: bool,
}

fn parse_markup(markup: &str) -> KakijunResult<Parsed> {
    let mut reader = Reader::from_str(markup);
    reader.config_mut().trim_text(true);

    let mut root: Option<RootAttrs> = None;
    let mut strokes = Vec::<StrokePath>::new();
    let mut labels = Vec::<LabelAnnotation>::new();
    let mut open_label: Option<LabelAnnotation> = None;
    let mut depth = 0usize;
    let mut skip_depth = 0usize;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| KakijunError::parse(format!("svg markup: {e}")))?;
        match event {
            Event::Start(e) => {
                depth += 1;
                if skip_depth > 0 {
                    skip_depth += 1;
                    continue;
                }
                if root.is_none() {
                    root = Some(read_root(&e)?);
                    continue;
                }
                let name = e.local_name();
                if NON_RENDERED.contains(&name.as_ref()) {
                    skip_depth = 1;
                    continue;
                }
                match name.as_ref() {
                    b"path" => push_stroke(&e, &mut strokes)?,
                    b"text" => open_label = Some(read_label(&e)?),
                    _ => {}
                }
            }
            Event::Empty(e) => {
                if skip_depth > 0 {
                    continue;
                }
                if root.is_none() {
                    root = Some(read_root(&e)?);
                    continue;
                }
                if e.local_name().as_ref() == b"path" {
                    push_stroke(&e, &mut strokes)?;
                }
            }
            Event::End(e) => {
                depth = depth.saturating_sub(1);
                if skip_depth > 0 {
                    skip_depth -= 1;
                    continue;
                }
                if e.local_name().as_ref() == b"text" {
                    if let Some(label) = open_label.take() {
                        if !label.text.is_empty() {
                            labels.push(label);
                        }
                    }
                }
            }
            Event::Text(t) => {
                if let Some(label) = open_label.as_mut() {
                    let s = t
                        .unescape()
                        .map_err(|e| KakijunError::parse(format!("label text: {e}")))?;
                    label.text.push_str(s.trim());
                }
            }
            Event::CData(t) => {
                if let Some(label) = open_label.as_mut() {
                    let s = std::str::from_utf8(&t)
                        .map_err(|e| KakijunError::parse(format!("label text: {e}")))?;
                    label.text.push_str(s.trim());
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if depth != 0 {
        return Err(KakijunError::parse("svg markup: unclosed element"));
    }
    let root = root.ok_or_else(|| KakijunError::parse("svg markup: no root element"))?;
    let view_box = resolve_view_box(&root)?;

    Ok(Parsed {
        view_box,
        strokes,
        labels,
        placeholder: root.placeholder,
    })
}

fn read_root(e: &BytesStart<'_>) -> KakijunResult<RootAttrs> {
    if e.local_name().as_ref() != b"svg" {
        return Err(KakijunError::parse(format!(
            "svg markup: root element is <{}>",
            String::from_utf8_lossy(e.local_name().as_ref())
        )));
    }
    let mut out = RootAttrs::default();
    for (key, value) in attrs(e)? {
        match key.as_str() {
            "viewBox" => out.view_box = Some(value),
            "width" => out.width = Some(value),
            "height" => out.height = Some(value),
            "data-placeholder" => out.placeholder = value == "true",
            _ => {}
        }
    }
    Ok(out)
}

fn resolve_view_box(root: &RootAttrs) -> KakijunResult<ViewBox> {
    if let Some(vb) = &root.view_box {
        return ViewBox::parse(vb);
    }
    let w = root.width.as_deref().and_then(parse_length);
    let h = root.height.as_deref().and_then(parse_length);
    Ok(match (w, h) {
        (Some(width), Some(height)) if width > 0.0 && height > 0.0 => ViewBox {
            x: 0.0,
            y: 0.0,
            width,
            height,
        },
        _ => ViewBox::square(DEFAULT_VIEW_SIZE),
    })
}

// Absolute lengths only; percentages carry no coordinate information.
fn parse_length(s: &str) -> Option<f64> {
    let s = s.trim();
    let s = s.strip_suffix("px").unwrap_or(s);
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn push_stroke(e: &BytesStart<'_>, strokes: &mut Vec<StrokePath>) -> KakijunResult<()> {
    let mut id = None;
    let mut d = None;
    for (key, value) in attrs(e)? {
        match key.as_str() {
            "id" => id = Some(value),
            "d" => d = Some(value),
            _ => {}
        }
    }
    let Some(d) = d else {
        return Ok(());
    };
    let id = id.unwrap_or_else(|| format!("stroke-{}", strokes.len() + 1));
    strokes.push(StrokePath::new(id, d)?);
    Ok(())
}

fn read_label(e: &BytesStart<'_>) -> KakijunResult<LabelAnnotation> {
    let mut label = LabelAnnotation {
        text: String::new(),
        transform: None,
        x: None,
        y: None,
    };
    for (key, value) in attrs(e)? {
        match key.as_str() {
            "transform" => label.transform = Some(value),
            "x" => label.x = parse_length(&value),
            "y" => label.y = parse_length(&value),
            _ => {}
        }
    }
    Ok(label)
}

// Attributes keyed by qualified name (`kvg:element` stays prefixed, so it never collides).
fn attrs(e: &BytesStart<'_>) -> KakijunResult<Vec<(String, String)>> {
    let mut out = Vec::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|err| KakijunError::parse(format!("svg attribute: {err}")))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|err| KakijunError::parse(format!("svg attribute '{key}': {err}")))?;
        out.push((key, value.into_owned()));
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/diagram/normalize.rs"]
mod tests;
