pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// Character family of a request. Selects timing, label treatment and fallback policy.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Family {
    /// Hiragana/katakana, including small-kana digraphs.
    #[default]
    Kana,
    /// Kanji; missing diagrams fall back to a synthesized placeholder.
    Kanji,
}

impl Family {
    /// Lowercase tag as used on the wire and in the CLI.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Kana => "kana",
            Self::Kanji => "kanji",
        }
    }
}

/// Position of a document inside a composite.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The main glyph: full scale, full opacity, painted first.
    Primary,
    /// The attached small glyph of a compound (bottom-trailing, reduced scale).
    Secondary,
}

impl Role {
    /// Lowercase tag written into normalized markup.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
        }
    }

    /// Role of the constituent at `idx` within a request.
    pub fn for_index(idx: usize) -> Self {
        if idx == 0 {
            Self::Primary
        } else {
            Self::Secondary
        }
    }
}

/// One render request supplied by the view.
///
/// Immutable once built; a newer request supersedes it.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CharacterRequest {
    /// Display string, one or more Unicode scalar values.
    pub text: String,
    /// Family tag.
    pub family: Family,
    /// Known stroke count, only consulted for kanji placeholders.
    #[serde(default, rename = "strokeCountHint")]
    pub stroke_count_hint: Option<u32>,
}

impl CharacterRequest {
    /// Kana request for `text`.
    pub fn kana(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            family: Family::Kana,
            stroke_count_hint: None,
        }
    }

    /// Kanji request for `text` with an optional stroke count hint.
    pub fn kanji(text: impl Into<String>, stroke_count_hint: Option<u32>) -> Self {
        Self {
            text: text.into(),
            family: Family::Kanji,
            stroke_count_hint,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
