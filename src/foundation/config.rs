use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::animation::ease::Ease;
use crate::foundation::core::Family;
use crate::foundation::error::{KakijunError, KakijunResult};

/// Public stroke-order diagram repository (KanjiVG layout: `{key}.svg`).
pub const DEFAULT_BASE_URL: &str = "https://raw.githubusercontent.com/KanjiVG/kanjivg/master/kanji/";

/// Engine-wide configuration. Every field has a default, so `{}` is a valid config file.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Base URL joined with `{key}.svg` for HTTP retrieval.
    pub base_url: String,
    /// Timing used for the kana family.
    pub kana: FamilyProfile,
    /// Timing used for the kanji family.
    pub kanji: FamilyProfile,
    /// Composite geometry.
    pub layout: LayoutConfig,
    /// Restyling applied to kanji stroke-number labels.
    pub label: LabelAccent,
    /// Stroke paint used when presenting.
    pub stroke: StrokeStyle,
    /// Placeholder synthesis parameters.
    pub placeholder: PlaceholderConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            kana: FamilyProfile::kana(),
            kanji: FamilyProfile::kanji(),
            layout: LayoutConfig::default(),
            label: LabelAccent::default(),
            stroke: StrokeStyle::default(),
            placeholder: PlaceholderConfig::default(),
        }
    }
}

/// Per-family draw-in timing.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FamilyProfile {
    /// Gap between consecutive stroke start times.
    pub interval_secs: f64,
    /// Time for one stroke to go from undrawn to drawn.
    pub duration_secs: f64,
    /// Timing curve for a single stroke.
    #[serde(default = "default_ease")]
    pub ease: Ease,
}

fn default_ease() -> Ease {
    Ease::EaseInOut
}

impl FamilyProfile {
    /// 0.25s stagger, 0.7s per stroke.
    pub fn kana() -> Self {
        Self {
            interval_secs: 0.25,
            duration_secs: 0.7,
            ease: Ease::EaseInOut,
        }
    }

    /// 0.3s stagger, 1s per stroke.
    pub fn kanji() -> Self {
        Self {
            interval_secs: 0.3,
            duration_secs: 1.0,
            ease: Ease::EaseInOut,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Composite geometry, expressed relative to a square canvas.
pub struct LayoutConfig {
    /// Side of the square viewing area in user units.
    pub canvas_size: f64,
    /// Primary glyph side as a fraction of the canvas, for compounds.
    pub primary_scale: f64,
    /// Secondary glyph side as a fraction of the canvas.
    pub secondary_scale: f64,
    /// Opacity of the secondary glyph.
    pub secondary_opacity: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            canvas_size: 109.0,
            primary_scale: 0.8,
            secondary_scale: 0.45,
            secondary_opacity: 1.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Accent applied to kanji stroke numbers so they stay legible over animated strokes.
pub struct LabelAccent {
    /// CSS color.
    pub color: String,
    /// CSS font weight.
    pub font_weight: String,
    /// CSS text-shadow value.
    pub shadow: String,
}

impl Default for LabelAccent {
    fn default() -> Self {
        Self {
            color: "#d9480f".to_string(),
            font_weight: "bold".to_string(),
            shadow: "0 0 2px rgba(0,0,0,0.35)".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Stroke paint.
pub struct StrokeStyle {
    /// CSS color.
    pub color: String,
    /// Stroke width in document units.
    pub width: f64,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: "#222222".to_string(),
            width: 3.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Placeholder synthesis parameters.
pub struct PlaceholderConfig {
    /// Stroke count used when a kanji request carries no usable hint.
    pub default_stroke_count: u32,
    /// Side of the synthesized square viewBox.
    pub view_size: f64,
    /// Outer radius `R` as a fraction of `view_size`.
    pub radius_ratio: f64,
    /// Largest stroke count accepted from a hint; larger hints fall back to the default.
    pub max_stroke_count: u32,
}

impl Default for PlaceholderConfig {
    fn default() -> Self {
        Self {
            default_stroke_count: 4,
            view_size: 109.0,
            radius_ratio: 0.4,
            max_stroke_count: 64,
        }
    }
}

impl EngineConfig {
    /// Parse a config from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> KakijunResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| KakijunError::serde(format!("parse engine config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse a config from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> KakijunResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            KakijunError::validation(format!("open engine config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Timing profile for `family`.
    pub fn profile(&self, family: Family) -> FamilyProfile {
        match family {
            Family::Kana => self.kana,
            Family::Kanji => self.kanji,
        }
    }

    /// Check value ranges.
    pub fn validate(&self) -> KakijunResult<()> {
        if self.base_url.is_empty() {
            return Err(KakijunError::validation("base_url must not be empty"));
        }
        for (name, p) in [("kana", &self.kana), ("kanji", &self.kanji)] {
            if !(p.interval_secs.is_finite() && p.interval_secs > 0.0) {
                return Err(KakijunError::validation(format!(
                    "{name}.interval_secs must be > 0"
                )));
            }
            if !(p.duration_secs.is_finite() && p.duration_secs > 0.0) {
                return Err(KakijunError::validation(format!(
                    "{name}.duration_secs must be > 0"
                )));
            }
        }

        let l = &self.layout;
        if !(l.canvas_size.is_finite() && l.canvas_size > 0.0) {
            return Err(KakijunError::validation("layout.canvas_size must be > 0"));
        }
        if !(0.70..=0.85).contains(&l.primary_scale) {
            return Err(KakijunError::validation(
                "layout.primary_scale must be within [0.70, 0.85]",
            ));
        }
        if !(0.40..=0.55).contains(&l.secondary_scale) {
            return Err(KakijunError::validation(
                "layout.secondary_scale must be within [0.40, 0.55]",
            ));
        }
        if !(l.secondary_opacity > 0.0 && l.secondary_opacity <= 1.0) {
            return Err(KakijunError::validation(
                "layout.secondary_opacity must be within (0, 1]",
            ));
        }

        let p = &self.placeholder;
        if p.default_stroke_count == 0 {
            return Err(KakijunError::validation(
                "placeholder.default_stroke_count must be > 0",
            ));
        }
        if p.default_stroke_count > p.max_stroke_count {
            return Err(KakijunError::validation(
                "placeholder.default_stroke_count must not exceed max_stroke_count",
            ));
        }
        if !(p.view_size.is_finite() && p.view_size > 0.0) {
            return Err(KakijunError::validation("placeholder.view_size must be > 0"));
        }
        if !(p.radius_ratio > 0.0 && p.radius_ratio <= 0.5) {
            return Err(KakijunError::validation(
                "placeholder.radius_ratio must be within (0, 0.5]",
            ));
        }
        if !(self.stroke.width.is_finite() && self.stroke.width > 0.0) {
            return Err(KakijunError::validation("stroke.width must be > 0"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;
