//! Kakijun renders animated stroke-order diagrams for Japanese kana and kanji.
//!
//! A request (text plus script family) flows through a small pipeline:
//!
//! 1. **Resolve**: each scalar of the text maps to a five-digit lowercase hex [`LookupKey`].
//! 2. **Fetch**: every key is retrieved concurrently from a [`DiagramSource`]; failures collapse
//!    to [`FetchOutcome::NotFound`].
//! 3. **Normalize**: raw SVG becomes a [`StrokeDocument`] with ordered strokes and labels.
//!    Kanji without a diagram get a synthesized radial placeholder.
//! 4. **Compose**: one or two documents are placed on a shared canvas ([`Composite`]).
//! 5. **Schedule**: strokes are numbered globally and given staggered draw-in timings
//!    ([`StrokeSchedule`]).
//! 6. **Present**: the composite becomes self-contained animated SVG ([`RenderHandle`]), or a
//!    frozen frame rasterized with resvg.
//!
//! [`StrokeView`] ties the pipeline to one surface: newer requests supersede older ones, and
//! replay restarts the draw-in with fresh node identities.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod diagram;
mod fetch;
mod foundation;
mod layout;
mod render;
mod resolve;
mod view;

pub use animation::ease::Ease;
pub use animation::replay::{AnimationSession, AnimationState, ReplayController};
pub use animation::schedule::{MIN_DRAWABLE_LENGTH, StrokeSchedule, StrokeTiming};
pub use diagram::model::{LabelAnnotation, LabelStyle, StrokeDocument, StrokePath, ViewBox, path_length};
pub use diagram::normalize::{DEFAULT_VIEW_SIZE, normalize};
pub use diagram::placeholder::{
    PlaceholderStroke, TAIL_RATIO, TAIL_TURN_DEG, placeholder_markup, placeholder_stroke_count,
    placeholder_strokes, synthesize_placeholder,
};
pub use fetch::source::{DiagramSource, DirDiagramSource, FetchOutcome, HttpDiagramSource, fetch_all};
pub use foundation::config::{
    DEFAULT_BASE_URL, EngineConfig, FamilyProfile, LabelAccent, LayoutConfig, PlaceholderConfig,
    StrokeStyle,
};
pub use foundation::core::{Affine, BezPath, CharacterRequest, Family, Point, Rect, Role, Vec2};
pub use foundation::error::{KakijunError, KakijunResult};
pub use layout::composite::{Composite, PlacedDiagram, compose, fit_transform};
pub use render::present::{RenderHandle, frame_markup, present};
pub use render::raster::{MAX_FRAME_PX, render_frame};
pub use resolve::codepoint::{LookupKey, resolve_keys};
pub use view::pipeline::{Assembly, assemble, constituent_keys};
pub use view::shell::{RequestToken, Rendered, ShowOutcome, StrokeView, ViewState};
