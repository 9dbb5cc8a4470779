use crate::diagram::model::StrokeDocument;
use crate::diagram::normalize::normalize;
use crate::diagram::placeholder::synthesize_placeholder;
use crate::fetch::source::FetchOutcome;
use crate::foundation::config::EngineConfig;
use crate::foundation::core::{CharacterRequest, Family, Role};
use crate::layout::composite::{Composite, compose};
use crate::resolve::codepoint::{LookupKey, resolve_keys};

/// What a request's fetched diagrams add up to.
#[derive(Clone, Debug, PartialEq)]
pub enum Assembly {
    /// Nothing to draw (empty text).
    Empty,
    /// A kana diagram is missing; nothing is animated.
    Unavailable {
        /// Keys with no usable diagram.
        missing: Vec<LookupKey>,
    },
    /// Ready to schedule.
    Ready(Composite),
}

/// Keys that take part in the composite: both for a two-scalar compound, else the first.
pub fn constituent_keys(text: &str) -> Vec<LookupKey> {
    let mut keys = resolve_keys(text);
    if keys.len() > 2 {
        tracing::warn!(
            text,
            constituents = keys.len(),
            "only the first constituent is drawn"
        );
        keys.truncate(1);
    }
    keys
}

/// Turn fetch outcomes (one per key, same order) into a composite.
///
/// Markup that fails to parse counts as not found. Missing kanji diagrams are replaced by a
/// placeholder; a missing kana diagram makes the whole request unavailable.
pub fn assemble(
    request: &CharacterRequest,
    keys: &[LookupKey],
    outcomes: Vec<FetchOutcome>,
    cfg: &EngineConfig,
) -> Assembly {
    if keys.is_empty() {
        return Assembly::Empty;
    }

    let mut docs = Vec::<StrokeDocument>::with_capacity(keys.len());
    let mut missing = Vec::new();
    for (idx, (key, outcome)) in keys.iter().zip(outcomes).enumerate() {
        let role = Role::for_index(idx);
        match resolve_document(request, key, outcome, role, cfg) {
            Some(doc) => docs.push(doc),
            None => missing.push(key.clone()),
        }
    }
    // keys left without an outcome
    let seen = docs.len() + missing.len();
    missing.extend(keys.iter().skip(seen).cloned());
    if !missing.is_empty() {
        return Assembly::Unavailable { missing };
    }

    let mut docs = docs.into_iter();
    let Some(primary) = docs.next() else {
        return Assembly::Empty;
    };
    Assembly::Ready(compose(primary, docs.next(), &cfg.layout))
}

fn resolve_document(
    request: &CharacterRequest,
    key: &LookupKey,
    outcome: FetchOutcome,
    role: Role,
    cfg: &EngineConfig,
) -> Option<StrokeDocument> {
    let parsed = match outcome {
        FetchOutcome::Found(markup) => {
            match normalize(&markup, request.family, role, &cfg.label) {
                Ok(doc) => Some(doc),
                Err(err) => {
                    tracing::debug!(%key, error = %err, "unparsable diagram treated as missing");
                    None
                }
            }
        }
        FetchOutcome::NotFound => None,
    };
    if parsed.is_some() {
        return parsed;
    }

    match request.family {
        Family::Kana => None,
        Family::Kanji => {
            tracing::warn!(
                %key,
                hint = ?request.stroke_count_hint,
                "no diagram, synthesizing placeholder"
            );
            synthesize_placeholder(request.stroke_count_hint, role, &cfg.placeholder, &cfg.label)
                .map_err(|err| tracing::warn!(%key, error = %err, "placeholder synthesis failed"))
                .ok()
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/view/pipeline.rs"]
mod tests;
