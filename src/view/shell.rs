use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::animation::replay::{AnimationSession, AnimationState, ReplayController};
use crate::animation::schedule::StrokeSchedule;
use crate::fetch::source::{DiagramSource, fetch_all};
use crate::foundation::config::EngineConfig;
use crate::foundation::core::CharacterRequest;
use crate::layout::composite::Composite;
use crate::render::present::{RenderHandle, present};
use crate::resolve::codepoint::LookupKey;
use crate::view::pipeline::{Assembly, assemble, constituent_keys};

/// Identity of one request. Only the newest token may mutate the view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    /// Generation number, strictly increasing per view.
    pub fn generation(self) -> u64 {
        self.0
    }
}

/// Everything derived from a request that rendered.
#[derive(Clone, Debug)]
pub struct Rendered {
    /// The request this was built for.
    pub request: CharacterRequest,
    /// Placed documents.
    pub composite: Composite,
    /// Global stroke schedule.
    pub schedule: Arc<StrokeSchedule>,
    /// Current animation run.
    pub session: AnimationSession,
    /// Markup for the current run.
    pub handle: RenderHandle,
}

/// What the view currently shows.
#[derive(Clone, Debug, Default)]
pub enum ViewState {
    /// Nothing (initial, unmounted, or empty request).
    #[default]
    Empty,
    /// A request is in flight; previous content has been cleared.
    Loading {
        /// Generation of the in-flight request.
        generation: u64,
    },
    /// An animating composite.
    Ready(Box<Rendered>),
    /// No diagram could be shown (kana only); no animation is scheduled.
    Unavailable {
        /// Requested text.
        text: String,
        /// Keys without a usable diagram.
        missing: Vec<LookupKey>,
    },
}

/// Result of [`StrokeView::show`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShowOutcome {
    /// The composite is on screen and animating.
    Rendered,
    /// The diagram-unavailable state is on screen.
    Unavailable,
    /// The request had no characters; the view is empty.
    Empty,
    /// A newer request or an unmount arrived first; this result was discarded.
    Superseded,
}

struct Inner {
    state: ViewState,
    replay: ReplayController,
}

/// One rendering surface and the lifecycle of the requests shown on it.
///
/// Requests are sequential from the caller's point of view: starting a new one clears the
/// surface and makes every older one stale, whatever order their fetches settle in.
pub struct StrokeView<S> {
    source: S,
    config: EngineConfig,
    generation: AtomicU64,
    inner: Mutex<Inner>,
}

impl<S> std::fmt::Debug for StrokeView<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StrokeView")
            .field("generation", &self.generation.load(Ordering::Acquire))
            .finish_non_exhaustive()
    }
}

impl<S: DiagramSource> StrokeView<S> {
    /// Empty view over `source`.
    pub fn new(source: S, config: EngineConfig) -> Self {
        Self {
            source,
            config,
            generation: AtomicU64::new(0),
            inner: Mutex::new(Inner {
                state: ViewState::Empty,
                replay: ReplayController::new(),
            }),
        }
    }

    /// Engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Generation of the newest request (0 before the first).
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> ViewState {
        self.lock().state.clone()
    }

    /// Markup currently on screen, if any.
    pub fn handle(&self) -> Option<RenderHandle> {
        match &self.lock().state {
            ViewState::Ready(r) => Some(r.handle.clone()),
            _ => None,
        }
    }

    /// Fetch, build and paint `request`, superseding whatever came before.
    ///
    /// Never fails: missing data degrades to a placeholder or the unavailable state, and a
    /// result that went stale while fetching is dropped without touching the view.
    #[tracing::instrument(skip(self, request), fields(text = %request.text, family = request.family.as_str()))]
    pub async fn show(&self, request: CharacterRequest) -> ShowOutcome {
        let token = self.begin();
        let keys = constituent_keys(&request.text);
        if keys.is_empty() {
            return self.commit(token, ViewState::Empty, ShowOutcome::Empty);
        }

        let outcomes = fetch_all(&self.source, &keys).await;
        if !self.is_current(token) {
            tracing::debug!(generation = token.0, "discarding stale fetch result");
            return ShowOutcome::Superseded;
        }

        match assemble(&request, &keys, outcomes, &self.config) {
            Assembly::Empty => self.commit(token, ViewState::Empty, ShowOutcome::Empty),
            Assembly::Unavailable { missing } => {
                tracing::info!(?missing, "diagram unavailable");
                let state = ViewState::Unavailable {
                    text: request.text.clone(),
                    missing,
                };
                self.commit(token, state, ShowOutcome::Unavailable)
            }
            Assembly::Ready(composite) => self.paint(token, request, composite),
        }
    }

    /// Restart the draw-in from scratch. Returns the new markup, or `None` when nothing is
    /// shown.
    ///
    /// The previous run is discarded even if it has not finished.
    pub fn replay(&self) -> Option<RenderHandle> {
        let mut guard = self.lock();
        let Inner { state, replay } = &mut *guard;
        let ViewState::Ready(rendered) = state else {
            return None;
        };
        let previous = rendered.session.clone();
        rendered.session = replay.replay(previous);
        rendered.handle = present(
            &rendered.composite,
            &rendered.schedule,
            &self.config.stroke,
            rendered.session.epoch(),
        );
        Some(rendered.handle.clone())
    }

    /// Advance the current run to `elapsed` seconds after it started.
    pub fn tick(&self, elapsed: f64) -> Option<Vec<AnimationState>> {
        let mut guard = self.lock();
        let ViewState::Ready(rendered) = &mut guard.state else {
            return None;
        };
        rendered.session.tick(elapsed);
        Some(rendered.session.states().to_vec())
    }

    /// Tear the view down: any in-flight request becomes stale and the surface is cleared.
    pub fn unmount(&self) {
        let mut guard = self.lock();
        self.generation.fetch_add(1, Ordering::AcqRel);
        guard.state = ViewState::Empty;
    }

    fn begin(&self) -> RequestToken {
        let mut guard = self.lock();
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        guard.state = ViewState::Loading { generation };
        RequestToken(generation)
    }

    fn is_current(&self, token: RequestToken) -> bool {
        self.generation.load(Ordering::Acquire) == token.0
    }

    fn commit(&self, token: RequestToken, state: ViewState, outcome: ShowOutcome) -> ShowOutcome {
        let mut guard = self.lock();
        if !self.is_current(token) {
            return ShowOutcome::Superseded;
        }
        guard.state = state;
        outcome
    }

    fn paint(
        &self,
        token: RequestToken,
        request: CharacterRequest,
        composite: Composite,
    ) -> ShowOutcome {
        let profile = self.config.profile(request.family);
        let schedule = Arc::new(StrokeSchedule::build(&composite, &profile));

        let mut guard = self.lock();
        if !self.is_current(token) {
            return ShowOutcome::Superseded;
        }
        let session = guard.replay.start(Arc::clone(&schedule));
        let handle = present(&composite, &schedule, &self.config.stroke, session.epoch());
        guard.state = ViewState::Ready(Box::new(Rendered {
            request,
            composite,
            schedule,
            session,
            handle,
        }));
        ShowOutcome::Rendered
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/view/shell.rs"]
mod tests;
