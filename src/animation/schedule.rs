use crate::animation::ease::Ease;
use crate::foundation::config::FamilyProfile;
use crate::foundation::core::Role;
use crate::layout::composite::Composite;

/// Strokes shorter than this are treated as already drawn.
pub const MIN_DRAWABLE_LENGTH: f64 = 1e-6;

/// Draw-in timing for one stroke of the global sequence.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct StrokeTiming {
    /// Position in the global stroke sequence (primary strokes first).
    pub index: usize,
    /// Position inside the owning document.
    pub local_index: usize,
    /// Owning layer.
    pub role: Role,
    /// Element id of the stroke.
    pub stroke_id: String,
    /// Measured length in document units.
    pub path_length: f64,
    /// `index * interval`.
    pub delay_secs: f64,
    /// Time from undrawn to drawn.
    pub duration_secs: f64,
    /// Dash offset before the stroke starts (`path_length`, or 0 when already drawn).
    pub start_offset: f64,
    /// Dash offset once drawn.
    pub end_offset: f64,
    /// Zero-length stroke: never animates.
    pub already_drawn: bool,
}

impl StrokeTiming {
    /// Dash offset at time `t` (seconds since the run started). Holds the end state.
    pub fn offset_at(&self, t: f64, ease: Ease) -> f64 {
        if self.already_drawn {
            return self.end_offset;
        }
        let local = (t - self.delay_secs) / self.duration_secs;
        let p = ease.apply(local);
        self.start_offset + (self.end_offset - self.start_offset) * p
    }

    /// Fraction of the stroke visible at `t`, in `[0, 1]`.
    pub fn progress_at(&self, t: f64, ease: Ease) -> f64 {
        if self.already_drawn {
            return 1.0;
        }
        1.0 - self.offset_at(t, ease) / self.start_offset
    }
}

/// Flat, cross-document draw-in schedule for a composite.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct StrokeSchedule {
    /// One entry per stroke, in global order.
    pub entries: Vec<StrokeTiming>,
    /// Stagger between consecutive strokes.
    pub interval_secs: f64,
    /// Per-stroke draw duration.
    pub duration_secs: f64,
    /// Per-stroke timing curve.
    pub ease: Ease,
}

impl StrokeSchedule {
    /// Flatten primary then secondary strokes and assign `i * interval` start delays.
    ///
    /// Numbering never restarts at the secondary document.
    #[tracing::instrument(skip_all, fields(strokes = composite.stroke_count()))]
    pub fn build(composite: &Composite, profile: &FamilyProfile) -> Self {
        let mut entries = Vec::with_capacity(composite.stroke_count());
        for layer in composite.layers() {
            for (local_index, stroke) in layer.document.strokes.iter().enumerate() {
                let index = entries.len();
                let already_drawn = stroke.length < MIN_DRAWABLE_LENGTH;
                entries.push(StrokeTiming {
                    index,
                    local_index,
                    role: layer.document.role,
                    stroke_id: stroke.id.clone(),
                    path_length: stroke.length,
                    delay_secs: index as f64 * profile.interval_secs,
                    duration_secs: profile.duration_secs,
                    start_offset: if already_drawn { 0.0 } else { stroke.length },
                    end_offset: 0.0,
                    already_drawn,
                });
            }
        }
        Self {
            entries,
            interval_secs: profile.interval_secs,
            duration_secs: profile.duration_secs,
            ease: profile.ease,
        }
    }

    /// Number of scheduled strokes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when there is nothing to animate.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Time at which the last stroke finishes; 0 for an empty schedule.
    pub fn total_secs(&self) -> f64 {
        self.entries
            .iter()
            .map(|e| e.delay_secs + e.duration_secs)
            .fold(0.0, f64::max)
    }

    /// Dash offsets of every stroke at `t`, in global order.
    pub fn sample(&self, t: f64) -> Vec<f64> {
        self.entries
            .iter()
            .map(|e| e.offset_at(t, self.ease))
            .collect()
    }

    /// True once every stroke holds its drawn state.
    pub fn is_complete(&self, t: f64) -> bool {
        t >= self.total_secs()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/schedule.rs"]
mod tests;
