//! Progress sequencer
//!
//! Owns the markers and bars of one stepper and turns progress updates into
//! chained, segment-by-segment animations.
//!
//! A progress value `p` maps to a fill cursor at `p * (N - 1)` in segment
//! units. Moving the cursor plans a [`ChainCursor`]; the sequencer runs one
//! step at a time and advances from the completion callback of the step's
//! segment animation. While a chain is in flight, further updates land in a
//! single pending slot (last value wins) that is picked up when the chain
//! finishes.
//!
//! State lives behind `Arc<Mutex<_>>` so scheduler callbacks can reach it
//! through a `Weak` reference. Callbacks run after the scheduler releases its
//! own lock, and steps that need no motion are handled by an iterative loop,
//! so driving the chain never re-enters itself.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use stepline_animation::{AnimatedFloat, Easing, SchedulerHandle};
use stepline_core::LabelPosition;

use crate::chain::{settled_fill, settled_status, ChainCursor, ChainStep};
use crate::config::{AnimationTiming, StepperConfig, MIN_MARKERS};
use crate::delegate::StepDescriber;
use crate::layout::{compute_layout, StepperLayout};
use crate::marker::{MarkerStatus, StepMarker};
use crate::render::{MarkerSnapshot, StepRenderer, StepperSnapshot};
use crate::text_measure::TextMeasurer;

/// Fill differences below this are treated as no motion
const FILL_EPSILON: f32 = 1e-4;

fn lock(state: &Mutex<SequencerState>) -> MutexGuard<'_, SequencerState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

fn clamp_progress(progress: f32) -> f32 {
    if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    }
}

struct SequencerState {
    /// Back-reference handed to completion callbacks
    this: Weak<Mutex<SequencerState>>,
    timing: AnimationTiming,
    markers: Vec<StepMarker>,
    segments: Vec<AnimatedFloat>,
    /// Last accepted progress value
    progress: f32,
    /// Cursor position the widget rests at, or is moving to
    fill_position: f32,
    /// Coalesced target waiting for the running chain
    pending: Option<f32>,
    chain: Option<ChainCursor>,
    chains_started: usize,
}

impl SequencerState {
    fn new(
        this: Weak<Mutex<SequencerState>>,
        handle: &SchedulerHandle,
        config: &StepperConfig,
        progress: f32,
    ) -> Self {
        let marker_count = config.marker_count.max(MIN_MARKERS);
        let fill_position = progress * (marker_count - 1) as f32;

        let markers = (0..marker_count)
            .map(|index| {
                StepMarker::new(
                    handle.clone(),
                    index,
                    settled_status(fill_position, index, marker_count),
                    config.marker_border_width,
                    config.timing.marker_transition_ms,
                )
            })
            .collect();
        let segments = (0..marker_count - 1)
            .map(|segment| AnimatedFloat::new(handle.clone(), settled_fill(fill_position, segment)))
            .collect();

        Self {
            this,
            timing: config.timing,
            markers,
            segments,
            progress,
            fill_position,
            pending: None,
            chain: None,
            chains_started: 0,
        }
    }

    fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Plan a chain towards `target` without running it
    fn begin_chain(&mut self, target: f32) -> bool {
        let fills: Vec<f32> = self.segments.iter().map(AnimatedFloat::get).collect();
        let Some(cursor) = ChainCursor::begin(self.fill_position, target, &fills) else {
            return false;
        };

        tracing::debug!(
            "ProgressSequencer: chain {:?} {} -> {}",
            cursor.direction(),
            self.fill_position,
            target
        );
        self.fill_position = target;
        self.chain = Some(cursor);
        self.chains_started += 1;
        true
    }

    /// Run chain steps until one needs to wait for an animation
    fn drive(&mut self) {
        while let Some(cursor) = self.chain.as_mut() {
            match cursor.next_step() {
                Some(step) => {
                    if self.run_step(step) {
                        return;
                    }
                }
                None => {
                    tracing::debug!(
                        "ProgressSequencer: chain finished at {}",
                        self.fill_position
                    );
                    self.chain = None;
                    if let Some(target) = self.pending.take() {
                        self.begin_chain(target);
                    }
                }
            }
        }
    }

    /// Start one step; returns true if a segment animation was scheduled
    fn run_step(&mut self, step: ChainStep) -> bool {
        tracing::debug!(
            "ProgressSequencer: step segment={} fill={} last={}",
            step.segment,
            step.fill,
            step.last
        );
        for &(index, status) in &step.markers {
            if let Some(marker) = self.markers.get_mut(index) {
                marker.set_status(status, true);
            }
        }

        let duration = self.timing.segment_fill_ms;
        let this = self.this.clone();
        let Some(segment) = self.segments.get_mut(step.segment) else {
            return false;
        };
        let distance = (step.fill - segment.get()).abs();
        if distance <= FILL_EPSILON {
            segment.set_immediate(step.fill);
            return false;
        }

        segment.animate_to_then(step.fill, distance * duration, Easing::EaseInOut, move || {
            if let Some(state) = this.upgrade() {
                lock(&state).drive();
            }
        })
    }
}

/// Horizontal multi-step progress indicator
///
/// ```
/// use stepline_animation::AnimationScheduler;
/// use stepline_widgets::{MarkerStatus, ProgressSequencer, StepperConfig};
///
/// let scheduler = AnimationScheduler::new();
/// let stepper = ProgressSequencer::new(scheduler.handle(), StepperConfig::new().marker_count(3));
///
/// stepper.set_progress(1.0);
/// while scheduler.advance(16.0) || stepper.is_animating() {}
///
/// assert_eq!(stepper.segment_fill(1), Some(1.0));
/// assert_eq!(stepper.marker_status(2), Some(MarkerStatus::Complete));
/// ```
pub struct ProgressSequencer {
    config: StepperConfig,
    handle: SchedulerHandle,
    state: Arc<Mutex<SequencerState>>,
    describer: Option<Weak<dyn StepDescriber>>,
    labels: Vec<Option<String>>,
    mounted: bool,
}

impl ProgressSequencer {
    /// Create a stepper at progress 0
    pub fn new(handle: SchedulerHandle, config: StepperConfig) -> Self {
        let config = config.normalized();
        let state = Self::build_state(&handle, &config, 0.0);
        Self {
            config,
            handle,
            state,
            describer: None,
            labels: Vec::new(),
            mounted: false,
        }
    }

    fn build_state(
        handle: &SchedulerHandle,
        config: &StepperConfig,
        progress: f32,
    ) -> Arc<Mutex<SequencerState>> {
        Arc::new_cyclic(|this| {
            Mutex::new(SequencerState::new(this.clone(), handle, config, progress))
        })
    }

    /// Register the label delegate
    ///
    /// Only a weak reference is kept. Labels are requested at mount.
    pub fn set_describer<D>(&mut self, describer: &Arc<D>)
    where
        D: StepDescriber + 'static,
    {
        let weak = Arc::downgrade(describer);
        let weak: Weak<dyn StepDescriber> = weak;
        self.describer = Some(weak);
    }

    /// Change the number of markers; values below 2 clamp to 2
    ///
    /// Only honored before [`mount`](Self::mount). The markers and bars are
    /// rebuilt resting at the current progress, abandoning any chain.
    pub fn set_number_of_markers(&mut self, count: usize) {
        let count = count.max(MIN_MARKERS);
        if self.mounted {
            tracing::warn!(
                "ProgressSequencer: ignoring marker count change to {} after mount (have {})",
                count,
                self.config.marker_count
            );
            return;
        }
        if count == self.config.marker_count {
            return;
        }

        let progress = lock(&self.state).progress;
        self.config.marker_count = count;
        self.state = Self::build_state(&self.handle, &self.config, progress);
        tracing::debug!("ProgressSequencer: rebuilt with {} markers", count);
    }

    /// Freeze the structure and fetch labels from the delegate
    ///
    /// The delegate is asked once per marker. Later calls do nothing.
    pub fn mount(&mut self) {
        if self.mounted {
            return;
        }
        self.mounted = true;

        let describer = self.describer.as_ref().and_then(Weak::upgrade);
        self.labels = (0..self.config.marker_count)
            .map(|index| {
                describer
                    .as_ref()
                    .and_then(|describer| describer.describe_step(index))
            })
            .collect();
        tracing::debug!(
            "ProgressSequencer: mounted {} markers ({} labels)",
            self.config.marker_count,
            self.labels.iter().flatten().count()
        );
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn number_of_markers(&self) -> usize {
        self.config.marker_count
    }

    pub fn config(&self) -> &StepperConfig {
        &self.config
    }

    pub fn label_position(&self) -> LabelPosition {
        self.config.label_position
    }

    /// Labels fetched at mount, one slot per marker
    pub fn labels(&self) -> &[Option<String>] {
        &self.labels
    }

    /// Last accepted progress value
    pub fn progress(&self) -> f32 {
        lock(&self.state).progress
    }

    /// Move to `progress`, clamped to `0..=1`
    ///
    /// While a chain is animating the value is held as the pending target
    /// and replaces any earlier pending value.
    pub fn set_progress(&self, progress: f32) {
        let progress = clamp_progress(progress);
        let mut state = lock(&self.state);
        state.progress = progress;
        let target = progress * state.segment_count() as f32;

        if state.chain.is_some() {
            tracing::debug!("ProgressSequencer: chain busy, pending target {}", target);
            state.pending = Some(target);
            return;
        }
        if state.begin_chain(target) {
            state.drive();
        }
    }

    /// Cursor position the stepper rests at or is moving to
    pub fn fill_position(&self) -> f32 {
        lock(&self.state).fill_position
    }

    /// Check if a chain is in flight
    pub fn is_animating(&self) -> bool {
        lock(&self.state).chain.is_some()
    }

    /// Current fill of bar `segment`
    pub fn segment_fill(&self, segment: usize) -> Option<f32> {
        lock(&self.state).segments.get(segment).map(AnimatedFloat::get)
    }

    pub fn marker_status(&self, index: usize) -> Option<MarkerStatus> {
        lock(&self.state).markers.get(index).map(StepMarker::status)
    }

    /// Number of chains started so far
    pub fn chains_started(&self) -> usize {
        lock(&self.state).chains_started
    }

    /// Capture the current animated state
    pub fn snapshot(&self) -> StepperSnapshot {
        let state = lock(&self.state);
        StepperSnapshot {
            progress: state.progress,
            fill_position: state.fill_position,
            animating: state.chain.is_some(),
            segments: state.segments.iter().map(AnimatedFloat::get).collect(),
            markers: state
                .markers
                .iter()
                .map(|marker| MarkerSnapshot {
                    index: marker.index(),
                    status: marker.status(),
                    visuals: marker.visuals(),
                })
                .collect(),
        }
    }

    /// Lay the stepper out `width` units wide
    pub fn layout(&self, width: f32, measurer: &dyn TextMeasurer) -> StepperLayout {
        compute_layout(&self.config, width, &self.labels, measurer)
    }

    /// Emit the current frame to `renderer`
    pub fn paint<R>(&self, layout: &StepperLayout, renderer: &mut R)
    where
        R: StepRenderer + ?Sized,
    {
        let state = lock(&self.state);
        for (index, (rect, fill)) in layout.segments.iter().zip(&state.segments).enumerate() {
            renderer.draw_segment(index, *rect, fill.get(), &self.config);
        }
        for (rect, marker) in layout.markers.iter().zip(&state.markers) {
            renderer.draw_marker(marker.index(), *rect, &marker.visuals(), &self.config);
        }
        for label in &layout.labels {
            renderer.draw_label(label, &self.config);
        }
    }
}
