//! Step marker with animated status transitions
//!
//! A marker is a ring with an inner dot and a checkmark. Each status maps to
//! a resting [`MarkerVisuals`]; changing status blends from whatever is on
//! screen to the new resting visuals over a fixed ease-out transition.
//!
//! Marker transitions are fire-and-forget: nothing is reported back when one
//! finishes.

use serde::Serialize;
use stepline_animation::{AnimatedFloat, Easing, Interpolate, SchedulerHandle};
use stepline_core::Color;

/// Ring scale while a step is complete
pub const COMPLETE_SCALE: f32 = 1.05;

/// Status that a marker can take
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerStatus {
    /// No marking
    #[default]
    Pending,
    /// Current position: the inner dot is shown
    Waiting,
    /// Filled ring with a checkmark
    Complete,
}

/// Renderable state of a marker's sub-elements
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct MarkerVisuals {
    /// How much of the tint color fills the ring (0 = clear, 1 = tinted)
    pub ring_fill: f32,
    /// Ring border width
    pub border_width: f32,
    pub dot_opacity: f32,
    /// Whether the inner dot is drawn at all
    pub dot_visible: bool,
    pub check_opacity: f32,
    /// Ring scale factor
    pub scale: f32,
}

impl MarkerVisuals {
    /// Resting visuals for `status`
    pub fn resting(status: MarkerStatus, border_width: f32) -> Self {
        match status {
            MarkerStatus::Pending => Self {
                ring_fill: 0.0,
                border_width,
                dot_opacity: 0.0,
                dot_visible: false,
                check_opacity: 0.0,
                scale: 1.0,
            },
            MarkerStatus::Waiting => Self {
                ring_fill: 0.0,
                border_width,
                dot_opacity: 1.0,
                dot_visible: true,
                check_opacity: 0.0,
                scale: 1.0,
            },
            // The dot sits under the filled ring once the check is in place
            MarkerStatus::Complete => Self {
                ring_fill: 1.0,
                border_width: 0.0,
                dot_opacity: 1.0,
                dot_visible: true,
                check_opacity: 1.0,
                scale: COMPLETE_SCALE,
            },
        }
    }

    /// Ring background for the given tint
    pub fn ring_background(&self, tint: Color) -> Color {
        Color::lerp(&Color::TRANSPARENT, &tint, self.ring_fill)
    }
}

impl Interpolate for MarkerVisuals {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            ring_fill: self.ring_fill.lerp(&other.ring_fill, t),
            border_width: self.border_width.lerp(&other.border_width, t),
            dot_opacity: self.dot_opacity.lerp(&other.dot_opacity, t),
            // Visibility flips only once the transition has finished
            dot_visible: if t >= 1.0 {
                other.dot_visible
            } else {
                self.dot_visible
            },
            check_opacity: self.check_opacity.lerp(&other.check_opacity, t),
            scale: self.scale.lerp(&other.scale, t),
        }
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.dot_visible == other.dot_visible
            && self.ring_fill.approx_eq(&other.ring_fill, epsilon)
            && self.border_width.approx_eq(&other.border_width, epsilon)
            && self.dot_opacity.approx_eq(&other.dot_opacity, epsilon)
            && self.check_opacity.approx_eq(&other.check_opacity, epsilon)
            && self.scale.approx_eq(&other.scale, epsilon)
    }
}

/// One circular step indicator
pub struct StepMarker {
    index: usize,
    status: MarkerStatus,
    border_width: f32,
    transition_ms: f32,
    from: MarkerVisuals,
    to: MarkerVisuals,
    /// Eased transition progress from `from` to `to`
    transition: AnimatedFloat,
}

impl StepMarker {
    /// Create a marker resting at `status`
    pub fn new(
        handle: SchedulerHandle,
        index: usize,
        status: MarkerStatus,
        border_width: f32,
        transition_ms: f32,
    ) -> Self {
        let resting = MarkerVisuals::resting(status, border_width);
        Self {
            index,
            status,
            border_width,
            transition_ms,
            from: resting,
            to: resting,
            transition: AnimatedFloat::new(handle, 1.0),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn status(&self) -> MarkerStatus {
        self.status
    }

    /// Transition to `status`
    ///
    /// Re-applying the current status replays a harmless transition to the
    /// same resting visuals. With `animated == false` the marker snaps.
    pub fn set_status(&mut self, status: MarkerStatus, animated: bool) {
        tracing::debug!(
            "StepMarker {}: {:?} -> {:?} (animated={})",
            self.index,
            self.status,
            status,
            animated
        );
        let mut from = self.visuals();
        self.status = status;
        self.to = MarkerVisuals::resting(status, self.border_width);

        if !animated {
            self.from = self.to;
            self.transition.set_immediate(1.0);
            return;
        }

        if status == MarkerStatus::Waiting && !from.dot_visible {
            // Reveal the dot transparent so it can fade in
            from.dot_opacity = 0.0;
            from.dot_visible = true;
        }
        self.from = from;
        self.transition.set_immediate(0.0);
        self.transition
            .animate_to(1.0, self.transition_ms, Easing::EaseOut);
    }

    /// Current (possibly mid-transition) visuals
    pub fn visuals(&self) -> MarkerVisuals {
        self.from.lerp(&self.to, self.transition.get())
    }

    /// Check if a status transition is still playing
    pub fn is_animating(&self) -> bool {
        self.transition.is_animating()
    }
}
