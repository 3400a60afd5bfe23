//! Fixed-duration float tweens

use std::fmt;

use crate::easing::Easing;

/// One-shot callback fired by the scheduler when a tween reaches its end
pub type CompletionCallback = Box<dyn FnOnce() + Send>;

/// A timed animation from one float to another
///
/// A tween is ticked by the scheduler in milliseconds. A zero-duration tween
/// finishes on the first tick after it is registered.
pub struct Tween {
    from: f32,
    to: f32,
    duration_ms: f32,
    elapsed_ms: f32,
    easing: Easing,
    playing: bool,
    on_complete: Option<CompletionCallback>,
}

impl Tween {
    /// Create a playing tween
    pub fn new(from: f32, to: f32, duration_ms: f32, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration_ms: if duration_ms.is_finite() {
                duration_ms.max(0.0)
            } else {
                0.0
            },
            elapsed_ms: 0.0,
            easing,
            playing: true,
            on_complete: None,
        }
    }

    /// Attach a callback that runs once when the tween finishes
    ///
    /// The callback does not run if the tween is stopped or removed first.
    pub fn on_complete<F>(mut self, callback: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        self.on_complete = Some(Box::new(callback));
        self
    }

    /// Advance by `dt_ms`
    ///
    /// Returns `true` only on the tick where the tween finishes.
    pub fn tick(&mut self, dt_ms: f32) -> bool {
        if !self.playing {
            return false;
        }
        self.elapsed_ms += dt_ms.max(0.0);
        if self.elapsed_ms >= self.duration_ms {
            self.elapsed_ms = self.duration_ms;
            self.playing = false;
            return true;
        }
        false
    }

    /// Linear progress (0.0 to 1.0)
    pub fn progress(&self) -> f32 {
        if self.duration_ms <= 0.0 {
            return if self.playing { 0.0 } else { 1.0 };
        }
        (self.elapsed_ms / self.duration_ms).clamp(0.0, 1.0)
    }

    /// Current eased value
    pub fn value(&self) -> f32 {
        if !self.playing && self.progress() >= 1.0 {
            return self.to;
        }
        let eased = self.easing.apply(self.progress());
        self.from + (self.to - self.from) * eased
    }

    pub fn target(&self) -> f32 {
        self.to
    }

    pub fn duration_ms(&self) -> f32 {
        self.duration_ms
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub(crate) fn take_completion(&mut self) -> Option<CompletionCallback> {
        self.on_complete.take()
    }
}

impl fmt::Debug for Tween {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tween")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("duration_ms", &self.duration_ms)
            .field("elapsed_ms", &self.elapsed_ms)
            .field("easing", &self.easing)
            .field("playing", &self.playing)
            .field("has_completion", &self.on_complete.is_some())
            .finish()
    }
}
