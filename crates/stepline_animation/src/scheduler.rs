//! Animation scheduler
//!
//! Owns every active tween and advances them once per frame. Tweens are
//! registered implicitly through [`AnimatedFloat`], which holds a weak
//! [`SchedulerHandle`] and removes its tween when dropped.
//!
//! The host drives the scheduler from its frame loop with [`AnimationScheduler::tick`]
//! (wall clock) or [`AnimationScheduler::advance`] (fixed delta). Completion
//! callbacks run after the scheduler lock is released, so a callback may
//! register the next tween in a chain.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Instant;

use slotmap::{new_key_type, SlotMap};

use crate::easing::Easing;
use crate::tween::{CompletionCallback, Tween};

new_key_type! {
    /// Handle to a registered tween
    pub struct TweenId;
}

/// Internal state of the animation scheduler
struct SchedulerInner {
    tweens: SlotMap<TweenId, Tween>,
    last_frame: Instant,
}

fn lock(inner: &Mutex<SchedulerInner>) -> MutexGuard<'_, SchedulerInner> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

/// The scheduler that ticks all registered tweens
///
/// Typically owned by the host's frame loop and shared with widgets via
/// [`SchedulerHandle`].
///
/// ```
/// use stepline_animation::{AnimatedFloat, AnimationScheduler, Easing};
///
/// let scheduler = AnimationScheduler::new();
/// let mut fill = AnimatedFloat::new(scheduler.handle(), 0.0);
/// fill.animate_to(1.0, 800.0, Easing::Linear);
///
/// scheduler.advance(400.0);
/// assert_eq!(fill.get(), 0.5);
/// ```
pub struct AnimationScheduler {
    inner: Arc<Mutex<SchedulerInner>>,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(SchedulerInner {
                tweens: SlotMap::with_key(),
                last_frame: Instant::now(),
            })),
        }
    }

    /// Get a handle to this scheduler for passing to components
    pub fn handle(&self) -> SchedulerHandle {
        SchedulerHandle {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Tick all tweens by the wall-clock time since the previous tick
    ///
    /// Returns true if any tween is still playing.
    pub fn tick(&self) -> bool {
        let dt_ms = {
            let mut inner = lock(&self.inner);
            let now = Instant::now();
            let dt = (now - inner.last_frame).as_secs_f32() * 1000.0;
            inner.last_frame = now;
            dt
        };
        self.step(dt_ms)
    }

    /// Tick all tweens by a fixed `dt_ms`
    ///
    /// Returns true if any tween is still playing, including tweens
    /// registered by completion callbacks during this call.
    pub fn advance(&self, dt_ms: f32) -> bool {
        lock(&self.inner).last_frame = Instant::now();
        self.step(dt_ms)
    }

    fn step(&self, dt_ms: f32) -> bool {
        let completed: Vec<(TweenId, CompletionCallback)> = {
            let mut inner = lock(&self.inner);
            let mut completed = Vec::new();
            for (id, tween) in inner.tweens.iter_mut() {
                if tween.tick(dt_ms) {
                    if let Some(callback) = tween.take_completion() {
                        completed.push((id, callback));
                    }
                }
            }
            completed
        };

        // NOTE: finished tweens stay registered until their owner drops them,
        // so their final value remains readable.
        for (id, callback) in completed {
            tracing::trace!(?id, "tween completed");
            callback();
        }

        self.has_active_animations()
    }

    /// Check if any tweens are still playing
    pub fn has_active_animations(&self) -> bool {
        lock(&self.inner).tweens.values().any(Tween::is_playing)
    }

    /// Get the number of registered tweens (playing or finished)
    pub fn tween_count(&self) -> usize {
        lock(&self.inner).tweens.len()
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new()
    }
}

/// A weak handle to the animation scheduler
///
/// This is passed to components that need to register animations.
/// It won't prevent the scheduler from being dropped; every operation on a
/// dropped scheduler is a no-op.
#[derive(Clone)]
pub struct SchedulerHandle {
    inner: Weak<Mutex<SchedulerInner>>,
}

impl SchedulerHandle {
    /// Register a tween and return its ID
    pub fn register_tween(&self, tween: Tween) -> Option<TweenId> {
        self.inner.upgrade().map(|inner| {
            let mut guard = lock(&inner);
            // Reset last_frame so the first wall-clock tick doesn't jump
            guard.last_frame = Instant::now();
            guard.tweens.insert(tween)
        })
    }

    /// Get current tween value
    pub fn tween_value(&self, id: TweenId) -> Option<f32> {
        self.inner
            .upgrade()
            .and_then(|inner| lock(&inner).tweens.get(id).map(Tween::value))
    }

    /// Check if a tween is playing
    pub fn is_tween_playing(&self, id: TweenId) -> bool {
        self.inner
            .upgrade()
            .and_then(|inner| lock(&inner).tweens.get(id).map(Tween::is_playing))
            .unwrap_or(false)
    }

    /// Remove a tween
    pub fn remove_tween(&self, id: TweenId) {
        if let Some(inner) = self.inner.upgrade() {
            lock(&inner).tweens.remove(id);
        }
    }
}

// ============================================================================
// Animated Float
// ============================================================================

/// A float that animates through the scheduler
///
/// The tween is registered lazily on the first animation and removed when
/// the value is dropped or snapped with [`AnimatedFloat::set_immediate`].
pub struct AnimatedFloat {
    handle: SchedulerHandle,
    tween_id: Option<TweenId>,
    /// Value used while no tween is registered
    current: f32,
    /// The value we're animating towards
    target: f32,
}

impl AnimatedFloat {
    pub fn new(handle: SchedulerHandle, initial: f32) -> Self {
        Self {
            handle,
            tween_id: None,
            current: initial,
            target: initial,
        }
    }

    /// Animate from the current value to `target`
    ///
    /// Returns false if the scheduler is gone; the value then snaps to `target`.
    pub fn animate_to(&mut self, target: f32, duration_ms: f32, easing: Easing) -> bool {
        self.start(Tween::new(self.get(), target, duration_ms, easing))
    }

    /// Animate to `target` and run `on_complete` when the tween finishes
    ///
    /// The callback is dropped without running if the animation is replaced,
    /// snapped or dropped first, or if the scheduler is gone (returns false).
    pub fn animate_to_then<F>(
        &mut self,
        target: f32,
        duration_ms: f32,
        easing: Easing,
        on_complete: F,
    ) -> bool
    where
        F: FnOnce() + Send + 'static,
    {
        self.start(Tween::new(self.get(), target, duration_ms, easing).on_complete(on_complete))
    }

    fn start(&mut self, tween: Tween) -> bool {
        let target = tween.target();
        if let Some(id) = self.tween_id.take() {
            self.handle.remove_tween(id);
        }
        self.target = target;
        match self.handle.register_tween(tween) {
            Some(id) => {
                self.tween_id = Some(id);
                true
            }
            None => {
                tracing::debug!("AnimatedFloat: scheduler dropped, snapping to {}", target);
                self.current = target;
                false
            }
        }
    }

    /// Get the current animated value
    pub fn get(&self) -> f32 {
        match self.tween_id {
            Some(id) => self.handle.tween_value(id).unwrap_or(self.target),
            None => self.current,
        }
    }

    /// Set value immediately without animation
    pub fn set_immediate(&mut self, value: f32) {
        if let Some(id) = self.tween_id.take() {
            self.handle.remove_tween(id);
        }
        self.current = value;
        self.target = value;
    }

    /// Check if a tween is currently playing
    pub fn is_animating(&self) -> bool {
        self.tween_id
            .map(|id| self.handle.is_tween_playing(id))
            .unwrap_or(false)
    }

    /// Get the current target value
    pub fn target(&self) -> f32 {
        self.target
    }
}

impl Drop for AnimatedFloat {
    fn drop(&mut self) {
        if let Some(id) = self.tween_id {
            self.handle.remove_tween(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_scheduler_advance() {
        let scheduler = AnimationScheduler::new();
        let handle = scheduler.handle();

        let id = handle
            .register_tween(Tween::new(0.0, 100.0, 1000.0, Easing::Linear))
            .unwrap();

        assert!(scheduler.advance(500.0));
        assert_eq!(handle.tween_value(id), Some(50.0));

        assert!(!scheduler.advance(500.0));
        assert_eq!(handle.tween_value(id), Some(100.0));
        assert!(!handle.is_tween_playing(id));
    }

    #[test]
    fn test_completion_runs_once() {
        let scheduler = AnimationScheduler::new();
        let count = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&count);
        let mut value = AnimatedFloat::new(scheduler.handle(), 0.0);
        value.animate_to_then(1.0, 100.0, Easing::Linear, move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        scheduler.advance(60.0);
        assert_eq!(count.load(Ordering::SeqCst), 0);
        scheduler.advance(60.0);
        scheduler.advance(60.0);
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(value.get(), 1.0);
    }

    #[test]
    fn test_callback_can_register_tween() {
        let scheduler = AnimationScheduler::new();
        let handle = scheduler.handle();
        let second: Arc<Mutex<Option<AnimatedFloat>>> = Arc::new(Mutex::new(None));

        let slot = Arc::clone(&second);
        let chained = handle.clone();
        let mut first = AnimatedFloat::new(handle, 0.0);
        first.animate_to_then(1.0, 100.0, Easing::Linear, move || {
            let mut next = AnimatedFloat::new(chained, 0.0);
            next.animate_to(1.0, 100.0, Easing::Linear);
            *slot.lock().unwrap() = Some(next);
        });

        // The chained tween is visible as active in the same advance call
        assert!(scheduler.advance(100.0));
        assert!(second.lock().unwrap().is_some());
        assert!(!scheduler.advance(100.0));
    }

    #[test]
    fn test_replacing_animation_drops_callback() {
        let scheduler = AnimationScheduler::new();
        let count = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&count);
        let mut value = AnimatedFloat::new(scheduler.handle(), 0.0);
        value.animate_to_then(1.0, 100.0, Easing::Linear, move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        scheduler.advance(50.0);
        value.animate_to(0.0, 100.0, Easing::Linear);
        scheduler.advance(200.0);

        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert_eq!(value.get(), 0.0);
        assert_eq!(scheduler.tween_count(), 1);
    }

    #[test]
    fn test_animation_starts_from_current_value() {
        let scheduler = AnimationScheduler::new();
        let mut value = AnimatedFloat::new(scheduler.handle(), 0.0);

        value.animate_to(1.0, 100.0, Easing::Linear);
        scheduler.advance(50.0);
        value.animate_to(0.0, 100.0, Easing::Linear);
        assert_eq!(value.get(), 0.5);
        scheduler.advance(50.0);
        assert_eq!(value.get(), 0.25);
    }

    #[test]
    fn test_tick_uses_wall_clock() {
        let scheduler = AnimationScheduler::new();
        let count = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&count);
        let mut value = AnimatedFloat::new(scheduler.handle(), 0.0);
        value.animate_to_then(1.0, 5.0, Easing::Linear, move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        std::thread::sleep(std::time::Duration::from_millis(20));
        assert!(!scheduler.tick());
        assert_eq!(value.get(), 1.0);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_drop_removes_tween() {
        let scheduler = AnimationScheduler::new();
        {
            let mut value = AnimatedFloat::new(scheduler.handle(), 0.0);
            value.animate_to(1.0, 100.0, Easing::Linear);
            assert_eq!(scheduler.tween_count(), 1);
        }
        assert_eq!(scheduler.tween_count(), 0);
    }

    #[test]
    fn test_handle_weak_reference() {
        let handle = {
            let scheduler = AnimationScheduler::new();
            scheduler.handle()
        };

        assert!(handle
            .register_tween(Tween::new(0.0, 1.0, 10.0, Easing::Linear))
            .is_none());

        let mut value = AnimatedFloat::new(handle, 0.0);
        assert!(!value.animate_to(0.75, 100.0, Easing::Linear));
        assert_eq!(value.get(), 0.75);
        assert!(!value.is_animating());
    }

    #[test]
    fn test_set_immediate() {
        let scheduler = AnimationScheduler::new();
        let mut value = AnimatedFloat::new(scheduler.handle(), 0.0);
        value.animate_to(1.0, 100.0, Easing::Linear);
        assert!(value.is_animating());

        value.set_immediate(0.3);
        assert!(!value.is_animating());
        assert_eq!(value.get(), 0.3);
        assert_eq!(value.target(), 0.3);
        assert_eq!(scheduler.tween_count(), 0);
    }
}
