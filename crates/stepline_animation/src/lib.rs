//! Stepline Animation System
//!
//! Timed, eased tweens driven by a frame scheduler.
//!
//! # Features
//!
//! - **Easing**: Cubic-bezier timing curves (ease-in, ease-out, ease-in-out)
//! - **Tweens**: Fixed-duration float animations with one-shot completion callbacks
//! - **Scheduler**: Ticks every registered tween from the host frame loop,
//!   either from the wall clock or from a fixed delta
//! - **Animated values**: Owning wrappers that register on demand and clean up on drop
//! - **Interpolation**: `Interpolate` for floats and composite visual states

pub mod easing;
pub mod scheduler;
pub mod tween;
pub mod values;

pub use easing::Easing;
pub use scheduler::{AnimatedFloat, AnimationScheduler, SchedulerHandle, TweenId};
pub use tween::{CompletionCallback, Tween};
pub use values::Interpolate;
