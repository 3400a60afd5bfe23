//! Stepline Widgets
//!
//! A horizontal multi-step progress indicator: circular step markers joined
//! by fill bars, with optional labels above or below each marker.
//!
//! # Architecture
//!
//! - **StepMarker**: one circle with three statuses (pending, waiting,
//!   complete) and eased transitions between their visuals.
//! - **ProgressSequencer**: owns the markers and bars, maps a progress value
//!   to a fill cursor and animates towards it one segment at a time.
//!   Updates that arrive mid-animation are coalesced into a single pending
//!   target.
//! - **Layout and rendering**: pure layout arithmetic plus a renderer trait,
//!   so the widget runs headless and under any drawing backend.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use stepline_animation::AnimationScheduler;
//! use stepline_widgets::prelude::*;
//!
//! let scheduler = AnimationScheduler::new();
//! let mut stepper = ProgressSequencer::new(
//!     scheduler.handle(),
//!     StepperConfig::new().marker_count(4),
//! );
//!
//! let describer = Arc::new(|index: usize| Some(format!("Step {}", index + 1)));
//! stepper.set_describer(&describer);
//! stepper.mount();
//!
//! stepper.set_progress(0.5);
//! while scheduler.advance(16.0) || stepper.is_animating() {}
//!
//! let layout = stepper.layout(320.0, &EstimatedTextMeasurer);
//! let mut renderer = RecordingRenderer::new();
//! stepper.paint(&layout, &mut renderer);
//! assert!(!renderer.commands().is_empty());
//! ```

pub mod chain;
pub mod config;
pub mod delegate;
pub mod error;
pub mod layout;
pub mod marker;
pub mod render;
pub mod sequencer;
pub mod text_measure;

pub use chain::{settled_fill, settled_status, ChainCursor, ChainDirection, ChainStep};
pub use config::{AnimationTiming, StepperConfig, MIN_MARKERS};
pub use delegate::StepDescriber;
pub use error::{ConfigError, Result};
pub use layout::{compute_layout, EdgeAnchor, LabelLayout, StepperLayout};
pub use marker::{MarkerStatus, MarkerVisuals, StepMarker, COMPLETE_SCALE};
pub use render::{DrawCommand, MarkerSnapshot, RecordingRenderer, StepRenderer, StepperSnapshot};
pub use sequencer::ProgressSequencer;
pub use text_measure::{EstimatedTextMeasurer, TextLayoutOptions, TextMeasurer, TextMetrics};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{AnimationTiming, StepperConfig};
    pub use crate::delegate::StepDescriber;
    pub use crate::layout::StepperLayout;
    pub use crate::marker::MarkerStatus;
    pub use crate::render::{RecordingRenderer, StepRenderer, StepperSnapshot};
    pub use crate::sequencer::ProgressSequencer;
    pub use crate::text_measure::{EstimatedTextMeasurer, TextMeasurer};
    pub use stepline_core::{Color, LabelPosition};
}
