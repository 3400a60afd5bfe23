//! Stepper configuration
//!
//! A [`StepperConfig`] is built once and handed to the sequencer at
//! construction. It can be assembled with builder methods or loaded from a
//! TOML file where every field is optional:
//!
//! ```toml
//! marker_count = 4
//! spacing = 5.0
//! bar_height = 8.0
//! bar_corner_radius = 4.0
//! marker_color = "#999999"
//! marker_tint_color = "#007AFF"
//! label_position = "below"
//!
//! [label_font]
//! size = 15.0
//! weight = "bold"
//! ```
//!
//! Out-of-range values are clamped rather than rejected.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use stepline_core::{Color, LabelFont, LabelPosition};

use crate::error::{ConfigError, Result};

/// Minimum number of step markers
pub const MIN_MARKERS: usize = 2;

/// Animation durations in milliseconds
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationTiming {
    /// Duration of a marker status transition
    pub marker_transition_ms: f32,
    /// Duration of filling one whole segment; partial fills scale linearly
    pub segment_fill_ms: f32,
}

impl Default for AnimationTiming {
    fn default() -> Self {
        Self {
            marker_transition_ms: 300.0,
            segment_fill_ms: 800.0,
        }
    }
}

/// Immutable style and structure of a stepper
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepperConfig {
    /// Number of step markers (at least 2)
    pub marker_count: usize,
    /// Space between a marker and the adjacent bar
    pub spacing: f32,
    /// Height of the progress bars
    pub bar_height: f32,
    /// Corner radius of the progress bars
    pub bar_corner_radius: f32,
    /// Radius of a marker circle
    pub marker_radius: f32,
    /// Width of the marker ring border
    pub marker_border_width: f32,
    /// Color of unfilled rings and bar tracks
    pub marker_color: Color,
    /// Color of filled rings, inner dots and bar fills
    pub marker_tint_color: Color,
    /// Space between a label and its marker
    pub label_spacing: f32,
    pub label_color: Color,
    pub label_font: LabelFont,
    pub label_position: LabelPosition,
    pub timing: AnimationTiming,
}

impl Default for StepperConfig {
    fn default() -> Self {
        Self {
            marker_count: MIN_MARKERS,
            spacing: 5.0,
            bar_height: 5.0,
            bar_corner_radius: 0.0,
            marker_radius: 10.0,
            marker_border_width: 2.5,
            marker_color: Color::GRAY,
            marker_tint_color: Color::BLUE,
            label_spacing: 10.0,
            label_color: Color::BLACK,
            label_font: LabelFont::default(),
            label_position: LabelPosition::Above,
            timing: AnimationTiming::default(),
        }
    }
}

impl StepperConfig {
    /// Create a config with default style
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML config, filling missing fields with defaults
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: StepperConfig = toml::from_str(source)?;
        Ok(config.normalized())
    }

    /// Load a TOML config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&source)?;
        tracing::debug!(
            "Loaded stepper config from {} ({} markers)",
            path.display(),
            config.marker_count
        );
        Ok(config)
    }

    /// Clamp every field into its valid range
    pub fn normalized(mut self) -> Self {
        self.marker_count = self.marker_count.max(MIN_MARKERS);
        self.spacing = non_negative(self.spacing);
        self.bar_height = non_negative(self.bar_height);
        self.bar_corner_radius = non_negative(self.bar_corner_radius);
        self.marker_radius = non_negative(self.marker_radius);
        self.marker_border_width = non_negative(self.marker_border_width);
        self.label_spacing = non_negative(self.label_spacing);
        self.label_font.size = non_negative(self.label_font.size);
        self.timing.marker_transition_ms = non_negative(self.timing.marker_transition_ms);
        self.timing.segment_fill_ms = non_negative(self.timing.segment_fill_ms);
        self
    }

    /// Set the number of markers; values below 2 clamp to 2
    pub fn marker_count(mut self, count: usize) -> Self {
        self.marker_count = count.max(MIN_MARKERS);
        self
    }

    pub fn spacing(mut self, spacing: f32) -> Self {
        self.spacing = non_negative(spacing);
        self
    }

    pub fn bar_height(mut self, height: f32) -> Self {
        self.bar_height = non_negative(height);
        self
    }

    pub fn bar_corner_radius(mut self, radius: f32) -> Self {
        self.bar_corner_radius = non_negative(radius);
        self
    }

    pub fn marker_radius(mut self, radius: f32) -> Self {
        self.marker_radius = non_negative(radius);
        self
    }

    pub fn marker_border_width(mut self, width: f32) -> Self {
        self.marker_border_width = non_negative(width);
        self
    }

    pub fn marker_color(mut self, color: Color) -> Self {
        self.marker_color = color;
        self
    }

    pub fn marker_tint_color(mut self, color: Color) -> Self {
        self.marker_tint_color = color;
        self
    }

    pub fn label_spacing(mut self, spacing: f32) -> Self {
        self.label_spacing = non_negative(spacing);
        self
    }

    pub fn label_color(mut self, color: Color) -> Self {
        self.label_color = color;
        self
    }

    pub fn label_font(mut self, font: LabelFont) -> Self {
        self.label_font = font;
        self
    }

    pub fn label_position(mut self, position: LabelPosition) -> Self {
        self.label_position = position;
        self
    }

    pub fn timing(mut self, timing: AnimationTiming) -> Self {
        self.timing = timing;
        self
    }

    /// Diameter of a marker circle
    pub fn marker_diameter(&self) -> f32 {
        self.marker_radius * 2.0
    }

    /// Number of bars between markers
    pub fn segment_count(&self) -> usize {
        self.marker_count.max(MIN_MARKERS) - 1
    }
}

fn non_negative(value: f32) -> f32 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}
