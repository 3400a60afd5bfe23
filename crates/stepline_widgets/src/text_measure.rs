//! Text measurement for label layout
//!
//! Provides a trait for measuring label dimensions during layout so hosts
//! can plug in real font metrics.

use stepline_core::LabelFont;

/// Text layout options that affect measurement
#[derive(Debug, Clone)]
pub struct TextLayoutOptions {
    /// Line height multiplier (1.0 = default, 1.5 = 150%)
    pub line_height: f32,
    /// Maximum width for wrapping (None = no wrapping)
    pub max_width: Option<f32>,
}

impl TextLayoutOptions {
    /// Create default options
    pub fn new() -> Self {
        Self {
            line_height: 1.2,
            max_width: None,
        }
    }

    /// Options matching a label font
    pub fn for_font(font: &LabelFont) -> Self {
        Self {
            line_height: font.line_height,
            max_width: None,
        }
    }

    /// Set max width for wrapping
    pub fn with_max_width(mut self, width: f32) -> Self {
        self.max_width = Some(width);
        self
    }
}

impl Default for TextLayoutOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Text measurement result
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TextMetrics {
    /// Width in layout units
    pub width: f32,
    /// Height in layout units (accounts for line height and number of lines)
    pub height: f32,
    /// Number of lines (1 for single-line text)
    pub line_count: u32,
}

/// Trait for measuring text dimensions
pub trait TextMeasurer: Send + Sync {
    /// Measure the dimensions of a text string
    fn measure_with_options(
        &self,
        text: &str,
        font_size: f32,
        options: &TextLayoutOptions,
    ) -> TextMetrics;

    /// Measure text with default options (convenience method)
    fn measure(&self, text: &str, font_size: f32) -> TextMetrics {
        self.measure_with_options(text, font_size, &TextLayoutOptions::new())
    }
}

/// A text measurer that uses estimates
///
/// Used when the host has no font backend (tests, headless tools).
#[derive(Debug, Clone, Copy, Default)]
pub struct EstimatedTextMeasurer;

impl TextMeasurer for EstimatedTextMeasurer {
    fn measure_with_options(
        &self,
        text: &str,
        font_size: f32,
        options: &TextLayoutOptions,
    ) -> TextMetrics {
        if text.is_empty() {
            return TextMetrics::default();
        }

        // ~0.55 * font_size per character (conservative for proportional fonts)
        let total_width = text.chars().count() as f32 * font_size * 0.55;

        let (width, line_count) = match options.max_width {
            Some(max_width) if total_width > max_width && max_width > 0.0 => {
                let lines = (total_width / max_width).ceil() as u32;
                (max_width, lines.max(1))
            }
            _ => (total_width, 1),
        };

        TextMetrics {
            width,
            height: font_size * options.line_height * line_count as f32,
            line_count,
        }
    }
}
