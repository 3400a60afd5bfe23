//! Rendering seam
//!
//! The widget does not draw by itself. [`ProgressSequencer::paint`] walks a
//! computed [`StepperLayout`] and hands every element, with its current
//! animated state, to a [`StepRenderer`] supplied by the host.
//!
//! [`RecordingRenderer`] resolves those calls into flat [`DrawCommand`]s,
//! which is what headless hosts and tests use.
//!
//! [`ProgressSequencer::paint`]: crate::sequencer::ProgressSequencer::paint
//! [`StepperLayout`]: crate::layout::StepperLayout

use serde::Serialize;
use stepline_core::{Color, Rect, Size};

use crate::config::StepperConfig;
use crate::layout::LabelLayout;
use crate::marker::{MarkerStatus, MarkerVisuals};

/// Receives the elements of one stepper frame
pub trait StepRenderer {
    /// Draw bar `index` inside `rect`, filled to `fill` (0..=1) from the left
    fn draw_segment(&mut self, index: usize, rect: Rect, fill: f32, config: &StepperConfig);

    /// Draw marker `index` with its resting frame `rect`
    fn draw_marker(
        &mut self,
        index: usize,
        rect: Rect,
        visuals: &MarkerVisuals,
        config: &StepperConfig,
    );

    fn draw_label(&mut self, label: &LabelLayout, config: &StepperConfig);
}

/// Filled part of a bar
pub fn segment_fill_rect(rect: Rect, fill: f32) -> Rect {
    Rect::new(
        rect.x(),
        rect.y(),
        rect.width() * fill.clamp(0.0, 1.0),
        rect.height(),
    )
}

/// Ring frame after applying the marker's scale around its center
pub fn marker_ring_rect(rect: Rect, visuals: &MarkerVisuals) -> Rect {
    Rect::from_center(
        rect.center(),
        Size::new(rect.width() * visuals.scale, rect.height() * visuals.scale),
    )
}

/// Inner dot frame; the dot is half the marker's diameter
pub fn marker_dot_rect(rect: Rect) -> Rect {
    Rect::from_center(
        rect.center(),
        Size::new(rect.width() / 2.0, rect.height() / 2.0),
    )
}

/// A resolved drawing primitive
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawCommand {
    /// Rounded rectangle
    FillRect {
        rect: Rect,
        corner_radius: f32,
        color: Color,
    },
    /// Circle with an optional border
    Circle {
        rect: Rect,
        fill: Color,
        border_width: f32,
        border_color: Color,
    },
    /// Checkmark glyph
    Check { rect: Rect, color: Color },
    Text {
        text: String,
        rect: Rect,
        color: Color,
        font_size: f32,
    },
}

/// A renderer that records resolved draw commands
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    commands: Vec<DrawCommand>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the recorded commands
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take the recorded commands
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Clear all recorded commands
    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl StepRenderer for RecordingRenderer {
    fn draw_segment(&mut self, _index: usize, rect: Rect, fill: f32, config: &StepperConfig) {
        self.commands.push(DrawCommand::FillRect {
            rect,
            corner_radius: config.bar_corner_radius,
            color: config.marker_color,
        });
        if fill > 0.0 {
            self.commands.push(DrawCommand::FillRect {
                rect: segment_fill_rect(rect, fill),
                corner_radius: config.bar_corner_radius,
                color: config.marker_tint_color,
            });
        }
    }

    fn draw_marker(
        &mut self,
        _index: usize,
        rect: Rect,
        visuals: &MarkerVisuals,
        config: &StepperConfig,
    ) {
        // Dot first so the filled ring of a complete marker covers it
        if visuals.dot_visible && visuals.dot_opacity > 0.0 {
            self.commands.push(DrawCommand::Circle {
                rect: marker_dot_rect(rect),
                fill: config.marker_tint_color.with_alpha(visuals.dot_opacity),
                border_width: 0.0,
                border_color: Color::TRANSPARENT,
            });
        }
        self.commands.push(DrawCommand::Circle {
            rect: marker_ring_rect(rect, visuals),
            fill: visuals.ring_background(config.marker_tint_color),
            border_width: visuals.border_width,
            border_color: config.marker_color,
        });
        if visuals.check_opacity > 0.0 {
            self.commands.push(DrawCommand::Check {
                rect: marker_ring_rect(rect, visuals),
                color: Color::WHITE.with_alpha(visuals.check_opacity),
            });
        }
    }

    fn draw_label(&mut self, label: &LabelLayout, config: &StepperConfig) {
        self.commands.push(DrawCommand::Text {
            text: label.text.clone(),
            rect: label.rect,
            color: config.label_color,
            font_size: config.label_font.size,
        });
    }
}

/// Animated state of one marker
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct MarkerSnapshot {
    pub index: usize,
    pub status: MarkerStatus,
    pub visuals: MarkerVisuals,
}

/// Animated state of a whole stepper at one instant
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct StepperSnapshot {
    /// Last accepted progress value
    pub progress: f32,
    /// Fill cursor the stepper is settling towards, in segment units
    pub fill_position: f32,
    /// Whether a chain is in flight
    pub animating: bool,
    /// Current fill of each bar
    pub segments: Vec<f32>,
    pub markers: Vec<MarkerSnapshot>,
}

impl StepperSnapshot {
    /// Index of the first marker that is not complete
    pub fn current_step(&self) -> Option<usize> {
        self.markers
            .iter()
            .position(|marker| marker.status != MarkerStatus::Complete)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_fill_rect() {
        let rect = Rect::new(10.0, 0.0, 100.0, 5.0);
        assert_eq!(segment_fill_rect(rect, 0.25).width(), 25.0);
        assert_eq!(segment_fill_rect(rect, 2.0).width(), 100.0);
        assert_eq!(segment_fill_rect(rect, -1.0).width(), 0.0);
        assert_eq!(segment_fill_rect(rect, 0.5).x(), 10.0);
    }

    #[test]
    fn test_marker_geometry() {
        let rect = Rect::new(0.0, 0.0, 20.0, 20.0);
        let complete = MarkerVisuals::resting(MarkerStatus::Complete, 2.5);
        let ring = marker_ring_rect(rect, &complete);
        assert!((ring.width() - 21.0).abs() < 1e-4);
        assert_eq!(ring.center(), rect.center());

        let dot = marker_dot_rect(rect);
        assert_eq!(dot.width(), 10.0);
        assert_eq!(dot.center(), rect.center());
    }

    #[test]
    fn test_recording_segment() {
        let config = StepperConfig::new();
        let mut renderer = RecordingRenderer::new();
        let rect = Rect::new(0.0, 0.0, 80.0, 5.0);

        renderer.draw_segment(0, rect, 0.0, &config);
        assert_eq!(renderer.commands().len(), 1);

        renderer.draw_segment(0, rect, 0.5, &config);
        let commands = renderer.take_commands();
        assert_eq!(commands.len(), 3);
        match &commands[2] {
            DrawCommand::FillRect { rect, color, .. } => {
                assert_eq!(rect.width(), 40.0);
                assert_eq!(*color, config.marker_tint_color);
            }
            other => panic!("unexpected command {other:?}"),
        }
        assert!(renderer.commands().is_empty());
    }

    #[test]
    fn test_recording_markers() {
        let config = StepperConfig::new();
        let rect = Rect::new(0.0, 0.0, 20.0, 20.0);
        let mut renderer = RecordingRenderer::new();

        renderer.draw_marker(
            0,
            rect,
            &MarkerVisuals::resting(MarkerStatus::Pending, 2.5),
            &config,
        );
        assert_eq!(renderer.commands().len(), 1);
        renderer.clear();

        renderer.draw_marker(
            0,
            rect,
            &MarkerVisuals::resting(MarkerStatus::Waiting, 2.5),
            &config,
        );
        assert_eq!(renderer.commands().len(), 2);
        renderer.clear();

        renderer.draw_marker(
            0,
            rect,
            &MarkerVisuals::resting(MarkerStatus::Complete, 2.5),
            &config,
        );
        let commands = renderer.commands();
        assert_eq!(commands.len(), 3);
        assert!(matches!(commands[2], DrawCommand::Check { .. }));
        match &commands[1] {
            DrawCommand::Circle {
                fill, border_width, ..
            } => {
                assert_eq!(*fill, config.marker_tint_color);
                assert_eq!(*border_width, 0.0);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_current_step() {
        let visuals = MarkerVisuals::resting(MarkerStatus::Pending, 2.5);
        let snapshot = StepperSnapshot {
            markers: vec![
                MarkerSnapshot {
                    index: 0,
                    status: MarkerStatus::Complete,
                    visuals,
                },
                MarkerSnapshot {
                    index: 1,
                    status: MarkerStatus::Waiting,
                    visuals,
                },
            ],
            ..Default::default()
        };
        assert_eq!(snapshot.current_step(), Some(1));
        assert_eq!(StepperSnapshot::default().current_step(), None);
    }
}
