//! Stepper layout arithmetic
//!
//! Places the marker row (marker, gap, bar, gap, marker, ...) and the
//! optional labels inside a container of a given width. All bars share one
//! width. Labels are centered on their marker and wrap to a width derived
//! from the bar width.
//!
//! The first and last labels decide how the row meets the container edges:
//! a label at least as wide as the marker radius is pinned to the edge and
//! the row is inset so the label fits; otherwise the row itself touches the
//! edge.

use serde::Serialize;
use stepline_core::{LabelPosition, Rect, Size};

use crate::config::StepperConfig;
use crate::text_measure::{TextLayoutOptions, TextMeasurer, TextMetrics};

/// What touches a container edge
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeAnchor {
    /// The outermost marker
    Row,
    /// The outermost marker's label
    Label,
}

/// A placed label
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LabelLayout {
    /// Marker the label belongs to
    pub index: usize,
    pub text: String,
    pub rect: Rect,
    pub line_count: u32,
}

/// Result of laying out a stepper
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StepperLayout {
    /// Size the stepper occupies
    pub size: Size,
    pub markers: Vec<Rect>,
    pub segments: Vec<Rect>,
    pub labels: Vec<LabelLayout>,
    pub leading: EdgeAnchor,
    pub trailing: EdgeAnchor,
    /// Width shared by every bar
    pub segment_width: f32,
}

/// Bar width when the row spans `row_width`
pub fn segment_width(config: &StepperConfig, row_width: f32) -> f32 {
    let markers = config.marker_count as f32;
    let segments = config.segment_count() as f32;
    let fixed = config.marker_diameter() * markers + 2.0 * segments * config.spacing;
    ((row_width - fixed) / segments).max(0.0)
}

/// Maximum label width for a given bar width
pub fn label_max_width(config: &StepperConfig, segment_width: f32) -> f32 {
    0.6 * segment_width + 2.0 * config.spacing + config.marker_diameter()
}

fn edge_inset(config: &StepperConfig, label: Option<&(String, TextMetrics)>) -> (EdgeAnchor, f32) {
    match label {
        Some((_, metrics)) if metrics.width >= config.marker_radius => {
            let inset = ((metrics.width - config.marker_diameter()) / 2.0).max(0.0);
            (EdgeAnchor::Label, inset)
        }
        _ => (EdgeAnchor::Row, 0.0),
    }
}

/// Lay out a stepper `width` units wide
///
/// `labels[i]` is the text of marker `i`; missing entries and `None` mean
/// no label.
pub fn compute_layout(
    config: &StepperConfig,
    width: f32,
    labels: &[Option<String>],
    measurer: &dyn TextMeasurer,
) -> StepperLayout {
    let marker_count = config.marker_count.max(2);
    let diameter = config.marker_diameter();
    let width = width.max(0.0);

    let max_label_width = label_max_width(config, segment_width(config, width));
    let options = TextLayoutOptions::for_font(&config.label_font).with_max_width(max_label_width);
    let measured: Vec<Option<(String, TextMetrics)>> = (0..marker_count)
        .map(|index| {
            labels.get(index).cloned().flatten().map(|text| {
                let metrics = measurer.measure_with_options(&text, config.label_font.size, &options);
                (text, metrics)
            })
        })
        .collect();

    let (leading, leading_inset) = edge_inset(config, measured[0].as_ref());
    let (trailing, trailing_inset) = edge_inset(config, measured[marker_count - 1].as_ref());
    let row_width = (width - leading_inset - trailing_inset).max(0.0);
    let bar_width = segment_width(config, row_width);

    let row_height = diameter.max(config.bar_height);
    let center_y = row_height / 2.0;

    let mut markers = Vec::with_capacity(marker_count);
    let mut segments = Vec::with_capacity(marker_count - 1);
    let mut x = leading_inset;
    for index in 0..marker_count {
        markers.push(Rect::new(x, center_y - diameter / 2.0, diameter, diameter));
        x += diameter;
        if index + 1 < marker_count {
            x += config.spacing;
            segments.push(Rect::new(
                x,
                center_y - config.bar_height / 2.0,
                bar_width,
                config.bar_height,
            ));
            x += bar_width + config.spacing;
        }
    }

    let mut labels_out = Vec::new();
    for (index, entry) in measured.into_iter().enumerate() {
        let Some((text, metrics)) = entry else {
            continue;
        };
        let marker = markers[index];
        let x = marker.center().x - metrics.width / 2.0;
        let y = match config.label_position {
            LabelPosition::Above => marker.y() - config.label_spacing - metrics.height,
            LabelPosition::Below => marker.max_y() + config.label_spacing,
        };
        labels_out.push(LabelLayout {
            index,
            text,
            rect: Rect::new(x, y, metrics.width, metrics.height),
            line_count: metrics.line_count,
        });
    }

    // Shift everything so the topmost element sits at y = 0
    let top = labels_out
        .iter()
        .map(|label| label.rect.y())
        .fold(0.0_f32, f32::min);
    let bottom = labels_out
        .iter()
        .map(|label| label.rect.max_y())
        .fold(row_height, f32::max);
    let dy = -top;
    for rect in markers.iter_mut().chain(segments.iter_mut()) {
        *rect = rect.offset(0.0, dy);
    }
    for label in &mut labels_out {
        label.rect = label.rect.offset(0.0, dy);
    }

    StepperLayout {
        size: Size::new(width, bottom - top),
        markers,
        segments,
        labels: labels_out,
        leading,
        trailing,
        segment_width: bar_width,
    }
}
