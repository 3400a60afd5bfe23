//! Text-art frames for the terminal
//!
//! Maps layout units onto character columns. Bars print as `=` (filled) and
//! `-` (track); markers print as `( )` pending, `(.)` waiting and `(v)`
//! complete, switching glyph once a transition is halfway through.

use stepline_core::Rect;
use stepline_widgets::{LabelLayout, MarkerVisuals, StepRenderer, StepperConfig};

pub struct TextRenderer {
    units_per_column: f32,
    row: Vec<char>,
    labels: Vec<char>,
}

impl TextRenderer {
    pub fn new(width: f32, units_per_column: f32) -> Self {
        let units_per_column = units_per_column.max(1.0);
        let columns = (width / units_per_column).ceil().max(0.0) as usize + 1;
        Self {
            units_per_column,
            row: vec![' '; columns],
            labels: vec![' '; columns],
        }
    }

    fn column(&self, x: f32) -> usize {
        (x / self.units_per_column).round().max(0.0) as usize
    }

    /// The marker row
    pub fn row(&self) -> String {
        collect_line(&self.row)
    }

    /// The label line, one label per marker
    pub fn labels(&self) -> String {
        collect_line(&self.labels)
    }
}

fn collect_line(line: &[char]) -> String {
    let text: String = line.iter().collect();
    text.trim_end().to_string()
}

fn write(line: &mut Vec<char>, start: usize, text: &str) {
    for (offset, ch) in text.chars().enumerate() {
        let column = start + offset;
        if column >= line.len() {
            line.resize(column + 1, ' ');
        }
        line[column] = ch;
    }
}

impl StepRenderer for TextRenderer {
    fn draw_segment(&mut self, _index: usize, rect: Rect, fill: f32, _config: &StepperConfig) {
        let start = self.column(rect.x());
        let end = self.column(rect.max_x()).max(start);
        let filled = self.column(rect.x() + rect.width() * fill.clamp(0.0, 1.0));
        let bar: String = (start..end)
            .map(|column| if column < filled { '=' } else { '-' })
            .collect();
        write(&mut self.row, start, &bar);
    }

    fn draw_marker(
        &mut self,
        _index: usize,
        rect: Rect,
        visuals: &MarkerVisuals,
        _config: &StepperConfig,
    ) {
        let glyph = if visuals.check_opacity >= 0.5 {
            "(v)"
        } else if visuals.dot_visible && visuals.dot_opacity >= 0.5 {
            "(.)"
        } else {
            "( )"
        };
        let center = self.column(rect.center().x);
        write(&mut self.row, center.saturating_sub(1), glyph);
    }

    fn draw_label(&mut self, label: &LabelLayout, _config: &StepperConfig) {
        let center = self.column(label.rect.center().x);
        let half = label.text.chars().count() / 2;
        write(&mut self.labels, center.saturating_sub(half), &label.text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stepline_widgets::MarkerStatus;

    #[test]
    fn test_segment_fill() {
        let config = StepperConfig::new();
        let mut renderer = TextRenderer::new(40.0, 4.0);
        renderer.draw_segment(0, Rect::new(0.0, 0.0, 40.0, 5.0), 0.5, &config);
        assert_eq!(renderer.row(), "=====-----");
    }

    #[test]
    fn test_marker_glyphs() {
        let config = StepperConfig::new();
        let mut renderer = TextRenderer::new(80.0, 4.0);
        let statuses = [
            MarkerStatus::Pending,
            MarkerStatus::Waiting,
            MarkerStatus::Complete,
        ];
        for (index, status) in statuses.into_iter().enumerate() {
            let rect = Rect::new(index as f32 * 24.0, 0.0, 8.0, 8.0);
            renderer.draw_marker(index, rect, &MarkerVisuals::resting(status, 2.5), &config);
        }
        assert_eq!(renderer.row(), "( )   (.)   (v)");
    }

    #[test]
    fn test_label_centered() {
        let config = StepperConfig::new();
        let mut renderer = TextRenderer::new(80.0, 4.0);
        let label = LabelLayout {
            index: 0,
            text: "abcd".to_string(),
            rect: Rect::new(24.0, 0.0, 16.0, 10.0),
            line_count: 1,
        };
        renderer.draw_label(&label, &config);
        assert_eq!(renderer.labels(), "      abcd");
    }
}
