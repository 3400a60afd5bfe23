//! End-to-end progress scenarios driven by a fixed-step frame loop

use std::sync::Arc;

use stepline_animation::AnimationScheduler;
use stepline_widgets::prelude::*;
use stepline_widgets::{settled_fill, settled_status, DrawCommand};

const FRAME_MS: f32 = 16.0;

fn settle(scheduler: &AnimationScheduler, stepper: &ProgressSequencer) -> usize {
    let mut frames = 0;
    while scheduler.advance(FRAME_MS) || stepper.is_animating() {
        frames += 1;
        assert!(frames < 10_000, "stepper did not settle");
    }
    frames
}

fn assert_settled_at(stepper: &ProgressSequencer, progress: f32) {
    let markers = stepper.number_of_markers();
    let position = progress * (markers - 1) as f32;
    let snapshot = stepper.snapshot();

    for (segment, fill) in snapshot.segments.iter().enumerate() {
        let expected = settled_fill(position, segment);
        assert!(
            (fill - expected).abs() < 1e-5,
            "segment {segment}: {fill} != {expected} at progress {progress}"
        );
    }
    for marker in &snapshot.markers {
        assert_eq!(
            marker.status,
            settled_status(position, marker.index, markers),
            "marker {} at progress {progress}",
            marker.index
        );
    }
}

#[test]
fn settled_fills_match_progress() {
    for markers in 2..=6 {
        let scheduler = AnimationScheduler::new();
        let stepper = ProgressSequencer::new(
            scheduler.handle(),
            StepperConfig::new().marker_count(markers),
        );
        for progress in [0.3, 0.9, 0.1, 1.0, 0.55, 0.0] {
            stepper.set_progress(progress);
            settle(&scheduler, &stepper);
            assert_settled_at(&stepper, progress);
        }
    }
}

#[test]
fn monotonic_updates_complete_earlier_markers() {
    let scheduler = AnimationScheduler::new();
    let stepper = ProgressSequencer::new(scheduler.handle(), StepperConfig::new().marker_count(5));

    for step in 1..=8 {
        let progress = step as f32 / 8.0;
        stepper.set_progress(progress);
        settle(&scheduler, &stepper);

        let frontier = (progress * 4.0).floor() as usize;
        for index in 0..frontier.min(4) {
            assert_eq!(stepper.marker_status(index), Some(MarkerStatus::Complete));
        }
    }
    assert_eq!(stepper.snapshot().current_step(), None);
}

#[test]
fn rapid_updates_settle_on_last_value() {
    let scheduler = AnimationScheduler::new();
    let stepper = ProgressSequencer::new(scheduler.handle(), StepperConfig::new().marker_count(4));

    for progress in [0.1, 0.9, 0.4, 1.0, 0.25] {
        stepper.set_progress(progress);
        scheduler.advance(FRAME_MS);
    }
    settle(&scheduler, &stepper);

    assert_eq!(stepper.progress(), 0.25);
    assert_settled_at(&stepper, 0.25);
    // Every later write lands while the first chain runs and coalesces
    assert_eq!(stepper.chains_started(), 2);
}

#[test]
fn fill_never_leaves_unit_range_mid_animation() {
    let scheduler = AnimationScheduler::new();
    let stepper = ProgressSequencer::new(scheduler.handle(), StepperConfig::new().marker_count(3));

    stepper.set_progress(1.0);
    loop {
        let active = scheduler.advance(7.0);
        let snapshot = stepper.snapshot();
        assert!(snapshot.progress >= 0.0 && snapshot.progress <= 1.0);
        for fill in &snapshot.segments {
            assert!((0.0..=1.0).contains(fill), "fill {fill} out of range");
        }
        // Later bars only move once earlier ones are full
        for pair in snapshot.segments.windows(2) {
            assert!(pair[1] == 0.0 || pair[0] == 1.0);
        }
        if !active && !stepper.is_animating() {
            break;
        }
    }
}

#[test]
fn labelled_stepper_paints_every_element() {
    let scheduler = AnimationScheduler::new();
    let config = StepperConfig::new()
        .marker_count(4)
        .label_position(LabelPosition::Below);
    let mut stepper = ProgressSequencer::new(scheduler.handle(), config);

    let describer = Arc::new(|index: usize| Some(format!("Step {}", index + 1)));
    stepper.set_describer(&describer);
    stepper.mount();

    stepper.set_progress(0.5);
    settle(&scheduler, &stepper);

    let layout = stepper.layout(320.0, &EstimatedTextMeasurer);
    assert_eq!(layout.labels.len(), 4);
    assert!(layout
        .labels
        .iter()
        .all(|label| label.rect.y() > layout.markers[label.index].max_y()));

    let mut renderer = RecordingRenderer::new();
    stepper.paint(&layout, &mut renderer);
    let commands = renderer.take_commands();

    let checks = commands
        .iter()
        .filter(|c| matches!(c, DrawCommand::Check { .. }))
        .count();
    let texts: Vec<&str> = commands
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
        .collect();

    // Halfway through four steps only the first marker is complete
    assert_eq!(checks, 1);
    assert_eq!(texts, vec!["Step 1", "Step 2", "Step 3", "Step 4"]);
}
