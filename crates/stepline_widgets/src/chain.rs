//! Segment-by-segment animation chain
//!
//! A chain turns a move of the fill cursor (`current -> target`, in segment
//! units) into an ordered list of steps. Each step animates one segment to
//! its local fill and names the marker statuses that change as that step
//! starts. The sequencer pulls one step at a time and only asks for the next
//! one when the previous segment animation has completed.
//!
//! Forward chains walk left to right from the first segment that is not full
//! and stop at the frontier segment (local fill below 1) or after the last
//! segment. Backward chains walk right to left from the last segment that is
//! not empty and stop once the cursor lands inside the current segment's
//! range or the first segment has been unfilled.

use smallvec::{smallvec, SmallVec};

use crate::marker::MarkerStatus;

/// Fill of segment `segment` when the cursor rests at `fill_position`
pub fn settled_fill(fill_position: f32, segment: usize) -> f32 {
    (fill_position - segment as f32).clamp(0.0, 1.0)
}

/// Status of marker `index` when the cursor rests at `fill_position`
///
/// Markers the cursor has fully passed are complete, the marker the cursor
/// sits on (or just past) is waiting, and the rest are pending. The final
/// marker completes when the cursor reaches it, since nothing lies past it.
pub fn settled_status(fill_position: f32, index: usize, marker_count: usize) -> MarkerStatus {
    let position = index as f32;
    let is_last = index + 1 >= marker_count;
    if fill_position >= position + 1.0 || (is_last && fill_position >= position) {
        MarkerStatus::Complete
    } else if fill_position >= position {
        MarkerStatus::Waiting
    } else {
        MarkerStatus::Pending
    }
}

/// Direction the fill cursor moves in
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChainDirection {
    /// Filling, left to right
    Forward,
    /// Unfilling, right to left
    Backward,
}

/// One step of a chain
#[derive(Clone, Debug, PartialEq)]
pub struct ChainStep {
    /// Segment to animate
    pub segment: usize,
    /// Fill the segment animates to
    pub fill: f32,
    /// Marker status changes applied when the step starts
    pub markers: SmallVec<[(usize, MarkerStatus); 2]>,
    /// Whether this is the chain's final step
    pub last: bool,
}

/// Cursor over the steps of one chain
#[derive(Clone, Debug)]
pub struct ChainCursor {
    direction: ChainDirection,
    target: f32,
    marker_count: usize,
    /// Next segment to visit, `None` once the final step was produced
    next: Option<usize>,
}

impl ChainCursor {
    /// Plan a chain from `current` to `target` given the segments' fills
    ///
    /// Returns `None` when there is nothing to move.
    pub fn begin(current: f32, target: f32, fills: &[f32]) -> Option<Self> {
        if fills.is_empty() || target == current {
            return None;
        }

        let last_segment = fills.len() - 1;
        let (direction, start) = if target > current {
            let start = fills
                .iter()
                .position(|fill| *fill < 1.0)
                .unwrap_or(last_segment);
            (ChainDirection::Forward, start)
        } else {
            let start = fills.iter().rposition(|fill| *fill > 0.0).unwrap_or(0);
            (ChainDirection::Backward, start)
        };

        Some(Self {
            direction,
            target,
            marker_count: fills.len() + 1,
            next: Some(start),
        })
    }

    pub fn direction(&self) -> ChainDirection {
        self.direction
    }

    /// Target fill position of this chain
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Produce the next step, or `None` when the chain is exhausted
    pub fn next_step(&mut self) -> Option<ChainStep> {
        let segment = self.next?;
        let fill = settled_fill(self.target, segment);
        let status = |index| settled_status(self.target, index, self.marker_count);
        let last_segment = self.marker_count - 2;

        let step = match self.direction {
            ChainDirection::Forward => {
                // The bar leaves the marker on its left as it starts filling
                let mut markers: SmallVec<[(usize, MarkerStatus); 2]> =
                    smallvec![(segment, status(segment))];
                let frontier = fill < 1.0;
                let exhausted = segment == last_segment;
                if exhausted && !frontier {
                    markers.push((segment + 1, status(segment + 1)));
                }
                ChainStep {
                    segment,
                    fill,
                    markers,
                    last: frontier || exhausted,
                }
            }
            ChainDirection::Backward => {
                // The bar retreats from the marker on its right
                let mut markers: SmallVec<[(usize, MarkerStatus); 2]> =
                    smallvec![(segment + 1, status(segment + 1))];
                let frontier = self.target >= segment as f32;
                let exhausted = segment == 0;
                if frontier || exhausted {
                    markers.push((segment, status(segment)));
                }
                ChainStep {
                    segment,
                    fill,
                    markers,
                    last: frontier || exhausted,
                }
            }
        };

        self.next = if step.last {
            None
        } else {
            match self.direction {
                ChainDirection::Forward => Some(segment + 1),
                ChainDirection::Backward => Some(segment - 1),
            }
        };

        Some(step)
    }
}
