use crate::core::risk::{SCORE_MAX, clamp_score};
use crate::core::types::PlotArea;

/// Maps `(index, score)` pairs into the plot area.
///
/// X spacing depends only on the point count, never on timestamps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskScale {
    area: PlotArea,
    point_count: usize,
}

impl RiskScale {
    #[must_use]
    pub fn new(area: PlotArea, point_count: usize) -> Self {
        Self { area, point_count }
    }

    #[must_use]
    pub fn area(self) -> PlotArea {
        self.area
    }

    /// Horizontal distance between consecutive points.
    #[must_use]
    pub fn step(self) -> f64 {
        let intervals = self.point_count.saturating_sub(1).max(1);
        self.area.width() / intervals as f64
    }

    #[must_use]
    pub fn index_to_pixel(self, index: usize) -> f64 {
        self.area.x0 + index as f64 * self.step()
    }

    /// Higher scores map nearer the top; out-of-range scores are clamped.
    #[must_use]
    pub fn score_to_pixel(self, score: f64) -> f64 {
        let value = clamp_score(score);
        self.area.y0 + (SCORE_MAX - value) * self.area.height() / SCORE_MAX
    }
}
