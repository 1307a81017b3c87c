//! Risk history chart.
//!
//! Maps an ordered sequence of risk points onto a fixed pixel canvas: score
//! grid, left/bottom axes, one connected series line and tier-colored markers.
//! Every call repaints from scratch and keeps no reference to its input.

mod frame_builder;
mod style;

pub use frame_builder::{ProjectedPoint, project_points};
pub use style::{
    ChartStyle, HIGH_RISK_COLOR, LOW_RISK_COLOR, MEDIUM_RISK_COLOR, SERIES_LINE_COLOR,
    TIER_PALETTE, TierPalette,
};

use crate::core::{RiskPoint, Viewport};
use crate::error::ChartResult;
use crate::render::{RenderFrame, Renderer};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RiskChart {
    style: ChartStyle,
}

impl RiskChart {
    pub fn new(style: ChartStyle) -> ChartResult<Self> {
        style.validate()?;
        Ok(Self { style })
    }

    #[must_use]
    pub fn style(&self) -> &ChartStyle {
        &self.style
    }

    /// Builds the full scene for `points`. Never fails: malformed scores are
    /// coerced or clamped instead of rejected.
    #[must_use]
    pub fn build_frame(&self, points: &[RiskPoint], viewport: Viewport) -> RenderFrame {
        frame_builder::build_frame(&self.style, points, viewport)
    }

    /// Builds the scene and hands it to `renderer`.
    ///
    /// Errors can only come from the backend itself.
    pub fn render<R: Renderer>(
        &self,
        renderer: &mut R,
        points: &[RiskPoint],
        viewport: Viewport,
    ) -> ChartResult<()> {
        let frame = self.build_frame(points, viewport);
        renderer.render(&frame)
    }
}

/// Renders `points` on a `width` x `height` surface with the default style.
pub fn render_risk_history<R: Renderer>(
    renderer: &mut R,
    points: &[RiskPoint],
    width: u32,
    height: u32,
) -> ChartResult<()> {
    RiskChart::default().render(renderer, points, Viewport::new(width, height))
}
