use serde::{Deserialize, Serialize};

use crate::core::{Padding, RiskTier};
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

pub const HIGH_RISK_COLOR: Color = Color::rgb8(0xef, 0x44, 0x44);
pub const MEDIUM_RISK_COLOR: Color = Color::rgb8(0xf5, 0x9e, 0x0b);
pub const LOW_RISK_COLOR: Color = Color::rgb8(0x22, 0xc5, 0x5e);
pub const SERIES_LINE_COLOR: Color = Color::rgb8(0x3b, 0x82, 0xf6);

/// Marker color per risk tier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierPalette {
    pub high: Color,
    pub medium: Color,
    pub low: Color,
}

impl TierPalette {
    #[must_use]
    pub fn color_for(self, tier: RiskTier) -> Color {
        match tier {
            RiskTier::High => self.high,
            RiskTier::Medium => self.medium,
            RiskTier::Low => self.low,
        }
    }
}

/// Marker colors are not part of [`ChartStyle`] and cannot be configured.
pub const TIER_PALETTE: TierPalette = TierPalette {
    high: HIGH_RISK_COLOR,
    medium: MEDIUM_RISK_COLOR,
    low: LOW_RISK_COLOR,
};

/// Style contract for the risk history chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartStyle {
    pub padding: Padding,
    /// Number of horizontal grid lines, top (100) to bottom (0).
    pub grid_line_count: usize,
    pub background_color: Color,
    pub grid_line_color: Color,
    pub grid_line_width: f64,
    pub axis_color: Color,
    pub axis_line_width: f64,
    pub label_color: Color,
    pub label_font_size_px: f64,
    /// Left offset of the grid labels from the canvas edge.
    pub label_offset_px: f64,
    pub series_line_color: Color,
    pub series_line_width: f64,
    pub marker_radius_px: f64,
    pub placeholder_text: String,
    pub placeholder_color: Color,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            padding: Padding::default(),
            grid_line_count: 6,
            background_color: Color::rgb(1.0, 1.0, 1.0),
            grid_line_color: Color::rgb(0.89, 0.92, 0.95),
            grid_line_width: 1.0,
            axis_color: Color::rgb(0.58, 0.64, 0.72),
            axis_line_width: 1.0,
            label_color: Color::rgb(0.39, 0.45, 0.55),
            label_font_size_px: 11.0,
            label_offset_px: 6.0,
            series_line_color: SERIES_LINE_COLOR,
            series_line_width: 2.0,
            marker_radius_px: 4.0,
            placeholder_text: "No risk history yet".to_owned(),
            placeholder_color: Color::rgb(0.39, 0.45, 0.55),
        }
    }
}

impl ChartStyle {
    pub fn validate(&self) -> ChartResult<()> {
        let padding = self.padding;
        for (name, value) in [
            ("padding.left", padding.left),
            ("padding.right", padding.right),
            ("padding.top", padding.top),
            ("padding.bottom", padding.bottom),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "`{name}` must be finite and >= 0"
                )));
            }
        }
        if self.grid_line_count < 2 {
            return Err(ChartError::InvalidConfig(
                "`grid_line_count` must be >= 2".to_owned(),
            ));
        }
        for (name, value) in [
            ("grid_line_width", self.grid_line_width),
            ("axis_line_width", self.axis_line_width),
            ("label_font_size_px", self.label_font_size_px),
            ("series_line_width", self.series_line_width),
            ("marker_radius_px", self.marker_radius_px),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "`{name}` must be finite and > 0"
                )));
            }
        }
        if self.placeholder_text.trim().is_empty() {
            return Err(ChartError::InvalidConfig(
                "`placeholder_text` must not be empty".to_owned(),
            ));
        }
        for color in [
            self.background_color,
            self.grid_line_color,
            self.axis_color,
            self.label_color,
            self.series_line_color,
            self.placeholder_color,
        ] {
            color
                .validate()
                .map_err(|err| ChartError::InvalidConfig(err.to_string()))?;
        }
        Ok(())
    }
}
