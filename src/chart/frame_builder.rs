use tracing::{trace, warn};

use crate::core::{PlotArea, RiskPoint, RiskScale, RiskTier, SCORE_MAX, SCORE_MIN, Viewport};
use crate::render::{
    CirclePrimitive, LinePrimitive, PolylinePrimitive, RenderFrame, TextHAlign, TextPrimitive,
};

use super::{ChartStyle, TIER_PALETTE};

/// One point after coercion and projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedPoint {
    pub index: usize,
    /// Coerced, unclamped score. Drives the tier.
    pub score: f64,
    pub tier: RiskTier,
    pub x: f64,
    pub y: f64,
}

/// Coerces and projects every point, preserving input order.
///
/// Infinite scores sit on the matching boundary; other scores that cannot be
/// coerced are drawn at the lower boundary.
#[must_use]
pub fn project_points(points: &[RiskPoint], area: PlotArea) -> Vec<ProjectedPoint> {
    let scale = RiskScale::new(area, points.len());
    points
        .iter()
        .enumerate()
        .map(|(index, point)| {
            let score = drawing_score(index, point);
            ProjectedPoint {
                index,
                score,
                tier: RiskTier::classify(score),
                x: scale.index_to_pixel(index),
                y: scale.score_to_pixel(score),
            }
        })
        .collect()
}

fn drawing_score(index: usize, point: &RiskPoint) -> f64 {
    match point.risk_score.coerce() {
        Ok(score) => score,
        Err(err) => match point.risk_score.parsed_number() {
            Some(value) if value == f64::INFINITY => SCORE_MAX,
            Some(value) if value == f64::NEG_INFINITY => SCORE_MIN,
            _ => {
                warn!(index, error = %err, "unusable risk score, drawing at lower bound");
                SCORE_MIN
            }
        },
    }
}

pub(super) fn build_frame(
    style: &ChartStyle,
    points: &[RiskPoint],
    viewport: Viewport,
) -> RenderFrame {
    let area = PlotArea::from_viewport(viewport, style.padding);
    let mut frame = RenderFrame::new(viewport, style.background_color);

    append_grid(&mut frame, style, area);
    append_axes(&mut frame, style, area);

    if points.is_empty() {
        let (center_x, center_y) = area.center();
        frame.texts.push(TextPrimitive::new(
            style.placeholder_text.clone(),
            center_x,
            center_y - style.label_font_size_px / 2.0,
            style.label_font_size_px,
            style.placeholder_color,
            TextHAlign::Center,
        ));
        trace!("empty risk history, placeholder drawn");
        return frame;
    }

    let projected = project_points(points, area);
    if projected.len() >= 2 {
        frame.polylines.push(PolylinePrimitive::new(
            projected.iter().map(|point| (point.x, point.y)).collect(),
            style.series_line_width,
            style.series_line_color,
        ));
    }
    frame.circles.extend(projected.iter().map(|point| {
        CirclePrimitive::new(
            point.x,
            point.y,
            style.marker_radius_px,
            TIER_PALETTE.color_for(point.tier),
        )
    }));

    trace!(
        points = projected.len(),
        lines = frame.lines.len(),
        texts = frame.texts.len(),
        "risk chart frame built"
    );
    frame
}

fn append_grid(frame: &mut RenderFrame, style: &ChartStyle, area: PlotArea) {
    let intervals = style.grid_line_count.saturating_sub(1).max(1) as f64;
    for i in 0..style.grid_line_count {
        let fraction = i as f64 / intervals;
        let y = area.y0 + fraction * area.height();
        frame.lines.push(LinePrimitive::new(
            area.x0,
            y,
            area.x1,
            y,
            style.grid_line_width,
            style.grid_line_color,
        ));
        frame.texts.push(TextPrimitive::new(
            grid_label(SCORE_MAX - fraction * (SCORE_MAX - SCORE_MIN)),
            style.label_offset_px,
            y - style.label_font_size_px * 0.6,
            style.label_font_size_px,
            style.label_color,
            TextHAlign::Left,
        ));
    }
}

// Left and bottom borders only.
fn append_axes(frame: &mut RenderFrame, style: &ChartStyle, area: PlotArea) {
    frame.lines.push(LinePrimitive::new(
        area.x0,
        area.y0,
        area.x0,
        area.y1,
        style.axis_line_width,
        style.axis_color,
    ));
    frame.lines.push(LinePrimitive::new(
        area.x0,
        area.y1,
        area.x1,
        area.y1,
        style.axis_line_width,
        style.axis_color,
    ));
}

fn grid_label(value: f64) -> String {
    let rounded = value.round();
    if (value - rounded).abs() < 1e-9 {
        format!("{rounded:.0}")
    } else {
        format!("{value:.1}")
    }
}
