pub mod risk;
pub mod scale;
pub mod types;

pub use risk::{
    HIGH_RISK_THRESHOLD, MEDIUM_RISK_THRESHOLD, RiskPoint, RiskTier, SCORE_MAX, SCORE_MIN,
    ScoreValue, clamp_score, parse_timestamp,
};
pub use scale::RiskScale;
pub use types::{Padding, PlotArea, Viewport};
