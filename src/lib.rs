//! riskview: risk-history chart engine and request layer for a fraud-scoring
//! dashboard.
//!
//! `chart` turns an ordered list of risk scores into a deterministic
//! `RenderFrame` for any `Renderer` backend. `client` talks to the scoring
//! backend and normalizes every failure into a displayable `ApiError`.

pub mod chart;
pub mod client;
pub mod config;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use chart::{ChartStyle, RiskChart, render_risk_history};
pub use client::{ApiClient, Reachability};
pub use config::DashboardConfig;
pub use error::{ApiError, ApiResult, ChartError, ChartResult, ValidationError};
