//! Portfolio risk classification types

use serde::{Deserialize, Serialize};

/// Risk level assessment for a well, classified from its minimum
/// drilling-window margin.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum RiskLevel {
    Low = 0,
    Medium = 1,
    High = 2,
}

impl RiskLevel {
    /// Numeric score used for the portfolio weighted average
    /// (Low = 1, Medium = 2, High = 3).
    pub fn score(self) -> f64 {
        match self {
            Self::Low => 1.0,
            Self::Medium => 2.0,
            Self::High => 3.0,
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::Medium => write!(f, "MEDIUM"),
            Self::High => write!(f, "HIGH"),
        }
    }
}

impl Default for RiskLevel {
    fn default() -> Self {
        Self::Low
    }
}

/// Per-well risk classification and contingency estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WellRisk {
    pub well_id: String,
    pub risk_level: RiskLevel,
    /// Minimum FG − PP margin over all depths (psi); `None` when the well
    /// had no finite margin samples.
    pub min_margin_psi: Option<f64>,
    pub contingency_cost_usd: f64,
}

/// Aggregate risk picture across a well portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioRiskSummary {
    pub total_wells: usize,
    pub high_risk_count: usize,
    pub medium_risk_count: usize,
    pub low_risk_count: usize,
    /// high_risk_count / total_wells, 0.0 for an empty portfolio
    pub high_risk_percentage: f64,
    pub total_contingency_cost_usd: f64,
    /// Mean of per-well risk scores (Low = 1 .. High = 3), 0.0 when empty
    pub average_risk_score: f64,
    pub wells: Vec<WellRisk>,
}

impl PortfolioRiskSummary {
    /// All-zero summary for an empty portfolio.
    pub fn empty() -> Self {
        Self {
            total_wells: 0,
            high_risk_count: 0,
            medium_risk_count: 0,
            low_risk_count: 0,
            high_risk_percentage: 0.0,
            total_contingency_cost_usd: 0.0,
            average_risk_score: 0.0,
            wells: Vec::new(),
        }
    }
}
