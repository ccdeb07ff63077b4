//! Portfolio Risk Calculator
//!
//! Classifies each well's risk level from its minimum drilling-window
//! margin and aggregates contingency cost across the portfolio.
//!
//! Margin comparisons are strict `<` throughout (shared with the anomaly
//! detector): a minimum margin of exactly 200 psi classifies Medium, 199
//! classifies High. A well with no finite margin samples classifies High —
//! an unknown window is treated conservatively, never as safe.

use statrs::statistics::Statistics;
use tracing::debug;

use crate::types::{
    risk_thresholds, PortfolioRiskSummary, RiskLevel, ValidationError, WellRecord, WellRisk,
};

/// Minimum FG − PP margin over all depths, ignoring non-finite samples.
fn min_margin(pp: &[f64], fg: &[f64]) -> Option<f64> {
    pp.iter()
        .zip(fg.iter())
        .map(|(&p, &f)| f - p)
        .filter(|m| m.is_finite())
        .fold(None, |acc, m| Some(acc.map_or(m, |a: f64| a.min(m))))
}

/// Classify a margin into a risk tier.
fn classify(margin: Option<f64>) -> RiskLevel {
    match margin {
        Some(m) if m < risk_thresholds::HIGH_RISK_MARGIN_PSI => RiskLevel::High,
        Some(m) if m < risk_thresholds::MEDIUM_RISK_MARGIN_PSI => RiskLevel::Medium,
        Some(_) => RiskLevel::Low,
        // No measurable window at all: conservative classification.
        None => RiskLevel::High,
    }
}

/// Contingency budget for a risk tier.
fn contingency_cost(level: RiskLevel) -> f64 {
    let increment = match level {
        RiskLevel::High => risk_thresholds::HIGH_RISK_INCREMENT_USD,
        RiskLevel::Medium => risk_thresholds::MEDIUM_RISK_INCREMENT_USD,
        RiskLevel::Low => 0.0,
    };
    risk_thresholds::BASE_CONTINGENCY_USD + increment
}

/// Assess one well from its PP/FG result curves.
pub fn assess_well(well: &WellRecord) -> Result<WellRisk, ValidationError> {
    well.validate()?;
    let margin = min_margin(&well.results.pp, &well.results.fg);
    let risk_level = classify(margin);
    Ok(WellRisk {
        well_id: well.id.clone(),
        risk_level,
        min_margin_psi: margin,
        contingency_cost_usd: contingency_cost(risk_level),
    })
}

/// Aggregate per-well assessments into a portfolio summary.
///
/// An empty portfolio returns the all-zero summary rather than dividing by
/// zero.
pub fn summarize(wells: &[WellRecord]) -> Result<PortfolioRiskSummary, ValidationError> {
    if wells.is_empty() {
        return Ok(PortfolioRiskSummary::empty());
    }

    let assessments: Vec<WellRisk> = wells
        .iter()
        .map(assess_well)
        .collect::<Result<_, _>>()?;

    let total_wells = assessments.len();
    let high_risk_count = assessments
        .iter()
        .filter(|w| w.risk_level == RiskLevel::High)
        .count();
    let medium_risk_count = assessments
        .iter()
        .filter(|w| w.risk_level == RiskLevel::Medium)
        .count();
    let low_risk_count = total_wells - high_risk_count - medium_risk_count;

    let total_contingency_cost_usd = assessments.iter().map(|w| w.contingency_cost_usd).sum();
    let average_risk_score =
        Statistics::mean(assessments.iter().map(|w| w.risk_level.score()));

    debug!(
        total_wells,
        high_risk_count, medium_risk_count, low_risk_count, "portfolio risk summarized"
    );

    Ok(PortfolioRiskSummary {
        total_wells,
        high_risk_count,
        medium_risk_count,
        low_risk_count,
        high_risk_percentage: high_risk_count as f64 / total_wells as f64,
        total_contingency_cost_usd,
        average_risk_score,
        wells: assessments,
    })
}
