//! Portfolio synthesis across the borrower, lender, and property analyses.

use std::collections::BTreeSet;

use brokerflow_core::ExtractionResult;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::borrower::{BorrowerInsight, borrower_profile};
use crate::lender::{LenderInsight, lender_performance};
use crate::property::{PropertyInsight, property_market};
use crate::report::Analysis;
use crate::stats::format_dollars;

pub const PROCESSING_SUCCESS_RATE: &str = "100%";

const STRATEGIC_OPPORTUNITIES: [&str; 3] = [
    "Expand digital application processing capabilities",
    "Develop partnerships with real estate agents",
    "Create specialized loan products for identified market segments",
];

const MITIGATION_STRATEGIES: [&str; 3] = [
    "Diversify borrower credit profiles",
    "Implement stronger income verification",
    "Monitor property value trends",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyMetrics {
    pub documents_processed: usize,
    /// Number of distinct document types in the batch.
    pub document_types: usize,
    pub processing_success_rate: String,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskAssessment {
    pub overall_risk_level: RiskLevel,
    pub risk_factors: Vec<String>,
    pub mitigation_strategies: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionItem {
    pub priority: Priority,
    pub action: String,
    pub timeline: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioInsight {
    pub executive_summary: String,
    pub key_metrics: KeyMetrics,
    pub risk_assessment: RiskAssessment,
    pub growth_opportunities: Vec<String>,
    pub action_items: Vec<ActionItem>,
}

/// Run all three analyses and synthesise them. Always produces a report.
pub fn portfolio_insights(batch: &[ExtractionResult]) -> PortfolioInsight {
    let borrower = borrower_profile(batch);
    let lender = lender_performance(batch);
    let property = property_market(batch);
    synthesize(batch, &borrower, &lender, &property)
}

/// Synthesise a portfolio report from analyses already computed over `batch`.
pub fn synthesize(
    batch: &[ExtractionResult],
    borrower: &Analysis<BorrowerInsight>,
    lender: &Analysis<LenderInsight>,
    property: &Analysis<PropertyInsight>,
) -> PortfolioInsight {
    let borrower = borrower.ready();
    let lender = lender.ready();
    let property = property.ready();

    PortfolioInsight {
        executive_summary: executive_summary(borrower, property),
        key_metrics: key_metrics(batch),
        risk_assessment: assess_risk(borrower),
        growth_opportunities: growth_opportunities(borrower, lender, property),
        action_items: action_items(),
    }
}

/// A single sentence: the parts are comma-joined clauses, not `. `-joined
/// fragments, and a batch with no parts gets explicit fallback text rather
/// than a bare period.
fn executive_summary(
    borrower: Option<&BorrowerInsight>,
    property: Option<&PropertyInsight>,
) -> String {
    let mut parts = Vec::new();

    if let Some(b) = borrower
        && b.total_borrowers > 0
    {
        parts.push(format!("Analyzed {} borrower profiles", b.total_borrowers));
    }
    if let Some(avg) = borrower.and_then(BorrowerInsight::average_income)
        && avg != 0.0
    {
        parts.push(format!("with average income of {}", format_dollars(avg)));
    }
    if let Some(avg) = property.and_then(PropertyInsight::average_value)
        && avg != 0.0
    {
        parts.push(format!("targeting properties averaging {}", format_dollars(avg)));
    }

    if parts.is_empty() {
        return "No borrower or property data available for analysis.".to_string();
    }
    format!("{}.", parts.join(", "))
}

/// Document counts and a processing timestamp for the batch.
pub fn key_metrics(batch: &[ExtractionResult]) -> KeyMetrics {
    let types: BTreeSet<_> = batch.iter().map(|r| r.document_type).collect();
    KeyMetrics {
        documents_processed: batch.len(),
        document_types: types.len(),
        processing_success_rate: PROCESSING_SUCCESS_RATE.to_string(),
        last_updated: Utc::now(),
    }
}

/// Two-step risk ladder: `Medium` needs more poor than excellent credit;
/// `High` additionally needs more low- than high-income borrowers.
pub fn assess_risk(borrower: Option<&BorrowerInsight>) -> RiskAssessment {
    let (poor, excellent, low, high) = borrower.map_or((0, 0, 0, 0), |b| {
        (b.poor_credit(), b.excellent_credit(), b.low_income(), b.high_income())
    });

    let mut level = RiskLevel::Low;
    let mut factors = Vec::new();

    if poor > excellent {
        factors.push("High concentration of poor credit borrowers".to_string());
        level = RiskLevel::Medium;
    }
    if low > high {
        factors.push("Majority are low-income borrowers".to_string());
        if level == RiskLevel::Medium {
            level = RiskLevel::High;
        }
    }

    RiskAssessment {
        overall_risk_level: level,
        risk_factors: factors,
        mitigation_strategies: MITIGATION_STRATEGIES.iter().map(|s| s.to_string()).collect(),
    }
}

fn growth_opportunities(
    borrower: Option<&BorrowerInsight>,
    lender: Option<&LenderInsight>,
    property: Option<&PropertyInsight>,
) -> Vec<String> {
    let mut opportunities = Vec::new();
    if let Some(b) = borrower {
        opportunities.extend(b.opportunities.iter().cloned());
    }
    if let Some(l) = lender {
        opportunities.extend(l.recommendations.iter().cloned());
    }
    if let Some(p) = property {
        opportunities.extend(p.investment_opportunities.iter().cloned());
    }
    opportunities.extend(STRATEGIC_OPPORTUNITIES.iter().map(|s| s.to_string()));
    opportunities
}

/// Fixed 30/60/90-day plan. Does not depend on the analysed data.
pub fn action_items() -> Vec<ActionItem> {
    [
        (
            Priority::High,
            "Review and strengthen top-performing lender relationships",
            "Next 30 days",
        ),
        (
            Priority::Medium,
            "Develop marketing campaigns for identified borrower segments",
            "Next 60 days",
        ),
        (
            Priority::Low,
            "Research new property markets for expansion",
            "Next 90 days",
        ),
    ]
    .into_iter()
    .map(|(priority, action, timeline)| ActionItem {
        priority,
        action: action.to_string(),
        timeline: timeline.to_string(),
    })
    .collect()
}
