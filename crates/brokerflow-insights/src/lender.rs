//! Lender performance, grouped by a lender proxy.
//!
//! Loan applications carry no lender identifier, so the loan type stands in
//! for the lender. [`LENDER_PROXY`] names the field used for grouping.

use brokerflow_core::{DocumentType, ExtractionResult, Field};
use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

use crate::report::Analysis;
use crate::stats::{mean, round2, round_to};

pub const NO_LOAN_DATA: &str = "No loan application data found";

/// Field whose value identifies the lender group.
pub const LENDER_PROXY: Field = Field::LoanType;

/// Group label for applications with no proxy value.
const UNKNOWN_LENDER: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LenderPerformance {
    pub lender: String,
    /// All applications in the group, including those without a loan amount.
    pub total_applications: usize,
    /// Mean over positive loan amounts only.
    pub average_loan_amount: f64,
    /// Sum of positive loan amounts, widened past `i64`.
    pub total_volume: i128,
    /// Share of all loan applications, in percent, one decimal.
    pub market_share_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LenderInsight {
    /// Groups in first-seen order.
    pub lender_performance: Vec<LenderPerformance>,
    pub recommendations: Vec<String>,
}

#[derive(Default)]
struct Group {
    applications: usize,
    amounts: Vec<i64>,
}

/// Aggregate loan applications per lender group and rank the groups.
pub fn lender_performance(batch: &[ExtractionResult]) -> Analysis<LenderInsight> {
    let loan_apps: Vec<&ExtractionResult> = batch
        .iter()
        .filter(|r| r.is(DocumentType::LoanApplication))
        .collect();

    if loan_apps.is_empty() {
        return Analysis::no_data(NO_LOAN_DATA);
    }

    let mut groups: IndexMap<&str, Group> = IndexMap::new();
    for app in &loan_apps {
        let lender = app.text(LENDER_PROXY).unwrap_or(UNKNOWN_LENDER);
        let group = groups.entry(lender).or_default();
        group.applications += 1;
        if let Some(amount) = app.integer(Field::LoanAmount).filter(|&a| a > 0) {
            group.amounts.push(amount);
        }
    }
    debug!(groups = groups.len(), applications = loan_apps.len(), "grouped lenders");

    let total = loan_apps.len() as f64;
    let lender_performance: Vec<LenderPerformance> = groups
        .iter()
        .filter_map(|(lender, g)| {
            let amounts: Vec<f64> = g.amounts.iter().map(|&a| a as f64).collect();
            let average = mean(&amounts)?;
            Some(LenderPerformance {
                lender: lender.to_string(),
                total_applications: g.applications,
                average_loan_amount: round2(average),
                total_volume: g.amounts.iter().map(|&a| i128::from(a)).sum(),
                market_share_pct: round_to(g.applications as f64 / total * 100.0, 1),
            })
        })
        .collect();

    let recommendations = lender_recommendations(&lender_performance);

    Analysis::Ready(LenderInsight {
        lender_performance,
        recommendations,
    })
}

/// First group holding the strict maximum of `key`.
fn top_by<F>(groups: &[LenderPerformance], key: F) -> Option<&LenderPerformance>
where
    F: Fn(&LenderPerformance) -> f64,
{
    let mut best: Option<&LenderPerformance> = None;
    for g in groups {
        if best.is_none_or(|b| key(g) > key(b)) {
            best = Some(g);
        }
    }
    best
}

fn lender_recommendations(groups: &[LenderPerformance]) -> Vec<String> {
    let mut recommendations = Vec::new();

    if let Some(top) = top_by(groups, |g| g.total_volume as f64) {
        recommendations.push(format!(
            "Strengthen partnership with {} - highest volume lender",
            top.lender
        ));
    }
    if let Some(top) = top_by(groups, |g| g.average_loan_amount) {
        recommendations.push(format!("Focus on {} for high-value loans", top.lender));
    }

    recommendations
}
