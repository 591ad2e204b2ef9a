//! Borrower profile analysis: income and credit tiers, loan demand.

use brokerflow_core::{DocumentType, ExtractionResult, Field};
use serde::Serialize;
use tracing::debug;

use crate::report::Analysis;
use crate::stats::{Histogram, dollar_range, mean, median, round2};

pub const NO_BORROWER_DATA: &str = "No borrower data found";

/// Annual income bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncomeTier {
    /// Below 50,000.
    Low,
    /// 50,000 to 100,000 inclusive.
    Moderate,
    /// Above 100,000.
    High,
}

impl IncomeTier {
    pub fn of(income: i64) -> Self {
        if income < 50_000 {
            Self::Low
        } else if income <= 100_000 {
            Self::Moderate
        } else {
            Self::High
        }
    }
}

/// Credit score bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreditTier {
    /// Below 650.
    Poor,
    /// 650–699.
    Fair,
    /// 700–749.
    Good,
    /// 750 and above.
    Excellent,
}

impl CreditTier {
    pub fn of(score: i64) -> Self {
        match score {
            s if s < 650 => Self::Poor,
            s if s < 700 => Self::Fair,
            s if s < 750 => Self::Good,
            _ => Self::Excellent,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IncomeAnalysis {
    pub average_income: f64,
    pub median_income: f64,
    pub min_income: i64,
    pub max_income: i64,
    pub income_range: String,
    pub high_income_borrowers: usize,
    pub moderate_income_borrowers: usize,
    pub low_income_borrowers: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreditScoreAnalysis {
    pub average_score: f64,
    pub median_score: f64,
    pub excellent_credit: usize,
    pub good_credit: usize,
    pub fair_credit: usize,
    pub poor_credit: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoanTypeCount {
    pub loan_type: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoanDemandAnalysis {
    pub most_popular_loan_type: String,
    /// Counts per loan type, in first-seen order.
    pub loan_type_distribution: Vec<LoanTypeCount>,
    /// Zero when no loan amounts were extracted.
    pub average_loan_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BorrowerInsight {
    /// Loan applications plus credit reports.
    pub total_borrowers: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub income_analysis: Option<IncomeAnalysis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit_score_analysis: Option<CreditScoreAnalysis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loan_demand_analysis: Option<LoanDemandAnalysis>,
    pub opportunities: Vec<String>,
}

impl BorrowerInsight {
    pub fn poor_credit(&self) -> usize {
        self.credit_score_analysis.as_ref().map_or(0, |c| c.poor_credit)
    }

    pub fn excellent_credit(&self) -> usize {
        self.credit_score_analysis
            .as_ref()
            .map_or(0, |c| c.excellent_credit)
    }

    pub fn low_income(&self) -> usize {
        self.income_analysis
            .as_ref()
            .map_or(0, |i| i.low_income_borrowers)
    }

    pub fn high_income(&self) -> usize {
        self.income_analysis
            .as_ref()
            .map_or(0, |i| i.high_income_borrowers)
    }

    pub fn average_income(&self) -> Option<f64> {
        self.income_analysis.as_ref().map(|i| i.average_income)
    }
}

/// Analyse borrower profiles across loan applications and credit reports.
///
/// Statistics only count documents where the field was extracted.
pub fn borrower_profile(batch: &[ExtractionResult]) -> Analysis<BorrowerInsight> {
    let loan_apps: Vec<&ExtractionResult> = batch
        .iter()
        .filter(|r| r.is(DocumentType::LoanApplication))
        .collect();
    let credit_reports: Vec<&ExtractionResult> = batch
        .iter()
        .filter(|r| r.is(DocumentType::CreditReport))
        .collect();

    if loan_apps.is_empty() && credit_reports.is_empty() {
        return Analysis::no_data(NO_BORROWER_DATA);
    }
    debug!(
        loan_applications = loan_apps.len(),
        credit_reports = credit_reports.len(),
        "analysing borrower profiles"
    );

    let incomes: Vec<i64> = loan_apps
        .iter()
        .filter_map(|r| r.integer(Field::AnnualIncome))
        .collect();
    let loan_amounts: Vec<i64> = loan_apps
        .iter()
        .filter_map(|r| r.integer(Field::LoanAmount))
        .collect();
    let loan_types: Histogram<String> = loan_apps
        .iter()
        .filter_map(|r| r.text(Field::LoanType))
        .map(str::to_string)
        .collect();
    let scores: Vec<i64> = credit_reports
        .iter()
        .filter_map(|r| r.integer(Field::FicoScore))
        .collect();

    let income_analysis = analyse_incomes(&incomes);
    let credit_score_analysis = analyse_scores(&scores);
    let loan_demand_analysis = analyse_loan_demand(loan_types, &loan_amounts);
    let opportunities =
        borrower_opportunities(income_analysis.as_ref(), credit_score_analysis.as_ref());

    Analysis::Ready(BorrowerInsight {
        total_borrowers: loan_apps.len() + credit_reports.len(),
        income_analysis,
        credit_score_analysis,
        loan_demand_analysis,
        opportunities,
    })
}

fn analyse_incomes(incomes: &[i64]) -> Option<IncomeAnalysis> {
    let values: Vec<f64> = incomes.iter().map(|&i| i as f64).collect();
    let average = mean(&values)?;
    let middle = median(&values)?;
    let min_income = *incomes.iter().min()?;
    let max_income = *incomes.iter().max()?;

    let count = |tier: IncomeTier| incomes.iter().filter(|&&i| IncomeTier::of(i) == tier).count();

    Some(IncomeAnalysis {
        average_income: round2(average),
        median_income: round2(middle),
        min_income,
        max_income,
        income_range: dollar_range(min_income, max_income),
        high_income_borrowers: count(IncomeTier::High),
        moderate_income_borrowers: count(IncomeTier::Moderate),
        low_income_borrowers: count(IncomeTier::Low),
    })
}

fn analyse_scores(scores: &[i64]) -> Option<CreditScoreAnalysis> {
    let values: Vec<f64> = scores.iter().map(|&s| s as f64).collect();
    let average = mean(&values)?;
    let middle = median(&values)?;

    let count = |tier: CreditTier| scores.iter().filter(|&&s| CreditTier::of(s) == tier).count();

    Some(CreditScoreAnalysis {
        average_score: round2(average),
        median_score: round2(middle),
        excellent_credit: count(CreditTier::Excellent),
        good_credit: count(CreditTier::Good),
        fair_credit: count(CreditTier::Fair),
        poor_credit: count(CreditTier::Poor),
    })
}

fn analyse_loan_demand(
    loan_types: Histogram<String>,
    loan_amounts: &[i64],
) -> Option<LoanDemandAnalysis> {
    let most_popular_loan_type = loan_types.mode()?.clone();
    let amounts: Vec<f64> = loan_amounts.iter().map(|&a| a as f64).collect();

    Some(LoanDemandAnalysis {
        most_popular_loan_type,
        loan_type_distribution: loan_types
            .into_entries()
            .into_iter()
            .map(|(loan_type, count)| LoanTypeCount { loan_type, count })
            .collect(),
        average_loan_amount: mean(&amounts).map_or(0.0, round2),
    })
}

fn borrower_opportunities(
    income: Option<&IncomeAnalysis>,
    credit: Option<&CreditScoreAnalysis>,
) -> Vec<String> {
    let mut opportunities = Vec::new();

    if let Some(i) = income
        && i.high_income_borrowers > 0
    {
        opportunities.push(format!(
            "Target {} high-income borrowers for jumbo loans",
            i.high_income_borrowers
        ));
    }

    if let Some(c) = credit {
        if c.excellent_credit > 0 {
            opportunities.push(format!(
                "Offer premium rates to {} borrowers with excellent credit",
                c.excellent_credit
            ));
        }
        if c.fair_credit > 0 {
            opportunities.push(format!(
                "Develop credit improvement programs for {} fair-credit borrowers",
                c.fair_credit
            ));
        }
    }

    opportunities
}
