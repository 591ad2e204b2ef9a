//! Aggregate analyses over batches of extraction results.
//!
//! Every analysis is a pure function of its batch. Sub-analyses that find
//! none of the documents they need return [`Analysis::NoData`] rather than
//! an error.

pub mod borrower;
pub mod lender;
pub mod portfolio;
pub mod property;
pub mod report;
pub mod stats;

#[cfg(test)]
mod testutil;

use std::collections::BTreeMap;

use brokerflow_core::{DocumentType, ExtractionResult};
use serde::Serialize;
use tracing::info;

pub use borrower::{BorrowerInsight, borrower_profile};
pub use lender::{LenderInsight, lender_performance};
pub use portfolio::{PortfolioInsight, portfolio_insights};
pub use property::{PropertyInsight, property_market};
pub use report::Analysis;

pub const NO_DOCUMENTS: &str = "No documents available for analysis";

/// Every analysis over one batch, plus document counts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FullReport {
    pub total_documents: usize,
    pub borrower_insights: Analysis<BorrowerInsight>,
    pub lender_insights: Analysis<LenderInsight>,
    pub property_insights: Analysis<PropertyInsight>,
    pub portfolio_insights: PortfolioInsight,
    pub documents_by_type: BTreeMap<DocumentType, usize>,
}

/// Count of results per document type. Types absent from the batch are omitted.
pub fn documents_by_type(batch: &[ExtractionResult]) -> BTreeMap<DocumentType, usize> {
    let mut counts = BTreeMap::new();
    for r in batch {
        *counts.entry(r.document_type).or_insert(0) += 1;
    }
    counts
}

/// Run every analysis once and bundle the results.
pub fn full_report(batch: &[ExtractionResult]) -> Analysis<FullReport> {
    if batch.is_empty() {
        return Analysis::no_data(NO_DOCUMENTS);
    }

    let borrower_insights = borrower_profile(batch);
    let lender_insights = lender_performance(batch);
    let property_insights = property_market(batch);
    let portfolio_insights =
        portfolio::synthesize(batch, &borrower_insights, &lender_insights, &property_insights);

    info!(documents = batch.len(), "generated full report");

    Analysis::Ready(FullReport {
        total_documents: batch.len(),
        borrower_insights,
        lender_insights,
        property_insights,
        portfolio_insights,
        documents_by_type: documents_by_type(batch),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{appraisal, bank_statement, credit_report, loan_app};

    #[test]
    fn empty_batch_has_no_full_report() {
        assert_eq!(full_report(&[]), Analysis::no_data(NO_DOCUMENTS));
    }

    #[test]
    fn counts_by_type() {
        let batch = vec![
            loan_app("a", None, None, None),
            bank_statement("s1"),
            bank_statement("s2"),
        ];
        let counts = documents_by_type(&batch);
        assert_eq!(counts.len(), 2);
        assert_eq!(counts[&DocumentType::LoanApplication], 1);
        assert_eq!(counts[&DocumentType::BankStatement], 2);
        assert!(!counts.contains_key(&DocumentType::CreditReport));
    }

    #[test]
    fn full_report_matches_individual_analyses() {
        let batch = vec![
            loan_app("a", Some(75_000), Some(300_000), Some("Conventional")),
            credit_report("r", Some(720)),
            appraisal("p", Some(350_000), Some(1_750), Some(3)),
        ];
        let report = full_report(&batch).into_ready().unwrap();
        assert_eq!(report.total_documents, 3);
        assert_eq!(report.borrower_insights, borrower_profile(&batch));
        assert_eq!(report.lender_insights, lender_performance(&batch));
        assert_eq!(report.property_insights, property_market(&batch));
        assert_eq!(report.portfolio_insights.key_metrics.document_types, 3);
    }

    #[test]
    fn full_report_keeps_no_data_sections() {
        let batch = vec![bank_statement("s")];
        let report = full_report(&batch).into_ready().unwrap();
        assert!(report.borrower_insights.is_no_data());
        assert!(report.lender_insights.is_no_data());
        assert!(report.property_insights.is_no_data());

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["documents_by_type"]["bank_statement"], 1);
        assert_eq!(json["property_insights"]["status"], "no_data");
    }
}
