//! Keyword-rule classification for mortgage documents.
//!
//! Rules are evaluated in priority order against the lower-cased text; the
//! first rule with any trigger present wins. Documents frequently share
//! vocabulary (a credit report may mention a "loan", an application may
//! mention a "balance"), so the order decides which signal is authoritative.

use brokerflow_core::DocumentType;

/// One category rule: the label and the substrings that trigger it.
#[derive(Debug, Clone, Copy)]
pub struct ClassificationRule {
    pub document_type: DocumentType,
    pub triggers: &'static [&'static str],
}

/// Category rules in priority order. Triggers are lower case.
pub const RULES: &[ClassificationRule] = &[
    ClassificationRule {
        document_type: DocumentType::LoanApplication,
        triggers: &["loan application", "uniform residential", "1003"],
    },
    ClassificationRule {
        document_type: DocumentType::CreditReport,
        triggers: &["credit report", "fico", "experian", "equifax"],
    },
    ClassificationRule {
        document_type: DocumentType::AppraisalReport,
        triggers: &["appraisal", "property value", "comparable sales"],
    },
    ClassificationRule {
        document_type: DocumentType::BankStatement,
        triggers: &["bank statement", "account summary", "balance"],
    },
];

/// Classification outcome with the trigger that decided it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub document_type: DocumentType,
    /// `None` when no rule matched and the type fell back to `Unknown`.
    pub trigger: Option<&'static str>,
}

/// Classify `text`, reporting which trigger matched.
pub fn classify_explained(text: &str) -> Classification {
    let lower = text.to_lowercase();

    for rule in RULES {
        if let Some(trigger) = rule.triggers.iter().find(|t| lower.contains(**t)) {
            return Classification {
                document_type: rule.document_type,
                trigger: Some(*trigger),
            };
        }
    }

    Classification {
        document_type: DocumentType::Unknown,
        trigger: None,
    }
}

/// Classify `text` into exactly one [`DocumentType`]. Never fails.
pub fn classify(text: &str) -> DocumentType {
    classify_explained(text).document_type
}
