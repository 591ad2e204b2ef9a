//! Labelled-field extraction, dispatched on document type.
//!
//! Each document type owns a table of [`FieldRule`]s. Rules run
//! independently: a label that is missing, or a value that does not parse,
//! leaves that one field absent and never affects the others.

use std::sync::LazyLock;

use brokerflow_core::{DocumentType, Field, FieldMap, FieldValue};
use regex::Regex;

/// How a rule turns its first capture group into a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capture {
    /// First match, trimmed text. Empty text is absent.
    Text,
    /// First match, parsed as an integer.
    Integer,
    /// Every match in order of appearance, each parsed as an integer.
    AllIntegers,
}

/// A single labelled-field rule.
#[derive(Debug)]
pub struct FieldRule {
    pub field: Field,
    pub capture: Capture,
    pattern: Regex,
}

impl FieldRule {
    fn new(field: Field, capture: Capture, pattern: &str) -> Self {
        Self {
            field,
            capture,
            pattern: Regex::new(pattern).unwrap(),
        }
    }

    /// Run this rule over `text`.
    pub fn apply(&self, text: &str) -> Option<FieldValue> {
        match self.capture {
            Capture::Text => {
                let raw = self.pattern.captures(text)?.get(1)?.as_str().trim();
                (!raw.is_empty()).then(|| FieldValue::Text(raw.to_string()))
            }
            Capture::Integer => {
                let raw = self.pattern.captures(text)?.get(1)?.as_str();
                parse_integer(raw).map(FieldValue::Integer)
            }
            Capture::AllIntegers => {
                let values: Vec<i64> = self
                    .pattern
                    .captures_iter(text)
                    .filter_map(|caps| caps.get(1))
                    .filter_map(|m| parse_integer(m.as_str()))
                    .collect();
                (!values.is_empty()).then_some(FieldValue::Integers(values))
            }
        }
    }
}

/// Currency-prefixed figure with well-formed thousands groups.
const CURRENCY_FIGURE: &str = r"\$(\d{1,3}(?:,\d{3})*)";

static LOAN_APPLICATION_RULES: LazyLock<Vec<FieldRule>> = LazyLock::new(|| {
    vec![
        FieldRule::new(Field::BorrowerName, Capture::Text, r"Name:[ \t]*([A-Za-z][A-Za-z \t]*)"),
        FieldRule::new(Field::AnnualIncome, Capture::Integer, r"Annual Income:\s*\$?([\d,]+)"),
        FieldRule::new(Field::LoanAmount, Capture::Integer, r"Loan Amount:\s*\$?([\d,]+)"),
        FieldRule::new(Field::PropertyAddress, Capture::Text, r"Property Address:[ \t]*([^\n]+)"),
        FieldRule::new(Field::LoanType, Capture::Text, r"Loan Type:[ \t]*([^\n]+)"),
    ]
});

static CREDIT_REPORT_RULES: LazyLock<Vec<FieldRule>> = LazyLock::new(|| {
    vec![
        FieldRule::new(Field::FicoScore, Capture::Integer, r"FICO Score:\s*(\d+)"),
        FieldRule::new(Field::CreditScores, Capture::AllIntegers, r"Score:\s*(\d+)"),
        FieldRule::new(Field::AccountBalances, Capture::AllIntegers, CURRENCY_FIGURE),
    ]
});

static APPRAISAL_REPORT_RULES: LazyLock<Vec<FieldRule>> = LazyLock::new(|| {
    vec![
        FieldRule::new(Field::AppraisedValue, Capture::Integer, r"Appraised Value:\s*\$?([\d,]+)"),
        FieldRule::new(Field::SquareFeet, Capture::Integer, r"Square Feet:\s*([\d,]+)"),
        FieldRule::new(Field::Bedrooms, Capture::Integer, r"Bedrooms:\s*(\d+)"),
        FieldRule::new(Field::ComparableSales, Capture::AllIntegers, CURRENCY_FIGURE),
    ]
});

/// The rule table for a document type. Empty for types without fields.
pub fn rules_for(document_type: DocumentType) -> &'static [FieldRule] {
    match document_type {
        DocumentType::LoanApplication => LOAN_APPLICATION_RULES.as_slice(),
        DocumentType::CreditReport => CREDIT_REPORT_RULES.as_slice(),
        DocumentType::AppraisalReport => APPRAISAL_REPORT_RULES.as_slice(),
        DocumentType::BankStatement | DocumentType::Unknown => &[],
    }
}

/// Extract every field defined for `document_type` that can be found in `text`.
pub fn extract_fields(text: &str, document_type: DocumentType) -> FieldMap {
    rules_for(document_type)
        .iter()
        .filter_map(|rule| rule.apply(text).map(|value| (rule.field, value)))
        .collect()
}

/// Parse an integer after stripping thousands separators and currency symbols.
///
/// Returns `None` for empty digit runs or values that overflow `i64`.
pub fn parse_integer(raw: &str) -> Option<i64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, ',' | '$'))
        .collect();
    cleaned.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOAN_APP: &str = "UNIFORM RESIDENTIAL LOAN APPLICATION\n\
        Borrower Name: Jane Q Smith\n\
        SSN: 123-45-6789\n\
        Annual Income: $85,000\n\
        Loan Amount: $320,500\n\
        Property Address: 12 Elm Street, Austin, TX 78701\n\
        Loan Type: Conventional 30-Year Fixed\n";

    const CREDIT: &str = "CREDIT REPORT\n\
        FICO Score: 712\n\
        Experian Score: 705\n\
        Equifax Score: 720\n\
        Mortgage balance: $245,000\n\
        Auto loan balance: $12,300\n\
        Card balance: $12,300\n";

    const APPRAISAL: &str = "APPRAISAL REPORT\n\
        Appraised Value: $410,000\n\
        Square Feet: 2,050\n\
        Bedrooms: 3\n\
        Comparable Sales:\n\
        123 Oak St - $405,000\n\
        456 Pine Ave - $415,500\n";

    #[test]
    fn loan_application_fields() {
        let f = extract_fields(LOAN_APP, DocumentType::LoanApplication);
        assert_eq!(f[&Field::BorrowerName], FieldValue::Text("Jane Q Smith".into()));
        assert_eq!(f[&Field::AnnualIncome], FieldValue::Integer(85_000));
        assert_eq!(f[&Field::LoanAmount], FieldValue::Integer(320_500));
        assert_eq!(
            f[&Field::PropertyAddress],
            FieldValue::Text("12 Elm Street, Austin, TX 78701".into())
        );
        assert_eq!(
            f[&Field::LoanType],
            FieldValue::Text("Conventional 30-Year Fixed".into())
        );
    }

    #[test]
    fn name_does_not_run_into_next_line() {
        let f = extract_fields("Name: John Doe\nAnnual Income: 50000", DocumentType::LoanApplication);
        assert_eq!(f[&Field::BorrowerName], FieldValue::Text("John Doe".into()));
        assert_eq!(f[&Field::AnnualIncome], FieldValue::Integer(50_000));
    }

    #[test]
    fn blank_values_are_absent() {
        for (text, field) in [
            ("Loan Type:   \n", Field::LoanType),
            ("Property Address:\r\n", Field::PropertyAddress),
            ("Name: 123", Field::BorrowerName),
        ] {
            let f = extract_fields(text, DocumentType::LoanApplication);
            assert!(!f.contains_key(&field), "{field} extracted from {text:?}");
        }

        let text = "Name: 123\nLoan Type:   \nProperty Address:\r\nLoan Amount: $150,000\n";
        let f = extract_fields(text, DocumentType::LoanApplication);
        assert_eq!(f.len(), 1);
        assert_eq!(f[&Field::LoanAmount], FieldValue::Integer(150_000));
    }

    #[test]
    fn missing_label_leaves_field_absent() {
        let text = "Loan Application\nName: John Doe\nLoan Amount: $200,000\n";
        let f = extract_fields(text, DocumentType::LoanApplication);
        assert!(!f.contains_key(&Field::AnnualIncome));
        assert!(!f.contains_key(&Field::PropertyAddress));
        assert_eq!(f[&Field::LoanAmount], FieldValue::Integer(200_000));
    }

    #[test]
    fn malformed_number_is_absent_not_fatal() {
        let text = "Annual Income: $,,,\nLoan Amount: 99999999999999999999999\nLoan Type: FHA";
        let f = extract_fields(text, DocumentType::LoanApplication);
        assert!(!f.contains_key(&Field::AnnualIncome));
        assert!(!f.contains_key(&Field::LoanAmount));
        assert_eq!(f[&Field::LoanType], FieldValue::Text("FHA".into()));
    }

    #[test]
    fn credit_report_fields() {
        let f = extract_fields(CREDIT, DocumentType::CreditReport);
        assert_eq!(f[&Field::FicoScore], FieldValue::Integer(712));
        assert_eq!(
            f[&Field::CreditScores],
            FieldValue::Integers(vec![712, 705, 720])
        );
        // Duplicates kept, order of appearance preserved.
        assert_eq!(
            f[&Field::AccountBalances],
            FieldValue::Integers(vec![245_000, 12_300, 12_300])
        );
    }

    #[test]
    fn appraisal_fields() {
        let f = extract_fields(APPRAISAL, DocumentType::AppraisalReport);
        assert_eq!(f[&Field::AppraisedValue], FieldValue::Integer(410_000));
        assert_eq!(f[&Field::SquareFeet], FieldValue::Integer(2_050));
        assert_eq!(f[&Field::Bedrooms], FieldValue::Integer(3));
        assert_eq!(
            f[&Field::ComparableSales],
            FieldValue::Integers(vec![410_000, 405_000, 415_500])
        );
    }

    #[test]
    fn types_without_rules_extract_nothing() {
        assert!(extract_fields(LOAN_APP, DocumentType::BankStatement).is_empty());
        assert!(extract_fields(LOAN_APP, DocumentType::Unknown).is_empty());
    }

    #[test]
    fn keys_are_within_the_type_field_set() {
        for (text, doc_type) in [
            (LOAN_APP, DocumentType::LoanApplication),
            (CREDIT, DocumentType::CreditReport),
            (APPRAISAL, DocumentType::AppraisalReport),
        ] {
            let f = extract_fields(text, doc_type);
            assert!(!f.is_empty());
            assert!(f.keys().all(|k| doc_type.fields().contains(k)));
        }
    }

    #[test]
    fn rule_tables_match_field_sets() {
        for doc_type in DocumentType::ALL {
            let ruled: Vec<Field> = rules_for(doc_type).iter().map(|r| r.field).collect();
            assert_eq!(ruled, doc_type.fields());
        }
    }

    #[test]
    fn parse_integer_strips_separators() {
        assert_eq!(parse_integer("1,234,567"), Some(1_234_567));
        assert_eq!(parse_integer("$85,000"), Some(85_000));
        assert_eq!(parse_integer(","), None);
        assert_eq!(parse_integer(""), None);
        assert_eq!(parse_integer("12a"), None);
    }
}
