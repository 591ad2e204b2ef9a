//! Shared document types passed between extraction and aggregation.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Closed set of mortgage document categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    LoanApplication,
    CreditReport,
    AppraisalReport,
    BankStatement,
    Unknown,
}

impl DocumentType {
    pub const ALL: [DocumentType; 5] = [
        Self::LoanApplication,
        Self::CreditReport,
        Self::AppraisalReport,
        Self::BankStatement,
        Self::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LoanApplication => "loan_application",
            Self::CreditReport => "credit_report",
            Self::AppraisalReport => "appraisal_report",
            Self::BankStatement => "bank_statement",
            Self::Unknown => "unknown",
        }
    }

    /// Fields that may appear in an [`ExtractionResult`] of this type.
    pub fn fields(&self) -> &'static [Field] {
        match self {
            Self::LoanApplication => &[
                Field::BorrowerName,
                Field::AnnualIncome,
                Field::LoanAmount,
                Field::PropertyAddress,
                Field::LoanType,
            ],
            Self::CreditReport => &[
                Field::FicoScore,
                Field::CreditScores,
                Field::AccountBalances,
            ],
            Self::AppraisalReport => &[
                Field::AppraisedValue,
                Field::SquareFeet,
                Field::Bedrooms,
                Field::ComparableSales,
            ],
            Self::BankStatement | Self::Unknown => &[],
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named field extracted from labelled document text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    // Loan application
    BorrowerName,
    AnnualIncome,
    LoanAmount,
    PropertyAddress,
    LoanType,
    // Credit report
    FicoScore,
    CreditScores,
    AccountBalances,
    // Appraisal report
    AppraisedValue,
    SquareFeet,
    Bedrooms,
    ComparableSales,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BorrowerName => "borrower_name",
            Self::AnnualIncome => "annual_income",
            Self::LoanAmount => "loan_amount",
            Self::PropertyAddress => "property_address",
            Self::LoanType => "loan_type",
            Self::FicoScore => "fico_score",
            Self::CreditScores => "credit_scores",
            Self::AccountBalances => "account_balances",
            Self::AppraisedValue => "appraised_value",
            Self::SquareFeet => "square_feet",
            Self::Bedrooms => "bedrooms",
            Self::ComparableSales => "comparable_sales",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed field value.
///
/// `Integers` holds ordered sequences (all scores, balances or comparable
/// sales in order of appearance).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Integer(i64),
    Decimal(f64),
    Text(String),
    Integers(Vec<i64>),
}

impl FieldValue {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Numeric view: integers widen, decimals pass through, everything else is `None`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(v) => Some(*v as f64),
            Self::Decimal(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integers(&self) -> Option<&[i64]> {
        match self {
            Self::Integers(v) => Some(v),
            _ => None,
        }
    }
}

/// Domain-agnostic entity patterns matched anywhere in a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    /// Identifier number, `NNN-NN-NNNN`.
    Ssn,
    Phone,
    Email,
    Currency,
    Percentage,
    ZipCode,
    Date,
    /// Any three-digit number in 400–899.
    CreditScore,
}

impl PatternKind {
    pub const ALL: [PatternKind; 8] = [
        Self::Ssn,
        Self::Phone,
        Self::Email,
        Self::Currency,
        Self::Percentage,
        Self::ZipCode,
        Self::Date,
        Self::CreditScore,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ssn => "ssn",
            Self::Phone => "phone",
            Self::Email => "email",
            Self::Currency => "currency",
            Self::Percentage => "percentage",
            Self::ZipCode => "zip_code",
            Self::Date => "date",
            Self::CreditScore => "credit_score",
        }
    }
}

/// Pattern name → distinct matched strings.
pub type PatternMatches = BTreeMap<PatternKind, BTreeSet<String>>;

/// Field name → typed value. Absent keys mean the label was not found.
pub type FieldMap = BTreeMap<Field, FieldValue>;

/// Structured facts extracted from one document.
///
/// Produced once per document by the extraction pipeline and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Opaque identifier of the source document, usually its filename.
    pub source_id: String,
    pub document_type: DocumentType,
    /// Number of characters considered.
    pub text_length: usize,
    pub generic_patterns: PatternMatches,
    pub fields: FieldMap,
    pub extracted_at: DateTime<Utc>,
}

impl ExtractionResult {
    pub fn field(&self, field: Field) -> Option<&FieldValue> {
        self.fields.get(&field)
    }

    pub fn integer(&self, field: Field) -> Option<i64> {
        self.field(field).and_then(FieldValue::as_i64)
    }

    pub fn text(&self, field: Field) -> Option<&str> {
        self.field(field).and_then(FieldValue::as_text)
    }

    pub fn integers(&self, field: Field) -> Option<&[i64]> {
        self.field(field).and_then(FieldValue::as_integers)
    }

    pub fn is(&self, document_type: DocumentType) -> bool {
        self.document_type == document_type
    }

    /// Equal in every field except `extracted_at`.
    pub fn same_content(&self, other: &Self) -> bool {
        self.source_id == other.source_id
            && self.document_type == other.document_type
            && self.text_length == other.text_length
            && self.generic_patterns == other.generic_patterns
            && self.fields == other.fields
    }

    /// Total number of generic pattern matches across all kinds.
    pub fn pattern_match_count(&self) -> usize {
        self.generic_patterns.values().map(BTreeSet::len).sum()
    }
}

/// A document handed to the pipeline by a text supplier.
///
/// `text` is `Err` when the supplier could not read or decode the source.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub source_id: String,
    pub text: Result<String, String>,
}

impl SourceDocument {
    pub fn readable(source_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
            text: Ok(text.into()),
        }
    }

    pub fn unreadable(source_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
            text: Err(reason.into()),
        }
    }
}
