//! Builders for extraction results used across the analysis tests.

use brokerflow_core::{DocumentType, ExtractionResult, Field, FieldMap, FieldValue, PatternMatches};
use chrono::Utc;

pub fn result(id: &str, document_type: DocumentType, fields: FieldMap) -> ExtractionResult {
    ExtractionResult {
        source_id: id.to_string(),
        document_type,
        text_length: 0,
        generic_patterns: PatternMatches::new(),
        fields,
        extracted_at: Utc::now(),
    }
}

fn put(fields: &mut FieldMap, field: Field, value: Option<i64>) {
    if let Some(v) = value {
        fields.insert(field, FieldValue::Integer(v));
    }
}

pub fn loan_app(
    id: &str,
    income: Option<i64>,
    amount: Option<i64>,
    loan_type: Option<&str>,
) -> ExtractionResult {
    let mut fields = FieldMap::new();
    put(&mut fields, Field::AnnualIncome, income);
    put(&mut fields, Field::LoanAmount, amount);
    if let Some(t) = loan_type {
        fields.insert(Field::LoanType, FieldValue::Text(t.to_string()));
    }
    result(id, DocumentType::LoanApplication, fields)
}

pub fn credit_report(id: &str, fico: Option<i64>) -> ExtractionResult {
    let mut fields = FieldMap::new();
    put(&mut fields, Field::FicoScore, fico);
    result(id, DocumentType::CreditReport, fields)
}

pub fn appraisal(
    id: &str,
    value: Option<i64>,
    square_feet: Option<i64>,
    bedrooms: Option<i64>,
) -> ExtractionResult {
    let mut fields = FieldMap::new();
    put(&mut fields, Field::AppraisedValue, value);
    put(&mut fields, Field::SquareFeet, square_feet);
    put(&mut fields, Field::Bedrooms, bedrooms);
    result(id, DocumentType::AppraisalReport, fields)
}

pub fn bank_statement(id: &str) -> ExtractionResult {
    result(id, DocumentType::BankStatement, FieldMap::new())
}
