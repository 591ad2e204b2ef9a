//! Terminal rendering for extraction results and insight reports.
//!
//! `json` output is pretty-printed serde JSON. `table` output renders
//! extraction summaries as an Arrow table and reports as vertical cards.

use arrow::util::pretty::pretty_format_batches;
use brokerflow_core::{ExtractError, ExtractionResult};
use brokerflow_core::schema::extraction;
use serde::Serialize;
use serde_json::Value;

const LABEL_WIDTH: usize = 40;
const MAX_LIST_ITEMS: usize = 10;

pub fn to_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// One summary row per result, formatted as an ASCII table.
pub fn summary_table(results: &[ExtractionResult]) -> anyhow::Result<String> {
    let batch = extraction::summary_batch(results)?;
    Ok(pretty_format_batches(&[batch])?.to_string())
}

/// One `skipped:` line per document left out of the results.
pub fn skipped(errors: &[ExtractError]) -> String {
    errors.iter().map(|e| format!("  skipped: {e}\n")).collect()
}

/// Render any serialisable report as a titled vertical card.
pub fn card<T: Serialize + ?Sized>(title: &str, value: &T) -> anyhow::Result<String> {
    let value = serde_json::to_value(value)?;
    let mut out = format!("── {title} ──\n");
    for (label, text) in card_lines(&value) {
        out.push_str(&format!("  {label:<width$} {text}\n", width = LABEL_WIDTH));
    }
    Ok(out)
}

/// Flatten a JSON value into `(dotted.path, text)` rows.
///
/// Scalar arrays are joined on one row; arrays of objects get one indexed
/// prefix per element. Lists are cut at [`MAX_LIST_ITEMS`].
pub fn card_lines(value: &Value) -> Vec<(String, String)> {
    let mut lines = Vec::new();
    flatten("", value, &mut lines);
    lines
}

fn flatten(prefix: &str, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) => {
            for (key, v) in map {
                flatten(&join(prefix, key), v, out);
            }
        }
        Value::Array(items) if items.iter().all(is_scalar) => {
            if items.is_empty() {
                return;
            }
            let shown: Vec<String> = items.iter().take(MAX_LIST_ITEMS).map(scalar).collect();
            let mut text = shown.join(", ");
            if items.len() > MAX_LIST_ITEMS {
                text.push_str(&format!(" (+{} more)", items.len() - MAX_LIST_ITEMS));
            }
            out.push((prefix.to_string(), text));
        }
        Value::Array(items) => {
            for (i, v) in items.iter().take(MAX_LIST_ITEMS).enumerate() {
                flatten(&format!("{prefix}[{i}]"), v, out);
            }
        }
        Value::Null => {}
        other => out.push((prefix.to_string(), scalar(other))),
    }
}

fn join(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

fn is_scalar(v: &Value) -> bool {
    !matches!(v, Value::Object(_) | Value::Array(_))
}

fn scalar(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Bool(b) => (if *b { "yes" } else { "no" }).to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brokerflow_core::{DocumentType, FieldMap, FieldValue, PatternMatches};
    use serde_json::json;

    #[test]
    fn nested_objects_use_dotted_paths() {
        let v = json!({
            "status": "ready",
            "income_analysis": { "average_income": 88333.33, "income_range": "$40,000 - $150,000" },
            "opportunities": ["a", "b"],
            "missing": null,
        });
        let lines = card_lines(&v);
        assert!(lines.contains(&("status".into(), "ready".into())));
        assert!(lines.contains(&("income_analysis.average_income".into(), "88333.33".into())));
        assert!(lines.contains(&("opportunities".into(), "a, b".into())));
        assert!(!lines.iter().any(|(k, _)| k == "missing"));
    }

    #[test]
    fn arrays_of_objects_are_indexed() {
        let v = json!({ "lender_performance": [{ "lender": "FHA" }, { "lender": "VA" }] });
        let lines = card_lines(&v);
        assert_eq!(
            lines,
            vec![
                ("lender_performance[0].lender".to_string(), "FHA".to_string()),
                ("lender_performance[1].lender".to_string(), "VA".to_string()),
            ]
        );
    }

    #[test]
    fn long_lists_are_truncated() {
        let v = json!({ "xs": (0..15).collect::<Vec<_>>() });
        let lines = card_lines(&v);
        assert!(lines[0].1.ends_with("(+5 more)"));
    }

    #[test]
    fn summary_table_lists_each_result() {
        let mut fields = FieldMap::new();
        fields.insert(
            brokerflow_core::Field::LoanType,
            FieldValue::Text("FHA".into()),
        );
        let result = ExtractionResult {
            source_id: "app.txt".into(),
            document_type: DocumentType::LoanApplication,
            text_length: 42,
            generic_patterns: PatternMatches::new(),
            fields,
            extracted_at: chrono::Utc::now(),
        };
        let table = summary_table(&[result]).unwrap();
        assert!(table.contains("app.txt"));
        assert!(table.contains("loan_application"));
        assert!(table.contains("field_count"));
    }

    #[test]
    fn skipped_lists_each_source() {
        let errors = vec![
            ExtractError::Unreadable {
                source_id: "bad.txt".into(),
                reason: "stream did not contain valid UTF-8".into(),
            },
            ExtractError::Unreadable {
                source_id: "gone.txt".into(),
                reason: "permission denied".into(),
            },
        ];
        let out = skipped(&errors);
        assert_eq!(out.lines().count(), 2);
        assert!(out.contains("bad.txt"));
        assert!(out.contains("gone.txt: permission denied"));
        assert_eq!(skipped(&[]), "");
    }

    #[test]
    fn card_has_title() {
        let out = card("Borrowers", &json!({ "total_borrowers": 3 })).unwrap();
        assert!(out.starts_with("── Borrowers ──\n"));
        assert!(out.contains("total_borrowers"));
    }
}
