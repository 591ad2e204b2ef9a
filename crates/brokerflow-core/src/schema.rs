/// Arrow schema definitions for extraction summaries.
pub mod extraction {
    use std::sync::Arc;

    use arrow::array::{ArrayRef, StringArray, TimestampMicrosecondArray, UInt32Array, UInt64Array};
    use arrow::datatypes::{DataType, Field, Schema, TimeUnit};
    use arrow::error::ArrowError;
    use arrow::record_batch::RecordBatch;

    use crate::ExtractionResult;

    /// Schema for one summary row per processed document.
    pub fn summary_schema() -> Schema {
        Schema::new(vec![
            Field::new("source_id", DataType::Utf8, false),
            Field::new("document_type", DataType::Utf8, false),
            Field::new("text_length", DataType::UInt64, false),
            Field::new("field_count", DataType::UInt32, false),
            Field::new("pattern_matches", DataType::UInt64, false),
            Field::new(
                "extracted_at",
                DataType::Timestamp(TimeUnit::Microsecond, Some("UTC".into())),
                false,
            ),
        ])
    }

    /// Build a summary RecordBatch, one row per result in input order.
    pub fn summary_batch(results: &[ExtractionResult]) -> Result<RecordBatch, ArrowError> {
        let source_ids: Vec<&str> = results.iter().map(|r| r.source_id.as_str()).collect();
        let types: Vec<&str> = results.iter().map(|r| r.document_type.as_str()).collect();
        let lengths: Vec<u64> = results.iter().map(|r| r.text_length as u64).collect();
        let field_counts: Vec<u32> = results.iter().map(|r| r.fields.len() as u32).collect();
        let matches: Vec<u64> = results
            .iter()
            .map(|r| r.pattern_match_count() as u64)
            .collect();
        let stamps: Vec<i64> = results
            .iter()
            .map(|r| r.extracted_at.timestamp_micros())
            .collect();

        let columns: Vec<ArrayRef> = vec![
            Arc::new(StringArray::from(source_ids)),
            Arc::new(StringArray::from(types)),
            Arc::new(UInt64Array::from(lengths)),
            Arc::new(UInt32Array::from(field_counts)),
            Arc::new(UInt64Array::from(matches)),
            Arc::new(TimestampMicrosecondArray::from(stamps).with_timezone("UTC")),
        ];

        RecordBatch::try_new(Arc::new(summary_schema()), columns)
    }
}
