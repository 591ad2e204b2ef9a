//! Extraction pipeline: classify, extract fields, match generic patterns.
//!
//! One document in, one [`ExtractionResult`] out. Batches fan out across the
//! rayon pool; the output keeps input positions regardless of completion order.

use brokerflow_core::{ExtractError, ExtractionResult, SourceDocument};
use chrono::Utc;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::classifier::classify_explained;
use crate::fields::extract_fields;
use crate::patterns::match_patterns;

/// Classify and extract a single document whose text is already available.
///
/// Total over all inputs: unrecognised text yields an `Unknown` result with
/// no fields.
pub fn classify_and_extract(source_id: &str, text: &str) -> ExtractionResult {
    let classification = classify_explained(text);
    let document_type = classification.document_type;
    debug!(
        source_id,
        document_type = %document_type,
        trigger = classification.trigger.unwrap_or("-"),
        "classified document"
    );

    let fields = extract_fields(text, document_type);
    let generic_patterns = match_patterns(text);
    let text_length = text.chars().count();

    info!(
        source_id,
        document_type = %document_type,
        chars = text_length,
        fields = fields.len(),
        "processed document"
    );

    ExtractionResult {
        source_id: source_id.to_string(),
        document_type,
        text_length,
        generic_patterns,
        fields,
        extracted_at: Utc::now(),
    }
}

/// Process one supplied document. Fails only when its text was unreadable.
pub fn process_document(doc: &SourceDocument) -> Result<ExtractionResult, ExtractError> {
    match &doc.text {
        Ok(text) => Ok(classify_and_extract(&doc.source_id, text)),
        Err(reason) => {
            warn!(source_id = %doc.source_id, %reason, "could not read document text");
            Err(ExtractError::Unreadable {
                source_id: doc.source_id.clone(),
                reason: reason.clone(),
            })
        }
    }
}

/// Process a batch in parallel.
///
/// Slot `i` of the output always belongs to `docs[i]`. An unreadable item
/// yields an `Err` in its own slot and never aborts the rest of the batch.
pub fn process_batch(docs: &[SourceDocument]) -> Vec<Result<ExtractionResult, ExtractError>> {
    let results: Vec<_> = docs.par_iter().map(process_document).collect();

    let failed = results.iter().filter(|r| r.is_err()).count();
    info!(documents = docs.len(), failed, "processed batch");
    results
}

/// Split batch output into successful results and per-item errors.
pub fn partition_results(
    results: Vec<Result<ExtractionResult, ExtractError>>,
) -> (Vec<ExtractionResult>, Vec<ExtractError>) {
    let mut ok = Vec::with_capacity(results.len());
    let mut errors = Vec::new();
    for result in results {
        match result {
            Ok(r) => ok.push(r),
            Err(e) => errors.push(e),
        }
    }
    (ok, errors)
}
