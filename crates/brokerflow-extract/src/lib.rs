//! Document understanding: classification, labelled-field extraction, and
//! generic entity patterns over plain text.

pub mod classifier;
pub mod fields;
pub mod patterns;
pub mod pipeline;

pub use classifier::{Classification, classify, classify_explained};
pub use fields::extract_fields;
pub use patterns::match_patterns;
pub use pipeline::{classify_and_extract, partition_results, process_batch, process_document};
