pub mod document;
pub mod error;
pub mod schema;

pub use document::{
    DocumentType, ExtractionResult, Field, FieldMap, FieldValue, PatternKind, PatternMatches,
    SourceDocument,
};
pub use error::ExtractError;
