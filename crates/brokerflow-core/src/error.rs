use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("could not read text from {source_id}: {reason}")]
    Unreadable { source_id: String, reason: String },
}

impl ExtractError {
    pub fn source_id(&self) -> &str {
        match self {
            Self::Unreadable { source_id, .. } => source_id,
        }
    }
}
