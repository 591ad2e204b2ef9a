use serde::Serialize;

/// Outcome of an analysis over a batch.
///
/// `NoData` means the analysis ran and found none of the documents it needs;
/// it is a normal outcome, distinct from a failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Analysis<T> {
    Ready(T),
    NoData { message: String },
}

impl<T> Analysis<T> {
    pub fn no_data(message: impl Into<String>) -> Self {
        Self::NoData {
            message: message.into(),
        }
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, Self::NoData { .. })
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(v) => Some(v),
            Self::NoData { .. } => None,
        }
    }

    pub fn into_ready(self) -> Option<T> {
        match self {
            Self::Ready(v) => Some(v),
            Self::NoData { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize)]
    struct Dummy {
        count: u32,
    }

    #[test]
    fn ready_serialises_with_status_tag() {
        let a = Analysis::Ready(Dummy { count: 3 });
        let json = serde_json::to_value(&a).unwrap();
        assert_eq!(json["status"], "ready");
        assert_eq!(json["count"], 3);
    }

    #[test]
    fn no_data_serialises_message() {
        let a: Analysis<Dummy> = Analysis::no_data("No appraisal data found");
        let json = serde_json::to_value(&a).unwrap();
        assert_eq!(json["status"], "no_data");
        assert_eq!(json["message"], "No appraisal data found");
        assert!(a.is_no_data());
        assert!(a.ready().is_none());
    }
}
