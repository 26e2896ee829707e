use crate::core::models::{FailureDetail, FailureKind};

/// How a failed build is presented
#[derive(Debug)]
pub enum Classification {
    /// Recognized kind; the message is complete for the end user
    Domain { kind: FailureKind, message: String },
    /// Anything else; the full payload must be shown
    Unexpected { payload: anyhow::Error },
}

pub struct ErrorClassifier;

impl ErrorClassifier {
    pub fn classify(failure: FailureDetail) -> Classification {
        match failure.code.as_deref().and_then(FailureKind::from_code) {
            Some(kind) => Classification::Domain {
                kind,
                message: failure.message,
            },
            None => Classification::Unexpected {
                payload: failure.payload,
            },
        }
    }
}
