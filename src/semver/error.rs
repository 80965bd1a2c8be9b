use thiserror::Error;

/// Rejection reported by a host grammar
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("Invalid version string: {0}")]
    InvalidVersion(String),

    #[error("Invalid branch name: {0}")]
    InvalidBranch(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    /// The composed version was rejected by the host grammar
    #[error("Malformed version '{version}': {source}")]
    MalformedVersion {
        version: String,
        #[source]
        source: GrammarError,
    },

    #[error("Malformed range '{range}': {reason}")]
    MalformedRange { range: String, reason: String },

    /// A manifest key mapping points at an unusable composer key
    #[error("Invalid composer key mapping for '{key}': {reason}")]
    InvalidKeyMapping { key: String, reason: String },
}

impl ConvertError {
    pub(crate) fn malformed_range(range: &str, reason: impl Into<String>) -> Self {
        ConvertError::MalformedRange {
            range: range.to_string(),
            reason: reason.into(),
        }
    }
}
