use thiserror::Error;

/// Message surfaced when a remote failure carries no message of its own
pub const REMOTE_CALL_FALLBACK: &str = "Failed to fetch comparison data.";

/// Ways a single comparison attempt can end without a result.
///
/// Every variant is terminal for the attempt; nothing is retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ComparisonError {
    /// A model name was blank; no remote call was made
    #[error("Please provide names for both models.")]
    InputValidation,

    /// The remote service did not recognize the two names as comparable
    #[error("Model Validation Failed: {reason}")]
    RemoteValidation { reason: String },

    /// Network, service or decoding failure
    #[error("{0}")]
    RemoteCall(String),

    /// Another comparison already occupies the result slot
    #[error("A comparison is already in progress.")]
    InProgress,
}

impl ComparisonError {
    /// Wrap an underlying failure, keeping its message verbatim
    pub fn remote_call(err: &anyhow::Error) -> Self {
        let message = format!("{err:#}");
        if message.trim().is_empty() {
            Self::RemoteCall(REMOTE_CALL_FALLBACK.to_string())
        } else {
            Self::RemoteCall(message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_call_keeps_message() {
        let err = ComparisonError::remote_call(&anyhow::anyhow!("connection refused"));
        assert_eq!(err.to_string(), "connection refused");
    }

    #[test]
    fn test_remote_call_fallback() {
        let err = ComparisonError::remote_call(&anyhow::anyhow!("  "));
        assert_eq!(err.to_string(), REMOTE_CALL_FALLBACK);
    }

    #[test]
    fn test_remote_validation_display() {
        let err = ComparisonError::RemoteValidation {
            reason: "Not a valid two-wheeler".into(),
        };
        assert_eq!(
            err.to_string(),
            "Model Validation Failed: Not a valid two-wheeler"
        );
    }
}
