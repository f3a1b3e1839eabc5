//! Error types for AgriMap

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgrimapError {
    // Validation errors
    #[error("Please complete all farmer information fields (missing: {})", fields.join(", "))]
    MissingFields { fields: Vec<&'static str> },

    #[error(
        "Please select at least {required} points on the map to define the land parcel \
         (found {found})"
    )]
    InsufficientPoints { found: usize, required: usize },

    #[error("Invalid coordinate at point {index}: {reason}")]
    InvalidCoordinate { index: usize, reason: String },

    // Transport errors
    #[error("Transport error: {reason}")]
    Transport { reason: String },

    #[error("Server responded with status {status}: {body}")]
    Status { status: u16, body: String },

    // Stream errors
    #[error("Notification stream error: {reason}")]
    Stream { reason: String },

    #[error("Failed to parse payload: {reason}")]
    Parse { reason: String },

    // Configuration errors
    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AgrimapError {
    /// Whether the error was raised locally before any network call
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AgrimapError::MissingFields { .. }
                | AgrimapError::InsufficientPoints { .. }
                | AgrimapError::InvalidCoordinate { .. }
        )
    }

    /// Whether the error came from the network or a non-2xx response
    pub fn is_transport(&self) -> bool {
        matches!(self, AgrimapError::Transport { .. } | AgrimapError::Status { .. })
    }
}

impl From<serde_json::Error> for AgrimapError {
    fn from(err: serde_json::Error) -> Self {
        AgrimapError::Parse { reason: err.to_string() }
    }
}

pub type Result<T> = std::result::Result<T, AgrimapError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_message_lists_fields() {
        let err = AgrimapError::MissingFields { fields: vec!["farmerId", "village"] };
        assert_eq!(
            err.to_string(),
            "Please complete all farmer information fields (missing: farmerId, village)"
        );
        assert!(err.is_validation());
        assert!(!err.is_transport());
    }

    #[test]
    fn test_status_is_transport() {
        let err = AgrimapError::Status { status: 503, body: "unavailable".to_string() };
        assert!(err.is_transport());
        assert!(!err.is_validation());
    }
}
