use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Invalid request body: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Missing required fields: {}", missing.join(", "))]
    Validation { missing: Vec<String> },

    #[error("Email service not configured")]
    NotConfigured,

    #[error("Delivery failed: {0:#}")]
    Delivery(anyhow::Error),
}

impl RelayError {
    /// Whether the caller is at fault.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Malformed(_) | Self::Validation { .. })
    }

    /// Message that is safe to return to the caller. Provider details never
    /// leave the server.
    pub fn public_message(&self) -> String {
        match self {
            Self::Malformed(_) => "Invalid request body".to_owned(),
            Self::Validation { .. } | Self::NotConfigured => self.to_string(),
            Self::Delivery(_) => "Unexpected error".to_owned(),
        }
    }
}
