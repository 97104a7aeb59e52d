use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::RelayError;

/// Contact form submission as it travels from the site to the relay.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactRequest {
    /// Subject line the site derives from the sender's name.
    pub fn subject_for(name: &str) -> String {
        format!("New Message from {name}")
    }
}

/// Success body returned by the relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayResponse {
    pub success: bool,
    pub id: Option<String>,
}

impl RelayResponse {
    pub fn accepted(id: Option<String>) -> Self {
        Self { success: true, id }
    }
}

/// Failure body returned by the relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Inbound payload before validation, every field may be absent.
#[derive(Debug, Default, Deserialize, Validate)]
pub(crate) struct ContactPayload {
    #[validate(required, length(min = 1))]
    pub name: Option<String>,
    #[validate(required, length(min = 1))]
    pub email: Option<String>,
    #[validate(required, length(min = 1))]
    pub subject: Option<String>,
    #[validate(required, length(min = 1))]
    pub message: Option<String>,
}

impl ContactPayload {
    pub(crate) fn into_request(self) -> Result<ContactRequest, RelayError> {
        if let Err(errors) = self.validate() {
            let mut missing = errors
                .field_errors()
                .keys()
                .map(|field| field.to_string())
                .collect::<Vec<_>>();
            missing.sort();

            return Err(RelayError::Validation { missing });
        }

        Ok(ContactRequest {
            name: self.name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            subject: self.subject.unwrap_or_default(),
            message: self.message.unwrap_or_default(),
        })
    }
}
