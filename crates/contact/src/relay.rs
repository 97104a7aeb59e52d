use std::sync::Arc;

use askama::Template;

use crate::{
    ContactPayload, ContactRequest, MailCredentials, Mailer, OutgoingMessage, RelayError,
    RelayResponse,
};

/// Destination used when no contact address is configured.
pub const DEFAULT_CONTACT_ADDRESS: &str = "clemento444@gmail.com";

#[derive(Debug, Clone, Default)]
pub struct RelaySettings {
    pub credentials: Option<MailCredentials>,
    pub destination: Option<String>,
}

impl RelaySettings {
    pub fn destination(&self) -> &str {
        self.destination
            .as_deref()
            .filter(|address| !address.is_empty())
            .unwrap_or(DEFAULT_CONTACT_ADDRESS)
    }
}

#[derive(Template)]
#[template(path = "contact-message.txt")]
struct ContactMessageTemplate<'a> {
    name: &'a str,
    email: &'a str,
    message: &'a str,
}

/// Forwards validated contact submissions to the mail provider.
#[derive(Clone)]
pub struct ContactRelay {
    mailer: Arc<dyn Mailer>,
    settings: RelaySettings,
}

impl ContactRelay {
    pub fn new(mailer: Arc<dyn Mailer>, settings: RelaySettings) -> Self {
        Self { mailer, settings }
    }

    pub fn settings(&self) -> &RelaySettings {
        &self.settings
    }

    /// Validates a raw JSON submission and relays it as a single email.
    ///
    /// The mailer is only reached once the payload is complete and the
    /// provider account is configured. Each call sends a separate message,
    /// identical submissions are not deduplicated.
    #[tracing::instrument(skip_all)]
    pub async fn handle(&self, body: &[u8]) -> Result<RelayResponse, RelayError> {
        let payload = serde_json::from_slice::<ContactPayload>(body).inspect_err(|err| {
            tracing::warn!(kind = "validation", error = %err, "Rejected malformed contact payload");
        })?;

        let request = payload.into_request().inspect_err(|err| {
            tracing::warn!(kind = "validation", error = %err, "Rejected incomplete contact payload");
        })?;

        let Some(credentials) = self.settings.credentials.as_ref() else {
            tracing::error!(
                kind = "configuration",
                "SMTP credentials are not configured, contact submission dropped"
            );
            return Err(RelayError::NotConfigured);
        };

        let message = self.compose(credentials, request)?;
        let to = message.to.clone();

        match self.mailer.send(credentials, message).await {
            Ok(id) => {
                tracing::info!(to = %to, id = ?id, "Contact message relayed");
                Ok(RelayResponse::accepted(id))
            }
            Err(err) => {
                tracing::error!(
                    kind = "delivery",
                    to = %to,
                    error = ?err,
                    "Failed to relay contact message"
                );
                Err(RelayError::Delivery(err))
            }
        }
    }

    fn compose(
        &self,
        credentials: &MailCredentials,
        request: ContactRequest,
    ) -> Result<OutgoingMessage, RelayError> {
        let body = ContactMessageTemplate {
            name: &request.name,
            email: &request.email,
            message: &request.message,
        }
        .render()
        .map_err(|err| RelayError::Delivery(err.into()))?;

        Ok(OutgoingMessage {
            from: credentials.username.to_owned(),
            to: self.settings.destination().to_owned(),
            reply_to: request.email,
            subject: request.subject,
            body,
        })
    }
}
