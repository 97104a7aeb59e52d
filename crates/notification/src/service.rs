//! Email delivery using lettre

use async_trait::async_trait;
use folio_contact::{MailCredentials, Mailer, OutgoingMessage};
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor, message::header,
    transport::smtp::authentication::Credentials,
};

pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
pub const DEFAULT_SMTP_PORT: u16 = 465;

/// SMTP mailer that opens one authenticated, TLS-wrapped session per message
#[derive(Debug, Clone)]
pub struct SmtpMailer {
    host: String,
    port: u16,
}

impl Default for SmtpMailer {
    fn default() -> Self {
        Self::new(DEFAULT_SMTP_HOST, DEFAULT_SMTP_PORT)
    }
}

impl SmtpMailer {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    // `relay` wraps the whole connection in TLS, there is no plaintext fallback
    fn transport(
        &self,
        credentials: &MailCredentials,
    ) -> anyhow::Result<AsyncSmtpTransport<Tokio1Executor>> {
        let creds = Credentials::new(
            credentials.username.to_owned(),
            credentials.password.to_owned(),
        );

        Ok(AsyncSmtpTransport::<Tokio1Executor>::relay(&self.host)?
            .port(self.port)
            .credentials(creds)
            .build())
    }

    /// Opens a session with the provider and authenticates, without sending
    pub async fn ping(&self, credentials: &MailCredentials) -> anyhow::Result<()> {
        tracing::info!(smtp_host = %self.host, smtp_port = self.port, "Testing SMTP connection");

        self.transport(credentials)?
            .test_connection()
            .await?
            .then_some(())
            .ok_or_else(|| anyhow::anyhow!("Failed to ping smtp server"))
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(
        &self,
        credentials: &MailCredentials,
        message: OutgoingMessage,
    ) -> anyhow::Result<Option<String>> {
        let id = message_id(&message.from);

        tracing::info!(
            smtp_host = %self.host,
            smtp_port = self.port,
            to = %message.to,
            subject = %message.subject,
            "Sending email text plain"
        );

        let email = build_message(message, &id)?;
        let response = self.transport(credentials)?.send(email).await?;

        if !response.is_positive() {
            anyhow::bail!("SMTP server refused message with code {}", response.code());
        }

        Ok(Some(id))
    }
}

fn build_message(message: OutgoingMessage, id: &str) -> anyhow::Result<Message> {
    Ok(Message::builder()
        .message_id(Some(id.to_owned()))
        .from(message.from.parse()?)
        .to(message.to.parse()?)
        .reply_to(message.reply_to.parse()?)
        .subject(message.subject)
        .header(header::ContentType::TEXT_PLAIN)
        .body(message.body)?)
}

fn message_id(from: &str) -> String {
    let domain = from
        .rsplit_once('@')
        .map(|(_, domain)| domain)
        .filter(|domain| !domain.is_empty())
        .unwrap_or("localhost");

    format!("<{}@{}>", uuid::Uuid::new_v4(), domain)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outgoing() -> OutgoingMessage {
        OutgoingMessage {
            from: "relay@gmail.com".to_owned(),
            to: "inbox@example.org".to_owned(),
            reply_to: "ada@example.com".to_owned(),
            subject: "New Message from Ada".to_owned(),
            body: "Name: Ada\nEmail: ada@example.com\n\nHello".to_owned(),
        }
    }

    #[test]
    fn message_id_uses_sender_domain() {
        let id = message_id("relay@gmail.com");
        assert!(id.starts_with('<'));
        assert!(id.ends_with("@gmail.com>"));
        assert_ne!(id, message_id("relay@gmail.com"));
    }

    #[test]
    fn message_id_falls_back_to_localhost() {
        assert!(message_id("relay").ends_with("@localhost>"));
    }

    #[test]
    fn message_carries_reply_to_and_id() {
        let email = build_message(outgoing(), "<abc@gmail.com>").unwrap();
        let formatted = String::from_utf8(email.formatted()).unwrap();

        assert!(formatted.contains("Reply-To: ada@example.com"));
        assert!(formatted.contains("To: inbox@example.org"));
        assert!(formatted.contains("From: relay@gmail.com"));
        assert!(formatted.contains("Message-ID: <abc@gmail.com>"));
        assert!(formatted.contains("Subject: New Message from Ada"));
    }

    #[test]
    fn unparsable_reply_to_is_an_error() {
        let mut message = outgoing();
        message.reply_to = "not an address".to_owned();

        assert!(build_message(message, "<abc@gmail.com>").is_err());
    }
}
