use std::fmt;

use async_trait::async_trait;

/// Authenticated mail provider account.
#[derive(Clone, PartialEq, Eq)]
pub struct MailCredentials {
    pub username: String,
    pub password: String,
}

impl MailCredentials {
    /// Both parts must be present and non-empty.
    pub fn from_parts(username: Option<String>, password: Option<String>) -> Option<Self> {
        let username = username.filter(|v| !v.is_empty())?;
        let password = password.filter(|v| !v.is_empty())?;

        Some(Self { username, password })
    }
}

impl fmt::Debug for MailCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailCredentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMessage {
    pub from: String,
    pub to: String,
    pub reply_to: String,
    pub subject: String,
    pub body: String,
}

/// Sends one message per call under the given account.
///
/// Returns the identifier the provider accepted the message under, when it
/// has one.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait Mailer: Send + Sync + 'static {
    async fn send(
        &self,
        credentials: &MailCredentials,
        message: OutgoingMessage,
    ) -> anyhow::Result<Option<String>>;
}
