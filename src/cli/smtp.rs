use anyhow::Result;
use folio_notification::SmtpMailer;

/// Authenticates against the configured SMTP provider without sending mail
pub async fn smtp_check(config: crate::config::Config) -> Result<()> {
    let Some(credentials) = config.email.credentials() else {
        anyhow::bail!("SMTP credentials not configured (set SMTP_USER and SMTP_PASS)");
    };

    let mailer = SmtpMailer::new(config.email.smtp_host.to_owned(), config.email.smtp_port);
    mailer.ping(&credentials).await?;

    tracing::info!(
        smtp_host = %config.email.smtp_host,
        smtp_port = config.email.smtp_port,
        username = %credentials.username,
        "SMTP connection succeeded"
    );

    Ok(())
}
