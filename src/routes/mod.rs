use std::sync::Arc;

use axum::{
    Router,
    response::IntoResponse,
    routing::{get, post},
};
use folio_contact::ContactRelay;
use folio_notification::SmtpMailer;

use crate::error::AppError;

mod contact;
mod health;

pub use contact::*;
pub use health::*;

#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<ContactRelay>,
}

impl AppState {
    /// Wires the SMTP mailer and relay settings from configuration
    pub fn from_config(config: &crate::config::Config) -> Self {
        let mailer = SmtpMailer::new(config.email.smtp_host.to_owned(), config.email.smtp_port);
        let relay = ContactRelay::new(Arc::new(mailer), config.email.relay_settings());

        Self {
            relay: Arc::new(relay),
        }
    }
}

pub async fn fallback() -> impl IntoResponse {
    AppError::NotFound
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        // Health check endpoint (no state required)
        .route("/health", get(health))
        .route("/api/contact", post(contact))
        .fallback(fallback)
        .with_state(app_state)
}
