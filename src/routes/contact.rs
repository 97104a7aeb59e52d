use axum::{Json, body::Bytes, extract::State, response::IntoResponse};

use crate::{error::AppError, routes::AppState};

/// POST /api/contact - Relay a contact form submission by email
///
/// Takes the raw body so malformed JSON is answered with the relay's own
/// error shape instead of the extractor rejection.
pub async fn contact(
    State(app_state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let response = app_state.relay.handle(&body).await?;

    Ok(Json(response))
}
