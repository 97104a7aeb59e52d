use axum::{body::Body, extract::Request, http::StatusCode};
use folio_contact::{DEFAULT_CONTACT_ADDRESS, MockMailer};
use http_body_util::BodyExt;
use serde_json::json;
use tower::ServiceExt;

mod helpers;

fn submission() -> serde_json::Value {
    json!({
        "name": "Ada",
        "email": "ada@example.com",
        "subject": "New Message from Ada",
        "message": "Hello",
    })
}

#[tokio::test]
async fn test_missing_fields_return_bad_request() -> anyhow::Result<()> {
    for field in ["name", "email", "subject", "message"] {
        let mut body = submission();
        body.as_object_mut().unwrap().remove(field);

        let app = helpers::create_test_app(helpers::unreachable_mailer(), helpers::configured_email());
        let (status, body) = helpers::post_contact(app, body.to_string()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "missing {field}");
        assert_eq!(body, json!({ "error": format!("Missing required fields: {field}") }));
    }

    Ok(())
}

#[tokio::test]
async fn test_empty_field_returns_bad_request() {
    let mut body = submission();
    body["message"] = json!("");

    let app = helpers::create_test_app(helpers::unreachable_mailer(), helpers::configured_email());
    let (status, body) = helpers::post_contact(app, body.to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("message"));
}

#[tokio::test]
async fn test_malformed_json_returns_bad_request() {
    let app = helpers::create_test_app(helpers::unreachable_mailer(), helpers::configured_email());
    let (status, body) = helpers::post_contact(app, "{\"name\": ").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Invalid request body" }));
}

#[tokio::test]
async fn test_missing_credentials_return_server_error() {
    let app = helpers::create_test_app(helpers::unreachable_mailer(), Default::default());
    let (status, body) = helpers::post_contact(app, submission().to_string()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Email service not configured" }));
}

#[tokio::test]
async fn test_accepted_submission_returns_provider_id() {
    let mut mailer = MockMailer::new();
    mailer
        .expect_send()
        .times(1)
        .withf(|credentials, message| {
            credentials.username == helpers::RELAY_ACCOUNT
                && message.to == DEFAULT_CONTACT_ADDRESS
                && message.reply_to == "ada@example.com"
                && message.subject == "New Message from Ada"
        })
        .returning(|_, _| Ok(Some("msg-1".to_string())));

    let app = helpers::create_test_app(mailer, helpers::configured_email());
    let (status, body) = helpers::post_contact(app, submission().to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true, "id": "msg-1" }));
}

#[tokio::test]
async fn test_configured_destination_receives_message() {
    let mut mailer = MockMailer::new();
    mailer
        .expect_send()
        .times(1)
        .withf(|_, message| message.to == "inbox@example.org")
        .returning(|_, _| Ok(None));

    let mut email = helpers::configured_email();
    email.contact_address = Some("inbox@example.org".to_string());

    let app = helpers::create_test_app(mailer, email);
    let (status, body) = helpers::post_contact(app, submission().to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true, "id": null }));
}

#[tokio::test]
async fn test_provider_failure_is_generic() {
    let mut mailer = MockMailer::new();
    mailer
        .expect_send()
        .times(1)
        .returning(|_, _| Err(anyhow::anyhow!("421 4.7.0 Try again later, closing connection")));

    let app = helpers::create_test_app(mailer, helpers::configured_email());
    let (status, body) = helpers::post_contact(app, submission().to_string()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Unexpected error" }));
    assert!(!body.to_string().contains("Try again later"));
}

#[tokio::test]
async fn test_health_and_fallback() {
    let app = helpers::create_test_app(helpers::unreachable_mailer(), Default::default());

    let response = app
        .clone()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(Request::get("/projects").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!({ "error": "Not found" }));
}
