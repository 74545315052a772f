//! Account flows over HTTP: sign up, verification, login, logout, password
//! reset, and the waitlist.

mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use advisor_place::application::handlers::{
    CreateSignUpLinkCommand, CreateSignUpLinkHandler, CreateSignUpLinkResult,
};
use advisor_place::application::handlers::AuthSettings;
use common::{TestApp, PASSWORD, SITE_URL};

async fn issue_sign_up_link(app: &TestApp, email: &str) -> String {
    let handler = CreateSignUpLinkHandler::new(
        app.store.clone(),
        app.store.clone(),
        AuthSettings {
            site_url: SITE_URL.to_string(),
            ..AuthSettings::default()
        },
    );
    match handler
        .handle(CreateSignUpLinkCommand {
            email: email.to_string(),
        })
        .await
        .unwrap()
    {
        CreateSignUpLinkResult::Issued { link, .. } => link.id.to_string(),
        other => panic!("expected a link, got {:?}", other),
    }
}

#[tokio::test]
async fn sign_up_verify_and_view_own_profile() {
    let app = TestApp::new();
    let link = issue_sign_up_link(&app, "new@example.com").await;

    let (status, body) = app
        .post(
            "/api/signup/",
            None,
            json!({ "sign_up_link_uuid": link, "email": "new@example.com", "password": PASSWORD }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    assert_eq!(body["email"], "new@example.com");
    assert_eq!(body["email_verified"], false);

    let token = app.login("new@example.com").await;
    let verify_link = app.last_link_id();

    let (status, _) = app
        .post("/api/verify_email/", Some(&token), json!({ "verify_link_uuid": verify_link }))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, profile) = app.get("/api/profile/", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["email_verified"], true);
    assert!(profile["chat_user"].is_null());
}

#[tokio::test]
async fn sign_up_link_is_single_use() {
    let app = TestApp::new();
    let link = issue_sign_up_link(&app, "once@example.com").await;
    let body = json!({ "sign_up_link_uuid": link, "email": "once@example.com", "password": PASSWORD });

    let (first, _) = app.post("/api/signup/", None, body.clone()).await;
    let (second, error) = app.post("/api/signup/", None, body).await;

    assert_eq!(first, StatusCode::CREATED);
    assert_eq!(second, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_LINK");
}

#[tokio::test]
async fn sign_up_enforces_password_policy() {
    let app = TestApp::new();
    let link = issue_sign_up_link(&app, "weak@example.com").await;

    let (status, body) = app
        .post(
            "/api/signup/",
            None,
            json!({ "sign_up_link_uuid": link, "email": "weak@example.com", "password": "12345678901" }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_FAILED");
}

#[tokio::test]
async fn another_users_verification_link_is_rejected() {
    let app = TestApp::new();
    let (_, alice_token) = app.member_with_token(Some("alice")).await;
    let (_, bob_token) = app.member_with_token(Some("bob")).await;

    let (status, _) = app
        .send(Method::POST, "/api/resend_email_verification/", Some(&alice_token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let alice_link = app.last_link_id();

    let (status, body) = app
        .post("/api/verify_email/", Some(&bob_token), json!({ "verify_link_uuid": alice_link }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_LINK");
}

#[tokio::test]
async fn bad_credentials_get_a_generic_error() {
    let app = TestApp::new();
    let user = app.member(Some("carol"));

    let (wrong_password, body) = app
        .post("/api/api_token_auth/", None, json!({ "email": user.email, "password": "nope-nope" }))
        .await;
    let (unknown_email, other) = app
        .post("/api/api_token_auth/", None, json!({ "email": "ghost@example.com", "password": PASSWORD }))
        .await;

    assert_eq!(wrong_password, StatusCode::BAD_REQUEST);
    assert_eq!(unknown_email, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], other["message"]);
}

#[tokio::test]
async fn logout_revokes_only_the_presented_token() {
    let app = TestApp::new();
    let (user, first) = app.member_with_token(Some("dave")).await;
    let second = app.login(&user.email).await;

    let (status, _) = app.send(Method::POST, "/api/logout/", Some(&first), None).await;
    assert_eq!(status, StatusCode::OK);

    let (revoked, _) = app.get("/api/profile/", &first).await;
    let (still_valid, _) = app.get("/api/profile/", &second).await;
    assert_eq!(revoked, StatusCode::UNAUTHORIZED);
    assert_eq!(still_valid, StatusCode::OK);
}

#[tokio::test]
async fn password_reset_round_trip() {
    let app = TestApp::new();
    let (user, old_token) = app.member_with_token(Some("erin")).await;

    let (status, _) = app
        .post("/api/request_password_reset/", None, json!({ "email": user.email }))
        .await;
    assert_eq!(status, StatusCode::OK);
    let reset_link = app.last_link_id();

    let (status, body) = app
        .post(
            "/api/reset_password/",
            None,
            json!({ "reset_link_uuid": reset_link, "email": user.email, "password": "Another!Pass9" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{}", body);

    let (old_session, _) = app.get("/api/profile/", &old_token).await;
    assert_eq!(old_session, StatusCode::UNAUTHORIZED);

    let (login, body) = app
        .post(
            "/api/api_token_auth/",
            None,
            json!({ "email": user.email, "password": "Another!Pass9" }),
        )
        .await;
    assert_eq!(login, StatusCode::OK);
    assert!(body["token"].is_string());
}

#[tokio::test]
async fn password_reset_request_does_not_reveal_accounts() {
    let app = TestApp::new();

    let (status, _) = app
        .post("/api/request_password_reset/", None, json!({ "email": "nobody@example.com" }))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(app.mailer.messages().is_empty());
}

#[tokio::test]
async fn waitlist_keeps_the_first_answers() {
    let app = TestApp::new();

    let (first, _) = app
        .post(
            "/api/waitlist/",
            None,
            json!({ "email": "wait@example.com", "how_did_you_hear_about_us": "friend", "why_do_you_want_to_join": "budgeting" }),
        )
        .await;
    let (second, body) = app
        .post(
            "/api/waitlist/",
            None,
            json!({ "email": "wait@example.com", "how_did_you_hear_about_us": "ad", "why_do_you_want_to_join": "other" }),
        )
        .await;

    assert_eq!(first, StatusCode::OK);
    assert_eq!(second, StatusCode::OK);
    assert_eq!(body["how_did_you_hear_about_us"], "friend");
    assert_eq!(app.store.waitlist().len(), 1);
}
