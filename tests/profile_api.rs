//! Profile, handle, chat, and misconduct endpoints over HTTP.

mod common;

use axum::http::{Method, StatusCode};
use rust_decimal_macros::dec;
use serde_json::json;

use advisor_place::adapters::chat::MockChatProvider;
use advisor_place::ports::ChatError;
use common::{money, TestApp};

#[tokio::test]
async fn profile_update_recomputes_derived_values() {
    let app = TestApp::new();
    let (user, token) = app.member_with_token(Some("alice")).await;
    let uri = format!("/api/user/profile/{}/", user.id);

    let (status, body) = app
        .patch(
            &uri,
            &token,
            json!({
                "metro": 1,
                "primary_annual_income": "120000",
                "variable_monthly_income": 1000,
                "secondary_monthly_income": 500,
                "savings_assets": 100000,
                "property_assets": 1100,
                "misc_assets": 1100,
                "loan_liabilities": 1100,
                "credit_card_liabilities": 1100,
                "misc_liabilities": 1100,
                "net_worth": 1,
                "handle": "mallory"
            }),
        )
        .await;

    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(money(&body["total_annual_income"]), Some(dec!(138000)));
    assert_eq!(money(&body["total_assets"]), Some(dec!(102200)));
    assert_eq!(money(&body["total_liabilities"]), Some(dec!(3300)));
    assert_eq!(money(&body["net_worth"]), Some(dec!(98900)));
    assert_eq!(body["handle"], "alice");
    assert_eq!(body["metro"]["name"], "Seattle");
    assert!(body.get("email").is_none());
}

#[tokio::test]
async fn null_clears_an_input_and_its_derived_value() {
    let app = TestApp::new();
    let (user, token) = app.member_with_token(Some("alice")).await;
    let uri = format!("/api/user/profile/{}/", user.id);

    app.patch(
        &uri,
        &token,
        json!({ "loan_liabilities": 10, "credit_card_liabilities": 20, "misc_liabilities": 30 }),
    )
    .await;
    let (status, body) = app
        .patch(&uri, &token, json!({ "misc_liabilities": null }))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["misc_liabilities"].is_null());
    assert!(body["total_liabilities"].is_null());
    assert_eq!(money(&body["loan_liabilities"]), Some(dec!(10)));
}

#[tokio::test]
async fn totals_that_outgrow_storage_are_a_bad_request() {
    let app = TestApp::new();
    let (user, token) = app.member_with_token(Some("alice")).await;

    let (status, body) = app
        .patch(
            &format!("/api/user/profile/{}/", user.id),
            &token,
            json!({
                "primary_annual_income": "9999999999.99",
                "variable_monthly_income": "9999999999.99",
                "secondary_monthly_income": "9999999999.99"
            }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST, "{}", body);
    assert_eq!(body["code"], "VALIDATION_FAILED");
    assert_eq!(body["details"]["field"], "total_annual_income");
}

#[tokio::test]
async fn members_cannot_edit_each_other() {
    let app = TestApp::new();
    let (_, alice_token) = app.member_with_token(Some("alice")).await;
    let bob = app.member(Some("bob"));

    let (status, _) = app
        .patch(
            &format!("/api/user/profile/{}/", bob.id),
            &alice_token,
            json!({ "age": 30 }),
        )
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn invalid_inputs_are_rejected() {
    let app = TestApp::new();
    let (user, token) = app.member_with_token(Some("alice")).await;
    let uri = format!("/api/user/profile/{}/", user.id);

    let (unknown_metro, body) = app.patch(&uri, &token, json!({ "metro": 999 })).await;
    assert_eq!(unknown_metro, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], "metro");

    let (bad_gender, _) = app.patch(&uri, &token, json!({ "gender": "robot" })).await;
    assert_eq!(bad_gender, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn any_member_can_view_a_public_profile() {
    let app = TestApp::new();
    let (_, token) = app.member_with_token(Some("alice")).await;
    let bob = app.member(Some("bob"));

    let (status, body) = app.get(&format!("/api/user/profile/{}/", bob.id), &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["handle"], "bob");

    let (missing, _) = app.get("/api/user/profile/not-a-uuid/", &token).await;
    assert_eq!(missing, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn check_handle_ignores_the_target_users_own_handle() {
    let app = TestApp::new();
    let (alice, token) = app.member_with_token(Some("alice")).await;
    app.member(Some("bob"));
    let uri = format!("/api/user/check_handle/{}/", alice.id);

    let (_, own) = app.post(&uri, Some(&token), json!({ "handle": "alice" })).await;
    let (_, taken) = app.post(&uri, Some(&token), json!({ "handle": "bob" })).await;
    let (_, free) = app.post(&uri, Some(&token), json!({ "handle": "carol" })).await;

    assert_eq!(own["available"], true);
    assert_eq!(taken["available"], false);
    assert_eq!(free["available"], true);
}

#[tokio::test]
async fn update_handle_conflicts_and_renames_chat_user() {
    let app = TestApp::new();
    let (alice, token) = app.member_with_token(Some("alice")).await;
    app.member(Some("bob"));

    let (status, chat) = app
        .post(
            &format!("/api/user/chat_user/{}/", alice.id),
            Some(&token),
            json!({ "agreed_to_terms": true }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let chat_engine_id = chat["chat_user"]["chat_engine_id"].clone();

    let uri = format!("/api/user/update_handle/{}/", alice.id);
    let (conflict, body) = app
        .send(Method::PUT, &uri, Some(&token), Some(json!({ "handle": "bob" })))
        .await;
    assert_eq!(conflict, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "HANDLE_TAKEN");

    let (status, body) = app.patch(&uri, &token, json!({ "handle": "alice_2" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["handle"], "alice_2");
    assert_eq!(body["chat_user"]["username"], "alice_2");
    assert_eq!(body["chat_user"]["chat_engine_id"], chat_engine_id);
}

#[tokio::test]
async fn invalid_handles_are_rejected() {
    let app = TestApp::new();
    let (alice, token) = app.member_with_token(Some("alice")).await;

    let (status, _) = app
        .patch(
            &format!("/api/user/update_handle/{}/", alice.id),
            &token,
            json!({ "handle": "9lives" }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn chat_user_is_created_once_for_another_member() {
    let app = TestApp::new();
    let (_, token) = app.member_with_token(Some("alice")).await;
    let bob = app.member(Some("bob"));
    let uri = format!("/api/user/chat_user/{}/", bob.id);

    let (first, body) = app.post(&uri, Some(&token), json!({})).await;
    let (second, again) = app.post(&uri, Some(&token), json!({})).await;

    assert_eq!(first, StatusCode::CREATED);
    assert_eq!(second, StatusCode::CREATED);
    assert_eq!(body["chat_user"]["username"], "bob");
    assert_eq!(body["chat_user"]["password"], again["chat_user"]["password"]);
    assert_eq!(app.chat.user_count(), 1);
}

#[tokio::test]
async fn chat_user_requires_a_handle() {
    let app = TestApp::new();
    let (_, token) = app.member_with_token(Some("alice")).await;
    let nameless = app.member(None);

    let (status, _) = app
        .post(&format!("/api/user/chat_user/{}/", nameless.id), Some(&token), json!({}))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(app.chat.user_count(), 0);
}

#[tokio::test]
async fn chat_provider_errors_surface_as_bad_request() {
    let app = TestApp::with_chat(
        MockChatProvider::new().with_error(ChatError::rejected("Username is taken")),
    );
    let (alice, token) = app.member_with_token(Some("alice")).await;

    let (status, body) = app
        .post(&format!("/api/user/chat_user/{}/", alice.id), Some(&token), json!({}))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "CHAT_PROVIDER_ERROR");
}

#[tokio::test]
async fn chat_terms_need_an_existing_chat_user() {
    let app = TestApp::new();
    let (alice, token) = app.member_with_token(Some("alice")).await;
    let uri = format!("/api/user/chat_user_terms/{}/", alice.id);

    let (missing, _) = app.post(&uri, Some(&token), json!({ "agreed_to_terms": true })).await;
    assert_eq!(missing, StatusCode::NOT_FOUND);

    app.post(&format!("/api/user/chat_user/{}/", alice.id), Some(&token), json!({}))
        .await;
    let (status, body) = app.post(&uri, Some(&token), json!({ "agreed_to_terms": true })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["chat_user"]["agreed_to_terms"], true);
}

#[tokio::test]
async fn misconduct_reports_are_stored_and_mailed() {
    let app = TestApp::new();
    let (alice, token) = app.member_with_token(Some("alice")).await;
    let bob = app.member(Some("bob"));

    let (status, _) = app
        .post(
            "/api/user/report_misconduct/",
            Some(&token),
            json!({ "handle": "bob", "description": "spam" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let reports = app.store.misconduct_reports();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].plaintiff_id, alice.id);
    assert_eq!(reports[0].defendant_id, bob.id);
    assert!(app
        .mailer
        .messages()
        .iter()
        .any(|m| m.to.contains(&"admin@advisor.test".to_string())));

    let (unknown, _) = app
        .post(
            "/api/user/report_misconduct/",
            Some(&token),
            json!({ "handle": "ghost", "description": "?" }),
        )
        .await;
    assert_eq!(unknown, StatusCode::NOT_FOUND);

    let (self_report, _) = app
        .post(
            "/api/user/report_misconduct/",
            Some(&token),
            json!({ "handle": "alice", "description": "me" }),
        )
        .await;
    assert_eq!(self_report, StatusCode::BAD_REQUEST);
}
