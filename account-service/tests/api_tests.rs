mod common;

use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_health() {
    let app = TestApp::spawn().await;

    let response = app.get("/health").send().await.expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "ok");
}

#[tokio::test]
async fn test_register_success() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/user/register")
        .json(&json!({
            "email": "Nicola@Example.com",
            "password": "pass_word!",
            "username": "nicola",
            "phone": "+39 555 0100",
            "address": ""
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status_code"], 201);
    assert_eq!(body["data"]["user"]["email"], "nicola@example.com");
    assert_eq!(body["data"]["user"]["username"], "nicola");
    assert_eq!(body["data"]["user"]["phone"], "+39 555 0100");
    assert!(body["data"]["user"]["address"].is_null());
    assert!(body["data"]["user"]["id"].is_string());
    assert!(body["data"]["user"].get("password_hash").is_none());

    let token = body["data"]["token"].as_str().unwrap();
    let claims = app.jwt_handler.verify_now(token).expect("Token should verify");
    assert_eq!(claims.subject(), "nicola@example.com");
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::spawn().await;

    let first = app.register("a@x.com", "secret1").await;
    assert_eq!(first.status(), StatusCode::CREATED);

    // Same address, different case
    let response = app.register("A@X.COM", "other-password").await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Email already registered");
    assert_eq!(app.repository.len().await, 1);
}

#[tokio::test]
async fn test_register_validation() {
    let app = TestApp::spawn().await;

    let cases = [
        json!({ "email": "not-an-email", "password": "secret1", "username": "alice" }),
        json!({ "email": "a@x.com", "password": "short", "username": "alice" }),
        json!({ "email": "a@x.com", "password": "secret1", "username": "a" }),
        json!({ "email": "a@x.com", "password": "secret1", "username": "alice", "phone": "1".repeat(21) }),
        json!({ "email": "a@x.com", "password": "secret1", "username": "alice", "address": "x".repeat(201) }),
    ];

    for case in cases {
        let response = app
            .post("/api/user/register")
            .json(&case)
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(
            response.status(),
            StatusCode::UNPROCESSABLE_ENTITY,
            "request {} should be rejected",
            case
        );
    }

    assert!(app.repository.is_empty().await);
}

#[tokio::test]
async fn test_register_login_scenario() {
    let app = TestApp::spawn().await;

    let response = app.register("a@x.com", "secret1").await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body: serde_json::Value = response.json().await.unwrap();
    let registration_token = body["data"]["token"].as_str().unwrap().to_string();
    assert_eq!(
        app.jwt_handler
            .verify_now(&registration_token)
            .unwrap()
            .subject(),
        "a@x.com"
    );

    let wrong_password = app.login("a@x.com", "wrong").await;
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    let wrong_password_body: serde_json::Value = wrong_password.json().await.unwrap();

    let response = app.login("a@x.com", "secret1").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    let login_token = body["data"]["token"].as_str().unwrap().to_string();

    assert_ne!(login_token, registration_token);
    assert_eq!(
        app.jwt_handler.verify_now(&login_token).unwrap().subject(),
        "a@x.com"
    );

    let unknown_email = app.login("b@x.com", "secret1").await;
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);
    let unknown_email_body: serde_json::Value = unknown_email.json().await.unwrap();

    assert_eq!(unknown_email_body, wrong_password_body);
    assert_eq!(
        unknown_email_body["data"]["message"],
        "Invalid email or password"
    );
}

#[tokio::test]
async fn test_blank_password_is_rejected() {
    let app = TestApp::spawn().await;

    let response = app.login("a@x.com", "").await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = app.login("a@x.com", "   ").await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = app.register("a@x.com", "      ").await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(app.repository.is_empty().await);
}

#[tokio::test]
async fn test_profile_with_token() {
    let app = TestApp::spawn().await;

    let response = app.register("a@x.com", "secret1").await;
    let body: serde_json::Value = response.json().await.unwrap();
    let token = body["data"]["token"].as_str().unwrap();
    let user_id = body["data"]["user"]["id"].clone();

    let response = app
        .get_authenticated("/api/user/profile", token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["data"]["id"], user_id);
    assert_eq!(body["data"]["email"], "a@x.com");
}

#[tokio::test]
async fn test_profile_without_valid_token() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/user/profile")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .get_authenticated("/api/user/profile", "invalid.token.here")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["data"]["message"], "Unauthenticated");
}

#[tokio::test]
async fn test_profile_of_unknown_subject() {
    let app = TestApp::spawn().await;

    // Correctly signed, but no such account exists.
    let token = app.jwt_handler.issue_now("ghost@x.com").unwrap().token;

    let response = app
        .get_authenticated("/api/user/profile", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
