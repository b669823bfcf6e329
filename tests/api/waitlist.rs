use reqwest::StatusCode;

use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::helpers::{duplicate_body, JoinForm, TestApp};

#[tokio::test]
async fn success_shows_the_banner_and_clears_the_input() {
    let app = TestApp::spawn().await;
    app.store_accepts("new@example.com").await;

    let res = app
        .join(&JoinForm::new("new@example.com"))
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::OK, res.status());
    let html = res.text().await.unwrap();
    assert!(html.contains("id=\"success-banner\""));
    assert!(html.contains("name=\"email\" value=\"\""));
}

#[tokio::test]
async fn inserts_the_trimmed_email_once() {
    let app = TestApp::spawn().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/waitlist"))
        .and(header("apikey", "TestAnonKey"))
        .and(body_json(serde_json::json!([{ "email": "spaced@example.com" }])))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": 7,
            "email": "spaced@example.com",
        })))
        .expect(1)
        .mount(&app.store_server)
        .await;

    let res = app
        .join(&JoinForm::new("  spaced@example.com  "))
        .await
        .unwrap();

    assert_eq!(StatusCode::OK, res.status());
}

#[tokio::test]
async fn duplicate_keeps_the_input_and_explains() {
    let app = TestApp::spawn().await;
    app.store_fails(409, duplicate_body()).await;

    let res = app
        .join(&JoinForm::new("taken@example.com"))
        .await
        .unwrap();

    assert_eq!(StatusCode::CONFLICT, res.status());
    let html = res.text().await.unwrap();
    assert!(html.contains("This email is already on the waitlist!"));
    assert!(html.contains("value=\"taken@example.com\""));
    assert!(!html.contains("id=\"success-banner\""));
}

#[tokio::test]
async fn store_failure_keeps_the_input_and_asks_to_retry() {
    let app = TestApp::spawn().await;
    app.store_fails(500, serde_json::json!({ "message": "boom" }))
        .await;

    let res = app
        .join(&JoinForm::new("retry@example.com"))
        .await
        .unwrap();

    assert_eq!(StatusCode::BAD_GATEWAY, res.status());
    let html = res.text().await.unwrap();
    assert!(html.contains("Something went wrong. Please try again."));
    assert!(html.contains("value=\"retry@example.com\""));
}

#[tokio::test]
async fn invalid_input_never_reaches_the_store() {
    let app = TestApp::spawn().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&app.store_server)
        .await;

    let test_cases = vec![
        (JoinForm { email: None }, "missing email"),
        (JoinForm::new(""), "empty email"),
        (JoinForm::new("   "), "blank email"),
        (JoinForm::new("not-an-email"), "malformed email"),
    ];

    for (form, description) in test_cases {
        let res = app.join(&form).await.unwrap();

        assert_eq!(
            StatusCode::BAD_REQUEST,
            res.status(),
            "Did not reject {}",
            description
        );
        let html = res.text().await.unwrap();
        assert!(
            html.contains("Please enter a valid email address."),
            "No inline error for {}",
            description
        );
    }
}

#[tokio::test]
async fn unconfigured_store_simulates_success() {
    let app = TestApp::spawn_unconfigured().await;

    let res = app.join_api(&JoinForm::new("a@b.com")).await.unwrap();

    assert_eq!(StatusCode::CREATED, res.status());
    let entry: serde_json::Value = res.json().await.unwrap();
    assert_eq!("mock-id", entry["id"]);
    assert_eq!("a@b.com", entry["email"]);
}

#[tokio::test]
async fn api_returns_the_stored_entry() {
    let app = TestApp::spawn().await;
    app.store_accepts("api@example.com").await;

    let res = app.join_api(&JoinForm::new("api@example.com")).await.unwrap();

    assert_eq!(StatusCode::CREATED, res.status());
    let entry: serde_json::Value = res.json().await.unwrap();
    assert_eq!("1", entry["id"]);
    assert_eq!("api@example.com", entry["email"]);
}

#[tokio::test]
async fn api_reports_duplicates() {
    let app = TestApp::spawn().await;
    app.store_fails(409, duplicate_body()).await;

    let res = app
        .join_api(&JoinForm::new("taken@example.com"))
        .await
        .unwrap();

    assert_eq!(StatusCode::CONFLICT, res.status());
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!("This email is already on the waitlist!", body["error"]);
    assert_eq!("duplicate_email", body["kind"]);
}

#[tokio::test]
async fn api_rejects_invalid_email() {
    let app = TestApp::spawn().await;

    let res = app.join_api(&JoinForm::new("nope")).await.unwrap();

    assert_eq!(StatusCode::BAD_REQUEST, res.status());
}

#[tokio::test]
async fn api_reports_store_failures() {
    let app = TestApp::spawn().await;
    app.store_fails(503, serde_json::json!({})).await;

    let res = app.join_api(&JoinForm::new("down@example.com")).await.unwrap();

    assert_eq!(StatusCode::BAD_GATEWAY, res.status());
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!("unknown", body["kind"]);
}
