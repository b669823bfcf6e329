use std::net::TcpListener;
use std::time::Duration;

use reqwest::{Client, Method, Response};

use secrecy::Secret;

use serde::Serialize;

use url::Url;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use waitlist::app;
use waitlist::client::WaitlistClient;

#[derive(Debug, Serialize)]
pub struct JoinForm {
    pub email: Option<String>,
}

impl JoinForm {
    pub fn new(email: &str) -> Self {
        Self {
            email: Some(email.to_string()),
        }
    }
}

pub struct TestApp {
    addr: String,

    pub client: Client,
    pub store_server: MockServer,
}

impl TestApp {
    /// Spawn the app against a mock Supabase backend
    pub async fn spawn() -> Self {
        let store_server = MockServer::start().await;

        let waitlist_client = {
            let api_base_url =
                Url::parse(&store_server.uri()).expect("Failed to parse mock server uri");
            let anon_key = Secret::new("TestAnonKey".into());
            let api_timeout = Duration::from_secs(2);

            WaitlistClient::new(api_base_url, anon_key, api_timeout)
                .expect("Failed to create waitlist client")
        };

        Self::spawn_with(waitlist_client, store_server)
    }

    /// Spawn the app with no backend configured
    pub async fn spawn_unconfigured() -> Self {
        let store_server = MockServer::start().await;
        let waitlist_client = WaitlistClient::unconfigured(Duration::from_millis(10));

        Self::spawn_with(waitlist_client, store_server)
    }

    fn spawn_with(waitlist_client: WaitlistClient, store_server: MockServer) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to listen on random port");
        let port = listener.local_addr().unwrap().port();

        let addr = format!("http://127.0.0.1:{}", port);

        let server = app::run(listener, waitlist_client).expect("Failed to spawn app instance");
        let _ = tokio::spawn(server);

        let client = Client::new();

        Self {
            addr,
            client,
            store_server,
        }
    }

    pub fn request(&self, method: Method, url: &str) -> reqwest::RequestBuilder {
        let url = format!("{}/{}", &self.addr, url);
        self.client.request(method, url)
    }

    pub async fn health_check(&self) -> reqwest::Result<Response> {
        self.request(Method::GET, "health_check").send().await
    }

    pub async fn landing(&self) -> reqwest::Result<Response> {
        self.request(Method::GET, "").send().await
    }

    pub async fn join(&self, form: &JoinForm) -> reqwest::Result<Response> {
        self.request(Method::POST, "waitlist")
            .form(form)
            .send()
            .await
    }

    pub async fn join_api(&self, body: &JoinForm) -> reqwest::Result<Response> {
        self.request(Method::POST, "api/waitlist")
            .json(body)
            .send()
            .await
    }

    /// Make the store accept exactly one insert
    pub async fn store_accepts(&self, email: &str) {
        Mock::given(method("POST"))
            .and(path("/rest/v1/waitlist"))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "id": 1,
                "email": email,
                "created_at": "2024-01-01T00:00:00+00:00",
            })))
            .expect(1)
            .mount(&self.store_server)
            .await;
    }

    /// Make the store answer every insert with `status` and `body`
    pub async fn store_fails(&self, status: u16, body: serde_json::Value) {
        Mock::given(method("POST"))
            .and(path("/rest/v1/waitlist"))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.store_server)
            .await;
    }
}

pub fn duplicate_body() -> serde_json::Value {
    serde_json::json!({
        "code": "23505",
        "details": "Key (email)=(taken@example.com) already exists.",
        "hint": null,
        "message": "duplicate key value violates unique constraint \"waitlist_email_key\"",
    })
}
