use std::time::Duration;

use anyhow::Context;

use async_trait::async_trait;

use chrono::Utc;

use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode};

use secrecy::Secret;

use serde::Deserialize;

use url::Url;

use super::WaitlistStore;
use crate::domain::{EmailAddress, NewWaitlistEntry, WaitlistEntry};
use crate::error::{Error, Result, UNIQUE_VIOLATION};
use crate::settings::SupabaseSettings;

const WAITLIST_TABLE_PATH: &str = "rest/v1/waitlist";

const APIKEY_HEADER: &str = "apikey";
const PREFER_HEADER: &str = "Prefer";
const RETURN_REPRESENTATION: &str = "return=representation";
/// Makes PostgREST answer with a single object instead of an array
const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

/// Identifier given to entries that were never persisted
pub const MOCK_ENTRY_ID: &str = "mock-id";

/// Client for the hosted `waitlist` table.
///
/// Built once at startup. Without credentials it stays `Unconfigured` and simulates
/// successful inserts so the page remains usable.
#[derive(Debug)]
pub struct WaitlistClient {
    backend: Backend,
}

#[derive(Debug)]
enum Backend {
    Remote {
        client: Client,
        insert_url: Url,
        anon_key: Secret<String>,
    },
    Unconfigured {
        simulated_delay: Duration,
    },
}

impl WaitlistClient {
    pub fn new(api_base_url: Url, anon_key: Secret<String>, api_timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(api_timeout)
            .build()
            .context("Failed to build http client")?;

        let insert_url = with_trailing_slash(api_base_url)
            .join(WAITLIST_TABLE_PATH)
            .context("Failed to create waitlist endpoint URL")?;

        Ok(Self {
            backend: Backend::Remote {
                client,
                insert_url,
                anon_key,
            },
        })
    }

    /// A client with no backend that answers every insert with a placeholder entry
    pub fn unconfigured(simulated_delay: Duration) -> Self {
        Self {
            backend: Backend::Unconfigured { simulated_delay },
        }
    }

    pub fn from_settings(settings: &SupabaseSettings) -> anyhow::Result<Self> {
        match (settings.url()?, settings.anon_key()) {
            (Some(url), Some(anon_key)) => {
                tracing::info!(store.url = %url, "Persisting waitlist submissions to Supabase");
                Self::new(url, anon_key, settings.timeout())
            }
            (url, _) => {
                let missing = if url.is_none() {
                    "supabase.url"
                } else {
                    "supabase.anon_key"
                };
                let error = Error::ConfigurationMissing(missing);
                tracing::warn!(
                    error.kind = %error.kind(),
                    "{}. Waitlist submissions will be simulated and NOT persisted",
                    error
                );
                Ok(Self::unconfigured(settings.mock_delay()))
            }
        }
    }

    /// Whether inserts reach a real store
    pub fn is_configured(&self) -> bool {
        matches!(self.backend, Backend::Remote { .. })
    }

    #[tracing::instrument(
        name = "Add email to waitlist",
        skip(self),
        fields(persisted = tracing::field::Empty)
    )]
    pub async fn add(&self, email: &EmailAddress) -> Result<WaitlistEntry> {
        match &self.backend {
            Backend::Remote {
                client,
                insert_url,
                anon_key,
            } => {
                let entry = insert(client, insert_url, anon_key, email).await?;
                tracing::Span::current().record("persisted", true);
                tracing::info!(persisted = true, "Stored waitlist entry");
                Ok(entry)
            }
            Backend::Unconfigured { simulated_delay } => {
                tokio::time::sleep(*simulated_delay).await;
                tracing::Span::current().record("persisted", false);
                tracing::info!(
                    persisted = false,
                    "Simulated waitlist insert, store is not configured"
                );
                Ok(WaitlistEntry {
                    id: Some(MOCK_ENTRY_ID.into()),
                    email: email.to_string(),
                    created_at: Some(Utc::now()),
                })
            }
        }
    }
}

#[async_trait]
impl WaitlistStore for WaitlistClient {
    async fn add(&self, email: &EmailAddress) -> Result<WaitlistEntry> {
        WaitlistClient::add(self, email).await
    }
}

async fn insert(
    client: &Client,
    insert_url: &Url,
    anon_key: &Secret<String>,
    email: &EmailAddress,
) -> Result<WaitlistEntry> {
    use secrecy::ExposeSecret;

    let body = [NewWaitlistEntry {
        email: email.as_ref(),
    }];

    let res = client
        .post(insert_url.clone())
        .header(APIKEY_HEADER, anon_key.expose_secret())
        .bearer_auth(anon_key.expose_secret())
        .header(PREFER_HEADER, RETURN_REPRESENTATION)
        .header(ACCEPT, SINGLE_OBJECT)
        .json(&body)
        .send()
        .await?;

    let status = res.status();
    if status.is_success() {
        return res
            .json::<WaitlistEntry>()
            .await
            .map_err(|e| Error::Decode(e.to_string()));
    }

    let body = res.text().await?;
    let error = classify_failure(status, &body);
    tracing::warn!(http.status = status.as_u16(), error.kind = %error.kind(), "{}", error);
    Err(error)
}

/// Structured error body returned by PostgREST
#[derive(Debug, Default, Deserialize)]
struct PostgrestError {
    code: Option<String>,
    message: Option<String>,
    details: Option<String>,
}

fn classify_failure(status: StatusCode, body: &str) -> Error {
    let pg_error: PostgrestError = serde_json::from_str(body).unwrap_or_default();

    match pg_error.code {
        Some(code) if code == UNIQUE_VIOLATION => Error::DuplicateEmail,
        code => Error::Store {
            code: code.unwrap_or_else(|| status.as_u16().to_string()),
            message: pg_error
                .message
                .or(pg_error.details)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown").to_string()),
        },
    }
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
