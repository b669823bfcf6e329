use std::env;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;

use config::{Config, Environment, File};

use secrecy::Secret;

use serde::Deserialize;
use serde_aux::prelude::*;

use url::Url;

/// Runtime environment, either `Dev` for local development, or `Prod` for release
#[derive(Debug)]
pub enum Runtime {
    Dev,
    Prod,
}

impl Runtime {
    pub fn as_str(&self) -> &str {
        match self {
            Runtime::Dev => "dev",
            Runtime::Prod => "prod",
        }
    }
}

impl TryFrom<String> for Runtime {
    type Error = anyhow::Error;

    fn try_from(s: String) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "dev" => Ok(Self::Dev),
            "prod" => Ok(Self::Prod),
            other => anyhow::bail!("{} is not a valid runtime environment", other),
        }
    }
}

/// Application settings wrapper
#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: ApplicationSettings,
    pub supabase: SupabaseSettings,
}

impl Settings {
    /// Load application settings from the settings directory
    pub fn load() -> anyhow::Result<Self> {
        // Get the path to the settings directory
        let path = env::current_dir()?.join("settings");
        // Get the current environment based on the `APP_ENV` environment variable, default to `Dev`
        let runtime: Runtime = env::var("APP_ENV")
            .unwrap_or_else(|_| "dev".into())
            .try_into()?;

        Self::load_from(runtime, &path)
    }
    /// Load application settings from a specified path and runtime
    pub fn load_from(runtime: Runtime, base_path: &Path) -> anyhow::Result<Self> {
        Config::builder()
            // Include the base settings
            .add_source(File::from(base_path.join("base")).required(true))
            // Include the runtime settings
            .add_source(File::from(base_path.join(runtime.as_str())).required(false))
            // Override/include any settings from environment variables
            // NOTE: Should be used for the Supabase credentials. Takes the form `APP_<settings category>__<setting name>`.
            .add_source(
                Environment::with_prefix("app")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
            .context("Failed to load/deserialize settings")
    }
}

#[derive(Debug, Deserialize)]
pub struct ApplicationSettings {
    host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    port: u16,
    #[serde(default = "default_log_filter")]
    log_filter: String,
}

fn default_log_filter() -> String {
    "info".into()
}

impl ApplicationSettings {
    /// The application address to bind to
    pub fn addr(&self) -> (&str, u16) {
        (&self.host, self.port)
    }
    /// The `tracing` filter directive for the application subscriber
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }
}

/// Location of and credential for the hosted `waitlist` table.
///
/// Both `url` and `anon_key` are optional: when either is missing the waitlist client runs
/// in degraded mode instead of failing at startup.
#[derive(Debug, Deserialize)]
pub struct SupabaseSettings {
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    anon_key: Option<Secret<String>>,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    timeout_milliseconds: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    mock_delay_milliseconds: u64,
}

impl SupabaseSettings {
    pub fn new(
        url: Option<String>,
        anon_key: Option<Secret<String>>,
        timeout: Duration,
        mock_delay: Duration,
    ) -> Self {
        Self {
            url,
            anon_key,
            timeout_milliseconds: timeout.as_millis() as u64,
            mock_delay_milliseconds: mock_delay.as_millis() as u64,
        }
    }
    /// The project base URL, `None` when unset or blank
    pub fn url(&self) -> anyhow::Result<Option<Url>> {
        match self.url.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(url) => Url::parse(url)
                .map(Some)
                .context("Failed to parse Supabase URL"),
        }
    }
    /// The anonymous API key, `None` when unset or blank
    pub fn anon_key(&self) -> Option<Secret<String>> {
        use secrecy::ExposeSecret;

        self.anon_key
            .as_ref()
            .filter(|key| !key.expose_secret().trim().is_empty())
            .cloned()
    }
    /// The REST API timeout duration
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_milliseconds)
    }
    /// How long a degraded-mode insert pretends to take
    pub fn mock_delay(&self) -> Duration {
        Duration::from_millis(self.mock_delay_milliseconds)
    }
}
