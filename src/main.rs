use std::net::TcpListener;

use anyhow::Context;

use waitlist::app;
use waitlist::client::WaitlistClient;
use waitlist::settings::Settings;
use waitlist::telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("Failed to load settings")?;

    let subscriber = telemetry::create_subscriber(settings.app.log_filter(), std::io::stdout);
    telemetry::set_subscriber(subscriber)?;

    let waitlist_client = WaitlistClient::from_settings(&settings.supabase)?;

    let listener = TcpListener::bind(settings.app.addr())?;
    tracing::info!(addr = ?listener.local_addr()?, "Listening");

    app::run(listener, waitlist_client)?
        .await
        .context("Failed to run app")
}
