// SPDX-License-Identifier: MIT

//! Tumar-Watch daemon
//!
//! Polls the Tumar program listing and announces each newly published
//! program once to a Telegram channel.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tumar_watch::{
    config::Config,
    services::{CredentialManager, TelegramNotifier, TumarClient},
    store::FileStore,
    watcher::Watcher,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(
        poll_interval_secs = config.poll_interval.as_secs(),
        "Starting Tumar-Watch"
    );

    let store = FileStore::new(config.tokens_file.clone(), config.known_ids_file.clone());

    let api = TumarClient::new(
        config.api_url.clone(),
        config.lang.clone(),
        config.request_timeout,
    )?;

    let notifier = TelegramNotifier::new(
        config.bot_token.clone(),
        config.channel_id.clone(),
        config.request_timeout,
    )?;

    let auth = CredentialManager::initialize(
        api.clone(),
        store.clone(),
        &config.auth_code,
        config.refresh_buffer_secs,
    )
    .await?;

    let watcher = Watcher::bootstrap(api, auth, notifier, store, config.poll_interval).await?;
    tracing::info!("Bootstrap complete, entering steady state");

    watcher.run().await?;
    Ok(())
}

/// Initialize structured logging with an env-filter override.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer().with_target(false);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("tumar_watch=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
