mod polling;

use crate::core::notifications::TelegramNotifier;
use crate::core::settings::Config;
use crate::providers::PracticumProvider;
use anyhow::Result;
use std::sync::Arc;

pub use polling::{check_latest, error_message, Poller};

/// Builds the collaborators from `config` and polls until the process is killed.
pub async fn run(config: Config, from_date: i64) -> Result<()> {
    let Config {
        settings,
        credentials,
    } = config;

    tracing::info!(
        endpoint = %settings.api.endpoint,
        retry_period_secs = settings.polling.retry_period_secs,
        from_date,
        "Starting homework-bot daemon"
    );

    let provider = PracticumProvider::new(&settings.api, credentials.practicum_token)?;
    let notifier = TelegramNotifier::new(
        &settings.telegram,
        credentials.telegram_token,
        credentials.telegram_chat_id,
    )?;

    Poller::new(
        Arc::new(provider),
        Arc::new(notifier),
        from_date,
        settings.polling.retry_period(),
    )
    .run()
    .await;

    Ok(())
}
