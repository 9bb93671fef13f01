use crate::core::error::PollError;
use crate::core::models::Homework;
use crate::core::notifications::StatusNotifier;
use crate::core::response;
use crate::providers::HomeworkProvider;
use std::sync::Arc;
use std::time::Duration;

/// Fetches the answer and runs it through the validation chain.
pub async fn check_latest(
    provider: &dyn HomeworkProvider,
    from_date: i64,
) -> Result<Homework, PollError> {
    let answer = provider.fetch_statuses(from_date).await?;
    response::latest_homework(&answer)
}

pub fn error_message(error: &PollError) -> String {
    format!("Сбой в работе программы: {}", error)
}

pub struct Poller {
    provider: Arc<dyn HomeworkProvider>,
    notifier: Arc<dyn StatusNotifier>,
    from_date: i64,
    retry_period: Duration,
    last_status: String,
    last_error: String,
}

impl Poller {
    pub fn new(
        provider: Arc<dyn HomeworkProvider>,
        notifier: Arc<dyn StatusNotifier>,
        from_date: i64,
        retry_period: Duration,
    ) -> Self {
        Self {
            provider,
            notifier,
            from_date,
            retry_period,
            last_status: String::new(),
            last_error: String::new(),
        }
    }

    pub async fn run(mut self) {
        tracing::info!(
            provider = self.provider.name(),
            notifier = self.notifier.name(),
            from_date = self.from_date,
            "Polling loop started (interval: {:?})",
            self.retry_period
        );

        loop {
            // Errors are already reported inside poll_once.
            let _ = self.poll_once().await;
            tokio::time::sleep(self.retry_period).await;
        }
    }

    /// One iteration without the sleep. `from_date` stays at its start value.
    pub async fn poll_once(&mut self) -> Result<String, PollError> {
        match self.status_message().await {
            Ok(message) => {
                self.report_status(&message).await;
                Ok(message)
            }
            Err(error) => {
                self.report_error(&error).await;
                Err(error)
            }
        }
    }

    async fn status_message(&self) -> Result<String, PollError> {
        let answer = self.provider.fetch_statuses(self.from_date).await?;
        let homeworks = response::validate(&answer)?;
        let latest = response::extract_latest(homeworks)?;
        response::parse_status(latest)
    }

    async fn report_status(&mut self, message: &str) {
        // A success ends the failure streak, so the next failure is reported again.
        self.last_error.clear();

        if message == self.last_status {
            tracing::debug!("Homework status unchanged");
            return;
        }

        if self.notify(message).await {
            self.last_status = message.to_string();
        }
    }

    async fn report_error(&mut self, error: &PollError) {
        let message = error_message(error);
        tracing::error!(kind = error.kind(), "{}", message);

        if message == self.last_error {
            tracing::debug!("Same failure as last time, not notifying");
            return;
        }

        if self.notify(&message).await {
            self.last_error = message;
        }
    }

    /// Returns whether the message was delivered. Never fails.
    async fn notify(&self, text: &str) -> bool {
        match self.notifier.send(text).await {
            Ok(()) => {
                tracing::debug!(notifier = self.notifier.name(), "Сообщение успешно отправлено");
                true
            }
            Err(e) => {
                tracing::error!(
                    notifier = self.notifier.name(),
                    error = %e,
                    "Сообщение не удалось отправить"
                );
                false
            }
        }
    }
}
