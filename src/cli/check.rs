use crate::core::credentials;
use crate::core::models::Homework;
use crate::core::settings::Settings;
use crate::daemon::{check_latest, error_message};
use crate::providers::{HomeworkProvider, PracticumProvider};
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct CheckOutput {
    provider: &'static str,
    from_date: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    homework: Option<Homework>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<CheckError>,
    #[serde(with = "chrono::serde::ts_seconds")]
    checked_at: DateTime<Utc>,
}

#[derive(Serialize)]
struct CheckError {
    kind: &'static str,
    message: String,
}

/// Runs the poll pipeline once and prints what the bot would send. Nothing is
/// sent to Telegram.
pub async fn run(json: bool, config: Option<&Path>, from_date: i64) -> Result<()> {
    let settings = Settings::load(config)?;
    settings.validate()?;

    let token = credentials::practicum_token_from_env()?;
    let provider = PracticumProvider::new(&settings.api, token)?;

    let result = check_latest(&provider, from_date).await;

    let output = match result {
        Ok(homework) => CheckOutput {
            provider: provider.name(),
            from_date,
            message: Some(homework.status_message()),
            homework: Some(homework),
            error: None,
            checked_at: Utc::now(),
        },
        Err(e) => CheckOutput {
            provider: provider.name(),
            from_date,
            homework: None,
            message: None,
            error: Some(CheckError {
                kind: e.kind(),
                message: error_message(&e),
            }),
            checked_at: Utc::now(),
        },
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_text_output(&output);
    }

    Ok(())
}

fn print_text_output(output: &CheckOutput) {
    println!("{} (from_date {})", output.provider, output.from_date);

    if let Some(error) = &output.error {
        println!("  Error: {}", error.message);
        return;
    }

    if let Some(homework) = &output.homework {
        println!("  {:<8} {}", "Name:", homework.name);
        println!("  {:<8} {}", "Status:", homework.status.code());
    }

    if let Some(message) = &output.message {
        println!("  {}", message);
    }
}
