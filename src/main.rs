use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod core;
mod daemon;
mod providers;

use crate::core::credentials::Credentials;
use crate::core::settings::{Config, Settings};

#[derive(Parser)]
#[command(name = "homework-bot")]
#[command(author, version, about = "Telegram bot that reports Practicum homework review status")]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Poll the review API and notify the Telegram chat on changes
    Run {
        /// Settings file (default: <config dir>/homework-bot/config.toml)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Unix timestamp to query from (default: now). Fixed for the whole run.
        #[arg(long)]
        from_date: Option<i64>,
    },

    /// Query the review API once and print the message that would be sent
    Check {
        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Settings file (default: <config dir>/homework-bot/config.toml)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Unix timestamp to query from (default: now)
        #[arg(long)]
        from_date: Option<i64>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn load_config(path: Option<&std::path::Path>) -> anyhow::Result<Config> {
    let settings = Settings::load(path)?;
    settings.validate()?;

    let credentials = match Credentials::from_env() {
        Ok(credentials) => credentials,
        Err(e) => {
            tracing::error!(error = %e, "Missing required configuration, exiting");
            return Err(e.into());
        }
    };

    Ok(Config {
        settings,
        credentials,
    })
}

fn now_timestamp() -> i64 {
    chrono::Utc::now().timestamp()
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // A missing .env is fine; real environment variables take precedence.
    let _ = dotenvy::dotenv();

    match cli.command {
        Commands::Run { config, from_date } => {
            init_logging(cli.debug);
            let config = load_config(config.as_deref())?;
            daemon::run(config, from_date.unwrap_or_else(now_timestamp)).await
        }
        Commands::Check {
            json,
            config,
            from_date,
        } => {
            init_logging(cli.debug);
            cli::check::run(json, config.as_deref(), from_date.unwrap_or_else(now_timestamp))
                .await
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
    }
}
