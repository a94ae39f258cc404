use anyhow::{Context, Result};
use career_api::account_cli::{handle_account_command, AccountCli};
use career_api::auth::AuthConfig;
use career_api::scoring::{score_resume, CheckKind};
use career_api::{ConfigManager, ResumeRecord};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

#[derive(Parser)]
#[command(name = "careerpilot")]
#[command(about = "Career-services API server and ATS scoring tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the API server
    Serve {
        #[arg(long, env = "PORT", default_value_t = 8080)]
        port: u16,
    },
    /// Score a resume JSON file against the ATS rubric
    Score {
        file: PathBuf,
        #[arg(long, default_value = "classic-minimal")]
        template: String,
    },
    /// Manage user accounts
    Accounts(AccountCli),
}

#[tokio::main]
async fn main() -> Result<()> {
    Registry::default()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or(EnvFilter::new("career_api=INFO,rocket::server=OFF")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve { port } => {
            let auth_config = AuthConfig::from_env()?;

            let config = ConfigManager::load()?;
            config.ensure_directories().await?;

            career_api::start_web_server(config, port, auth_config).await
        }

        Command::Score { file, template } => {
            let content = career_api::utils::read_file_content(&file).await?;
            let record: ResumeRecord = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse resume JSON: {}", file.display()))?;

            let result = score_resume(&record, &template);
            let band = result.band();

            println!("ATS score: {}/100 ({})", result.score, band.label());
            for check in &result.checks {
                let marker = match check.kind {
                    CheckKind::Pass => "✓",
                    CheckKind::Warning => "!",
                    CheckKind::Fail => "✗",
                    CheckKind::Info => "i",
                };
                println!("  {} {}", marker, check.message);
            }

            Ok(())
        }

        Command::Accounts(account_cli) => handle_account_command(account_cli).await,
    }
}
