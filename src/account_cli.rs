// src/account_cli.rs
use crate::database::{AccountRepository, AccountService, DatabaseConfig};
use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Args)]
pub struct AccountCli {
    #[command(subcommand)]
    pub command: AccountCommand,

    #[arg(long, default_value = "careerpilot.db")]
    pub database_path: PathBuf,
}

#[derive(Subcommand)]
pub enum AccountCommand {
    /// Add a new account for an email
    Add { email: String, account_name: String },
    /// Deactivate an account by email
    Remove { email: String },
    /// List all active accounts
    List,
    /// Check if an email is authorized
    Check { email: String },
    /// Import accounts from a CSV file (email,account_name)
    Import { csv_file: PathBuf },
    /// Initialize the database
    Init,
}

pub async fn handle_account_command(cli: AccountCli) -> Result<()> {
    let mut db_config = DatabaseConfig::new(cli.database_path.clone());
    db_config.init_pool().await?;
    db_config.migrate().await?;

    let pool = db_config.pool()?;
    let account_service = AccountService::new(pool);
    let account_repo = AccountRepository::new(pool);

    match cli.command {
        AccountCommand::Add {
            email,
            account_name,
        } => match account_repo.create(&email, &account_name).await {
            Ok(account) => {
                info!("Account created: {} (id: {})", account.account_name, account.id);
            }
            Err(e) => {
                if e.to_string().contains("UNIQUE constraint failed") {
                    error!("Email '{}' already exists", email);
                } else {
                    error!("Failed to create account: {}", e);
                }
            }
        },

        AccountCommand::Remove { email } => {
            if account_repo.deactivate(&email).await? {
                info!("Account deactivated for: {}", email);
            } else {
                error!("No active account found for: {}", email);
            }
        }

        AccountCommand::List => {
            let accounts = account_repo.list_active().await?;
            info!("{} active accounts", accounts.len());
            for account in accounts {
                println!("{}\t{}\t{}", account.id, account.email, account.account_name);
            }
        }

        AccountCommand::Check { email } => match account_service.validate_user_access(&email).await? {
            Some(account) => {
                println!("Authorized: {} -> {}", email, account.account_name);
            }
            None => {
                println!("Not authorized: {}", email);
            }
        },

        AccountCommand::Import { csv_file } => {
            import_accounts_from_csv(&account_repo, &csv_file).await?;
        }

        AccountCommand::Init => {
            info!("Database initialized at {}", cli.database_path.display());
        }
    }

    Ok(())
}

/// Import accounts from a two-column CSV: email, account_name. Rows that
/// already exist are skipped, not overwritten.
async fn import_accounts_from_csv(
    repo: &AccountRepository<'_>,
    csv_file: &PathBuf,
) -> Result<()> {
    let mut reader = csv::Reader::from_path(csv_file)
        .with_context(|| format!("Failed to open CSV file: {}", csv_file.display()))?;

    let mut imported = 0;
    let mut skipped = 0;

    for record in reader.records() {
        let record = record.context("Failed to read CSV record")?;

        let email = record
            .get(0)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| anyhow::anyhow!("CSV row missing email column"))?;
        let account_name = record
            .get(1)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| anyhow::anyhow!("CSV row missing account_name column"))?;

        if repo.find_by_email(email).await?.is_some() {
            skipped += 1;
            continue;
        }

        repo.create(email, account_name).await?;
        imported += 1;
    }

    info!("Import complete: {} created, {} skipped", imported, skipped);
    Ok(())
}
