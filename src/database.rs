// src/database.rs
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use std::path::PathBuf;
use tracing::info;
use uuid::Uuid;

use crate::types::resume::ResumeRecord;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Account {
    pub id: i64,
    pub email: String,
    pub account_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct StoredResume {
    pub id: String,
    pub account_id: i64,
    pub title: String,
    pub template: String,
    pub payload: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StoredResume {
    /// Deserialize the stored payload back into a resume record.
    pub fn record(&self) -> Result<ResumeRecord> {
        serde_json::from_str(&self.payload)
            .with_context(|| format!("Corrupt resume payload for id: {}", self.id))
    }
}

#[derive(Debug)]
pub struct DatabaseConfig {
    pub database_path: PathBuf,
    pub pool: Option<SqlitePool>,
}

impl DatabaseConfig {
    pub fn new(database_path: PathBuf) -> Self {
        Self {
            database_path,
            pool: None,
        }
    }

    /// Initialize the database connection pool
    pub async fn init_pool(&mut self) -> Result<()> {
        if let Some(parent) = self.database_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .context("Failed to create database directory")?;
        }

        let database_url = format!("sqlite:{}?mode=rwc", self.database_path.display());
        let pool = SqlitePool::connect(&database_url)
            .await
            .context("Failed to connect to SQLite database")?;
        self.pool = Some(pool);

        info!("Database connection pool initialized: {}", database_url);
        Ok(())
    }

    /// Get the database pool
    pub fn pool(&self) -> Result<&SqlitePool> {
        self.pool
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("Database pool not initialized. Call init_pool() first."))
    }

    /// Run database migrations
    pub async fn migrate(&self) -> Result<()> {
        let pool = self.pool()?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS accounts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                email TEXT NOT NULL UNIQUE,
                account_name TEXT NOT NULL,
                created_at TEXT NOT NULL DEFAULT (datetime('now')),
                updated_at TEXT NOT NULL DEFAULT (datetime('now')),
                is_active BOOLEAN NOT NULL DEFAULT TRUE
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_accounts_email
            ON accounts(email);
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS resumes (
                id TEXT PRIMARY KEY,
                account_id INTEGER NOT NULL REFERENCES accounts(id),
                title TEXT NOT NULL,
                template TEXT NOT NULL,
                payload TEXT NOT NULL,
                created_at TEXT NOT NULL DEFAULT (datetime('now')),
                updated_at TEXT NOT NULL DEFAULT (datetime('now'))
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_resumes_account_id
            ON resumes(account_id);
            "#,
        )
        .execute(pool)
        .await?;

        info!("Database migrations completed successfully");
        Ok(())
    }
}

pub struct AccountRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> AccountRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Find account by email
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Account>> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            SELECT id, email, account_name, created_at, updated_at, is_active
            FROM accounts
            WHERE email = ? AND is_active = TRUE
            "#,
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        Ok(account)
    }

    /// Create a new account
    pub async fn create(&self, email: &str, account_name: &str) -> Result<Account> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO accounts (email, account_name, created_at, updated_at, is_active)
            VALUES (?, ?, ?, ?, TRUE)
            "#,
        )
        .bind(email)
        .bind(account_name)
        .bind(now)
        .bind(now)
        .execute(self.pool)
        .await?;

        let account = Account {
            id: result.last_insert_rowid(),
            email: email.to_string(),
            account_name: account_name.to_string(),
            created_at: now,
            updated_at: now,
            is_active: true,
        };

        info!("Created account: {} for email: {}", account_name, email);
        Ok(account)
    }

    /// Get the account for an email, creating one on first sight. The
    /// account name is derived from the local part of the address.
    pub async fn get_or_create(&self, email: &str) -> Result<Account> {
        if let Some(account) = self.find_by_email(email).await? {
            return Ok(account);
        }

        let local_part = email.split('@').next().unwrap_or(email);
        let account_name = crate::utils::normalize_name(local_part);
        self.create(email, &account_name).await
    }

    /// List all active accounts
    pub async fn list_active(&self) -> Result<Vec<Account>> {
        let accounts = sqlx::query_as::<_, Account>(
            r#"
            SELECT id, email, account_name, created_at, updated_at, is_active
            FROM accounts
            WHERE is_active = TRUE
            ORDER BY account_name ASC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(accounts)
    }

    /// Deactivate an account
    pub async fn deactivate(&self, email: &str) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE accounts
            SET is_active = FALSE, updated_at = ?
            WHERE email = ?
            "#,
        )
        .bind(Utc::now())
        .bind(email)
        .execute(self.pool)
        .await?;

        let updated = result.rows_affected() > 0;
        if updated {
            info!("Deactivated account for email: {}", email);
        }

        Ok(updated)
    }
}

pub struct ResumeRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ResumeRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Save a new resume for an account
    pub async fn insert(
        &self,
        account_id: i64,
        title: &str,
        template: &str,
        record: &ResumeRecord,
    ) -> Result<StoredResume> {
        let now = Utc::now();
        let id = Uuid::new_v4().to_string();
        let payload =
            serde_json::to_string(record).context("Failed to serialize resume payload")?;

        sqlx::query(
            r#"
            INSERT INTO resumes (id, account_id, title, template, payload, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(account_id)
        .bind(title)
        .bind(template)
        .bind(&payload)
        .bind(now)
        .bind(now)
        .execute(self.pool)
        .await?;

        info!("Saved resume {} for account {}", id, account_id);

        Ok(StoredResume {
            id,
            account_id,
            title: title.to_string(),
            template: template.to_string(),
            payload,
            created_at: now,
            updated_at: now,
        })
    }

    /// List resumes owned by an account, newest first
    pub async fn list_for_account(&self, account_id: i64) -> Result<Vec<StoredResume>> {
        let resumes = sqlx::query_as::<_, StoredResume>(
            r#"
            SELECT id, account_id, title, template, payload, created_at, updated_at
            FROM resumes
            WHERE account_id = ?
            ORDER BY updated_at DESC
            "#,
        )
        .bind(account_id)
        .fetch_all(self.pool)
        .await?;

        Ok(resumes)
    }

    /// Find one resume, scoped to the owning account
    pub async fn find(&self, account_id: i64, resume_id: &str) -> Result<Option<StoredResume>> {
        let resume = sqlx::query_as::<_, StoredResume>(
            r#"
            SELECT id, account_id, title, template, payload, created_at, updated_at
            FROM resumes
            WHERE id = ? AND account_id = ?
            "#,
        )
        .bind(resume_id)
        .bind(account_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(resume)
    }

    /// Replace the payload of an existing resume
    pub async fn update_payload(
        &self,
        account_id: i64,
        resume_id: &str,
        record: &ResumeRecord,
    ) -> Result<bool> {
        let payload =
            serde_json::to_string(record).context("Failed to serialize resume payload")?;

        let result = sqlx::query(
            r#"
            UPDATE resumes
            SET payload = ?, updated_at = ?
            WHERE id = ? AND account_id = ?
            "#,
        )
        .bind(&payload)
        .bind(Utc::now())
        .bind(resume_id)
        .bind(account_id)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a resume, scoped to the owning account
    pub async fn delete(&self, account_id: i64, resume_id: &str) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM resumes
            WHERE id = ? AND account_id = ?
            "#,
        )
        .bind(resume_id)
        .bind(account_id)
        .execute(self.pool)
        .await?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            info!("Deleted resume {} for account {}", resume_id, account_id);
        }

        Ok(deleted)
    }
}

/// Access-check helpers layered over the repositories
pub struct AccountService<'a> {
    repo: AccountRepository<'a>,
}

impl<'a> AccountService<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self {
            repo: AccountRepository::new(pool),
        }
    }

    /// Validate user access and get account info
    pub async fn validate_user_access(&self, email: &str) -> Result<Option<Account>> {
        match self.repo.find_by_email(email).await? {
            Some(account) => {
                info!("User {} validated for account: {}", email, account.account_name);
                Ok(Some(account))
            }
            None => {
                info!("Access denied for email: {} - not found in accounts table", email);
                Ok(None)
            }
        }
    }

    pub async fn get_or_create(&self, email: &str) -> Result<Account> {
        self.repo.get_or_create(email).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    // Single connection so the in-memory database is shared across queries.
    async fn migrated_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        let config = DatabaseConfig {
            database_path: PathBuf::from(":memory:"),
            pool: Some(pool.clone()),
        };
        config.migrate().await.unwrap();
        pool
    }

    fn sample_record(name: &str) -> ResumeRecord {
        let mut record = ResumeRecord::default();
        record.personal_info.full_name = name.to_string();
        record
    }

    #[tokio::test]
    async fn test_update_payload_replaces_stored_record() {
        let pool = migrated_pool().await;
        let account = AccountRepository::new(&pool)
            .create("ada@example.com", "ada")
            .await
            .unwrap();

        let repo = ResumeRepository::new(&pool);
        let stored = repo
            .insert(account.id, "Draft", "classic-minimal", &sample_record("Ada"))
            .await
            .unwrap();

        let revised = sample_record("Ada Lovelace");
        let updated = repo
            .update_payload(account.id, &stored.id, &revised)
            .await
            .unwrap();
        assert!(updated);

        let reloaded = repo.find(account.id, &stored.id).await.unwrap().unwrap();
        assert_eq!(reloaded.record().unwrap(), revised);
        assert_eq!(reloaded.title, "Draft");
    }

    #[tokio::test]
    async fn test_update_payload_scoped_to_owning_account() {
        let pool = migrated_pool().await;
        let accounts = AccountRepository::new(&pool);
        let owner = accounts.create("ada@example.com", "ada").await.unwrap();
        let other = accounts.create("bob@example.com", "bob").await.unwrap();

        let repo = ResumeRepository::new(&pool);
        let stored = repo
            .insert(owner.id, "Draft", "classic-minimal", &sample_record("Ada"))
            .await
            .unwrap();

        let updated = repo
            .update_payload(other.id, &stored.id, &sample_record("Mallory"))
            .await
            .unwrap();
        assert!(!updated);

        let reloaded = repo.find(owner.id, &stored.id).await.unwrap().unwrap();
        assert_eq!(reloaded.record().unwrap(), sample_record("Ada"));
    }

    #[tokio::test]
    async fn test_update_payload_missing_resume_returns_false() {
        let pool = migrated_pool().await;
        let account = AccountRepository::new(&pool)
            .create("ada@example.com", "ada")
            .await
            .unwrap();

        let updated = ResumeRepository::new(&pool)
            .update_payload(account.id, "no-such-id", &sample_record("Ada"))
            .await
            .unwrap();
        assert!(!updated);
    }
}
