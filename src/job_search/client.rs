// src/job_search/client.rs
use anyhow::{Context, Result};
use reqwest::Client;
use tracing::{info, warn};

use super::types::{reshape_item, JobPosting, JobSearchQuery};
use crate::types::response::{RawJobItem, RunEnvelope, RunStatus};

const ACTOR_ID: &str = "job-postings-scraper";
const POLL_INTERVAL_SECS: u64 = 2;
const MAX_POLL_ATTEMPTS: u32 = 30;
const DEFAULT_RESULT_LIMIT: usize = 20;

pub struct ScrapeClient {
    client: Client,
    base_url: String,
    token: String,
}

impl ScrapeClient {
    pub fn new(base_url: String, token: String, timeout_seconds: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url,
            token,
        })
    }

    /// Run a job search end to end: start the scraping run, wait for it to
    /// finish, fetch the dataset and reshape the items.
    pub async fn search(&self, query: &JobSearchQuery) -> Result<Vec<JobPosting>> {
        let run = self.start_run(query).await?;
        info!("Started scraping run: {}", run.id);

        let finished = self.wait_for_run(&run.id).await?;
        let dataset_id = finished
            .default_dataset_id
            .ok_or_else(|| anyhow::anyhow!("Scraping run {} has no dataset", finished.id))?;

        let items = self.fetch_items(&dataset_id).await?;
        let limit = query.limit.unwrap_or(DEFAULT_RESULT_LIMIT);

        let postings: Vec<JobPosting> = items
            .iter()
            .filter_map(reshape_item)
            .take(limit)
            .collect();

        info!(
            "Job search for '{}' returned {} postings ({} raw items)",
            query.keywords,
            postings.len(),
            items.len()
        );

        Ok(postings)
    }

    async fn start_run(&self, query: &JobSearchQuery) -> Result<RunStatus> {
        let url = format!("{}/acts/{}/runs?token={}", self.base_url, ACTOR_ID, self.token);

        let payload = serde_json::json!({
            "keywords": query.keywords,
            "location": query.location,
            "maxItems": query.limit.unwrap_or(DEFAULT_RESULT_LIMIT),
        });

        let response = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .context("Failed to start scraping run")?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            anyhow::bail!("Scraping service returned status {}: {}", status, error_text);
        }

        let envelope: RunEnvelope = response
            .json()
            .await
            .context("Failed to parse run start response")?;

        Ok(envelope.data)
    }

    /// Poll the run status with a fixed delay and a bounded attempt count.
    async fn wait_for_run(&self, run_id: &str) -> Result<RunStatus> {
        let url = format!("{}/actor-runs/{}?token={}", self.base_url, run_id, self.token);

        for attempt in 1..=MAX_POLL_ATTEMPTS {
            let run: RunEnvelope = self
                .client
                .get(&url)
                .send()
                .await
                .context("Failed to poll scraping run")?
                .json()
                .await
                .context("Failed to parse run status response")?;

            match run.data.status.as_str() {
                "SUCCEEDED" => return Ok(run.data),
                "FAILED" | "ABORTED" | "TIMED-OUT" => {
                    anyhow::bail!("Scraping run {} ended with status {}", run_id, run.data.status)
                }
                other => {
                    // READY and RUNNING keep polling
                    if attempt % 5 == 0 {
                        warn!(
                            "Scraping run {} still {} after {} polls",
                            run_id, other, attempt
                        );
                    }
                }
            }

            tokio::time::sleep(std::time::Duration::from_secs(POLL_INTERVAL_SECS)).await;
        }

        anyhow::bail!(
            "Scraping run {} did not finish within {} polls",
            run_id,
            MAX_POLL_ATTEMPTS
        )
    }

    async fn fetch_items(&self, dataset_id: &str) -> Result<Vec<RawJobItem>> {
        let url = format!(
            "{}/datasets/{}/items?token={}",
            self.base_url, dataset_id, self.token
        );

        let items: Vec<RawJobItem> = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to fetch scraped items")?
            .json()
            .await
            .context("Failed to parse scraped items")?;

        Ok(items)
    }
}
